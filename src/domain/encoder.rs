// ============================================================
// Layer 3 — Feature Encoder
// ============================================================
// Maps month and day tokens to their numeric codes and back.
//
// Codes are 1-based ranks in a fixed canonical ordering:
//   months: jan=1 ... dec=12
//   days:   sun=1 ... sat=7
//
// Training and prediction both go through `encode_category`,
// so a token always becomes the same number on either path.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::fmt;

use crate::domain::error::{Result, ServiceError};

/// Canonical month ordering. Index + 1 is the code.
pub const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun",
    "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Canonical day ordering. Index + 1 is the code.
pub const DAYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Which vocabulary a categorical token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Month,
    Day,
}

impl CategoryKind {
    /// The fixed vocabulary for this kind, in canonical order.
    pub fn vocabulary(self) -> &'static [&'static str] {
        match self {
            CategoryKind::Month => &MONTHS,
            CategoryKind::Day   => &DAYS,
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKind::Month => write!(f, "month"),
            CategoryKind::Day   => write!(f, "day"),
        }
    }
}

/// Encode a token into its 1-based code.
///
/// Matching is exact: tokens are the lowercase three-letter
/// abbreviations listed in `MONTHS` / `DAYS`.
///
/// # Errors
/// `ServiceError::UnknownCategory` if the token is not in the vocabulary.
pub fn encode_category(kind: CategoryKind, token: &str) -> Result<u32> {
    kind.vocabulary()
        .iter()
        .position(|&t| t == token)
        .map(|idx| idx as u32 + 1)
        .ok_or_else(|| ServiceError::UnknownCategory {
            kind,
            token: token.to_string(),
        })
}

/// Decode a 1-based code back into its token.
///
/// # Errors
/// `ServiceError::UnknownCategory` if the code is 0 or past the end.
pub fn decode_category(kind: CategoryKind, code: u32) -> Result<&'static str> {
    let vocab = kind.vocabulary();
    (code as usize)
        .checked_sub(1)
        .and_then(|idx| vocab.get(idx).copied())
        .ok_or_else(|| ServiceError::UnknownCategory {
            kind,
            token: code.to_string(),
        })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_months_are_a_bijection_onto_1_to_12() {
        let codes: HashSet<u32> = MONTHS
            .iter()
            .map(|m| encode_category(CategoryKind::Month, m).unwrap())
            .collect();
        assert_eq!(codes, (1..=12).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_days_are_a_bijection_onto_1_to_7() {
        let codes: HashSet<u32> = DAYS
            .iter()
            .map(|d| encode_category(CategoryKind::Day, d).unwrap())
            .collect();
        assert_eq!(codes, (1..=7).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        for m in MONTHS {
            let a = encode_category(CategoryKind::Month, m).unwrap();
            let b = encode_category(CategoryKind::Month, m).unwrap();
            assert_eq!(a, b);
        }
        for d in DAYS {
            let a = encode_category(CategoryKind::Day, d).unwrap();
            let b = encode_category(CategoryKind::Day, d).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_canonical_positions() {
        assert_eq!(encode_category(CategoryKind::Month, "jan").unwrap(), 1);
        assert_eq!(encode_category(CategoryKind::Month, "dec").unwrap(), 12);
        assert_eq!(encode_category(CategoryKind::Day, "sun").unwrap(), 1);
        assert_eq!(encode_category(CategoryKind::Day, "mon").unwrap(), 2);
        assert_eq!(encode_category(CategoryKind::Day, "sat").unwrap(), 7);
    }

    #[test]
    fn test_decode_round_trips_full_vocabulary() {
        for kind in [CategoryKind::Month, CategoryKind::Day] {
            for &token in kind.vocabulary() {
                let code = encode_category(kind, token).unwrap();
                assert_eq!(decode_category(kind, code).unwrap(), token);
            }
        }
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let err = encode_category(CategoryKind::Month, "smarch").unwrap_err();
        match err {
            ServiceError::UnknownCategory { kind, token } => {
                assert_eq!(kind, CategoryKind::Month);
                assert_eq!(token, "smarch");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(encode_category(CategoryKind::Day, "Mon").is_err());
        assert!(encode_category(CategoryKind::Month, "JAN").is_err());
    }

    #[test]
    fn test_decode_out_of_range() {
        assert!(decode_category(CategoryKind::Month, 0).is_err());
        assert!(decode_category(CategoryKind::Month, 13).is_err());
        assert!(decode_category(CategoryKind::Day, 8).is_err());
    }
}
