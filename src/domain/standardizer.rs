// ============================================================
// Layer 3 — Standardizer
// ============================================================
// Per-column scaling to zero mean and unit variance:
//
//   z = (x - mean) / scale
//
// Column statistics come from aprender's StandardScaler
// (population standard deviation). `scale` is that deviation,
// or 1.0 when the column is constant. Fitted on the training
// partition only, then stored inside the model artifact so the
// predictor applies exactly the same transform.

use aprender::preprocessing::StandardScaler;
use aprender::primitives::Matrix;
use aprender::traits::Transformer;
use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, ServiceError};
use crate::domain::observation::{EncodedFeatures, FEATURE_COUNT};

/// Deviations at or below this are treated as a constant column.
/// Same cut-off StandardScaler uses before dividing.
const MIN_SCALE: f32 = 1e-10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub means:  Vec<f32>,
    pub scales: Vec<f32>,
}

impl Standardizer {
    /// Fit column statistics over `rows`.
    /// An empty slice yields the identity transform.
    pub fn fit(rows: &[EncodedFeatures]) -> Result<Self> {
        if rows.is_empty() {
            return Ok(Self::identity());
        }

        let flat: Vec<f32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        let matrix = Matrix::from_vec(rows.len(), FEATURE_COUNT, flat)
            .map_err(|e| ServiceError::Internal(format!("cannot build feature matrix: {e}")))?;

        let mut scaler = StandardScaler::new();
        scaler
            .fit(&matrix)
            .map_err(|e| ServiceError::Training(format!("cannot fit standardizer: {e}")))?;

        let means  = scaler.mean().to_vec();
        let scales = scaler
            .std()
            .iter()
            // constant column: leave values centred but unscaled
            .map(|&s| if s > MIN_SCALE { s } else { 1.0 })
            .collect();

        let fitted = Self { means, scales };
        if !fitted.is_consistent() {
            return Err(ServiceError::Training(
                "standardizer statistics are not finite; check the input features".into(),
            ));
        }
        Ok(fitted)
    }

    pub fn identity() -> Self {
        Self {
            means:  vec![0.0; FEATURE_COUNT],
            scales: vec![1.0; FEATURE_COUNT],
        }
    }

    pub fn transform(&self, row: &EncodedFeatures) -> EncodedFeatures {
        let mut out = *row;
        for (col, v) in out.iter_mut().enumerate() {
            *v = (*v - self.means[col]) / self.scales[col];
        }
        out
    }

    pub fn transform_all(&self, rows: &[EncodedFeatures]) -> Vec<EncodedFeatures> {
        rows.iter().map(|r| self.transform(r)).collect()
    }

    /// True when there is one finite mean and one finite, positive
    /// scale per feature. Used to reject artifacts that cannot be applied.
    pub fn is_consistent(&self) -> bool {
        self.means.len() == FEATURE_COUNT
            && self.scales.len() == FEATURE_COUNT
            && self.means.iter().all(|m| m.is_finite())
            && self.scales.iter().all(|s| s.is_finite() && *s > 0.0)
    }
}
