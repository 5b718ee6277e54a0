// ============================================================
// Layer 3 — Model Artifact
// ============================================================
// Everything the predictor needs to rebuild a trained model:
//
//   architecture  → layer sizes, to re-create the network
//   standardizer  → the scaling fitted at training time
//   feature_order → column order the weights were trained on
//   weights       → serialized network parameters (opaque bytes)
//
// The artifact is written as a whole by the trainer and read
// as a whole by the predictor. There is no partial update.

use serde::{Deserialize, Serialize};

use crate::domain::observation::FEATURE_ORDER;
use crate::domain::standardizer::Standardizer;

/// Bumped whenever the on-disk layout changes.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Layer sizes of the regression network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Architecture {
    pub input_size:    usize,
    pub hidden_size_1: usize,
    pub hidden_size_2: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub architecture:   Architecture,
    pub standardizer:   Standardizer,
    pub feature_order:  Vec<String>,
    pub weights:        Vec<u8>,
}

impl ModelArtifact {
    pub fn new(architecture: Architecture, standardizer: Standardizer, weights: Vec<u8>) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            architecture,
            standardizer,
            feature_order: FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
            weights,
        }
    }

    /// Check the artifact matches what this build expects.
    /// Returns a description of the first mismatch found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(format!(
                "unsupported artifact format {} (expected {})",
                self.format_version, ARTIFACT_FORMAT_VERSION
            ));
        }
        if self.feature_order != FEATURE_ORDER {
            return Err(format!(
                "artifact feature order {:?} does not match {:?}",
                self.feature_order, FEATURE_ORDER
            ));
        }
        if self.architecture.input_size != FEATURE_ORDER.len() {
            return Err(format!(
                "artifact expects {} inputs, observations have {}",
                self.architecture.input_size,
                FEATURE_ORDER.len()
            ));
        }
        if !self.standardizer.is_consistent() {
            return Err("standardizer parameters are missing or not finite".into());
        }
        if self.weights.is_empty() {
            return Err("artifact contains no weights".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arch() -> Architecture {
        Architecture { input_size: 12, hidden_size_1: 64, hidden_size_2: 32 }
    }

    #[test]
    fn test_new_artifact_validates() {
        let a = ModelArtifact::new(arch(), Standardizer::identity(), vec![1, 2, 3]);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_reordered_features_are_rejected() {
        let mut a = ModelArtifact::new(arch(), Standardizer::identity(), vec![1]);
        a.feature_order.swap(0, 1);
        assert!(a.validate().unwrap_err().contains("feature order"));
    }

    #[test]
    fn test_future_format_is_rejected() {
        let mut a = ModelArtifact::new(arch(), Standardizer::identity(), vec![1]);
        a.format_version = ARTIFACT_FORMAT_VERSION + 1;
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_empty_weights_are_rejected() {
        let a = ModelArtifact::new(arch(), Standardizer::identity(), Vec::new());
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_non_finite_standardizer_is_rejected() {
        let mut a = ModelArtifact::new(arch(), Standardizer::identity(), vec![1]);
        a.standardizer.means[2] = f32::NAN;
        assert!(a.validate().unwrap_err().contains("standardizer"));
    }
}
