use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::observation::EncodedFeatures;

/// One scaled training example: 12 inputs and the burned area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireSample {
    pub features: EncodedFeatures,
    pub area:     f32,
}

impl FireSample {
    pub fn new(features: EncodedFeatures, area: f32) -> Self {
        Self { features, area }
    }
}

pub struct FireDataset {
    samples: Vec<FireSample>,
}

impl FireDataset {
    pub fn new(samples: Vec<FireSample>) -> Self { Self { samples } }

    /// Build samples from parallel feature/target slices.
    pub fn from_parts(features: &[EncodedFeatures], targets: &[f32]) -> Self {
        let samples = features
            .iter()
            .zip(targets)
            .map(|(f, &t)| FireSample::new(*f, t))
            .collect();
        Self { samples }
    }

    pub fn sample_count(&self) -> usize { self.samples.len() }

    pub fn samples(&self) -> &[FireSample] { &self.samples }
}

impl Dataset<FireSample> for FireDataset {
    fn get(&self, index: usize) -> Option<FireSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::FEATURE_COUNT;

    #[test]
    fn test_from_parts_pairs_rows_with_targets() {
        let features = vec![[1.0; FEATURE_COUNT], [2.0; FEATURE_COUNT]];
        let ds = FireDataset::from_parts(&features, &[0.5, 3.0]);
        assert_eq!(ds.len(), 2);
        let second = ds.get(1).unwrap();
        assert_eq!(second.features[0], 2.0);
        assert_eq!(second.area, 3.0);
        assert!(ds.get(2).is_none());
    }
}
