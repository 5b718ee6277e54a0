// ============================================================
// Layer 4 — Fire Batcher
// ============================================================
// Implements Burn's Batcher trait to stack FireSamples into
// tensors for one mini-batch.
//
//   Input:  Vec of N FireSamples (12 features each)
//   Output: FireBatch { features: [N, 12], targets: [N, 1] }
//
// Features are flattened row-major into one Vec and handed to
// TensorData together with the [N, 12] shape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::FireSample;
use crate::domain::observation::FEATURE_COUNT;

/// A batch ready for the forward pass.
#[derive(Debug, Clone)]
pub struct FireBatch<B: Backend> {
    /// Scaled inputs — shape: [batch_size, 12]
    pub features: Tensor<B, 2>,

    /// Burned area — shape: [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct FireBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> FireBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<FireSample, FireBatch<B>> for FireBatcher<B> {
    fn batch(&self, items: Vec<FireSample>) -> FireBatch<B> {
        let batch_size = items.len();

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let targets: Vec<f32> = items.iter().map(|s| s.area).collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(features_flat, [batch_size, FEATURE_COUNT]),
            &self.device,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets, [batch_size, 1]),
            &self.device,
        );

        FireBatch { features, targets }
    }
}
