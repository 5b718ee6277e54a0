// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Rebuilds the network from a ModelArtifact and runs one
// observation through it:
//
//   encoded features → artifact standardizer → forward → area

use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    prelude::*,
    tensor::TensorData,
};

use crate::domain::artifact::ModelArtifact;
use crate::domain::error::{Result, ServiceError};
use crate::domain::observation::{EncodedFeatures, FEATURE_COUNT};
use crate::domain::standardizer::Standardizer;
use crate::ml::model::{BurnedAreaRegressor, BurnedAreaRegressorConfig};

type InferBackend = NdArray;

pub struct Inferencer {
    model:        BurnedAreaRegressor<InferBackend>,
    standardizer: Standardizer,
    device:       NdArrayDevice,
}

impl Inferencer {
    pub fn from_artifact(artifact: &ModelArtifact) -> Result<Self> {
        artifact.validate().map_err(ServiceError::Storage)?;

        let device = NdArrayDevice::default();
        let model  = BurnedAreaRegressorConfig::from(artifact.architecture)
            .init::<InferBackend>(&device)
            .load_bytes(artifact.weights.clone(), &device)?;

        tracing::debug!("Model rebuilt from artifact ({} weight bytes)", artifact.weights.len());
        Ok(Self {
            model,
            standardizer: artifact.standardizer.clone(),
            device,
        })
    }

    pub fn predict(&self, features: &EncodedFeatures) -> Result<f64> {
        let scaled = self.standardizer.transform(features);
        let input  = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(scaled.to_vec(), [1, FEATURE_COUNT]),
            &self.device,
        );

        let output: Vec<f32> = self
            .model
            .forward(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ServiceError::Internal(format!("cannot read model output: {e:?}")))?;

        output
            .first()
            .map(|&v| v as f64)
            .ok_or_else(|| ServiceError::Internal("model produced no output".into()))
    }
}
