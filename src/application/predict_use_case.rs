// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// One observation in, one burned-area estimate out:
//
//   Step 1: Encode month/day          (Layer 3 - domain)
//   Step 2: Load the current artifact (Layer 6 - infra)
//   Step 3: Rebuild model, predict    (Layer 5 - ml)
//
// Encoding happens first so a bad token never touches the store.
// The artifact is reloaded on every call; a finished training
// run is visible to the very next prediction.

use std::sync::Arc;

use crate::domain::error::Result;
use crate::domain::observation::Observation;
use crate::domain::traits::ModelRepository;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    store: Arc<dyn ModelRepository>,
}

impl PredictUseCase {
    pub fn new(store: Arc<dyn ModelRepository>) -> Self {
        Self { store }
    }

    pub fn predict(&self, observation: &Observation) -> Result<f64> {
        let features = observation.encode()?;

        // TODO: cache the Inferencer keyed on artifact mtime once reload cost shows up in latency
        let artifact   = self.store.load()?;
        let inferencer = Inferencer::from_artifact(&artifact)?;
        let prediction = inferencer.predict(&features)?;

        tracing::debug!(
            "Predicted {:.4} ha for {}/{}",
            prediction,
            observation.month,
            observation.day,
        );
        Ok(prediction)
    }
}
