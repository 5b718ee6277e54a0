// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between the application layer and the outside world.
//
//   DatasetSource    → where labelled training rows come from
//                      (CsvDatasetLoader today)
//   ModelRepository  → where the trained artifact lives
//                      (FileModelStore today, an object store later)
//   CompletionClient → the third-party text-completion provider
//                      (OpenAiCompletionClient today)
//
// The application layer only ever talks to these traits, so
// tests swap in in-memory fakes without touching disk or network.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::artifact::ModelArtifact;
use crate::domain::error::Result;
use crate::domain::observation::LabeledObservation;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Any component that can produce labelled observations.
pub trait DatasetSource {
    /// Load every row. Fails with `DataLoad` or `Schema`.
    /// Categorical tokens are returned as-is, unvalidated.
    fn load_all(&self) -> Result<Vec<LabeledObservation>>;

    /// Where the rows come from, used in error messages.
    fn location(&self) -> &Path;
}

// ─── ModelRepository ──────────────────────────────────────────────────────────
/// Persistence for the single current model artifact.
///
/// `save` replaces the previous artifact as a whole; a concurrent
/// `load` observes either the old or the new one.
pub trait ModelRepository: Send + Sync {
    fn save(&self, artifact: &ModelArtifact) -> Result<()>;

    /// Fails with `ModelNotTrained` if nothing has been saved yet.
    fn load(&self) -> Result<ModelArtifact>;

    /// Human-readable location, used in logs and error messages.
    fn location(&self) -> &Path;
}

// ─── CompletionClient ─────────────────────────────────────────────────────────
/// A text-completion provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` using `credential` and return the completion text.
    /// Non-success responses and transport failures map to `Upstream`.
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String>;
}
