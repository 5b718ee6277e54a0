// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete implementations of the domain traits plus the
// training metrics file:
//
//   model_store.rs — FileModelStore (ModelRepository)
//                    One JSON artifact on disk, replaced
//                    atomically via temp file + rename.
//
//   completion.rs  — OpenAiCompletionClient (CompletionClient)
//                    reqwest client for a /v1/completions API.
//
//   metrics.rs     — Training metrics logging
//                    Writes per-epoch train/validation MSE to a
//                    CSV next to the artifact.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Artifact persistence on the local filesystem
pub mod model_store;

/// Text-completion HTTP client
pub mod completion;

/// Training metrics CSV logger
pub mod metrics;
