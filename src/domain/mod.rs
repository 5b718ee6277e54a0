// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the problem:
// observations, the categorical encoding, scaling parameters,
// the model artifact and the error taxonomy.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O or network calls
//   - Only plain data, pure functions and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Month/day token ↔ code mapping
pub mod encoder;

/// Service error taxonomy
pub mod error;

/// Observation rows and the encoded feature vector
pub mod observation;

/// Column scaling fitted at training time
pub mod standardizer;

/// The persisted model artifact
pub mod artifact;

/// Seams to storage, datasets and the completion provider
pub mod traits;
