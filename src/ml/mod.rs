// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here; the data layer only touches
// Burn for its Dataset/Batcher traits.
//
//   model.rs      — the 12 → 64 → 32 → 1 ReLU regression network,
//                   MSE loss and weight (de)serialization
//
//   trainer.rs    — the mini-batch Adam training loop with a
//                   per-epoch validation pass
//
//   inferencer.rs — rebuilds the network from a ModelArtifact and
//                   predicts the burned area for one observation
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Feed-forward regression network
pub mod model;

/// Training loop with validation and metrics
pub mod trainer;

/// Inference from a persisted artifact
pub mod inferencer;
