// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish one
// goal each (train, predict, ask).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No HTTP or printing here (that's Layer 1)
//   - Storage and network only through domain traits
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Single-observation inference
pub mod predict_use_case;

// The completion proxy
pub mod ask_use_case;
