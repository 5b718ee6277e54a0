// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the tensor
// batches the training loop consumes.
//
//   data.csv
//       │
//       ▼
//   CsvDatasetLoader  → parses rows, checks the schema
//       │
//       ▼
//   (encoder + Standardizer from the domain layer)
//       │
//       ▼
//   splitter          → seeded train/test split, validation tail
//       │
//       ▼
//   FireDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   FireBatcher       → stacks samples into tensors
//
// `summary` computes descriptive statistics over loaded rows.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the forest fire CSV into labelled observations
pub mod loader;

/// Seeded train/test split and validation hold-out
pub mod splitter;

/// Implements Burn's Dataset trait for scaled samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Per-column descriptive statistics
pub mod summary;
