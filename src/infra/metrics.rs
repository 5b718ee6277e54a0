// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records per-epoch training metrics to a CSV file.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: sample-weighted MSE over the fitted rows
//   - val_loss:   MSE on the validation tail (empty if none)
//
// Output file: <artifact dir>/training_metrics.csv
// The file is recreated at the start of every training run.
//
// Example CSV output:
//   epoch,train_loss,val_loss
//   1,412.3012,98.1203
//   2,398.0041,
//   ...

use anyhow::{anyhow, Context, Result};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    sync::Mutex,
};

use csv::{Writer, WriterBuilder};
use serde::{Deserialize, Serialize};

pub const METRICS_FILE_NAME: &str = "training_metrics.csv";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average mean squared error over all training samples
    pub train_loss: f64,

    /// Mean squared error on the validation set, if there was one
    pub val_loss: Option<f64>,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: Option<f64>) -> Self {
        Self { epoch, train_loss, val_loss }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss.is_some_and(|v| v < best_val_loss)
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
    writer:   Mutex<Writer<File>>,
}

impl MetricsLogger {
    /// Create (or truncate) the metrics CSV in `dir` and write the header.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join(METRICS_FILE_NAME);
        // header is present even when no epoch is ever logged
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writer.write_record(["epoch", "train_loss", "val_loss"])?;
        writer.flush()?;

        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        Ok(Self { csv_path, writer: Mutex::new(writer) })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    /// A missing `val_loss` becomes an empty field.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("metrics writer lock poisoned"))?;
        writer
            .serialize(m)
            .with_context(|| format!("Cannot append to '{}'", self.csv_path.display()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
