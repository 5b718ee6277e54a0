// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load labelled rows          (Layer 4 - data)
//   Step 2: Encode month/day + target   (Layer 3 - domain)
//   Step 3: Split train/test (seeded)   (Layer 4 - data)
//   Step 4: Fit standardizer on train   (Layer 3 - domain)
//   Step 5: Split off validation tail   (Layer 4 - data)
//   Step 6: Run training loop           (Layer 5 - ml)
//   Step 7: Evaluate test MSE           (Layer 5 - ml)
//   Step 8: Persist the artifact        (Layer 6 - infra)
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use burn::backend::ndarray::NdArrayDevice;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::FireDataset,
    splitter::{split_train_test, split_validation_tail},
};
use crate::domain::artifact::ModelArtifact;
use crate::domain::error::{Result, ServiceError};
use crate::domain::observation::EncodedFeatures;
use crate::domain::standardizer::Standardizer;
use crate::domain::traits::{DatasetSource, ModelRepository};
use crate::infra::metrics::MetricsLogger;
use crate::ml::trainer::{mean_squared_error, run_training};

/// The NdArray RNG seeded by the trainer is process-wide, so two fits
/// running at once would interleave their draws. Held for a whole run.
static TRAINING_LOCK: Mutex<()> = Mutex::new(());

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so a run can be described in logs or config files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs:           usize,
    pub batch_size:       usize,
    pub learning_rate:    f64,
    pub seed:             u64,
    pub test_fraction:    f64,
    pub validation_split: f64,
    pub hidden_size_1:    usize,
    pub hidden_size_2:    usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs:           50,
            batch_size:       32,
            learning_rate:    1e-3,
            seed:             42,
            test_fraction:    0.2,
            validation_split: 0.2,
            hidden_size_1:    64,
            hidden_size_2:    32,
        }
    }
}

// ─── Training Report ─────────────────────────────────────────────────────────
/// Summary of one finished run. Logged; the HTTP layer only sends an ack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub total_rows:       usize,
    pub train_rows:       usize,
    pub validation_rows:  usize,
    pub test_rows:        usize,
    pub final_train_loss: Option<f64>,
    pub final_val_loss:   Option<f64>,
    pub test_mse:         Option<f64>,
    pub artifact:         PathBuf,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
    store:  Arc<dyn ModelRepository>,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig, store: Arc<dyn ModelRepository>) -> Self {
        Self { config, store }
    }

    /// Execute the full training pipeline end to end
    /// Runs are serialized: a second caller blocks until the first finishes.
    pub fn execute(&self, source: &dyn DatasetSource) -> Result<TrainingReport> {
        // the guard protects no data, so a poisoned lock is still usable
        let _running = TRAINING_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let cfg = &self.config;

        // ── Step 1: Load rows ────────────────────────────────────────────────
        tracing::info!("Loading dataset from '{}'", source.location().display());
        let rows = source.load_all()?;
        if rows.len() < 2 {
            return Err(ServiceError::data_load(
                source.location(),
                format!("need at least 2 rows to split, found {}", rows.len()),
            ));
        }
        let total_rows = rows.len();

        // ── Step 2: Encode categoricals, separate target ─────────────────────
        // An unknown token anywhere in the file aborts the run.
        let encoded: Vec<(EncodedFeatures, f32)> = rows
            .iter()
            .map(|r| Ok((r.observation.encode()?, r.area as f32)))
            .collect::<Result<_>>()?;

        // ── Step 3: Train / test split ───────────────────────────────────────
        let (train, test) = split_train_test(encoded, cfg.test_fraction, cfg.seed);

        // ── Step 4: Standardizer from the training partition only ────────────
        let (train_x, train_y): (Vec<EncodedFeatures>, Vec<f32>) = train.into_iter().unzip();
        let (test_x, test_y):   (Vec<EncodedFeatures>, Vec<f32>) = test.into_iter().unzip();
        let standardizer = Standardizer::fit(&train_x)?;
        let train_x = standardizer.transform_all(&train_x);
        let test_x  = standardizer.transform_all(&test_x);

        // ── Step 5: Validation tail ──────────────────────────────────────────
        // features and targets have equal length, so both split at the same row
        let train_rows = train_x.len();
        let (fit_x, val_x) = split_validation_tail(train_x.clone(), cfg.validation_split);
        let (fit_y, val_y) = split_validation_tail(train_y.clone(), cfg.validation_split);
        let (fit, validation) = if fit_x.is_empty() {
            tracing::warn!("Too few rows for a validation split; training on all {}", train_rows);
            (
                FireDataset::from_parts(&train_x, &train_y),
                FireDataset::new(Vec::new()),
            )
        } else {
            (
                FireDataset::from_parts(&fit_x, &fit_y),
                FireDataset::from_parts(&val_x, &val_y),
            )
        };
        let test = FireDataset::from_parts(&test_x, &test_y);
        tracing::info!(
            "Split: {} fit, {} validation, {} test",
            fit.sample_count(),
            validation.sample_count(),
            test.sample_count(),
        );
        let validation_rows = validation.sample_count();
        let test_rows       = test.sample_count();

        // ── Step 6: Fit ──────────────────────────────────────────────────────
        let metrics = match MetricsLogger::create(metrics_dir(self.store.location())) {
            Ok(logger) => Some(logger),
            Err(e) => {
                tracing::warn!("Training metrics will not be recorded: {e:#}");
                None
            }
        };
        let outcome = run_training(cfg, fit, validation, metrics.as_ref())?;

        // ── Step 7: Held-out evaluation ──────────────────────────────────────
        let test_mse = mean_squared_error(&outcome.model, &test, &NdArrayDevice::default());

        // ── Step 8: Persist network + standardizer ───────────────────────────
        let artifact = ModelArtifact::new(outcome.architecture, standardizer, outcome.model.to_bytes()?);
        self.store.save(&artifact)?;

        let report = TrainingReport {
            total_rows,
            train_rows,
            validation_rows,
            test_rows,
            final_train_loss: outcome.last_epoch.as_ref().map(|m| m.train_loss),
            final_val_loss:   outcome.last_epoch.as_ref().and_then(|m| m.val_loss),
            test_mse,
            artifact: self.store.location().to_path_buf(),
        };
        tracing::info!(
            "Training report: rows={} train={} val={} test={} test_mse={}",
            report.total_rows,
            report.train_rows,
            report.validation_rows,
            report.test_rows,
            report.test_mse.map(|v| format!("{v:.4}")).unwrap_or_else(|| "-".into()),
        );
        Ok(report)
    }
}

/// Metrics live next to the artifact.
fn metrics_dir(artifact: &Path) -> PathBuf {
    match artifact.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
