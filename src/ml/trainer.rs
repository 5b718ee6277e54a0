// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch Adam on mean squared error, with a per-epoch
// validation pass.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() gives the same weights on InnerBackend (NdArray)
//     for validation and for the returned model
//   - weight init and batch shuffling are both seeded
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    data::dataloader::{batcher::Batcher, DataLoaderBuilder},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{
    batcher::FireBatcher,
    dataset::FireDataset,
};
use crate::domain::artifact::Architecture;
use crate::domain::error::{Result, ServiceError};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{BurnedAreaRegressor, BurnedAreaRegressorConfig};

pub type TrainBackend = Autodiff<NdArray>;
pub type InnerBackend = NdArray;

/// What a finished fit hands back to the use case.
pub struct TrainingOutcome {
    pub model:        BurnedAreaRegressor<InnerBackend>,
    pub architecture: Architecture,
    pub last_epoch:   Option<EpochMetrics>,
}

pub fn run_training(
    cfg:           &TrainConfig,
    train_dataset: FireDataset,
    val_dataset:   FireDataset,
    metrics:       Option<&MetricsLogger>,
) -> Result<TrainingOutcome> {
    let device = NdArrayDevice::default();
    tracing::debug!("Using NdArray device: {:?}", device);

    if train_dataset.sample_count() == 0 {
        return Err(ServiceError::Training("no training samples".into()));
    }
    train_loop(cfg, train_dataset, val_dataset, metrics, device)
}

fn train_loop(
    cfg:           &TrainConfig,
    train_dataset: FireDataset,
    val_dataset:   FireDataset,
    metrics:       Option<&MetricsLogger>,
    device:        NdArrayDevice,
) -> Result<TrainingOutcome> {
    TrainBackend::seed(cfg.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = BurnedAreaRegressorConfig::new()
        .with_hidden_size_1(cfg.hidden_size_1)
        .with_hidden_size_2(cfg.hidden_size_2);
    let mut model: BurnedAreaRegressor<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} → {} → {} → 1",
        model_cfg.input_size, model_cfg.hidden_size_1, model_cfg.hidden_size_2,
    );

    let mut optim = AdamConfig::new().init();

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = FireBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size.max(1))
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    let mut last_epoch = None;
    let mut best_val   = f64::INFINITY;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut loss_sum = 0.0f64;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let n = batch.targets.dims()[0];
            let (loss, _) = model.forward_loss(batch.features, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            loss_sum += loss_val * n as f64;
            seen     += n;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.learning_rate, model, grads);
        }

        let train_loss = if seen > 0 { loss_sum / seen as f64 } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();
        let val_loss    = mean_squared_error(&model_valid, &val_dataset, &device);

        let m = EpochMetrics::new(epoch, train_loss, val_loss);
        tracing::debug!(
            "Epoch {:>3}/{} | train_mse={:.4} | val_mse={}",
            epoch,
            cfg.epochs,
            m.train_loss,
            m.val_loss.map(|v| format!("{v:.4}")).unwrap_or_else(|| "-".into()),
        );
        if m.is_improvement(best_val) {
            best_val = m.val_loss.unwrap_or(best_val);
            tracing::debug!("Epoch {} is the best so far on validation", epoch);
        }
        if let Some(logger) = metrics {
            if let Err(e) = logger.log(&m) {
                tracing::warn!("Could not record epoch {} metrics: {e:#}", epoch);
            }
        }
        last_epoch = Some(m);
    }

    if best_val.is_finite() {
        tracing::info!("Training complete after {} epochs (best val_mse={:.4})", cfg.epochs, best_val);
    } else {
        tracing::info!("Training complete after {} epochs", cfg.epochs);
    }

    Ok(TrainingOutcome {
        model: model.valid(),
        architecture: model_cfg.architecture(),
        last_epoch,
    })
}

/// Mean squared error of `model` over every sample of `dataset`,
/// computed in a single forward pass. `None` for an empty dataset.
pub fn mean_squared_error<B: Backend>(
    model:   &BurnedAreaRegressor<B>,
    dataset: &FireDataset,
    device:  &B::Device,
) -> Option<f64> {
    if dataset.sample_count() == 0 {
        return None;
    }
    let batch = FireBatcher::<B>::new(device.clone()).batch(dataset.samples().to_vec());
    let (loss, _) = model.forward_loss(batch.features, batch.targets);
    Some(loss.into_scalar().elem::<f64>())
}
