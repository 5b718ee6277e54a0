// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Two splits are used during training:
//
//   split_train_test     → seeded shuffle, then hold out a fixed
//                          fraction as the test partition
//                          (test size rounded up, at least one
//                          training row is kept)
//
//   split_validation_tail → no shuffle; the LAST fraction of the
//                          training partition becomes the
//                          per-epoch validation set
//
// The seeded shuffle uses StdRng so the same dataset and seed
// always give the same partitions.
//
// Reference: rand crate documentation (SeedableRng, SliceRandom)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle with `seed` and split into (train, test).
///
/// `test_fraction` is clamped to [0, 1]. The test partition has
/// `ceil(n * test_fraction)` items, but never all of them.
pub fn split_train_test<T>(mut samples: Vec<T>, test_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total  = samples.len();
    let n_test = ((total as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let n_test = n_test.min(total.saturating_sub(1));

    let test = samples.split_off(total - n_test);

    tracing::debug!(
        "Dataset split: {} training, {} test (seed {})",
        samples.len(),
        test.len(),
        seed,
    );

    (samples, test)
}

/// Split off the trailing `validation_fraction` of `samples`
/// without reordering. Returns (fit, validation).
pub fn split_validation_tail<T>(mut samples: Vec<T>, validation_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let split_at = ((total as f64) * (1.0 - validation_fraction.clamp(0.0, 1.0))) as usize;
    let split_at = split_at.min(total);

    let validation = samples.split_off(split_at);
    (samples, validation)
}
