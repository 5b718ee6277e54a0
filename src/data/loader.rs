// ============================================================
// Layer 4 — CSV Dataset Loader
// ============================================================
// Reads the forest fire dataset from a CSV file with a header.
//
// Required columns (any order, extra columns ignored):
//   month, day, FFMC, DMC, DC, ISI, temp, RH, wind, rain, X, Y, area
//
// Failure modes:
//   - file missing / unreadable / ragged rows / bad numbers → DataLoad
//   - a required column absent from the header             → Schema
//   - no data rows at all                                   → DataLoad
//
// Categorical tokens are kept as strings here; the trainer
// encodes them through the domain encoder.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::error::{Result, ServiceError};
use crate::domain::observation::{LabeledObservation, Observation, FEATURE_ORDER, TARGET_COLUMN};
use crate::domain::traits::DatasetSource;

/// Loads labelled observations from one CSV file.
pub struct CsvDatasetLoader {
    path: PathBuf,
}

impl CsvDatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvDatasetLoader {
    fn load_all(&self) -> Result<Vec<LabeledObservation>> {
        let path = self.path.as_path();

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| ServiceError::data_load(path, format!("cannot open CSV: {e}")))?;

        let headers = reader
            .headers()
            .map_err(|e| ServiceError::data_load(path, format!("cannot read header: {e}")))?
            .clone();

        let columns = ColumnIndex::resolve(&headers, path)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // header is line 1
            let line   = i + 2;
            let record = record
                .map_err(|e| ServiceError::data_load(path, format!("line {line}: {e}")))?;
            rows.push(columns.parse_row(&record, line, path)?);
        }

        if rows.is_empty() {
            return Err(ServiceError::data_load(path, "dataset has no rows"));
        }

        tracing::info!("Loaded {} rows from '{}'", rows.len(), path.display());
        Ok(rows)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

// ─── Column Resolution ────────────────────────────────────────────────────────
/// Position of every required column in the header row.
struct ColumnIndex {
    /// Indices in FEATURE_ORDER order
    features: [usize; FEATURE_ORDER.len()],
    target:   usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ServiceError::schema(path, name))
        };

        let mut features = [0usize; FEATURE_ORDER.len()];
        for (slot, name) in features.iter_mut().zip(FEATURE_ORDER) {
            *slot = find(name)?;
        }
        let target = find(TARGET_COLUMN)?;

        Ok(Self { features, target })
    }

    fn parse_row(&self, record: &StringRecord, line: usize, path: &Path) -> Result<LabeledObservation> {
        let text = |col: usize| record.get(col).unwrap_or("");

        // `str::parse` accepts NaN and inf, which would poison the standardizer
        let number = |col: usize, name: &str| -> Result<f64> {
            let raw = text(col);
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(ServiceError::data_load(
                    path,
                    format!("line {line}, column '{name}': invalid number '{raw}'"),
                )),
            }
        };

        let f = &self.features;
        let observation = Observation {
            month: text(f[0]).to_string(),
            day:   text(f[1]).to_string(),
            ffmc:  number(f[2], FEATURE_ORDER[2])?,
            dmc:   number(f[3], FEATURE_ORDER[3])?,
            dc:    number(f[4], FEATURE_ORDER[4])?,
            isi:   number(f[5], FEATURE_ORDER[5])?,
            temp:  number(f[6], FEATURE_ORDER[6])?,
            rh:    number(f[7], FEATURE_ORDER[7])?,
            wind:  number(f[8], FEATURE_ORDER[8])?,
            rain:  number(f[9], FEATURE_ORDER[9])?,
            x:     number(f[10], FEATURE_ORDER[10])?,
            y:     number(f[11], FEATURE_ORDER[11])?,
        };

        let area = number(self.target, TARGET_COLUMN)?;
        if area < 0.0 {
            return Err(ServiceError::data_load(
                path,
                format!("line {line}: burned area must be a non-negative number, got {area}"),
            ));
        }

        Ok(LabeledObservation { observation, area })
    }
}
