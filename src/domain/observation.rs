// ============================================================
// Layer 3 — Observation Domain Types
// ============================================================
// One row of forest fire weather data.
//
//   Observation         → the 12 input fields (what /predict receives)
//   LabeledObservation  → Observation + burned area (a training row)
//   EncodedFeatures     → the 12 numbers fed to the network
//
// Wire names keep the dataset's column spelling (FFMC, RH, X, ...)
// via serde renames; Rust fields stay snake_case.

use serde::{Deserialize, Serialize};

use crate::domain::encoder::{encode_category, CategoryKind};
use crate::domain::error::Result;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 12;

/// Column order of the encoded feature vector.
/// The trainer and the predictor both assemble vectors in this order.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "month", "day", "FFMC", "DMC", "DC", "ISI",
    "temp", "RH", "wind", "rain", "X", "Y",
];

/// Name of the regression target column in the dataset.
pub const TARGET_COLUMN: &str = "area";

/// The encoded, ordered inputs for one observation.
pub type EncodedFeatures = [f32; FEATURE_COUNT];

/// A single observation without its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub month: String,
    pub day:   String,

    /// Fine Fuel Moisture Code
    #[serde(rename = "FFMC")]
    pub ffmc: f64,

    /// Duff Moisture Code
    #[serde(rename = "DMC")]
    pub dmc: f64,

    /// Drought Code
    #[serde(rename = "DC")]
    pub dc: f64,

    /// Initial Spread Index
    #[serde(rename = "ISI")]
    pub isi: f64,

    /// Temperature in °C
    pub temp: f64,

    /// Relative humidity in %
    #[serde(rename = "RH")]
    pub rh: f64,

    /// Wind speed in km/h
    pub wind: f64,

    /// Rain in mm/m²
    pub rain: f64,

    /// Spatial grid x coordinate
    #[serde(rename = "X")]
    pub x: f64,

    /// Spatial grid y coordinate
    #[serde(rename = "Y")]
    pub y: f64,
}

impl Observation {
    /// Replace the categorical tokens by their codes and lay the
    /// fields out in `FEATURE_ORDER`.
    pub fn encode(&self) -> Result<EncodedFeatures> {
        let month = encode_category(CategoryKind::Month, &self.month)?;
        let day   = encode_category(CategoryKind::Day, &self.day)?;

        Ok([
            month as f32,
            day as f32,
            self.ffmc as f32,
            self.dmc as f32,
            self.dc as f32,
            self.isi as f32,
            self.temp as f32,
            self.rh as f32,
            self.wind as f32,
            self.rain as f32,
            self.x as f32,
            self.y as f32,
        ])
    }
}

/// A training row: observation plus burned area in hectares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub area: f64,
}
