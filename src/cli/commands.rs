// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `serve`, `train`, `predict`, `ask`
// and `describe` with all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::observation::Observation;
use crate::infra::completion::{
    DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::server::ServeConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP service
    Serve(ServeArgs),

    /// Train the burned-area model on a CSV dataset
    Train(TrainArgs),

    /// Predict the burned area for one observation
    Predict(PredictArgs),

    /// Send a question to the completion provider
    Ask(AskArgs),

    /// Print per-column statistics of a CSV dataset
    Describe(DescribeArgs),
}

/// Hyperparameters shared by `train` and `serve`.
#[derive(Args, Debug, Clone)]
pub struct HyperParams {
    /// Number of full passes through the training data
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Number of samples per optimizer step
    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Seed for the split, weight init and batch shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Fraction of rows held out as the test partition
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Trailing fraction of the training rows used for validation
    #[arg(long, default_value_t = 0.2)]
    pub validation_split: f64,

    #[arg(long, default_value_t = 64)]
    pub hidden_size_1: usize,

    #[arg(long, default_value_t = 32)]
    pub hidden_size_2: usize,
}

/// Convert CLI hyperparameters into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<HyperParams> for TrainConfig {
    fn from(a: HyperParams) -> Self {
        TrainConfig {
            epochs:           a.epochs,
            batch_size:       a.batch_size,
            learning_rate:    a.lr,
            seed:             a.seed,
            test_fraction:    a.test_fraction,
            validation_split: a.validation_split,
            hidden_size_1:    a.hidden_size_1,
            hidden_size_2:    a.hidden_size_2,
        }
    }
}

/// Completion provider settings shared by `serve` and `ask`.
/// The credential is read from the environment only.
#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    /// Base URL of an OpenAI-compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub completion_url: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub completion_model: String,

    #[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    #[command(flatten)]
    pub hyper: HyperParams,

    #[command(flatten)]
    pub completion: CompletionArgs,
}

impl From<&ServeArgs> for ServeConfig {
    fn from(a: &ServeArgs) -> Self {
        ServeConfig { host: a.host.clone(), port: a.port }
    }
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with the 12 feature columns plus `area`
    #[arg(long)]
    pub file: PathBuf,

    #[command(flatten)]
    pub hyper: HyperParams,
}

/// One observation, field by field.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Month token (jan..dec)
    #[arg(long)]
    pub month: String,

    /// Day token (sun..sat)
    #[arg(long)]
    pub day: String,

    #[arg(long)]
    pub ffmc: f64,

    #[arg(long)]
    pub dmc: f64,

    #[arg(long)]
    pub dc: f64,

    #[arg(long)]
    pub isi: f64,

    #[arg(long, allow_negative_numbers = true)]
    pub temp: f64,

    #[arg(long)]
    pub rh: f64,

    #[arg(long)]
    pub wind: f64,

    #[arg(long)]
    pub rain: f64,

    #[arg(long)]
    pub x: f64,

    #[arg(long)]
    pub y: f64,
}

impl From<PredictArgs> for Observation {
    fn from(a: PredictArgs) -> Self {
        Observation {
            month: a.month,
            day:   a.day,
            ffmc:  a.ffmc,
            dmc:   a.dmc,
            dc:    a.dc,
            isi:   a.isi,
            temp:  a.temp,
            rh:    a.rh,
            wind:  a.wind,
            rain:  a.rain,
            x:     a.x,
            y:     a.y,
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to forward
    #[arg(long)]
    pub question: String,

    #[command(flatten)]
    pub completion: CompletionArgs,
}

#[derive(Args, Debug)]
pub struct DescribeArgs {
    #[arg(long)]
    pub file: PathBuf,
}
