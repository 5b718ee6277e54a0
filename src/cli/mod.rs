// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Uses `clap` to parse
// arguments and hands the work to Layer 2 (application) or to
// the HTTP service.
//
// Commands:
//   1. `serve`    — run the HTTP service
//   2. `train`    — fit the model on a CSV and save the artifact
//   3. `predict`  — one prediction from the saved artifact
//   4. `ask`      — forward a question to the completion provider
//   5. `describe` — summary statistics of a CSV dataset
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, Commands, CompletionArgs, DescribeArgs, PredictArgs, ServeArgs, TrainArgs};

use crate::application::{
    ask_use_case::AskUseCase, predict_use_case::PredictUseCase, train_use_case::TrainUseCase,
};
use crate::data::{loader::CsvDatasetLoader, summary::DatasetSummary};
use crate::domain::traits::{DatasetSource, ModelRepository};
use crate::infra::{
    completion::{OpenAiCompletionClient, API_KEY_ENV},
    model_store::{FileModelStore, DEFAULT_ARTIFACT_PATH},
};
use crate::server::{self, AppState, ServeConfig};

#[derive(Parser, Debug)]
#[command(
    name = "forest-fire-service",
    version,
    about = "Train and serve a burned-area regression model for forest fire data."
)]
pub struct Cli {
    /// Path of the model artifact (JSON)
    #[arg(long, global = true, default_value = DEFAULT_ARTIFACT_PATH)]
    pub artifact: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching command. Routes only, never computes.
    pub fn run(self) -> Result<()> {
        let store: Arc<dyn ModelRepository> = Arc::new(FileModelStore::new(&self.artifact));
        match self.command {
            Commands::Serve(args)    => run_serve(args, store),
            Commands::Train(args)    => run_train(args, store),
            Commands::Predict(args)  => run_predict(args, store),
            Commands::Ask(args)      => run_ask(args),
            Commands::Describe(args) => run_describe(args),
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot start async runtime")
}

fn ask_use_case(args: CompletionArgs) -> Result<AskUseCase> {
    let client = OpenAiCompletionClient::new(
        args.completion_url,
        args.completion_model,
        args.max_tokens,
        Duration::from_secs(args.timeout_secs),
    )
    .context("Cannot build completion client")?;
    let api_key = std::env::var(API_KEY_ENV).ok();
    Ok(AskUseCase::new(Arc::new(client), api_key))
}

fn run_serve(args: ServeArgs, store: Arc<dyn ModelRepository>) -> Result<()> {
    let config = ServeConfig::from(&args);
    let state  = AppState::new(store, args.hyper.into(), ask_use_case(args.completion)?);
    runtime()?.block_on(server::serve(&config, state))
}

fn run_train(args: TrainArgs, store: Arc<dyn ModelRepository>) -> Result<()> {
    tracing::info!("Starting training on: {}", args.file.display());

    let location = store.location().to_path_buf();
    let report   = TrainUseCase::new(args.hyper.into(), store)
        .execute(&CsvDatasetLoader::new(&args.file))
        .with_context(|| format!("Training on '{}' failed", args.file.display()))?;

    println!("Training complete. Model saved to {}", location.display());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_predict(args: PredictArgs, store: Arc<dyn ModelRepository>) -> Result<()> {
    let prediction = PredictUseCase::new(store)
        .predict(&args.into())
        .context("Prediction failed")?;
    println!("{}", serde_json::json!({ "Prediction": prediction }));
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<()> {
    let use_case = ask_use_case(args.completion)?;
    let answer   = runtime()?
        .block_on(use_case.answer(&args.question))
        .context("Completion request failed")?;
    println!("\nAnswer: {}", answer);
    Ok(())
}

fn run_describe(args: DescribeArgs) -> Result<()> {
    let rows = CsvDatasetLoader::new(&args.file)
        .load_all()
        .with_context(|| format!("Cannot read '{}'", args.file.display()))?;
    let summary = DatasetSummary::describe(&rows).context("Cannot summarise dataset")?;

    println!("{:<8} {:>6} {:>12} {:>12} {:>12} {:>12}", "column", "count", "mean", "std", "min", "max");
    for c in &summary.columns {
        println!(
            "{:<8} {:>6} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            c.name, c.count, c.mean, c.std, c.min, c.max
        );
    }
    Ok(())
}
