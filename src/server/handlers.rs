// ============================================================
// Layer 1 — HTTP Handlers
// ============================================================
// Thin adapters from HTTP to the use cases. CPU-bound work
// (training, prediction, dataset summaries) is moved onto the
// blocking pool so the async workers stay responsive.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::application::train_use_case::TrainUseCase;
use crate::data::{loader::CsvDatasetLoader, summary::DatasetSummary};
use crate::domain::error::{Result, ServiceError};
use crate::domain::observation::Observation;
use crate::domain::traits::DatasetSource;
use crate::server::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct NameParams {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileParams {
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    pub question: String,
}

/// Run `f` on the blocking pool and flatten a join failure into `Internal`.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(format!("worker task failed: {e}")))?
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

pub async fn hello_you(
    params: std::result::Result<Query<NameParams>, QueryRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let name = params.name.unwrap_or_else(|| "John Doe".to_string());
    Ok(Json(json!({ "message": format!("Hello {name}") })))
}

pub async fn training(
    State(state): State<AppState>,
    params: std::result::Result<Query<FileParams>, QueryRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    tracing::info!("Training requested on '{}'", params.file);

    let config = state.train_config.as_ref().clone();
    let store  = state.store.clone();
    let report = blocking(move || {
        TrainUseCase::new(config, store).execute(&CsvDatasetLoader::new(params.file))
    })
    .await?;

    tracing::debug!("Training finished: {:?}", report);
    Ok(Json(json!({ "message": "Model trained and saved successfully" })))
}

pub async fn predict(
    State(state): State<AppState>,
    body: std::result::Result<Json<Observation>, JsonRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Json(observation) = body?;

    let predictor  = state.predictor.clone();
    let prediction = blocking(move || predictor.predict(&observation)).await?;

    Ok(Json(json!({ "Prediction": prediction })))
}

pub async fn model(
    State(state): State<AppState>,
    params: std::result::Result<Query<QuestionParams>, QueryRejection>,
) -> std::result::Result<Json<Value>, ApiError> {
    let Query(params) = params?;
    let answer = state.ask.answer(&params.question).await?;
    Ok(Json(json!({ "answer": answer })))
}

pub async fn describe(
    params: std::result::Result<Query<FileParams>, QueryRejection>,
) -> std::result::Result<Json<DatasetSummary>, ApiError> {
    let Query(params) = params?;
    let summary = blocking(move || {
        let rows = CsvDatasetLoader::new(params.file).load_all()?;
        DatasetSummary::describe(&rows)
    })
    .await?;
    Ok(Json(summary))
}
