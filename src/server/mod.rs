// ============================================================
// Layer 1 — HTTP Service
// ============================================================
// The axum router in front of the use cases:
//
//   GET  /                   → greeting
//   GET  /hello_you?name=    → personalised greeting
//   POST /training?file=     → train on a CSV and persist the model
//   POST /predict            → burned area for one JSON observation
//   GET  /model?question=    → completion proxy
//   GET  /describe?file=     → per-column dataset statistics
//
// Runs on the multi-threaded tokio runtime and shuts down
// gracefully on Ctrl+C.
//
// Reference: axum documentation (Router, State, extractors)

pub mod error;
pub mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};

use crate::application::{
    ask_use_case::AskUseCase, predict_use_case::PredictUseCase, train_use_case::TrainConfig,
};
use crate::domain::traits::ModelRepository;

/// Where the HTTP listener binds.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

impl ServeConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store:        Arc<dyn ModelRepository>,
    pub train_config: Arc<TrainConfig>,
    pub predictor:    Arc<PredictUseCase>,
    pub ask:          Arc<AskUseCase>,
}

impl AppState {
    pub fn new(store: Arc<dyn ModelRepository>, train_config: TrainConfig, ask: AskUseCase) -> Self {
        Self {
            predictor: Arc::new(PredictUseCase::new(store.clone())),
            store,
            train_config: Arc::new(train_config),
            ask: Arc::new(ask),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/hello_you", get(handlers::hello_you))
        .route("/training", post(handlers::training))
        .route("/predict", post(handlers::predict))
        .route("/model", get(handlers::model))
        .route("/describe", get(handlers::describe))
        .with_state(state)
}

pub async fn serve(config: &ServeConfig, state: AppState) -> Result<()> {
    let bind_addr = config.bind_addr();
    let listener  = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Cannot bind to {bind_addr}"))?;

    tracing::info!("Listening on http://{}", bind_addr);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl+C: {e}");
        // keep serving without a shutdown trigger
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::{http::StatusCode, routing::post as upstream_post, Json};
    use serde_json::{json, Value};

    use crate::application::train_use_case::tests::ten_rows;
    use crate::infra::completion::OpenAiCompletionClient;
    use crate::infra::model_store::FileModelStore;

    struct TestServer {
        base: String,
        http: reqwest::Client,
        _dir: tempfile::TempDir,
        dir_path: std::path::PathBuf,
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Service wired to a temp store and a completion upstream that always fails.
    async fn start() -> TestServer {
        let upstream = Router::new().route(
            "/v1/completions",
            upstream_post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "down"}))) }),
        );
        let upstream_base = spawn(upstream).await;

        let dir    = tempfile::tempdir().unwrap();
        let store  = Arc::new(FileModelStore::new(dir.path().join("forest_fire_model.json")));
        let client = OpenAiCompletionClient::new(&upstream_base, "m", 8, Duration::from_secs(5)).unwrap();
        let ask    = AskUseCase::new(Arc::new(client), Some("sk-test".into()));
        let config = TrainConfig { epochs: 3, batch_size: 4, ..TrainConfig::default() };

        let base = spawn(router(AppState::new(store, config, ask))).await;
        TestServer {
            base,
            http: reqwest::Client::new(),
            dir_path: dir.path().to_path_buf(),
            _dir: dir,
        }
    }

    fn write_dataset(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("fires.csv");
        let mut content = String::from("X,Y,month,day,FFMC,DMC,DC,ISI,temp,RH,wind,rain,area\n");
        for row in ten_rows() {
            let o = &row.observation;
            content.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{},{},{},{}\n",
                o.x, o.y, o.month, o.day, o.ffmc, o.dmc, o.dc, o.isi, o.temp, o.rh, o.wind, o.rain, row.area,
            ));
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    fn documented_observation() -> Value {
        json!({
            "month": "jan", "day": "mon", "FFMC": 85.0, "DMC": 26.0, "DC": 94.0,
            "ISI": 5.1, "temp": 8.2, "RH": 51, "wind": 6.7, "rain": 0.0, "X": 7, "Y": 5
        })
    }

    #[tokio::test]
    async fn test_greetings() {
        let s = start().await;

        let body: Value = s.http.get(&s.base).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["message"], "Hello World");

        let body: Value = s.http.get(format!("{}/hello_you", s.base)).send().await.unwrap().json().await.unwrap();
        assert_eq!(body["message"], "Hello John Doe");

        let body: Value = s.http
            .get(format!("{}/hello_you?name=Ada", s.base))
            .send().await.unwrap()
            .json().await.unwrap();
        assert_eq!(body["message"], "Hello Ada");
    }

    #[tokio::test]
    async fn test_predict_before_training_is_conflict() {
        let s = start().await;
        let response = s.http
            .post(format!("{}/predict", s.base))
            .json(&documented_observation())
            .send().await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::CONFLICT);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_month_is_unprocessable() {
        let s = start().await;
        let mut obs = documented_observation();
        obs["month"] = json!("janvier");

        let response = s.http.post(format!("{}/predict", s.base)).json(&obs).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_body_is_error_object() {
        let s = start().await;
        let response = s.http
            .post(format!("{}/predict", s.base))
            .header("content-type", "application/json")
            .body("{\"month\": \"jan\"")
            .send().await.unwrap();

        assert!(response.status().is_client_error());
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_query_parameter_is_bad_request() {
        let s = start().await;
        let response = s.http.post(format!("{}/training", s.base)).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_training_on_missing_file_is_bad_request() {
        let s = start().await;
        let response = s.http
            .post(format!("{}/training?file=/no/such/fires.csv", s.base))
            .send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_train_then_predict_over_http() {
        let s    = start().await;
        let file = write_dataset(&s.dir_path);

        let response = s.http
            .post(format!("{}/training", s.base))
            .query(&[("file", file.to_string_lossy().to_string())])
            .send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert!(body["message"].is_string());

        let body: Value = s.http
            .post(format!("{}/predict", s.base))
            .json(&documented_observation())
            .send().await.unwrap()
            .json().await.unwrap();
        assert!(body["Prediction"].as_f64().unwrap().is_finite());
    }

    #[tokio::test]
    async fn test_describe_reports_columns() {
        let s    = start().await;
        let file = write_dataset(&s.dir_path);

        let body: Value = s.http
            .get(format!("{}/describe", s.base))
            .query(&[("file", file.to_string_lossy().to_string())])
            .send().await.unwrap()
            .json().await.unwrap();
        assert_eq!(body["rows"], 10);
        assert_eq!(body["columns"].as_array().unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_upstream_failure_becomes_error_object() {
        let s = start().await;
        let response = s.http
            .get(format!("{}/model?question=hello", s.base))
            .send().await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("500"));
    }

    #[test]
    fn test_serve_config_default() {
        let cfg = ServeConfig::default();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8000");
    }
}
