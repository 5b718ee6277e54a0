// ============================================================
// Layer 1 — HTTP Error Mapping
// ============================================================
// Every failure leaves the service as `{"error": "<message>"}`
// with a status derived from the ServiceError variant:
//
//   UnknownCategory, Schema        → 422
//   DataLoad, bad query/body       → 400
//   ModelNotTrained                → 409
//   Upstream                       → 502
//   Storage, Training, Internal    → 500

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::error::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    BadRequest(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

pub fn status_for(e: &ServiceError) -> StatusCode {
    match e {
        ServiceError::UnknownCategory { .. } | ServiceError::Schema { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ServiceError::DataLoad { .. } => StatusCode::BAD_REQUEST,
        ServiceError::ModelNotTrained(_) => StatusCode::CONFLICT,
        ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
        ServiceError::Storage(_) | ServiceError::Training(_) | ServiceError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Service(e) => {
                let status = status_for(&e);
                if status.is_server_error() {
                    tracing::error!("Request failed: {e}");
                } else {
                    tracing::warn!("Request rejected: {e}");
                }
                (status, e.to_string())
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Malformed request: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
