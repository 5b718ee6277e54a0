// ============================================================
// Layer 3 — Service Errors
// ============================================================
// The error taxonomy shared by every layer below the CLI.
//
//   UnknownCategory → month/day token outside its vocabulary
//   DataLoad        → dataset file missing, unreadable or malformed
//   Schema          → a required dataset column is absent
//   ModelNotTrained → predict called before any training run
//   Upstream        → completion provider failed or was unreachable
//   Storage         → model artifact could not be written or parsed
//   Training        → the fit itself failed
//   Internal        → a worker task died
//
// The HTTP layer maps each variant to a status code; the CLI
// wraps them in anyhow with extra context.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::encoder::CategoryKind;

/// Result alias used throughout the service.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("unknown {kind} token '{token}'")]
    UnknownCategory { kind: CategoryKind, token: String },

    #[error("cannot load dataset '{}': {message}", .path.display())]
    DataLoad { path: PathBuf, message: String },

    #[error("dataset '{}' is missing required column '{column}'", .path.display())]
    Schema { path: PathBuf, column: String },

    #[error("no trained model at '{}'; run training first", .0.display())]
    ModelNotTrained(PathBuf),

    #[error("completion provider error: {0}")]
    Upstream(String),

    #[error("model store error: {0}")]
    Storage(String),

    #[error("training failed: {0}")]
    Training(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn data_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::DataLoad {
            path:    path.into(),
            message: message.into(),
        }
    }

    pub fn schema(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self::Schema {
            path:   path.into(),
            column: column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let e = ServiceError::UnknownCategory {
            kind:  CategoryKind::Day,
            token: "funday".into(),
        };
        assert_eq!(e.to_string(), "unknown day token 'funday'");

        let e = ServiceError::schema("fires.csv", "area");
        assert!(e.to_string().contains("'area'"));
        assert!(e.to_string().contains("fires.csv"));

        let e = ServiceError::ModelNotTrained(PathBuf::from("model.json"));
        assert!(e.to_string().contains("run training first"));
    }
}
