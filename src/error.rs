use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

/// Error taxonomy shared by the project and contact stores.
///
/// Validation and not-found errors are deterministic and never retried.
/// Schema-drift errors get exactly one repair-and-retry cycle inside the
/// project store before they surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Malformed or missing input (empty title, invalid email, bad enum value).
    #[error("{0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A write hit a missing column and the single repair-and-retry cycle
    /// did not resolve it. Carries the original write error.
    #[error("storage schema is out of date: {source}")]
    SchemaDrift { source: DbErr },

    /// The schema repair pass itself failed part-way through. `added` lists
    /// the columns that were successfully added before the failure.
    #[error("schema repair failed after adding {} column(s): {source}", added.len())]
    SchemaRepair { added: Vec<String>, source: DbErr },

    /// The storage backend could not be reached at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(DbErr),

    /// Any other storage error.
    #[error("database error: {0}")]
    Database(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(err),
            other => StoreError::Database(other),
        }
    }
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::SchemaDrift { .. }
            | StoreError::SchemaRepair { .. }
            | StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = serde_json::json!({ "error": self.to_string() });
        match self {
            StoreError::SchemaDrift { .. } => {
                body["structureError"] = serde_json::Value::Bool(true);
                body["repairAttempted"] = serde_json::Value::Bool(true);
            }
            StoreError::SchemaRepair { added, .. } => {
                body["structureError"] = serde_json::Value::Bool(true);
                body["columnsAdded"] = serde_json::json!(added);
            }
            _ => {}
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}
