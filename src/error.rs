//! API error type
//!
//! Every failure kind maps to a distinct HTTP status and error code, so the
//! boundary distinguishes a missing record from a misformatted input file
//! from a dead or babbling model backend.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::repo::RepoError;
use crate::services::classifier::ClassifierError;
use crate::services::orchestrator::CycleError;
use crate::services::spreadsheet::SpreadsheetError;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Typology outside the closed label set (400)
    #[error("Invalid typology: {0}")]
    InvalidTypology(String),

    /// Input table unusable (422)
    #[error("Input format error: {0}")]
    InputFormat(String),

    /// Could not reach the classification backend (502)
    #[error("Provider transport failure: {0}")]
    ProviderTransport(String),

    /// Backend replied with garbage (502)
    #[error("Provider schema failure: {0}")]
    ProviderSchema(String),

    /// Database operation failed (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::InvalidTypology(msg) => {
                (StatusCode::BAD_REQUEST, "INVALID_TYPOLOGY", msg)
            }
            ApiError::InputFormat(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INPUT_FORMAT", msg)
            }
            ApiError::ProviderTransport(msg) => {
                (StatusCode::BAD_GATEWAY, "PROVIDER_TRANSPORT", msg)
            }
            ApiError::ProviderSchema(msg) => (StatusCode::BAD_GATEWAY, "PROVIDER_SCHEMA", msg),
            ApiError::Database(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => ApiError::NotFound(format!("License {id}")),
            RepoError::Database(e) => ApiError::Database(e.to_string()),
        }
    }
}

impl From<ClassifierError> for ApiError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Transport(msg) => ApiError::ProviderTransport(msg),
            ClassifierError::Api(status, msg) => {
                ApiError::ProviderTransport(format!("backend returned {status}: {msg}"))
            }
            ClassifierError::Schema(msg) => ApiError::ProviderSchema(msg),
            ClassifierError::MissingCredential => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<SpreadsheetError> for ApiError {
    fn from(err: SpreadsheetError) -> Self {
        ApiError::InputFormat(err.to_string())
    }
}

impl From<CycleError> for ApiError {
    fn from(err: CycleError) -> Self {
        match err {
            CycleError::Spreadsheet(e) => e.into(),
            CycleError::Repo(e) => e.into(),
            CycleError::Classifier(e) => e.into(),
        }
    }
}
