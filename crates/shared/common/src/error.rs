//! Unified error handling for every HTTP surface in the system.
//!
//! All failure responses share one envelope:
//! `{"result": false, "errors": <message or [messages]>}`.
//! Validation failures carry the full accumulated message list; everything
//! that would leak internals is collapsed to a generic message and logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::ValidationErrors;
use serde_json::{json, Value};
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    /// Client input error with a single message (query parameters).
    #[error("{0}")]
    BadRequest(String),

    /// Accumulated validation failures for one create request.
    #[error("validation failed")]
    Validation(Vec<String>),

    /// Record lookup by id found nothing.
    #[error("id does not exist")]
    NotFound,

    /// Upstream store answered but the payload lacked the expected shape.
    #[error("upstream contract violation: {0}")]
    UpstreamContract(String),

    /// Upstream store could not be reached at the transport level.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[cfg(feature = "database")]
    #[error("database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("internal server error")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::UpstreamContract(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The `errors` field of the response envelope: a single string for
    /// query-level failures, the full message list for validation.
    pub fn errors_value(&self) -> Value {
        match self {
            AppError::BadRequest(msg) => json!(msg),
            AppError::Validation(messages) => json!(messages),
            AppError::NotFound => json!("id does not exist"),
            AppError::UpstreamContract(detail) => {
                tracing::error!("upstream contract violation: {}", detail);
                json!("service error")
            }
            AppError::StoreUnavailable(detail) => {
                tracing::error!("upstream store unavailable: {}", detail);
                json!("service unavailable")
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("database error: {:?}", e);
                json!("service error")
            }
            AppError::Internal(detail) => {
                tracing::error!("internal error: {}", detail);
                json!("service error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "result": false,
            "errors": self.errors_value(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors.into_messages())
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::StoreUnavailable(err.to_string())
    }
}

/// Convenience constructors.
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        AppError::UpstreamContract(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// Result type alias.
pub type AppResult<T> = Result<T, AppError>;
