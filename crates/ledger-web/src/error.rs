//! Error types for the web interface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ledger_core::LedgerError;
use thiserror::Error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Missing or unknown API token.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Ledger or store error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Malformed request input.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<database::DatabaseError> for WebError {
    fn from(err: database::DatabaseError) -> Self {
        WebError::Ledger(err.into())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebError::NotAuthenticated | WebError::Ledger(LedgerError::NotAuthenticated) => {
                tracing::warn!("Rejected unauthenticated request");
                StatusCode::UNAUTHORIZED
            }
            WebError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                StatusCode::BAD_REQUEST
            }
            WebError::Ledger(LedgerError::Validation(msg)) => {
                tracing::warn!("Validation failed: {}", msg);
                StatusCode::BAD_REQUEST
            }
            WebError::Ledger(err) if err.is_not_found() => {
                tracing::warn!("{}", err);
                StatusCode::NOT_FOUND
            }
            WebError::Ledger(err) => {
                tracing::error!("Store error: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, WebError>;
