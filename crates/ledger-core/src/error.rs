//! Error types for ledger operations.

use thiserror::Error;

/// Errors surfaced to the caller of a ledger operation.
///
/// None of these are retried; the triggering user action fails and the
/// user retries manually.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No active session or unknown API token.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The backing store rejected or failed the operation.
    #[error("store operation failed: {0}")]
    Store(#[source] database::DatabaseError),

    /// User input was rejected (e.g., a payment split that does not sum to the total).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Whether this error wraps a store `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::Store(database::DatabaseError::NotFound { .. })
        )
    }
}

impl From<database::DatabaseError> for LedgerError {
    fn from(err: database::DatabaseError) -> Self {
        match err {
            database::DatabaseError::Validation(v) => LedgerError::Validation(v.to_string()),
            other => LedgerError::Store(other),
        }
    }
}

impl From<database::ValidationError> for LedgerError {
    fn from(err: database::ValidationError) -> Self {
        LedgerError::Validation(err.to_string())
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
