//! Error types for Stowage.

use thiserror::Error;

/// Common error type for Stowage.
#[derive(Error, Debug)]
pub enum StowageError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the storage
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The invite code is not present in the registry.
    #[error("invalid code")]
    InvalidCode,

    /// The invite code existed but its expiry has passed.
    #[error("code expired")]
    CodeExpired,

    /// A reservation would push `used` past the code's storage limit.
    #[error("storage limit exceeded")]
    QuotaExceeded,

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Access denied (e.g. missing or wrong file password).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for StowageError {
    fn from(e: sqlx::Error) -> Self {
        StowageError::Database(e.to_string())
    }
}

/// Result type alias for Stowage operations.
pub type Result<T> = std::result::Result<T, StowageError>;
