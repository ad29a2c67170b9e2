//! Application error types
//!
//! A single error enum for the whole app. Validation failures carry the
//! message that the UI shows in a blocking alert; everything else is
//! logged and reported as a generic failure.

use thiserror::Error;

use crate::storage::StorageError;

/// Unified application error
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (shown to the user as an alert)
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found
    #[error("{resource} no encontrado")]
    NotFound { resource: String },

    /// Storage layer failure
    #[error("Database error: {message}")]
    Database { message: String },

    /// Invalid request / malformed input file
    #[error("{message}")]
    Invalid { message: String },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    // ========== Convenient constructors ==========

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database { message: message.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether this error should be shown verbatim in an alert modal
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NotFound { .. } | Self::Invalid { .. }
        )
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Database { message: err.to_string() }
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
