//! Storage-specific error types.
//!
//! These errors describe persistence failures only. They carry no knowledge of
//! schemas or validation.

use std::fmt;

/// Errors that can occur during document storage operations.
///
/// A missing document is not an error: lookups answer `Ok(None)` or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Invalid data that cannot be stored.
    InvalidData {
        message: String,
        cause: Option<String>,
    },

    /// Invalid lookup parameters.
    InvalidQuery {
        message: String,
        field: Option<String>,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidData { message, cause } => {
                if let Some(cause) = cause {
                    write!(f, "Invalid data: {} (cause: {})", message, cause)
                } else {
                    write!(f, "Invalid data: {}", message)
                }
            }
            StorageError::InvalidQuery { message, field } => {
                if let Some(field) = field {
                    write!(f, "Invalid query: {} (field: {})", message, field)
                } else {
                    write!(f, "Invalid query: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn invalid_data_with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn invalid_query(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidQuery {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Whether the caller's input caused the failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StorageError::InvalidData { .. } | StorageError::InvalidQuery { .. }
        )
    }
}
