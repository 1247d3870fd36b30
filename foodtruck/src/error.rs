//! Error types for the foodtruck library.

use std::fmt;

use thiserror::Error;

/// Category of a [`DomainError`].
///
/// The HTTP layer maps each category to a status code; nothing below it
/// needs to know about HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Infrastructure or query failure.
    Other,
    /// Entity already exists.
    Duplicate,
    /// Entity does not exist.
    NotFound,
    /// Caller supplied invalid input.
    Validation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Other => "other",
            ErrorCode::Duplicate => "duplicate",
            ErrorCode::NotFound => "not_found",
            ErrorCode::Validation => "validation",
        };
        f.write_str(name)
    }
}

/// An application-level failure with a client-safe message.
///
/// The message never contains details of the underlying technical error;
/// those are logged where the failure is detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DomainError {
    /// Failure category.
    pub code: ErrorCode,
    /// Human-readable message, safe to return to clients.
    pub message: String,
}

impl DomainError {
    /// Create a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Shorthand for an [`ErrorCode::Validation`] error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    /// Shorthand for an [`ErrorCode::Other`] error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Other, message)
    }
}

/// Errors raised by a [`Database`](crate::Database) implementation.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The database could not be opened.
    #[error("Failed to open database {path}: {source}")]
    Connect {
        path: String,
        #[source]
        source: sqlx::Error,
    },

    /// A query failed to execute or its rows could not be decoded.
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// Any other backend failure, e.g. from a non-SQL data source.
    #[error("{0}")]
    Backend(String),
}

/// A configuration value could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    /// A numeric setting must be at least one.
    #[error("{name} must be at least 1")]
    Zero { name: &'static str },
}

/// Result type alias using [`DatabaseError`].
pub type Result<T> = std::result::Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display_is_message_only() {
        let err = DomainError::other("Failed to fetch trucks");
        assert_eq!(err.to_string(), "Failed to fetch trucks");
        assert_eq!(err.code, ErrorCode::Other);

        let err = DomainError::validation("radius must be greater than 0");
        assert_eq!(err.code, ErrorCode::Validation);
    }

    #[test]
    fn test_error_display() {
        let err = DatabaseError::Backend("disk on fire".to_string());
        assert!(err.to_string().contains("disk on fire"));

        let err = ConfigError::InvalidValue {
            var: "TRUCKS_MIN_RESULTS",
            value: "lots".to_string(),
        };
        assert!(err.to_string().contains("TRUCKS_MIN_RESULTS"));
        assert!(err.to_string().contains("lots"));

        let err = ConfigError::Zero {
            name: "max_iterations",
        };
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "not_found");
        assert_eq!(ErrorCode::Validation.to_string(), "validation");
    }
}
