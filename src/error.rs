//! Error types for call auditing

use thiserror::Error;

use crate::schema::ValidationError;

/// Errors that can occur during an audit computation
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("Failed to parse signal bundle: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Schema validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}

/// Errors raised while validating an [`AuditConfig`](crate::config::AuditConfig).
///
/// These are fatal at load time and are never produced while scoring a call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
