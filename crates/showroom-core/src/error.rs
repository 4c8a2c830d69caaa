//! Core error types for showroom.
//!
//! [`ValidationError`] describes a single failed field rule; the form keeps
//! those as data rather than returning them. [`ShowroomError`] covers what can
//! go wrong outside the form's own data model: reading and parsing
//! configuration, unknown field identifiers, and submission failures.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// A single failed validation rule.
///
/// The `message` is the human-readable text shown next to the field; the
/// `code` identifies the rule that failed ("required", "invalid",
/// "max_length", "length").
///
/// # Examples
///
/// ```
/// use showroom_core::error::ValidationError;
///
/// let err = ValidationError::new("Name is required.", "required");
/// assert_eq!(err.to_string(), "Name is required.");
///
/// let err = ValidationError::new("Message too long.", "max_length").with_param("max", "1000");
/// assert_eq!(err.params["max"], "1000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The human-readable error message.
    pub message: String,
    /// A short code identifying the type of validation failure.
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for showroom.
#[derive(Error, Debug)]
pub enum ShowroomError {
    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The rendering surface referred to a field the form does not have.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// The submission backend could not deliver a payload.
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ShowroomError {
    /// Returns a short, stable code for the failure.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ConfigurationError(_) => "configuration",
            Self::UnknownField(_) => "unknown_field",
            Self::SubmissionFailed(_) => "submission_failed",
            Self::SerializationError(_) => "serialization",
            Self::IoError(_) => "io",
        }
    }
}

impl From<serde_json::Error> for ShowroomError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, ShowroomError>`.
pub type ShowroomResult<T> = Result<T, ShowroomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("Email is invalid.", "invalid");
        assert_eq!(err.to_string(), "Email is invalid.");
    }

    #[test]
    fn test_validation_error_with_param() {
        let err = ValidationError::new("Too long.", "max_length").with_param("max", "1000");
        assert_eq!(err.params.get("max").unwrap(), "1000");
    }

    #[test]
    fn test_showroom_error_codes() {
        assert_eq!(
            ShowroomError::ConfigurationError("x".into()).code(),
            "configuration"
        );
        assert_eq!(ShowroomError::UnknownField("x".into()).code(), "unknown_field");
        assert_eq!(
            ShowroomError::SubmissionFailed("x".into()).code(),
            "submission_failed"
        );
    }

    #[test]
    fn test_showroom_error_display() {
        let err = ShowroomError::UnknownField("zip".into());
        assert_eq!(err.to_string(), "Unknown form field: zip");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ShowroomError = io_err.into();
        assert_eq!(err.code(), "io");
        assert!(err.to_string().contains("file missing"));
    }
}
