//! Error types for attribute extraction
//!
//! Resolution failures are synchronous and propagate straight to the caller:
//! a single failing attribute fails the whole output production.

use crate::types::TypeTag;
use serde_json::Value;
use thiserror::Error;

/// Main error type for boundary operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required attribute could not be located on the model
    #[error("Missing attribute: '{name}' not found on model")]
    MissingAttribute { name: String },

    /// A value failed a declared type assertion
    #[error("Bad type: value {value} not of type {expected}")]
    BadType { value: Value, expected: TypeTag },

    /// The attribute name is not declared on the model class
    #[error("Unknown attribute: '{name}' is not declared")]
    UnknownAttribute { name: String },

    /// Cross-field failure raised from a preprocess hook
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Input that cannot be wrapped as a model
    #[error("Invalid model: {message}")]
    InvalidModel { message: String },

    /// Malformed attribute declarations
    #[error("Declaration error: {message}")]
    Declaration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON encoding errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a missing attribute error
    pub fn missing_attribute(name: impl Into<String>) -> Self {
        Self::MissingAttribute { name: name.into() }
    }

    /// Create a bad type error carrying the offending value
    pub fn bad_type(value: Value, expected: TypeTag) -> Self {
        Self::BadType { value, expected }
    }

    /// Create a bad request error, typically from a preprocess hook
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an invalid model error
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }

    /// Create a declaration error without an underlying cause
    pub fn declaration(message: impl Into<String>) -> Self {
        Self::Declaration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a declaration error wrapping its cause
    pub fn declaration_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Declaration {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Whether this error was raised while resolving an attribute value
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::MissingAttribute { .. } | Self::BadType { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            message: source.to_string(),
            source,
        }
    }
}
