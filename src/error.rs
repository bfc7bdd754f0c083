// src/error.rs

//! Unified error handling for the client library.

use std::fmt;

use thiserror::Error as ThisError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified client error type.
#[derive(ThisError, Debug)]
pub enum Error {
    /// HTTP request failed or timed out
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Response status or shape inconsistent with expectations
    #[error("Unexpected response from {context}: {message}")]
    UnexpectedResponse { context: String, message: String },

    /// Expected structural markers absent from the response
    #[error("Parse error for {context}: {message}")]
    Parse { context: String, message: String },

    /// A requested entity has no upstream record
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// Caller-supplied argument malformed
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create an unexpected-response error with context.
    pub fn unexpected(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::UnexpectedResponse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error with context.
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
