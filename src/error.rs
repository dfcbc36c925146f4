//! Error handling for the Clarke marketplace client

use std::fmt;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Unified error type for the Clarke marketplace client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Authentication errors (failed login, rejected credentials)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Errors reported by the GraphQL API in the response envelope
    #[error("API error: {0}")]
    Api(String),

    /// Local registration-form validation failed; the network was not contacted
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// No session is available, or the session role does not grant access
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// A caller-supplied value was rejected before any request was built
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new API error
    pub fn api<T: fmt::Display>(msg: T) -> Self {
        Error::Api(msg.to_string())
    }

    /// Create a new not-authenticated error
    pub fn not_authenticated<T: fmt::Display>(msg: T) -> Self {
        Error::NotAuthenticated(msg.to_string())
    }

    /// Create a new invalid-input error
    pub fn invalid_input<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidInput(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
