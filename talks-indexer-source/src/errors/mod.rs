//! Error types for the talk source.

use thiserror::Error;

/// Errors that can occur while fetching from the talk source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The request could not be sent or the response could not be read.
    #[error("Request error: {0}")]
    RequestError(String),

    /// The source answered with a non-success status.
    #[error("Unexpected status code: {status}, body: {body}")]
    StatusError { status: u16, body: String },

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error parsing or decoding a response body.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The configured base URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl SourceError {
    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::RequestError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Whether the requested resource does not exist.
    ///
    /// Only [`SourceError::NotFound`] qualifies; a bare 404 status from an
    /// endpoint the caller did not ask about stays a status error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
