//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests or reading responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL or path is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A response body could not be decoded into the requested type.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A value could not be serialized into a request entity.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
