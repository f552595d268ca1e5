//! HTTP transport port

use async_trait::async_trait;
use rest_harness_domain::{OutgoingRequest, TestResponse};
use thiserror::Error;

/// Errors raised while performing an HTTP exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server refused the connection.
    #[error("connection refused: {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request body could not be built.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A file referenced by a multipart part could not be read.
    #[error("failed to read file: {0}")]
    FileRead(String),

    /// Any other client failure.
    #[error("HTTP client error: {0}")]
    Other(String),
}

/// Port for executing a single HTTP exchange.
///
/// Implementations never retry; a failure is returned to the caller as is.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and reads the full response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the exchange fails.
    async fn execute(&self, request: OutgoingRequest) -> Result<TestResponse, TransportError>;
}
