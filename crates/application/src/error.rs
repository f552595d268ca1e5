//! Harness error types

use rest_harness_domain::DomainError;
use thiserror::Error;

use crate::ports::{ContainerError, TransportError};

/// Boxed error used to carry foreign causes across layers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced to test code by the harness.
///
/// Container lifecycle failures keep the original cause reachable through
/// [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The embedded container could not be created or started.
    #[error("failed to start test container")]
    ContainerStart(#[source] ContainerError),

    /// The embedded container could not be stopped.
    #[error("failed to tear down test container")]
    ContainerStop(#[source] ContainerError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request could not be built or a response could not be decoded.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;
