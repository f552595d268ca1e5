//! Embedded container port

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::error::BoxError;

/// Errors raised by an embedded container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The container settings could not be resolved.
    #[error("invalid container settings")]
    Settings(#[source] BoxError),

    /// The listening socket could not be bound.
    #[error("failed to bind {address}")]
    Bind {
        /// Address the container tried to bind
        address: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The resources could not be assembled into a router.
    #[error("invalid resource registration: {0}")]
    Registration(String),

    /// The server task or its runtime failed.
    #[error("container runtime failure")]
    Runtime(#[source] BoxError),

    /// `start` was called on a container that already started.
    #[error("container already started")]
    AlreadyStarted,

    /// `stop` was called on a container that is not running.
    #[error("container is not running")]
    NotRunning,
}

/// An in-process HTTP server that hosts the resources under test.
///
/// A container is started once and stopped once. Stopping must release the
/// listening socket before it returns.
#[async_trait]
pub trait TestContainer: Send {
    /// Returns the base URI once the container is listening.
    fn base_uri(&self) -> Option<&Url>;

    /// Binds the listening socket and starts serving.
    ///
    /// Returns the base URI, e.g. `http://127.0.0.1:41234/`.
    async fn start(&mut self) -> Result<Url, ContainerError>;

    /// Stops serving and releases the listening socket.
    async fn stop(&mut self) -> Result<(), ContainerError>;
}
