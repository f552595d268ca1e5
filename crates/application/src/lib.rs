//! rest-harness application layer
//!
//! This crate defines:
//! - Port traits for the embedded container and the HTTP transport
//! - Harness-level error handling

pub mod error;
pub mod ports;

pub use error::{BoxError, HarnessError, HarnessResult};
pub use ports::{ContainerError, HttpTransport, TestContainer, TransportError};
