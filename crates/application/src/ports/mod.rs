//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the harness and the server and
//! client implementations that back it.

mod container;
mod transport;

pub use container::{ContainerError, TestContainer};
pub use transport::{HttpTransport, TransportError};
