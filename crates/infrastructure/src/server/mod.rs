//! Embedded HTTP container.
//!
//! This module provides:
//! - The resource registry the container serves
//! - Settings resolved from init parameters
//! - The response writer and its commit policy
//! - The axum-backed container and the factory that assembles it

mod container;
mod factory;
mod resource;
mod response_writer;
mod settings;

pub use container::EmbeddedContainer;
pub use factory::{ContainerFactory, Deployment, EmbeddedContainerFactory, build_router};
pub use resource::{Resource, ResourceSet};
pub use response_writer::{CommitPolicy, ResponseWriter, WriterOptions};
pub use settings::{ContainerSettings, ENV_PREFIX, INIT_PARAM_PREFIX};
