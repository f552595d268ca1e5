//! rest-harness infrastructure - adapters and implementations
//!
//! This crate provides the concrete pieces behind the application ports:
//! the axum embedded container and its factory, the reqwest transport,
//! body encoding, and harness-scoped logging.

pub mod adapters;
pub mod http;
pub mod logging;
pub mod server;

pub use adapters::ReqwestTransport;
pub use http::{BodyBuildError, BuiltBody, build_body};
pub use logging::{DEFAULT_DIRECTIVES, LoggingConfig, build_runtime};
pub use server::{
    CommitPolicy, ContainerFactory, ContainerSettings, Deployment, EmbeddedContainer,
    EmbeddedContainerFactory, Resource, ResourceSet, ResponseWriter, WriterOptions, build_router,
};
