//! rest-harness - embedded HTTP server fixtures for endpoint tests
//!
//! A [`Fixture`] names the resources to serve and the init parameters to
//! hand the container. [`TestHarness::set_up`] starts an embedded axum
//! server for it on its own runtime, the request helpers issue blocking
//! GET/POST/form/multipart/JSON calls against it, and
//! [`TestHarness::tear_down`] (or dropping the harness) stops it again.
//!
//! The harness blocks on its own runtime, so use it from plain `#[test]`
//! functions rather than from inside another tokio runtime.
//!
//! ```no_run
//! use rest_harness::axum::{Router, routing::get};
//! use rest_harness::{Fixture, InitParams, Resource, ResourceSet, TestHarness};
//!
//! struct Ping;
//!
//! impl Resource for Ping {
//!     fn routes(&self) -> Router {
//!         Router::new().route("/ping", get(|| async { "pong" }))
//!     }
//! }
//!
//! struct PingFixture;
//!
//! impl Fixture for PingFixture {
//!     fn resources(&self) -> ResourceSet {
//!         ResourceSet::new().with(Ping)
//!     }
//!
//!     fn init_params(&self) -> InitParams {
//!         InitParams::new()
//!     }
//! }
//!
//! let harness = TestHarness::set_up(&PingFixture)?;
//! let response = harness.get("ping")?;
//! assert_eq!(response.text(), "pong");
//! harness.tear_down()?;
//! # Ok::<(), rest_harness::HarnessError>(())
//! ```

mod fixture;
mod harness;
mod target;

pub use fixture::Fixture;
pub use harness::TestHarness;
pub use target::WebTarget;

pub use axum;
pub use rest_harness_application::{
    ContainerError, HarnessError, HarnessResult, HttpTransport, TestContainer, TransportError,
};
pub use rest_harness_domain::{
    BodyPart, DomainError, Entity, EntityBody, Form, HttpMethod, InitParams, MultiPart,
    ParamValue, RequestParams, TestResponse,
};
pub use rest_harness_infrastructure::{
    CommitPolicy, ContainerFactory, Deployment, EmbeddedContainerFactory, LoggingConfig,
    Resource, ResourceSet,
};
