//! Fixture definition

use rest_harness_domain::InitParams;
use rest_harness_infrastructure::{
    ContainerFactory, EmbeddedContainerFactory, LoggingConfig, ResourceSet,
};

/// Describes what one test fixture deploys.
///
/// Implementors supply the resources and init parameters; the harness does
/// the rest. A fresh value is read on every [`crate::TestHarness::set_up`].
pub trait Fixture {
    /// Resources to serve. Registering a type twice has no extra effect.
    ///
    /// Distinct resources claiming the same route fail setup with
    /// [`ContainerError::Registration`](rest_harness_application::ContainerError::Registration);
    /// axum's panic message for the conflict still appears on stderr.
    fn resources(&self) -> ResourceSet;

    /// Init parameters handed verbatim to the container.
    ///
    /// Keys starting with `harness.` configure the embedded container
    /// (`port`, `host`, `log_traffic`, `body_limit`, `commit`,
    /// `set_status_on_404`, `set_status_over_send_error`); every key is
    /// visible to resources as an `Extension<InitParams>`.
    fn init_params(&self) -> InitParams;

    /// Logging for the harness threads.
    fn logging(&self) -> LoggingConfig {
        LoggingConfig::default()
    }

    /// Factory that builds the container.
    fn container_factory(&self) -> Box<dyn ContainerFactory> {
        Box::new(EmbeddedContainerFactory)
    }
}
