//! Test harness lifecycle and request helpers.

use rest_harness_application::{
    ContainerError, HarnessError, HarnessResult, HttpTransport, TestContainer, TransportError,
};
use rest_harness_domain::{
    DomainError, Entity, Form, MultiPart, OutgoingRequest, RequestParams, TestResponse,
};
use rest_harness_infrastructure::{Deployment, ReqwestTransport, build_runtime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;
use tracing::dispatcher::DefaultGuard;
use tracing::warn;
use url::Url;

use crate::fixture::Fixture;
use crate::target::WebTarget;

const WORKER_THREADS: usize = 2;

/// A running embedded container plus the client used to call it.
///
/// Created by [`TestHarness::set_up`]. The container is stopped exactly
/// once: by [`TestHarness::tear_down`], or when the harness is dropped,
/// including while a failing test unwinds.
pub struct TestHarness {
    base_uri: Url,
    container: Option<Box<dyn TestContainer>>,
    transport: Option<Box<dyn HttpTransport>>,
    runtime: Runtime,
    _log_guard: DefaultGuard,
}

impl TestHarness {
    /// Starts a container for `fixture`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ContainerStart`] if the runtime, the
    /// container or the client cannot be created, or the container fails
    /// to start. The original failure is the error's source.
    pub fn set_up<F: Fixture + ?Sized>(fixture: &F) -> HarnessResult<Self> {
        Self::set_up_with(fixture, || {
            ReqwestTransport::new().map(|transport| Box::new(transport) as Box<dyn HttpTransport>)
        })
    }

    fn set_up_with<F, T>(fixture: &F, transport: T) -> HarnessResult<Self>
    where
        F: Fixture + ?Sized,
        T: FnOnce() -> Result<Box<dyn HttpTransport>, TransportError>,
    {
        let dispatch = fixture.logging().dispatch();
        let log_guard = tracing::dispatcher::set_default(&dispatch);
        let runtime = build_runtime(&dispatch, WORKER_THREADS)
            .map_err(|e| HarnessError::ContainerStart(ContainerError::Runtime(Box::new(e))))?;

        let deployment = Deployment {
            resources: fixture.resources(),
            init_params: fixture.init_params(),
        };

        let (mut container, transport) = {
            let _runtime_context = runtime.enter();
            let container = fixture
                .container_factory()
                .create(deployment)
                .map_err(HarnessError::ContainerStart)?;
            let transport = transport()
                .map_err(|e| HarnessError::ContainerStart(ContainerError::Runtime(Box::new(e))))?;
            (container, transport)
        };

        let base_uri = runtime
            .block_on(container.start())
            .map_err(HarnessError::ContainerStart)?;

        Ok(Self {
            base_uri,
            container: Some(container),
            transport: Some(transport),
            runtime,
            _log_guard: log_guard,
        })
    }

    /// Releases the client, then stops the container.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ContainerStop`] if the container fails to
    /// stop. The original failure is the error's source.
    pub fn tear_down(mut self) -> HarnessResult<()> {
        self.stop_container()
    }

    fn stop_container(&mut self) -> HarnessResult<()> {
        // pooled keep-alive connections must not outlive the server
        drop(self.transport.take());
        let Some(mut container) = self.container.take() else {
            return Ok(());
        };
        self.runtime
            .block_on(container.stop())
            .map_err(HarnessError::ContainerStop)
    }

    /// Returns the container's base URI, e.g. `http://127.0.0.1:41234/`.
    #[must_use]
    pub const fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// Returns a target for `path`, relative to the base URI.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Domain`] if `path` does not form a valid URL.
    pub fn target(&self, path: &str) -> HarnessResult<WebTarget<'_>> {
        let url = self
            .base_uri
            .join(path)
            .map_err(|e| DomainError::InvalidUrl(format!("{path}: {e}")))?;
        Ok(WebTarget::new(self, url))
    }

    /// Issues a GET.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the exchange fails.
    pub fn get(&self, path: &str) -> HarnessResult<TestResponse> {
        self.target(path)?.get()
    }

    /// Issues a GET with `params` appended as query parameters, in order.
    ///
    /// Null values are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the exchange fails.
    pub fn get_with(&self, path: &str, params: &RequestParams) -> HarnessResult<TestResponse> {
        self.target(path)?.query_params(params).get()
    }

    /// Issues a POST with a prebuilt entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the exchange fails.
    pub fn post(&self, path: &str, entity: Entity) -> HarnessResult<TestResponse> {
        self.target(path)?.post(entity)
    }

    /// POSTs a URL-encoded form.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the exchange fails.
    pub fn post_form(&self, path: &str, form: Form) -> HarnessResult<TestResponse> {
        self.post(path, Entity::form(form))
    }

    /// POSTs string pairs as a URL-encoded form.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid or the exchange fails.
    pub fn post_form_map<I, K, V>(&self, path: &str, fields: I) -> HarnessResult<TestResponse>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.post_form(path, fields.into_iter().collect())
    }

    /// POSTs `value` serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized, the path is
    /// invalid or the exchange fails.
    pub fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        value: &T,
    ) -> HarnessResult<TestResponse> {
        self.post(path, Entity::json(value)?)
    }

    /// POSTs `request` as JSON and decodes a `200 OK` body into `R`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the exchange or decoding fails.
    ///
    /// # Panics
    ///
    /// Fails the calling test when the status is not 200, before the body
    /// is decoded.
    pub fn post_json_as<T, R>(&self, path: &str, request: &T) -> HarnessResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.post_json(path, request)?;
        assert_eq!(response.status(), 200, "HTTP status");
        Ok(response.json()?)
    }

    /// POSTs `params` as multipart form data.
    ///
    /// File references become file parts, null values are skipped and
    /// everything else becomes a text field.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is invalid, a file cannot be read or
    /// the exchange fails.
    pub fn post_multipart(&self, path: &str, params: &RequestParams) -> HarnessResult<TestResponse> {
        self.post(path, Entity::multipart(MultiPart::from_params(params)))
    }

    pub(crate) fn execute(&self, request: OutgoingRequest) -> HarnessResult<TestResponse> {
        let transport = self
            .transport
            .as_deref()
            .ok_or_else(|| TransportError::Other("harness has been torn down".to_string()))?;
        Ok(self.runtime.block_on(transport.execute(request))?)
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        if let Err(error) = self.stop_container() {
            let cause = std::error::Error::source(&error).map(ToString::to_string);
            warn!(%error, ?cause, base_uri = %self.base_uri, "test container teardown failed");
        }
    }
}
