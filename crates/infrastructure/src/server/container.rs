//! Embedded axum container.

use async_trait::async_trait;
use axum::Router;
use rest_harness_application::ports::{ContainerError, TestContainer};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::info;
use url::Url;

struct RunningServer {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

/// An axum server bound to a local socket for the span of one test.
///
/// Must be started and stopped from within a tokio runtime.
pub struct EmbeddedContainer {
    address: String,
    router: Option<Router>,
    base_uri: Option<Url>,
    server: Option<RunningServer>,
}

impl EmbeddedContainer {
    /// Creates a container that will serve `router` on `address`.
    #[must_use]
    pub fn new(address: impl Into<String>, router: Router) -> Self {
        Self {
            address: address.into(),
            router: Some(router),
            base_uri: None,
            server: None,
        }
    }
}

#[async_trait]
impl TestContainer for EmbeddedContainer {
    fn base_uri(&self) -> Option<&Url> {
        self.base_uri.as_ref()
    }

    async fn start(&mut self) -> Result<Url, ContainerError> {
        if self.router.is_none() {
            return Err(ContainerError::AlreadyStarted);
        }

        let listener =
            TcpListener::bind(&self.address)
                .await
                .map_err(|source| ContainerError::Bind {
                    address: self.address.clone(),
                    source,
                })?;
        let local = listener
            .local_addr()
            .map_err(|e| ContainerError::Runtime(Box::new(e)))?;
        let base_uri = Url::parse(&format!("http://{local}/"))
            .map_err(|e| ContainerError::Runtime(Box::new(e)))?;

        let router = self.router.take().ok_or(ContainerError::AlreadyStarted)?;
        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = signal.await;
                })
                .await
        });

        info!(%base_uri, "test container started");
        self.server = Some(RunningServer { shutdown, task });
        self.base_uri = Some(base_uri.clone());
        Ok(base_uri)
    }

    async fn stop(&mut self) -> Result<(), ContainerError> {
        let server = self.server.take().ok_or(ContainerError::NotRunning)?;
        let base_uri = self.base_uri.take();

        // a closed receiver means the server already exited; the join reports why
        let _ = server.shutdown.send(());
        server
            .task
            .await
            .map_err(|e| ContainerError::Runtime(Box::new(e)))?
            .map_err(|e| ContainerError::Runtime(Box::new(e)))?;

        if let Some(base_uri) = base_uri {
            info!(%base_uri, "test container stopped");
        }
        Ok(())
    }
}
