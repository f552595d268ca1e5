//! Container factory.
//!
//! Assembles the router a deployment describes and wraps it in a container.

use axum::Extension;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use rest_harness_application::ports::{ContainerError, TestContainer};
use rest_harness_domain::InitParams;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::container::EmbeddedContainer;
use super::resource::ResourceSet;
use super::response_writer::commit_response;
use super::settings::ContainerSettings;

/// Everything a container needs to host one test fixture.
#[derive(Debug, Clone, Default)]
pub struct Deployment {
    /// Resources to serve
    pub resources: ResourceSet,
    /// Init parameters, handed verbatim to the container
    pub init_params: InitParams,
}

/// Creates containers for deployments.
pub trait ContainerFactory: Send + Sync {
    /// Builds a container, not yet started.
    ///
    /// # Errors
    ///
    /// Returns an error if the deployment's settings or resources are
    /// invalid.
    fn create(&self, deployment: Deployment) -> Result<Box<dyn TestContainer>, ContainerError>;
}

/// Factory for [`EmbeddedContainer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedContainerFactory;

impl ContainerFactory for EmbeddedContainerFactory {
    fn create(&self, deployment: Deployment) -> Result<Box<dyn TestContainer>, ContainerError> {
        let settings = ContainerSettings::from_init_params(&deployment.init_params)?;
        let router = build_router(&deployment, &settings)?;
        debug!(
            resources = deployment.resources.len(),
            address = %settings.bind_address(),
            commit = ?settings.commit,
            "assembled test container"
        );
        Ok(Box::new(EmbeddedContainer::new(
            settings.bind_address(),
            router,
        )))
    }
}

/// Builds the full router for a deployment.
///
/// The resources' routes are wrapped, innermost first, with the init
/// parameters as an [`Extension`], the request body limit, the response
/// writer and, when enabled, traffic logging.
///
/// # Errors
///
/// Returns [`ContainerError::Registration`] if the resources conflict.
pub fn build_router(
    deployment: &Deployment,
    settings: &ContainerSettings,
) -> Result<Router, ContainerError> {
    let router = deployment
        .resources
        .build_router()?
        .layer(Extension(deployment.init_params.clone()))
        .layer(DefaultBodyLimit::max(settings.body_limit))
        .layer(from_fn_with_state(
            settings.response_writer(),
            commit_response,
        ));

    if settings.log_traffic {
        Ok(router.layer(TraceLayer::new_for_http()))
    } else {
        Ok(router)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::server::Resource;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    struct Greeting;

    impl Resource for Greeting {
        fn routes(&self) -> Router {
            Router::new().route(
                "/greeting",
                get(|Extension(params): Extension<InitParams>| async move {
                    params.get("app.greeting").unwrap_or("none").to_string()
                }),
            )
        }
    }

    fn deployment(init_params: InitParams) -> Deployment {
        Deployment {
            resources: ResourceSet::new().with(Greeting),
            init_params,
        }
    }

    #[tokio::test]
    async fn test_resources_see_init_params() {
        let deployment = deployment(InitParams::new().with("app.greeting", "hello"));
        let settings = ContainerSettings::from_init_params(&deployment.init_params).unwrap();
        let router = build_router(&deployment, &settings).unwrap();

        let response = router
            .oneshot(Request::builder().uri("/greeting").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"hello");
    }

    #[tokio::test]
    async fn test_body_limit_applies() {
        struct Upload;

        impl Resource for Upload {
            fn routes(&self) -> Router {
                Router::new().route(
                    "/upload",
                    axum::routing::post(|body: axum::body::Bytes| async move { body.len().to_string() }),
                )
            }
        }

        let deployment = Deployment {
            resources: ResourceSet::new().with(Upload),
            init_params: InitParams::new().with("harness.body_limit", "4"),
        };
        let settings = ContainerSettings::from_init_params(&deployment.init_params).unwrap();
        let router = build_router(&deployment, &settings).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .body(Body::from("too large"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_factory_rejects_unknown_settings() {
        let result = EmbeddedContainerFactory.create(deployment(
            InitParams::new().with("harness.no_such_setting", "1"),
        ));

        assert!(matches!(result, Err(ContainerError::Settings(_))));
    }

    #[test]
    fn test_factory_creates_unstarted_container() {
        let container = EmbeddedContainerFactory
            .create(deployment(InitParams::new()))
            .unwrap();

        assert!(container.base_uri().is_none());
    }
}
