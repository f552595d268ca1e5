//! Resources and fixtures shared by the integration tests.
#![allow(dead_code, clippy::unwrap_used)]

use rest_harness::axum::extract::{Multipart, Path, RawQuery};
use rest_harness::axum::http::{HeaderMap, Method, StatusCode, header};
use rest_harness::axum::routing::{any, get, post};
use rest_harness::axum::{Extension, Json, Router};
use rest_harness::{Fixture, InitParams, LoggingConfig, Resource, ResourceSet};
use serde::{Deserialize, Serialize};

pub struct Ping;

impl Resource for Ping {
    fn routes(&self) -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }
}

/// Claims `/ping` as well, so it cannot be deployed next to [`Ping`].
pub struct ShadowPing;

impl Resource for ShadowPing {
    fn routes(&self) -> Router {
        Router::new().route("/ping", get(|| async { "shadow" }))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoedBody {
    pub content_type: String,
    pub body: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content: String,
}

pub struct Echo;

impl Resource for Echo {
    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/echo/query",
                get(|RawQuery(query): RawQuery| async move { query.unwrap_or_default() }),
            )
            .route("/echo/body", post(echo_body))
            .route("/echo/multipart", post(echo_multipart))
            .route(
                "/echo/method",
                any(|method: Method| async move { method.to_string() }),
            )
    }
}

async fn echo_body(headers: HeaderMap, body: String) -> Json<EchoedBody> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(EchoedBody { content_type, body })
}

async fn echo_multipart(mut multipart: Multipart) -> Json<Vec<EchoedPart>> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(ToString::to_string);
        let content = field.text().await.unwrap();
        parts.push(EchoedPart {
            name,
            file_name,
            content,
        });
    }
    Json(parts)
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greet {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
}

pub struct Greeter;

impl Resource for Greeter {
    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/greet",
                post(|Json(greet): Json<Greet>| async move {
                    Json(Greeting {
                        message: format!("hello, {}", greet.name),
                    })
                }),
            )
            .route(
                "/greet/broken",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
    }
}

pub struct Status;

impl Resource for Status {
    fn routes(&self) -> Router {
        Router::new()
            .route(
                "/status/empty-error",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/status/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
            )
    }
}

pub struct Config;

impl Resource for Config {
    fn routes(&self) -> Router {
        Router::new().route(
            "/config/{key}",
            get(
                |Path(key): Path<String>, Extension(params): Extension<InitParams>| async move {
                    params.get(&key).map(ToString::to_string).ok_or(StatusCode::NOT_FOUND)
                },
            ),
        )
    }
}

/// Fixture serving every test resource, configurable per test.
pub struct TestFixture {
    resources: ResourceSet,
    init_params: InitParams,
    logging: LoggingConfig,
}

impl TestFixture {
    pub fn new() -> Self {
        Self::with_resources(
            ResourceSet::new()
                .with(Ping)
                .with(Echo)
                .with(Greeter)
                .with(Status)
                .with(Config),
        )
    }

    pub fn with_resources(resources: ResourceSet) -> Self {
        Self {
            resources,
            init_params: InitParams::new(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.init_params.insert(key, value);
        self
    }

    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

impl Fixture for TestFixture {
    fn resources(&self) -> ResourceSet {
        self.resources.clone()
    }

    fn init_params(&self) -> InitParams {
        self.init_params.clone()
    }

    fn logging(&self) -> LoggingConfig {
        self.logging.clone()
    }
}
