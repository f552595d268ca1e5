//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port using the reqwest
//! library. It performs every exchange the harness request helpers issue.

use async_trait::async_trait;
use reqwest::{Client, Method};
use rest_harness_application::ports::{HttpTransport, TransportError};
use rest_harness_domain::{Entity, HttpMethod, OutgoingRequest, TestResponse};
use tracing::debug;

use crate::http::{BodyBuildError, BuiltBody, build_body};

/// HTTP transport backed by `reqwest::Client`.
///
/// Multipart support comes from reqwest's `multipart` feature, the client
/// side counterpart of the multipart handling the embedded container
/// registers.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Redirects are not followed so tests observe the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("rest-harness/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Attaches the entity body, adding `Content-Type` unless the caller set one.
    async fn apply_entity(
        builder: reqwest::RequestBuilder,
        entity: &Entity,
        has_content_type: bool,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let body = build_body(entity).await.map_err(Self::map_body_error)?;

        let builder = match (body.content_type(), has_content_type) {
            (Some(content_type), false) => builder.header("Content-Type", content_type),
            _ => builder,
        };

        Ok(match body {
            BuiltBody::Text { content, .. } => builder.body(content),
            BuiltBody::Binary { content, .. } => builder.body(content),
            BuiltBody::Multipart(form) => builder.multipart(form),
        })
    }

    fn map_body_error(error: BodyBuildError) -> TransportError {
        match error {
            BodyBuildError::FileReadError { message } => TransportError::FileRead(message),
            other => TransportError::InvalidBody(other.to_string()),
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout;
        }

        if error.is_connect() {
            let message = error.to_string();
            if message.to_lowercase().contains("refused") {
                return TransportError::ConnectionRefused {
                    host: error
                        .url()
                        .and_then(|u| u.host_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<TestResponse, TransportError> {
        let has_content_type = request.has_header("content-type");
        let OutgoingRequest {
            method,
            url,
            headers,
            entity,
        } = request;

        debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(method), url.clone());

        for header in &headers {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(entity) = &entity {
            builder = Self::apply_entity(builder, entity, has_content_type).await?;
        }

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let response_headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Other(format!("Failed to read body: {e}")))?
            .to_vec();

        debug!(%method, %url, status, bytes = body.len(), "received response");

        Ok(TestResponse::new(status, response_headers, body))
    }
}
