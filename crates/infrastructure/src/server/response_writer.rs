//! Response commit handling.
//!
//! Every response leaving the embedded container passes through a
//! [`ResponseWriter`]. The writer's last step, `commit`, either sends the
//! response as the handler built it or, under [`CommitPolicy::SendError`],
//! replaces a bodiless error response with a generated error page the way
//! a servlet container's `sendError` would.

use axum::body::{Body, HttpBody};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;

/// What the commit step does with bodiless error responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommitPolicy {
    /// Commit is a no-op; responses leave exactly as built.
    #[default]
    Suppress,
    /// Bodiless error responses are rewritten into an error page.
    SendError,
}

/// Flags the writer is constructed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Keep a bare 404 as a plain status instead of an error page.
    pub use_set_status_on_404: bool,
    /// Never generate error pages; always keep the plain status.
    pub set_status_over_send_error: bool,
}

/// Finalizes responses produced by the resources under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseWriter {
    options: WriterOptions,
    policy: CommitPolicy,
}

impl ResponseWriter {
    /// Creates a writer with the given flags and commit policy.
    #[must_use]
    pub const fn new(options: WriterOptions, policy: CommitPolicy) -> Self {
        Self { options, policy }
    }

    /// Creates a writer whose commit step does nothing.
    #[must_use]
    pub const fn suppressing(options: WriterOptions) -> Self {
        Self::new(options, CommitPolicy::Suppress)
    }

    /// Returns the writer flags.
    #[must_use]
    pub const fn options(&self) -> WriterOptions {
        self.options
    }

    /// Returns the commit policy.
    #[must_use]
    pub const fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Runs the commit step on a finished response.
    #[must_use]
    pub fn commit(&self, response: Response) -> Response {
        match self.policy {
            CommitPolicy::Suppress => response,
            CommitPolicy::SendError => self.send_error(response),
        }
    }

    fn send_error(&self, response: Response) -> Response {
        let status = response.status();
        let keep_status = self.options.set_status_over_send_error
            || !(status.is_client_error() || status.is_server_error())
            || (self.options.use_set_status_on_404 && status == StatusCode::NOT_FOUND)
            || has_entity(&response);
        if keep_status {
            return response;
        }

        let (mut parts, _) = response.into_parts();
        parts.headers.remove(header::CONTENT_LENGTH);
        parts.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        Response::from_parts(parts, Body::from(error_page(status)))
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::suppressing(WriterOptions::default())
    }
}

/// Middleware that hands every response to the writer's commit step.
pub(crate) async fn commit_response(
    State(writer): State<ResponseWriter>,
    request: Request,
    next: Next,
) -> Response {
    writer.commit(next.run(request).await)
}

fn has_entity(response: &Response) -> bool {
    response.body().size_hint().exact() != Some(0)
}

fn error_page(status: StatusCode) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("");
    format!(
        "<html><head><title>Error {code} {reason}</title></head>\
         <body><h2>HTTP ERROR {code}</h2><p>{reason}</p></body></html>"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::middleware::from_fn_with_state;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    fn bare(status: StatusCode) -> Response {
        let mut response = status.into_response();
        response
            .headers_mut()
            .insert("x-handler", HeaderValue::from_static("yes"));
        response
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_suppressed_commit_leaves_response_untouched() {
        let writer = ResponseWriter::default();

        let response = writer.commit(bare(StatusCode::NOT_FOUND));

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["x-handler"], "yes");
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_send_error_writes_error_page() {
        let writer = ResponseWriter::new(WriterOptions::default(), CommitPolicy::SendError);

        let response = writer.commit(bare(StatusCode::INTERNAL_SERVER_ERROR));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()["x-handler"], "yes");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(body_text(response).await.contains("HTTP ERROR 500"));
    }

    #[tokio::test]
    async fn test_send_error_keeps_bodies_and_success() {
        let writer = ResponseWriter::new(WriterOptions::default(), CommitPolicy::SendError);

        let with_body = writer.commit((StatusCode::BAD_REQUEST, "bad input").into_response());
        assert_eq!(body_text(with_body).await, "bad input");

        let ok = writer.commit(bare(StatusCode::NO_CONTENT));
        assert_eq!(ok.status(), StatusCode::NO_CONTENT);
        assert_eq!(body_text(ok).await, "");
    }

    #[tokio::test]
    async fn test_flags_keep_plain_status() {
        let on_404 = ResponseWriter::new(
            WriterOptions {
                use_set_status_on_404: true,
                set_status_over_send_error: false,
            },
            CommitPolicy::SendError,
        );
        assert_eq!(body_text(on_404.commit(bare(StatusCode::NOT_FOUND))).await, "");
        assert!(
            body_text(on_404.commit(bare(StatusCode::FORBIDDEN)))
                .await
                .contains("HTTP ERROR 403")
        );

        let over_send_error = ResponseWriter::new(
            WriterOptions {
                use_set_status_on_404: false,
                set_status_over_send_error: true,
            },
            CommitPolicy::SendError,
        );
        assert_eq!(
            body_text(over_send_error.commit(bare(StatusCode::BAD_GATEWAY))).await,
            ""
        );
    }

    #[tokio::test]
    async fn test_middleware_covers_fallback() {
        let writer = ResponseWriter::new(WriterOptions::default(), CommitPolicy::SendError);
        let router = Router::new()
            .route("/ok", get(|| async { "fine" }))
            .layer(from_fn_with_state(writer, commit_response));

        let missing = router
            .clone()
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert!(body_text(missing).await.contains("HTTP ERROR 404"));

        let ok = router
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_text(ok).await, "fine");
    }
}
