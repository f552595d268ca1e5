//! Request builder bound to a running harness.

use std::fmt::Display;

use rest_harness_application::HarnessResult;
use rest_harness_domain::{
    Entity, Header, HttpMethod, OutgoingRequest, QueryParam, QueryParams, RequestParams,
    TestResponse,
};
use url::Url;

use crate::harness::TestHarness;

/// A URL under the harness base URI plus the query and headers to send.
///
/// Obtained from [`TestHarness::target`]. It borrows the harness, so a
/// target cannot outlive the container it points at.
pub struct WebTarget<'h> {
    harness: &'h TestHarness,
    url: Url,
    query: QueryParams,
    headers: Vec<Header>,
}

impl<'h> WebTarget<'h> {
    pub(crate) const fn new(harness: &'h TestHarness, url: Url) -> Self {
        Self {
            harness,
            url,
            query: QueryParams::new(),
            headers: Vec::new(),
        }
    }

    /// Appends path segments. Each `/`-separated segment is percent-encoded.
    #[must_use]
    pub fn path(mut self, segments: &str) -> Self {
        if let Ok(mut path) = self.url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.split('/').filter(|s| !s.is_empty()));
        }
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.query.add(QueryParam::new(name, value.to_string()));
        self
    }

    /// Appends every non-null entry of `params`, in order.
    #[must_use]
    pub fn query_params(mut self, params: &RequestParams) -> Self {
        for param in QueryParams::from_params(params).all() {
            self.query.add(param.clone());
        }
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Returns the URL that will be requested.
    #[must_use]
    pub fn url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.all() {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        url
    }

    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be built or the exchange fails.
    pub fn request(self, method: HttpMethod, entity: Option<Entity>) -> HarnessResult<TestResponse> {
        let mut request = OutgoingRequest::new(method, self.url());
        request.headers = self.headers;
        request.entity = entity;
        self.harness.execute(request)
    }

    /// Sends a request whose method is given by name, e.g. `"put"`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Domain`](rest_harness_application::HarnessError::Domain)
    /// for an unknown method name, or an error if the exchange fails.
    pub fn method(self, name: &str, entity: Option<Entity>) -> HarnessResult<TestResponse> {
        let method = name.parse::<HttpMethod>()?;
        self.request(method, entity)
    }

    /// Sends a GET.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails.
    pub fn get(self) -> HarnessResult<TestResponse> {
        self.request(HttpMethod::Get, None)
    }

    /// Sends a POST carrying `entity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be built or the exchange fails.
    pub fn post(self, entity: Entity) -> HarnessResult<TestResponse> {
        self.request(HttpMethod::Post, Some(entity))
    }
}
