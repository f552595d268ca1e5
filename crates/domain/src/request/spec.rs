//! Outgoing request specification

use url::Url;

use super::entity::Entity;
use super::method::HttpMethod;

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Header name
    pub name: String,
    /// Header value
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A fully resolved request, ready to hand to a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the query string
    pub url: Url,
    /// Explicit headers, in order
    pub headers: Vec<Header>,
    /// Optional body
    pub entity: Option<Entity>,
}

impl OutgoingRequest {
    /// Creates a request without headers or body.
    #[must_use]
    pub const fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            entity: None,
        }
    }

    /// Returns true if a header with this name was set explicitly.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }
}
