//! Response returned by every request helper
//!
//! Holds the status, headers and raw body of a completed exchange so tests
//! can assert on them or decode the body into their own types.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{DomainError, DomainResult};

/// A completed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestResponse {
    status: u16,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl TestResponse {
    /// Creates a response from raw parts.
    ///
    /// Header names are lowercased. Repeated headers are joined with `", "`.
    #[must_use]
    pub fn new<I, K, V>(status: u16, headers: I, body: Vec<u8>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut map: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let value = value.into();
            map.entry(name.as_ref().to_ascii_lowercase())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(&value);
                })
                .or_insert(value);
        }
        Self {
            status,
            headers: map,
            body,
        }
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns all headers, keyed by lowercase name.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the raw body.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as a lossy UTF-8 string.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if the body is not valid JSON
    /// for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> DomainResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }
}
