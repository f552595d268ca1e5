//! Request parameter types
//!
//! A [`RequestParams`] map feeds both query strings and multipart bodies.
//! Its iteration order is insertion order, and that order is the order in
//! which parameters appear on the wire.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    /// A plain string value.
    Text(String),
    /// A reference to a file on disk, uploaded as a file part.
    File(PathBuf),
    /// No value. Skipped when building queries and multipart bodies.
    #[default]
    Null,
}

impl ParamValue {
    /// Creates a text value from anything with a string representation.
    #[must_use]
    pub fn display(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// Creates a file reference value.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Returns true for [`ParamValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value as it appears in a query string.
    ///
    /// Files render as their path; `Null` has no rendering.
    #[must_use]
    pub fn as_query_value(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::File(path) => Some(path.display().to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&Path> for ParamValue {
    fn from(value: &Path) -> Self {
        Self::File(value.to_path_buf())
    }
}

impl From<PathBuf> for ParamValue {
    fn from(value: PathBuf) -> Self {
        Self::File(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Insertion-ordered parameter map used to build a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    entries: IndexMap<String, ParamValue>,
}

impl RequestParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any previous value for the key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder-style variant of [`RequestParams::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Gets a parameter by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
