//! Query parameter types

use crate::params::RequestParams;

/// A query parameter key-value pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    /// The parameter key
    pub key: String,
    /// The parameter value
    pub value: String,
}

impl QueryParam {
    /// Creates a new query parameter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of query parameters.
///
/// Repeated keys are allowed and kept in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    items: Vec<QueryParam>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Converts request parameters into query parameters.
    ///
    /// Null values are skipped; files render as their path.
    #[must_use]
    pub fn from_params(params: &RequestParams) -> Self {
        params
            .iter()
            .filter_map(|(key, value)| value.as_query_value().map(|v| QueryParam::new(key, v)))
            .collect()
    }

    /// Adds a query parameter to the collection.
    pub fn add(&mut self, param: QueryParam) {
        self.items.push(param);
    }

    /// Returns all parameters in order.
    #[must_use]
    pub fn all(&self) -> &[QueryParam] {
        &self.items
    }

    /// Returns the number of parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<QueryParam> for QueryParams {
    fn from_iter<T: IntoIterator<Item = QueryParam>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
