//! Multipart form-data bodies

use std::path::PathBuf;

use crate::params::{ParamValue, RequestParams};

/// A single part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyPart {
    /// A text field.
    Field {
        /// Part name
        name: String,
        /// Field value
        value: String,
    },
    /// A file upload; the file is read when the request is sent.
    File {
        /// Part name
        name: String,
        /// Path of the file to upload
        path: PathBuf,
    },
}

impl BodyPart {
    /// Returns the part name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Field { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// An ordered multipart/form-data body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiPart {
    parts: Vec<BodyPart>,
}

impl MultiPart {
    /// Creates an empty multipart body.
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Builds a multipart body from request parameters.
    ///
    /// File references become file parts, null values are dropped and
    /// everything else becomes a text field.
    #[must_use]
    pub fn from_params(params: &RequestParams) -> Self {
        let parts = params
            .iter()
            .filter_map(|(name, value)| match value {
                ParamValue::Null => None,
                ParamValue::File(path) => Some(BodyPart::File {
                    name: name.to_string(),
                    path: path.clone(),
                }),
                ParamValue::Text(text) => Some(BodyPart::Field {
                    name: name.to_string(),
                    value: text.clone(),
                }),
            })
            .collect();
        Self { parts }
    }

    /// Appends a text field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(BodyPart::Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a file part.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.parts.push(BodyPart::File {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    /// Returns the parts in order.
    #[must_use]
    pub fn parts(&self) -> &[BodyPart] {
        &self.parts
    }
}
