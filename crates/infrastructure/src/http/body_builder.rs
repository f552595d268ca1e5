//! HTTP request body builder.
//!
//! Turns a domain [`Entity`] into something reqwest can send.

use reqwest::multipart::{Form, Part};
use rest_harness_domain::{BodyPart, Entity, EntityBody, MultiPart};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// Failed to read a file referenced by a multipart part.
    #[error("Failed to read file: {message}")]
    FileReadError {
        /// Path and I/O error description
        message: String,
    },

    /// Invalid body configuration.
    #[error("Invalid body configuration: {message}")]
    InvalidConfig {
        /// What was wrong
        message: String,
    },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Encoder error description
        message: String,
    },
}

/// Result of building a body.
#[derive(Debug)]
pub enum BuiltBody {
    /// Text body with content type.
    Text {
        /// Encoded body
        content: String,
        /// `Content-Type` header value
        content_type: String,
    },
    /// Binary body.
    Binary {
        /// Raw body
        content: Vec<u8>,
        /// `Content-Type` header value
        content_type: String,
    },
    /// Multipart form data.
    Multipart(Form),
}

/// Build an HTTP body from an entity.
///
/// # Errors
///
/// Returns an error if JSON or form encoding fails, or if a file part
/// cannot be read.
pub async fn build_body(entity: &Entity) -> Result<BuiltBody, BodyBuildError> {
    let content_type = entity.media_type.to_string();
    match &entity.body {
        EntityBody::Text(content) => Ok(BuiltBody::Text {
            content: content.clone(),
            content_type,
        }),

        EntityBody::Bytes(content) => Ok(BuiltBody::Binary {
            content: content.clone(),
            content_type,
        }),

        EntityBody::Json(value) => {
            let json_str =
                serde_json::to_string(value).map_err(|e| BodyBuildError::SerializationError {
                    message: e.to_string(),
                })?;
            Ok(BuiltBody::Text {
                content: json_str,
                content_type,
            })
        }

        EntityBody::Form(form) => {
            let encoded = serde_urlencoded::to_string(form.fields()).map_err(|e| {
                BodyBuildError::SerializationError {
                    message: e.to_string(),
                }
            })?;
            Ok(BuiltBody::Text {
                content: encoded,
                content_type,
            })
        }

        EntityBody::MultiPart(multipart) => {
            let form = build_multipart_form(multipart).await?;
            Ok(BuiltBody::Multipart(form))
        }
    }
}

/// Build a multipart form from body parts.
async fn build_multipart_form(multipart: &MultiPart) -> Result<Form, BodyBuildError> {
    let mut form = Form::new();

    for part in multipart.parts() {
        match part {
            BodyPart::Field { name, value } => {
                form = form.text(name.clone(), value.clone());
            }
            BodyPart::File { name, path } => {
                let content =
                    tokio::fs::read(path)
                        .await
                        .map_err(|e| BodyBuildError::FileReadError {
                            message: format!("{}: {}", path.display(), e),
                        })?;

                let filename = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();

                let mime_type = mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .to_string();

                let part = Part::bytes(content)
                    .file_name(filename)
                    .mime_str(&mime_type)
                    .map_err(|e| BodyBuildError::InvalidConfig {
                        message: format!("Invalid MIME type: {e}"),
                    })?;

                form = form.part(name.clone(), part);
            }
        }
    }

    Ok(form)
}

impl BuiltBody {
    /// Get the Content-Type header value.
    ///
    /// Multipart bodies return `None`; reqwest sets the header together
    /// with the boundary.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Text { content_type, .. } | Self::Binary { content_type, .. } => {
                Some(content_type)
            }
            Self::Multipart(_) => None,
        }
    }
}
