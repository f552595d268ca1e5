//! Request entities: a body paired with its media type

use mime::Mime;
use serde::Serialize;

use super::form::Form;
use super::multipart::MultiPart;
use crate::error::{DomainError, DomainResult};

/// The payload of a request entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityBody {
    /// Text content.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// A JSON document.
    Json(serde_json::Value),
    /// URL-encoded form fields.
    Form(Form),
    /// Multipart form data.
    MultiPart(MultiPart),
}

/// A request body together with the media type it is sent as.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// The payload
    pub body: EntityBody,
    /// The media type announced in `Content-Type`
    pub media_type: Mime,
}

impl Entity {
    /// Pairs an arbitrary body with a media type.
    #[must_use]
    pub const fn new(body: EntityBody, media_type: Mime) -> Self {
        Self { body, media_type }
    }

    /// Creates a `text/plain` entity.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(EntityBody::Text(content.into()), mime::TEXT_PLAIN_UTF_8)
    }

    /// Creates an entity from raw bytes with the given media type.
    #[must_use]
    pub fn bytes(content: impl Into<Vec<u8>>, media_type: Mime) -> Self {
        Self::new(EntityBody::Bytes(content.into()), media_type)
    }

    /// Serializes `value` into an `application/json` entity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Serialization`] if `value` cannot be
    /// represented as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DomainResult<Self> {
        let json = serde_json::to_value(value)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;
        Ok(Self::new(EntityBody::Json(json), mime::APPLICATION_JSON))
    }

    /// Creates an `application/x-www-form-urlencoded` entity.
    #[must_use]
    pub fn form(form: Form) -> Self {
        Self::new(EntityBody::Form(form), mime::APPLICATION_WWW_FORM_URLENCODED)
    }

    /// Creates a `multipart/form-data` entity.
    #[must_use]
    pub fn multipart(multipart: MultiPart) -> Self {
        Self::new(EntityBody::MultiPart(multipart), mime::MULTIPART_FORM_DATA)
    }
}
