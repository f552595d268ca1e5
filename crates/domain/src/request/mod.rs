//! Outgoing HTTP request types

mod entity;
mod form;
mod method;
mod multipart;
mod query;
mod spec;

pub use entity::{Entity, EntityBody};
pub use form::Form;
pub use method::HttpMethod;
pub use multipart::{BodyPart, MultiPart};
pub use query::{QueryParam, QueryParams};
pub use spec::{Header, OutgoingRequest};
