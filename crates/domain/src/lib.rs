//! rest-harness domain types
//!
//! Pure data types shared by the harness layers: request parameters,
//! forms, multipart bodies, entities, outgoing requests, responses and
//! container init parameters. Nothing here performs I/O.

pub mod error;
pub mod init_params;
pub mod params;
pub mod request;
pub mod response;

pub use error::{DomainError, DomainResult};
pub use init_params::InitParams;
pub use params::{ParamValue, RequestParams};
pub use request::{
    BodyPart, Entity, EntityBody, Form, Header, HttpMethod, MultiPart, OutgoingRequest,
    QueryParam, QueryParams,
};
pub use response::TestResponse;
