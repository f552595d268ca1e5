//! HTTP infrastructure utilities.
//!
//! This module provides body building for the entity types the harness
//! sends: text, bytes, JSON, URL-encoded forms and multipart form data.

mod body_builder;

pub use body_builder::{BodyBuildError, BuiltBody, build_body};
