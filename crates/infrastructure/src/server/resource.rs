//! Resource registry.
//!
//! A [`Resource`] contributes routes to the embedded container. Resources
//! are registered by type: adding the same type twice keeps the first
//! instance, so fixtures can list shared resources without care.

use std::any::{Any, TypeId};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use axum::Router;
use rest_harness_application::ports::ContainerError;

/// A set of HTTP routes exposed by the embedded container.
pub trait Resource: Send + Sync + 'static {
    /// Returns the routes this resource serves.
    fn routes(&self) -> Router;
}

/// Resources registered for one deployment, coalesced by type.
#[derive(Clone, Default)]
pub struct ResourceSet {
    entries: Vec<(TypeId, Arc<dyn Resource>)>,
}

impl ResourceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a resource. Returns false if its type was already present.
    pub fn insert<R: Resource>(&mut self, resource: R) -> bool {
        let id = TypeId::of::<R>();
        if self.entries.iter().any(|(existing, _)| *existing == id) {
            return false;
        }
        self.entries.push((id, Arc::new(resource)));
        true
    }

    /// Builder-style variant of [`ResourceSet::insert`].
    #[must_use]
    pub fn with<R: Resource>(mut self, resource: R) -> Self {
        self.insert(resource);
        self
    }

    /// Returns true if a resource of type `R` is registered.
    #[must_use]
    pub fn contains<R: Resource>(&self) -> bool {
        let id = TypeId::of::<R>();
        self.entries.iter().any(|(existing, _)| *existing == id)
    }

    /// Returns the number of distinct resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no resource is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the registered resources in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Resource> {
        self.entries.iter().map(|(_, resource)| resource.as_ref())
    }

    /// Merges every resource's routes into one router.
    ///
    /// axum rejects conflicting routes by panicking; the panic is caught
    /// here, but the process panic hook still runs, so a conflict also
    /// prints axum's panic message to stderr before this returns the
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::Registration`] when resources overlap or a
    /// resource builds an invalid router.
    pub fn build_router(&self) -> Result<Router, ContainerError> {
        // axum reports conflicting and malformed routes by panicking
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.entries
                .iter()
                .fold(Router::new(), |router, (_, resource)| {
                    router.merge(resource.routes())
                })
        }))
        .map_err(|payload| ContainerError::Registration(panic_message(payload.as_ref())))
    }
}

impl fmt::Debug for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceSet")
            .field("resources", &self.entries.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "resource routes could not be assembled".to_string())
}
