//! The mock registry: response index plus route table.
//!
//! Routes loaded from the route file at startup and routes posted to
//! `/add` at runtime both go through [`MockRegistry::install`], so they
//! behave identically.

use std::collections::BTreeMap;

use crate::config::loader::ConfigError;
use crate::config::schema::{ResponseCandidate, RouteDefinition};
use crate::config::validation::{validate_route, ValidationError};
use crate::index::{IncomingRequest, MatchKey, ResponseIndex, Resolved};
use crate::routing::{RouteMatch, RouteTable};

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    /// Text returned by `POST /delete`.
    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "mock deleted",
            DeleteOutcome::NotFound => "nothing to delete",
        }
    }

    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "deleted",
            DeleteOutcome::NotFound => "not_found",
        }
    }
}

/// Registered responses and the routes that reach them.
#[derive(Debug, Default)]
pub struct MockRegistry {
    index: ResponseIndex,
    routes: RouteTable,
}

impl MockRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every route of a route file.
    pub fn from_routes(routes: &[RouteDefinition]) -> Result<Self, ConfigError> {
        let registry = Self::new();
        for route in routes {
            registry.install(route)?;
        }
        Ok(registry)
    }

    /// Validate a route, index its responses and start routing it.
    ///
    /// Nothing is changed when the route is rejected.
    pub fn install(&self, route: &RouteDefinition) -> Result<Vec<MatchKey>, ConfigError> {
        let errors = validate_route(route);
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let keys = self.index.register(route)?;
        self.routes
            .add(route)
            .map_err(|e| ConfigError::Validation(vec![ValidationError::Pattern(e)]))?;

        tracing::info!(
            route = %route.route,
            methods = ?route.methods,
            responses = route.responses.len(),
            "Route installed"
        );
        Ok(keys)
    }

    /// Route table check for a request path and method.
    pub fn route_for(&self, path: &str, method: &axum::http::Method) -> RouteMatch {
        self.routes.check(path, method)
    }

    /// Pick the response for a request.
    pub fn resolve(&self, request: &IncomingRequest<'_>) -> Option<Resolved> {
        self.index.resolve(request)
    }

    /// Delete a body-matched response by its rendered key.
    pub fn delete(&self, key: &str) -> DeleteOutcome {
        if self.index.delete_by_key(key) {
            tracing::info!(key = %key.trim(), "Mock deleted");
            DeleteOutcome::Deleted
        } else {
            tracing::info!(key = %key.trim(), "Key doesn't exist, nothing to delete");
            DeleteOutcome::NotFound
        }
    }

    /// Body-matched responses keyed by rendered key.
    pub fn list(&self) -> BTreeMap<String, ResponseCandidate> {
        self.index.snapshot()
    }

    pub fn index(&self) -> &ResponseIndex {
        &self.index
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}
