//! Route table lookup.
//!
//! # Responsibilities
//! - Store compiled routes from the route file and from `/add`
//! - Decide whether a (path, method) pair reaches the stub handler
//! - Return an explicit outcome rather than a silent default
//!
//! # Design Decisions
//! - Copy-on-write via `ArcSwap`: lookups never take a lock
//! - Additions use read-copy-update, so concurrent `/add` calls are not lost
//! - O(n) template scan (acceptable for typical route counts)

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::http::Method;

use crate::config::schema::RouteDefinition;
use crate::routing::matcher::{MethodSet, PathPattern, PatternError};

/// A route template with the methods it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    pub pattern: PathPattern,
    pub methods: MethodSet,
}

impl CompiledRoute {
    pub fn compile(route: &RouteDefinition) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: PathPattern::parse(&route.route)?,
            methods: MethodSet::new(&route.methods),
        })
    }
}

/// Outcome of a route table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    /// A route accepts this path and method.
    Allowed,
    /// The path is routed, but not for this method.
    MethodNotAllowed,
    /// No route covers the path.
    NotFound,
}

/// Routes served by the stub handler.
#[derive(Debug)]
pub struct RouteTable {
    routes: ArcSwap<Vec<Arc<CompiledRoute>>>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Compile a route definition and start routing it.
    ///
    /// Adding a route identical to one already present is a no-op.
    pub fn add(&self, route: &RouteDefinition) -> Result<(), PatternError> {
        let compiled = Arc::new(CompiledRoute::compile(route)?);
        self.routes.rcu(|current| {
            if current.iter().any(|existing| **existing == *compiled) {
                return Arc::clone(current);
            }
            let mut next: Vec<Arc<CompiledRoute>> = current.iter().cloned().collect();
            next.push(compiled.clone());
            Arc::new(next)
        });
        tracing::debug!(route = %route.route, methods = ?route.methods, "Route table updated");
        Ok(())
    }

    /// Look up the route for a request path and method.
    pub fn check(&self, path: &str, method: &Method) -> RouteMatch {
        let routes = self.routes.load();
        let mut path_known = false;
        for route in routes.iter().filter(|route| route.pattern.matches(path)) {
            if route.methods.contains(method) {
                return RouteMatch::Allowed;
            }
            path_known = true;
        }
        if path_known {
            RouteMatch::MethodNotAllowed
        } else {
            RouteMatch::NotFound
        }
    }

    /// Number of distinct routes.
    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(template: &str, methods: &[&str]) -> RouteDefinition {
        RouteDefinition {
            route: template.into(),
            methods: methods.iter().map(|m| m.to_string()).collect(),
            responses: Vec::new(),
        }
    }

    #[test]
    fn test_check_outcomes() {
        let table = RouteTable::new();
        table.add(&route("/api/mcp", &["POST"])).unwrap();
        table.add(&route("/helloworld/{name}", &["GET"])).unwrap();

        assert_eq!(table.check("/api/mcp", &Method::POST), RouteMatch::Allowed);
        assert_eq!(table.check("/helloworld/foo", &Method::GET), RouteMatch::Allowed);
        assert_eq!(
            table.check("/api/mcp", &Method::GET),
            RouteMatch::MethodNotAllowed
        );
        assert_eq!(table.check("/unregistered/path", &Method::GET), RouteMatch::NotFound);
    }

    #[test]
    fn test_same_template_with_other_methods() {
        let table = RouteTable::new();
        table.add(&route("/api/mcp", &["POST"])).unwrap();
        table.add(&route("/api/mcp", &["GET"])).unwrap();

        assert_eq!(table.check("/api/mcp", &Method::GET), RouteMatch::Allowed);
        assert_eq!(table.check("/api/mcp", &Method::POST), RouteMatch::Allowed);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_route_is_ignored() {
        let table = RouteTable::new();
        table.add(&route("/api/mcp", &["POST"])).unwrap();
        table.add(&route("/api/mcp", &["post"])).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let table = RouteTable::new();
        assert!(table.add(&route("api", &["GET"])).is_err());
        assert!(table.is_empty());
    }
}
