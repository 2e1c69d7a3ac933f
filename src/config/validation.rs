//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of route records (serde handles syntax)
//! - Check templates, method tokens, status codes and response headers
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure functions: &[RouteDefinition] → Result<(), Vec<ValidationError>>
//! - Runs before anything reaches the route table or the index

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};

use crate::config::schema::RouteDefinition;
use crate::routing::matcher::{PathPattern, PatternError};

/// A semantic problem in a route record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("route '{route}' declares no methods")]
    NoMethods { route: String },

    #[error("route '{route}' declares invalid method '{method}'")]
    InvalidMethod { route: String, method: String },

    #[error("route '{route}' response #{position} has an empty uri")]
    EmptyUri { route: String, position: usize },

    #[error("route '{route}' response #{position} has an invalid method '{method}'")]
    InvalidResponseMethod {
        route: String,
        position: usize,
        method: String,
    },

    #[error("route '{route}' response #{position} has invalid status code {status}")]
    InvalidStatus {
        route: String,
        position: usize,
        status: u16,
    },

    #[error("route '{route}' response #{position} has invalid header '{name}'")]
    InvalidHeader {
        route: String,
        position: usize,
        name: String,
    },
}

/// Validate every route, collecting all errors.
pub fn validate_routes(routes: &[RouteDefinition]) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = routes.iter().flat_map(validate_route).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a single route record.
pub fn validate_route(route: &RouteDefinition) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = &route.route;

    if let Err(e) = PathPattern::parse(name) {
        errors.push(ValidationError::Pattern(e));
    }

    if route.methods.is_empty() {
        errors.push(ValidationError::NoMethods {
            route: name.clone(),
        });
    }
    for method in &route.methods {
        if Method::from_bytes(method.trim().as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                route: name.clone(),
                method: method.clone(),
            });
        }
    }

    for (position, response) in route.responses.iter().enumerate() {
        if response.uri.trim().is_empty() {
            errors.push(ValidationError::EmptyUri {
                route: name.clone(),
                position,
            });
        }

        if Method::from_bytes(response.method.trim().as_bytes()).is_err() {
            errors.push(ValidationError::InvalidResponseMethod {
                route: name.clone(),
                position,
                method: response.method.clone(),
            });
        } else if !route
            .methods
            .iter()
            .any(|m| m.trim().eq_ignore_ascii_case(response.method.trim()))
        {
            tracing::warn!(
                route = %name,
                position,
                method = %response.method,
                "Response method is not routed by its route and will never be served"
            );
        }

        if StatusCode::from_u16(response.status_code).is_err() {
            errors.push(ValidationError::InvalidStatus {
                route: name.clone(),
                position,
                status: response.status_code,
            });
        }

        for (header, value) in &response.headers {
            if HeaderName::from_bytes(header.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                errors.push(ValidationError::InvalidHeader {
                    route: name.clone(),
                    position,
                    name: header.clone(),
                });
            }
        }
    }

    errors
}
