//! The stub handler.
//!
//! Every request that is not an administration call lands here. The route
//! table decides whether the path and method are served at all, then the
//! response index picks the canned response.

use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::response::{self, RenderError, SERIALIZATION_FAILED};
use crate::http::server::AppState;
use crate::index::IncomingRequest;
use crate::observability::metrics;
use crate::routing::RouteMatch;

/// Resolve a request against the registry and write the chosen response.
pub async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method = parts.method;
    let uri = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    match state.registry.route_for(parts.uri.path(), &method) {
        RouteMatch::Allowed => {}
        RouteMatch::MethodNotAllowed => {
            tracing::warn!(method = %method, uri = %uri, "Method not routed for this path");
            metrics::record_request(method.as_str(), "none", 405, start_time);
            return (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("405 Method {} not allowed for URI {}", method, uri),
            )
                .into_response();
        }
        RouteMatch::NotFound => return not_mapped(&method, &uri, start_time),
    }

    let body = match axum::body::to_bytes(body, state.config.limits.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                method = %method,
                uri = %uri,
                error = %e,
                "Request body unreadable, matching with an empty body"
            );
            Bytes::new()
        }
    };

    tracing::debug!(
        method = %method,
        uri = %uri,
        body = %String::from_utf8_lossy(&body),
        headers = ?parts.headers,
        "Request received"
    );

    let request = IncomingRequest {
        method: method.as_str(),
        uri: &uri,
        body: &body,
        headers: &parts.headers,
    };
    let Some(resolved) = state.registry.resolve(&request) else {
        return not_mapped(&method, &uri, start_time);
    };

    let candidate = &resolved.entry.candidate;
    match response::render(candidate) {
        Ok(response) => {
            tracing::info!(
                method = %method,
                uri = %uri,
                tier = %resolved.tier,
                status = candidate.status_code,
                "Response served"
            );
            metrics::record_request(
                method.as_str(),
                resolved.tier.as_str(),
                candidate.status_code,
                start_time,
            );
            response
        }
        Err(e) => {
            tracing::error!(method = %method, uri = %uri, error = %e, "Response could not be rendered");
            metrics::record_request(method.as_str(), resolved.tier.as_str(), 500, start_time);
            let message = match e {
                RenderError::Serialization(_) => SERIALIZATION_FAILED.to_string(),
                RenderError::Status(_) => format!("500 {}", e),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
        }
    }
}

fn not_mapped(method: &Method, uri: &str, start_time: Instant) -> Response {
    tracing::error!(method = %method, uri = %uri, "Response not mapped");
    metrics::record_request(method.as_str(), "none", 404, start_time);
    (
        StatusCode::NOT_FOUND,
        format!("404 Response not mapped for method {} and URI {}", method, uri),
    )
        .into_response()
}
