//! Rendering registered responses.
//!
//! # Responsibilities
//! - Turn a `ResponseCandidate` into an HTTP response
//! - Copy declared headers verbatim
//! - Serialize the body as JSON when `Content-Type: application/json` is declared
//!
//! # Design Decisions
//! - Without the JSON content type a string body is written as-is, a null
//!   body as empty, and any other value as its JSON text
//! - Invalid header names or values are skipped, not fatal

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::config::schema::ResponseCandidate;

/// Body text for a response whose JSON encoding failed.
pub const SERIALIZATION_FAILED: &str = "500 Response could not be converted to JSON";

/// A registered response could not be written.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid status code {0}")]
    Status(u16),

    #[error("response could not be converted to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// True when the headers declare `Content-Type: application/json`.
pub fn is_json(headers: &BTreeMap<String, String>) -> bool {
    headers.iter().any(|(name, value)| {
        name.eq_ignore_ascii_case("content-type") && value.trim() == "application/json"
    })
}

/// Encode the body of a candidate.
pub fn render_body(candidate: &ResponseCandidate) -> Result<Vec<u8>, serde_json::Error> {
    if is_json(&candidate.headers) {
        return serde_json::to_vec(&candidate.body);
    }
    match &candidate.body {
        Value::String(text) => Ok(text.clone().into_bytes()),
        Value::Null => Ok(Vec::new()),
        other => serde_json::to_vec(other),
    }
}

/// Build the HTTP response for a candidate.
pub fn render(candidate: &ResponseCandidate) -> Result<Response, RenderError> {
    let status = StatusCode::from_u16(candidate.status_code)
        .map_err(|_| RenderError::Status(candidate.status_code))?;
    let body = render_body(candidate)?;

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    for (name, value) in &candidate.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::warn!(header = %name, "Skipping invalid response header"),
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(headers: &[(&str, &str)], body: Value) -> ResponseCandidate {
        ResponseCandidate {
            uri: "/a".into(),
            method: "GET".into(),
            request_header: None,
            request_body: None,
            status_code: 201,
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_render_json_body() {
        let response = render(&candidate(
            &[("Content-Type", "application/json")],
            json!({"foo": {"key1": 1}}),
        ))
        .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let text = body_text(response).await;
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"foo": {"key1": 1}}));
    }

    #[tokio::test]
    async fn test_render_raw_body() {
        let response = render(&candidate(
            &[("Content-Type", "text/plain"), ("X-Mock", "yes")],
            json!("hello"),
        ))
        .unwrap();

        assert_eq!(response.headers().get("x-mock").unwrap(), "yes");
        assert_eq!(body_text(response).await, "hello");
    }

    #[test]
    fn test_json_string_body_is_quoted() {
        let body = render_body(&candidate(&[("content-type", "application/json")], json!("x")));
        assert_eq!(body.unwrap(), b"\"x\"");
    }

    #[test]
    fn test_null_body_is_empty() {
        assert!(render_body(&candidate(&[], Value::Null)).unwrap().is_empty());
    }

    #[test]
    fn test_structured_body_without_json_header() {
        let body = render_body(&candidate(&[], json!({"a": 1}))).unwrap();
        assert_eq!(body, br#"{"a":1}"#);
    }

    #[test]
    fn test_invalid_status() {
        let mut bad = candidate(&[], Value::Null);
        bad.status_code = 42;
        assert!(matches!(render(&bad), Err(RenderError::Status(42))));
    }
}
