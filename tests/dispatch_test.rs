//! End-to-end resolution through the HTTP layer.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockify::config::loader::load_routes;
use mockify::config::ServerConfig;
use mockify::http::HttpServer;
use mockify::registry::MockRegistry;
use serde_json::json;
use std::sync::Arc;

mod common;

const MCP_ROUTES: &str = r#"
- route: /api/mcp
  methods: [POST]
  responses:
    - uri: /api/mcp
      method: POST
      requestBody: def
      statusCode: 201
      headers:
        Content-Type: application/json
      body:
        foo:
          key1: 1
    - uri: /api/mcp
      method: POST
      requestHeader: "Authorization: foo-bar"
      statusCode: 202
      headers:
        Content-Type: application/json
      body:
        via: header
    - uri: /api/mcp
      method: POST
      statusCode: 200
      body: fallback
"#;

fn post_with_auth(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/mcp")
        .header("Authorization", "foo-bar")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_body_match_is_served() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(
        &server.router(),
        common::request("POST", "/api/mcp", r#"{"type":"def"}"#),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(common::body_json(res).await, json!({"foo": {"key1": 1}}));
}

#[tokio::test]
async fn test_body_match_beats_header_match() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(&server.router(), post_with_auth(r#"{"type":"def"}"#)).await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_header_match_when_body_does_not_match() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(&server.router(), post_with_auth(r#"{"type":"other"}"#)).await;

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(common::body_json(res).await, json!({"via": "header"}));
}

#[tokio::test]
async fn test_fallback_when_nothing_else_matches() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(
        &server.router(),
        common::request("POST", "/api/mcp", "unrelated"),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::body_text(res).await, "fallback");
}

#[tokio::test]
async fn test_body_matching_ignores_case() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(
        &server.router(),
        common::request("POST", "/api/mcp", r#"{"type":"DeF"}"#),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_unregistered_path_is_not_found() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(
        &server.router(),
        common::request("GET", "/unregistered/path", ""),
    )
    .await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_text(res).await,
        "404 Response not mapped for method GET and URI /unregistered/path"
    );
}

#[tokio::test]
async fn test_routed_path_without_response_is_not_found() {
    let server = common::server_from_yaml(
        r#"
- route: /helloworld/{name}
  methods: [GET]
  responses:
    - uri: /helloworld/foo
      method: GET
      body: hi
"#,
    );
    let router = server.router();

    let res = common::send(&router, common::request("GET", "/helloworld/foo", "")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::body_text(res).await, "hi");

    let res = common::send(&router, common::request("GET", "/helloworld/bar", "")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_matched_as_empty() {
    let mut config = ServerConfig::default();
    config.limits.max_body_bytes = 4;
    let server = HttpServer::new(config, common::registry_from_yaml(MCP_ROUTES));

    // "def" is present but the body is over the limit, so only the header can match.
    let res = common::send(&server.router(), post_with_auth(r#"{"type":"def"}"#)).await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_wrong_method_on_routed_path() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(&server.router(), common::request("GET", "/api/mcp", "")).await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_structured_body_round_trip() {
    let server = common::server_from_yaml(
        r#"
- route: /nested
  methods: [PUT]
  responses:
    - uri: /nested
      method: PUT
      headers:
        Content-Type: application/json
        X-Mock: "yes"
      body:
        list: [1, 2.5, "3", null, {inner: [true, false]}]
        empty: {}
"#,
    );
    let res = common::send(&server.router(), common::request("PUT", "/nested", "")).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-mock"], "yes");
    assert_eq!(
        common::body_json(res).await,
        json!({"list": [1, 2.5, "3", null, {"inner": [true, false]}], "empty": {}})
    );
}

#[tokio::test]
async fn test_request_id_is_set() {
    let server = common::server_from_yaml(MCP_ROUTES);
    let res = common::send(
        &server.router(),
        common::request("POST", "/api/mcp", "def"),
    )
    .await;

    assert!(res.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_bundled_yaml_and_json_route_files_serve_the_same() {
    for name in ["routes.yaml", "routes.json"] {
        let routes = load_routes(&common::config_file(name)).unwrap();
        let registry = Arc::new(MockRegistry::from_routes(&routes).unwrap());
        let router = HttpServer::new(ServerConfig::default(), registry).router();

        let res = common::send(&router, common::request("POST", "/api/mcp", r#"{"type":"def"}"#)).await;
        assert_eq!(res.status(), StatusCode::CREATED, "{name}");
        assert_eq!(
            common::body_json(res).await,
            json!({"foo": {"key1": 1, "key2": true, "key3": [{"bar": true, "baz": [1, 2, "3"], "foo": "foo"}]}}),
            "{name}"
        );

        let res = common::send(
            &router,
            post_with_auth("body-have-higher-priority-over-header"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND, "{name}");
        assert_eq!(
            common::body_json(res).await,
            json!({"win": {"key1": 1, "key2": true}}),
            "{name}"
        );

        let res = common::send(&router, post_with_auth("anything")).await;
        assert_eq!(res.status(), StatusCode::OK, "{name}");
        assert_eq!(common::body_json(res).await, json!({"header": "matched"}), "{name}");

        let res = common::send(&router, common::request("GET", "/helloworld/foo", "")).await;
        assert_eq!(
            common::body_json(res).await,
            json!({"message": "Welcome to Mockify!"}),
            "{name}"
        );
    }
}
