//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use mockify::config::loader::{parse_routes, RouteFormat};
use mockify::config::ServerConfig;
use mockify::http::HttpServer;
use mockify::lifecycle::Shutdown;
use mockify::registry::MockRegistry;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// Path of a file under the bundled `config/` directory.
pub fn config_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config").join(name)
}

/// Build a registry from inline YAML.
pub fn registry_from_yaml(yaml: &str) -> Arc<MockRegistry> {
    let routes = parse_routes(yaml, RouteFormat::Yaml).unwrap();
    Arc::new(MockRegistry::from_routes(&routes).unwrap())
}

/// Build a server from inline YAML with default settings.
pub fn server_from_yaml(yaml: &str) -> HttpServer {
    HttpServer::new(ServerConfig::default(), registry_from_yaml(yaml))
}

/// Drive one request through the router without a listener.
pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

/// Build a request with an optional text body.
pub fn request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Serve on an ephemeral port until the returned handle is triggered.
pub async fn spawn_server(server: HttpServer) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    (addr, shutdown)
}
