//! Configuration schema definitions.
//!
//! Two families of types live here: the server settings (`ServerConfig` and
//! its sections) and the route file records (`RouteDefinition` and
//! `ResponseCandidate`). All types derive Serde traits for deserialization
//! from settings and route files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the stub server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Path to the route definition file (YAML or JSON).
    pub routes_path: RoutesPath,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Runtime administration endpoints.
    pub admin: AdminConfig,
}

/// Route file location, defaulting to `./config/routes.yaml`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoutesPath(pub PathBuf);

impl Default for RoutesPath {
    fn default() -> Self {
        Self(PathBuf::from(DEFAULT_ROUTES_PATH))
    }
}

/// Route file used when `MOCKIFY_ROUTES` is not set.
pub const DEFAULT_ROUTES_PATH: &str = "./config/routes.yaml";

/// Port used when `MOCKIFY_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8001;

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,
}

impl ListenerConfig {
    /// The `host:port` pair handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body read for matching. Bigger bodies are treated as empty.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Emit logs as JSON lines instead of the human-readable format.
    pub json_logs: bool,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Address the Prometheus exporter listens on.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "mockify=info,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9001".to_string(),
        }
    }
}

/// Administration endpoint configuration (`/list`, `/add`, `/delete`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the administration endpoints.
    pub enabled: bool,

    /// When set, admin calls must carry `Authorization: Bearer <api_key>`.
    pub api_key: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
        }
    }
}

/// A route record from the route file or from `POST /add`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteDefinition {
    /// Path template, e.g. `/api/mcp` or `/helloworld/{name}`.
    pub route: String,

    /// HTTP methods routed to the stub handler.
    #[serde(default, alias = "Methods")]
    pub methods: Vec<String>,

    /// Candidate responses, in declaration order.
    #[serde(default)]
    pub responses: Vec<ResponseCandidate>,
}

/// One canned response plus the conditions that select it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    /// Request URI (path and query) this response answers.
    pub uri: String,

    /// Request method this response answers.
    pub method: String,

    /// `Key: Value` header the request must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_header: Option<String>,

    /// Substring the request body must contain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,

    #[serde(default = "default_status_code")]
    pub status_code: u16,

    /// Response headers, copied verbatim.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Raw text, or a structured value serialized as JSON when the headers
    /// declare `Content-Type: application/json`.
    #[serde(default)]
    pub body: serde_json::Value,
}

fn default_status_code() -> u16 {
    200
}

impl ResponseCandidate {
    /// Body matcher, ignoring an empty string.
    pub fn body_matcher(&self) -> Option<&str> {
        self.request_body.as_deref().filter(|s| !s.is_empty())
    }

    /// Header matcher, ignoring an empty or blank string.
    pub fn header_matcher(&self) -> Option<&str> {
        self.request_header
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8001");
        assert_eq!(config.routes_path.0, PathBuf::from("./config/routes.yaml"));
        assert!(config.admin.enabled);
        assert!(config.admin.api_key.is_none());
    }

    #[test]
    fn test_candidate_defaults() {
        let candidate: ResponseCandidate =
            serde_json::from_str(r#"{"uri":"/a","method":"GET"}"#).unwrap();
        assert_eq!(candidate.status_code, 200);
        assert!(candidate.headers.is_empty());
        assert!(candidate.body.is_null());
        assert!(candidate.body_matcher().is_none());
    }

    #[test]
    fn test_empty_matchers_are_absent() {
        let candidate: ResponseCandidate = serde_json::from_str(
            r#"{"uri":"/a","method":"GET","requestBody":"","requestHeader":"  "}"#,
        )
        .unwrap();
        assert!(candidate.body_matcher().is_none());
        assert!(candidate.header_matcher().is_none());
    }

    #[test]
    fn test_route_accepts_capitalized_methods() {
        let route: RouteDefinition =
            serde_json::from_str(r#"{"route":"/a","Methods":["GET"],"responses":[]}"#).unwrap();
        assert_eq!(route.methods, vec!["GET".to_string()]);
    }
}
