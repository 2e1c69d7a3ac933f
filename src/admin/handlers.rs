use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::loader::{parse_route_record, ConfigError};
use crate::config::schema::ResponseCandidate;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Errors returned by the administration endpoints.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("unable to unmarshal body: {0}")]
    Unmarshal(serde_json::Error),

    #[error("unable to register route: {0}")]
    InvalidRoute(ConfigError),
}

impl From<ConfigError> for AdminError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Json(e) => AdminError::Unmarshal(e),
            other => AdminError::InvalidRoute(other),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Admin request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Body of a successful `POST /add`.
#[derive(Debug, Serialize)]
pub struct AddedRoute {
    pub route: String,
    pub methods: Vec<String>,
    /// Rendered keys of the new index entries.
    pub registered: Vec<String>,
}

/// `GET /list`: the body-matched responses keyed by rendered key.
pub async fn list_mocks(State(state): State<AppState>) -> Json<BTreeMap<String, ResponseCandidate>> {
    metrics::record_admin_operation("list", "ok");
    Json(state.registry.list())
}

/// `POST /add`: register one route record sent as JSON.
pub async fn add_mock(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddedRoute>, AdminError> {
    let result = parse_route_record(&body).and_then(|route| {
        let keys = state.registry.install(&route)?;
        Ok(AddedRoute {
            route: route.route,
            methods: route.methods,
            registered: keys.iter().map(ToString::to_string).collect(),
        })
    });

    match result {
        Ok(added) => {
            metrics::record_admin_operation("add", "ok");
            Ok(Json(added))
        }
        Err(e) => {
            metrics::record_admin_operation("add", "error");
            Err(e.into())
        }
    }
}

/// `POST /delete`: the body is the rendered key of a body-matched response.
pub async fn delete_mock(State(state): State<AppState>, body: Bytes) -> (StatusCode, &'static str) {
    let key = String::from_utf8_lossy(&body);
    let outcome = state.registry.delete(&key);
    metrics::record_admin_operation("delete", outcome.label());
    (StatusCode::OK, outcome.message())
}
