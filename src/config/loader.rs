//! Configuration loading from disk.
//!
//! Route files are YAML, or JSON when the extension is `.json`. The optional
//! settings file is TOML.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{RouteDefinition, ServerConfig};
use crate::config::validation::{validate_route, validate_routes, ValidationError};
use crate::index::RegistrationError;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Registration(#[from] RegistrationError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Encoding of a route file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteFormat {
    Yaml,
    Json,
}

impl RouteFormat {
    /// Pick the format from the file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => RouteFormat::Json,
            _ => RouteFormat::Yaml,
        }
    }
}

/// Parse and validate route definitions.
pub fn parse_routes(content: &str, format: RouteFormat) -> Result<Vec<RouteDefinition>, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let routes: Vec<RouteDefinition> = match format {
        RouteFormat::Yaml => serde_yaml::from_str(content)?,
        RouteFormat::Json => serde_json::from_str(content)?,
    };
    validate_routes(&routes).map_err(ConfigError::Validation)?;
    Ok(routes)
}

/// Load and validate the route file.
pub fn load_routes(path: &Path) -> Result<Vec<RouteDefinition>, ConfigError> {
    tracing::info!(path = %path.display(), "Looking for routes");
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let routes = parse_routes(&content, RouteFormat::from_path(path))?;
    if routes.is_empty() {
        tracing::warn!(path = %path.display(), "Route file declares no routes");
    }
    Ok(routes)
}

/// Parse and validate a single JSON route record (the `POST /add` payload).
pub fn parse_route_record(bytes: &[u8]) -> Result<RouteDefinition, ConfigError> {
    let route: RouteDefinition = serde_json::from_slice(bytes)?;
    let errors = validate_route(&route);
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors));
    }
    Ok(route)
}

/// Load server settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: ServerConfig = toml::from_str(&content)?;
    Ok(config)
}
