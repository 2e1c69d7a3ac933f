//! Command line and environment settings.
//!
//! Precedence, lowest first: built-in defaults, the TOML settings file,
//! then flags or their `MOCKIFY_*` environment variables.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{load_settings, ConfigError};
use crate::config::schema::{RoutesPath, ServerConfig};

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "mockify", version, about = "Configurable HTTP stub server")]
pub struct Args {
    /// TOML settings file.
    #[arg(long, env = "MOCKIFY_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Route file, YAML or JSON [default: ./config/routes.yaml].
    #[arg(long, env = "MOCKIFY_ROUTES")]
    pub routes: Option<PathBuf>,

    /// Interface to bind [default: 0.0.0.0].
    #[arg(long, env = "MOCKIFY_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 8001].
    #[arg(short, long, env = "MOCKIFY_PORT")]
    pub port: Option<u16>,

    /// Request timeout in seconds [default: 30].
    #[arg(long, env = "MOCKIFY_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Log as JSON lines.
    #[arg(long, env = "MOCKIFY_LOG_JSON")]
    pub log_json: bool,

    /// Serve Prometheus metrics on this address.
    #[arg(long, env = "MOCKIFY_METRICS_ADDRESS")]
    pub metrics_address: Option<String>,

    /// Require this bearer token on /list, /add and /delete.
    #[arg(long, env = "MOCKIFY_ADMIN_KEY", hide_env_values = true)]
    pub admin_key: Option<String>,

    /// Do not mount /list, /add and /delete.
    #[arg(long, env = "MOCKIFY_DISABLE_ADMIN")]
    pub disable_admin: bool,
}

impl Args {
    /// Build the effective server configuration.
    pub fn into_config(self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.settings {
            Some(path) => load_settings(path)?,
            None => ServerConfig::default(),
        };

        if let Some(routes) = self.routes {
            config.routes_path = RoutesPath(routes);
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(secs) = self.request_timeout_secs {
            config.timeouts.request_secs = secs;
        }
        if self.log_json {
            config.observability.json_logs = true;
        }
        if let Some(address) = self.metrics_address {
            config.observability.metrics_enabled = true;
            config.observability.metrics_address = address;
        }
        if let Some(key) = self.admin_key {
            config.admin.api_key = Some(key);
        }
        if self.disable_admin {
            config.admin.enabled = false;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_flags() {
        let config = Args::default().into_config().unwrap();
        assert_eq!(config.listener.port, 8001);
        assert_eq!(config.routes_path, RoutesPath::default());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "mockify",
            "--port",
            "9000",
            "--routes",
            "routes.json",
            "--metrics-address",
            "127.0.0.1:9100",
            "--disable-admin",
        ])
        .unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.listener.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.routes_path.0, PathBuf::from("routes.json"));
        assert!(config.observability.metrics_enabled);
        assert!(!config.admin.enabled);
    }

    #[test]
    fn test_settings_file_then_flags() {
        let settings = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("config")
            .join("settings.toml");
        let args = Args {
            settings: Some(settings),
            port: Some(9999),
            ..Args::default()
        };
        let config = args.into_config().unwrap();

        assert_eq!(config.listener.port, 9999);
        assert_eq!(config.listener.host, "127.0.0.1");
        assert_eq!(config.timeouts.request_secs, 10);
    }

    #[test]
    fn test_missing_settings_file() {
        let args = Args {
            settings: Some(PathBuf::from("/nonexistent/settings.toml")),
            ..Args::default()
        };
        assert!(matches!(args.into_config(), Err(ConfigError::Io { .. })));
    }
}
