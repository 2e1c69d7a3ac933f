//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the configuration and initialize logging
//! - Load, validate and install the route file
//! - Start the optional metrics exporter
//! - Bind the listener and serve until shutdown
//!
//! # Exit codes
//! | code | meaning                               |
//! |------|---------------------------------------|
//! | 0    | clean shutdown                        |
//! | 1    | settings error (flags, settings file) |
//! | 2    | route file unreadable                 |
//! | 3    | route file could not be parsed        |
//! | 4    | route file failed validation          |
//! | 5    | listener could not bind               |
//! | 6    | server stopped with an error          |

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::loader::{load_routes, ConfigError};
use crate::config::Args;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::shutdown_on_signal;
use crate::observability::{logging, metrics};
use crate::registry::MockRegistry;

/// A failure that stops the process.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("settings: {0}")]
    Settings(#[source] ConfigError),

    #[error("routes: {0}")]
    Routes(#[source] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

impl StartupError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            StartupError::Settings(_) => 1,
            StartupError::Routes(ConfigError::Io { .. }) => 2,
            StartupError::Routes(
                ConfigError::Yaml(_) | ConfigError::Json(_) | ConfigError::Toml(_),
            ) => 3,
            StartupError::Routes(ConfigError::Validation(_) | ConfigError::Registration(_)) => 4,
            StartupError::Bind { .. } => 5,
            StartupError::Serve(_) => 6,
        }
    }
}

/// Run the stub server until a shutdown signal arrives.
pub async fn run(args: Args) -> Result<(), StartupError> {
    let routes_defaulted = args.routes.is_none();
    let port_defaulted = args.port.is_none();
    let config = args.into_config().map_err(StartupError::Settings)?;

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mockify starting");

    let routes_path = config.routes_path.0.clone();
    if routes_defaulted {
        tracing::info!(path = %routes_path.display(), "MOCKIFY_ROUTES not set, using default");
    }
    if port_defaulted {
        tracing::warn!(port = config.listener.port, "MOCKIFY_PORT not set, using default");
    }

    let routes = load_routes(&routes_path).map_err(StartupError::Routes)?;
    let registry = Arc::new(MockRegistry::from_routes(&routes).map_err(StartupError::Routes)?);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    let server = HttpServer::new(config, registry);
    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}
