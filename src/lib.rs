//! Mockify: a configurable HTTP stub server.
//!
//! Routes and canned responses are declared in a YAML or JSON file. Each
//! incoming request is answered with the registered response picked by a
//! fixed priority: body match, then header match, then URI and method only.

pub mod admin;
pub mod config;
pub mod http;
pub mod index;
pub mod lifecycle;
pub mod observability;
pub mod registry;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use registry::MockRegistry;
