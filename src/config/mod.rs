//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings (defaults → TOML file → env/CLI flags)
//!     → ServerConfig (immutable once built)
//!
//! route file (YAML/JSON) or POST /add payload (JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Vec<RouteDefinition> handed to the mock registry
//! ```
//!
//! # Design Decisions
//! - All settings have defaults to allow running with no configuration
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid route file is fatal; an invalid `/add` payload is not

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use loader::ConfigError;
pub use schema::{ListenerConfig, ResponseCandidate, RouteDefinition, ServerConfig};
pub use validation::ValidationError;
