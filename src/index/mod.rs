//! Response index subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDefinition
//!     → registration.rs (parse matchers, compute keys)
//!     → store.rs (body / header / fallback tiers)
//!
//! Incoming request (method, uri, body, headers)
//!     → resolution.rs (body tier → header tier → fallback tier)
//!     → Return: Resolved or None
//! ```
//!
//! # Design Decisions
//! - Index owned by the server instance, not a process-wide global
//! - Structured keys, rendered as `URI|METHOD|MATCHER` only for display
//! - Body, URI and method matching are case-insensitive at both ends
//! - Only the body tier is exposed for runtime deletion

pub mod key;
pub mod registration;
pub mod resolution;
pub mod store;

pub use key::{HeaderMatcher, MatchKey, Tier};
pub use registration::RegistrationError;
pub use resolution::{IncomingRequest, Resolved};
pub use store::{MockEntry, ResponseIndex};
