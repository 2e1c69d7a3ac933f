//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method)
//!     → router.rs (route table lookup)
//!     → matcher.rs (template and method checks)
//!     → Return: Allowed, MethodNotAllowed or NotFound
//!
//! Route Compilation:
//!     RouteDefinition (route file or POST /add)
//!     → Compile template into segments
//!     → Append to the table (read-copy-update)
//! ```
//!
//! # Design Decisions
//! - Routes can be added at runtime, never removed
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always gives the same outcome

pub mod matcher;
pub mod router;

pub use matcher::{MethodSet, PathPattern, PatternError};
pub use router::{CompiledRoute, RouteMatch, RouteTable};
