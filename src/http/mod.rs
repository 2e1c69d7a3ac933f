//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, admin routes)
//!     → dispatch.rs (route table check, body read, resolution)
//!     → response.rs (status, headers, raw or JSON body)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
