//! Mockify stub server.
//!
//! # Architecture Overview
//!
//! ```text
//!     routes.yaml ──▶ config::loader ──┐
//!                                      ├──▶ registry::install ──▶ routing::RouteTable
//!     POST /add ────▶ admin ───────────┘                     └──▶ index::ResponseIndex
//!                                                                   (body → header → fallback)
//!                                                                          ▲
//!     Client Request ──▶ http::server ──▶ http::dispatch ──────────────────┘
//!     Client Response ◀── http::response ◀──────┘
//! ```
//!
//! Configuration comes from flags or `MOCKIFY_*` environment variables; see
//! `mockify --help`. Exit codes are listed in `lifecycle::startup`.

use std::process::ExitCode;

use clap::Parser;

use mockify::config::Args;
use mockify::lifecycle::startup;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match startup::run(args).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, exit_code = e.exit_code(), "mockify stopped");
            eprintln!("mockify: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
