pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

/// Runtime administration endpoints: `GET /list`, `POST /add`, `POST /delete`.
pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/list", get(list_mocks))
        .route("/add", post(add_mock))
        .route("/delete", post(delete_mock))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
