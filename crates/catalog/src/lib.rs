//! Bakery catalog library.
//!
//! Provides the product API, page routes and middleware as a library so the
//! server binary, the CLI and the integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Build the catalog router with its middleware stack.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn app(state: AppState) -> Router {
    let config = state.config().clone();

    Router::new()
        .merge(routes::routes(&config))
        .layer(middleware::cors_layer(&config.cors_origins))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::trace_layer())
        .with_state(state)
}
