//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! # Health
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (pings the store)
//!
//! # Pages
//! GET    /                    - Home page
//! GET    /products            - Product page
//! GET    /about               - About page
//! GET    /contact             - Contact page
//! GET    /manage              - Product management page
//! GET    /static/*            - Static assets
//!
//! # Product API
//! GET    /api/products        - List products
//! POST   /api/products        - Create a product
//! PUT    /api/products/{id}   - Update fields of a product
//! DELETE /api/products/{id}   - Delete a product
//! PUT    /api/products/       - 400, ID missing
//! DELETE /api/products/       - 400, ID missing
//! ```

pub mod api;
pub mod health;
pub mod pages;

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::config::CatalogConfig;
use crate::state::AppState;

/// Create all routes for the catalog.
pub fn routes(config: &CatalogConfig) -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        // Pages
        .merge(pages::page_routes(&config.templates_dir))
        // Product API
        .nest("/api/products", api::product_routes())
        .route(
            "/api/products/",
            put(api::products::missing_id).delete(api::products::missing_id),
        )
        // Static assets
        .nest_service("/static", ServeDir::new(&config.static_dir))
}
