//! Integration tests for the bakery catalog.
//!
//! # Running Tests
//!
//! ```bash
//! # HTTP contract tests (in-process, no database needed)
//! cargo test -p bakery-catalog-integration-tests
//!
//! # PostgreSQL store tests (needs a migrated database)
//! CATALOG_TEST_DATABASE_URL=postgres://... \
//!     cargo test -p bakery-catalog-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `product_api` - Product API contract against the in-memory store
//! - `pages` - Page, static asset and health routes
//! - `store_failure` - Responses when the store is unavailable
//! - `pg_store` - `PostgreSQL` store semantics

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

use bakery_catalog::config::CatalogConfig;
use bakery_catalog::db::{MemoryProductStore, ProductStore};
use bakery_catalog::state::AppState;

/// Router plus a handle on its store for direct inspection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryProductStore>,
}

/// Response status and parsed JSON body (`Value::Null` when the body is empty or not JSON).
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub text: String,
}

impl TestApp {
    /// Build an app over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Build an app over an empty in-memory store with a custom configuration.
    #[must_use]
    pub fn with_config(config: CatalogConfig) -> Self {
        let store = Arc::new(MemoryProductStore::new());
        let state = AppState::new(config, Arc::clone(&store) as Arc<dyn ProductStore>);
        Self {
            router: bakery_catalog::app(state),
            store,
        }
    }

    /// Send a request with an optional JSON body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        call(&self.router, json_request(method, uri, body)).await
    }

    /// Send a prepared request.
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        call(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the full router over any store, using the fixture configuration.
#[must_use]
pub fn router_with_store(store: Arc<dyn ProductStore>) -> Router {
    bakery_catalog::app(AppState::new(test_config(), store))
}

/// Build a request with an optional JSON body.
#[must_use]
pub fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Run one request through `router` and collect the response.
pub async fn call(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse { status, body, text }
}

/// Configuration pointing pages and assets at the test fixtures.
#[must_use]
pub fn test_config() -> CatalogConfig {
    let mut config = CatalogConfig::new(SecretString::from("postgres://unused/catalog"));
    config.templates_dir = fixtures_dir().join("templates");
    config.static_dir = fixtures_dir().join("static");
    config
}

/// Directory holding page and asset fixtures.
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}
