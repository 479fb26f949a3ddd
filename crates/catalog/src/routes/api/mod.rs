//! JSON API handlers.
//!
//! # Response Envelope
//!
//! Handlers return plain JSON: arrays for listings, objects for single
//! results. Status messages and errors share [`MessageResponse`].

pub mod products;

use axum::{
    Router,
    extract::FromRequest,
    routing::{get, put},
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor that reports malformed or incomplete bodies as `400 Bad Request`.
///
/// Axum's own `Json` rejects missing fields with `422`; the catalog API treats
/// every body shape problem as a client error with the standard envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `{"message": "..."}` body used for status messages and errors.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// Create a message body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the product API router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/{id}", put(products::update).delete(products::delete))
}
