//! Product API handlers.
//!
//! Each handler validates the request shape, performs exactly one store
//! operation, and maps the outcome to a response.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use bakery_catalog_core::{IdError, NewProduct, Product, ProductId, ProductPatch};

use super::{ApiJson, MessageResponse};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Response for a created product.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: ProductId,
}

/// List every product.
///
/// # Errors
///
/// Returns `AppError::Store` if the store cannot be read.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.products().list_all().await?;
    tracing::debug!(count = products.len(), "Listed products");
    Ok(Json(products))
}

/// Create a product from a body carrying all six content fields.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the body is malformed or a field is missing,
/// or `AppError::Store` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    let id = state.products().insert(product).await?;
    tracing::info!(product_id = %id, "Product created");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Update the fields present in the body, leaving the rest unchanged.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed ID or body,
/// `AppError::NotFound` if no product has the ID,
/// or `AppError::Store` if the update fails.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::parse(&id)?;

    if !state.products().replace_fields(id, patch).await? {
        return Err(AppError::product_not_found());
    }

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(MessageResponse::new("Product updated successfully")))
}

/// Delete a product.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for a malformed ID,
/// `AppError::NotFound` if no product has the ID,
/// or `AppError::Store` if the delete fails.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = ProductId::parse(&id)?;

    if !state.products().remove(id).await? {
        return Err(AppError::product_not_found());
    }

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// Reject `PUT`/`DELETE /api/products/` with no ID segment.
///
/// # Errors
///
/// Always returns `AppError::BadRequest`.
pub async fn missing_id() -> Result<Json<MessageResponse>> {
    Err(IdError::Empty.into())
}
