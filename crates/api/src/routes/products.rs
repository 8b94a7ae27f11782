//! Product endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::ProductId;
use domain::ProductRequest;
use serde::Deserialize;
use store::{Product, StorageGateway};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: String,
}

/// GET /products — list all products.
pub async fn list<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_all().await?))
}

/// GET /products/{id} — load one product.
pub async fn get<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.products.find_by_id(ProductId::from(id)).await?))
}

/// GET /products/search?name= — search products by name.
pub async fn search<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_by_name(&params.name).await?))
}

/// GET /products/in-stock — list products with stock available.
pub async fn in_stock<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_in_stock().await?))
}

/// POST /products — add a product to the catalogue.
pub async fn create<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.products.create(req).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /products/{id} — update a product.
pub async fn update<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProductRequest>,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.update(ProductId::from(id), req).await?;
    Ok(Json(product))
}

/// DELETE /products/{id} — delete a product not referenced by any order.
pub async fn delete<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(ProductId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
