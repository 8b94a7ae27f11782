//! Customer endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::CustomerId;
use domain::CustomerRequest;
use store::{Customer, StorageGateway};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// GET /customers — list all customers.
pub async fn list<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.customers.find_all().await?))
}

/// GET /customers/{id} — load one customer.
pub async fn get<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(
        state.customers.find_by_id(CustomerId::from(id)).await?,
    ))
}

/// POST /customers — register a customer.
pub async fn create<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let customer = state.customers.create(req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /customers/{id} — update a customer's profile.
pub async fn update<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
    Json(req): Json<CustomerRequest>,
) -> Result<Json<Customer>, ApiError> {
    let customer = state.customers.update(CustomerId::from(id), req).await?;
    Ok(Json(customer))
}

/// DELETE /customers/{id} — delete a customer without orders.
pub async fn delete<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.customers.delete(CustomerId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
