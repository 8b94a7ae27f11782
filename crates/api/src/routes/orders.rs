//! Order endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CustomerId, OrderId};
use domain::{CreateOrder, OrderView, UpdateOrderStatus};
use store::{OrderStatus, StorageGateway};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;

/// POST /orders — create an order with its items.
pub async fn create<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Json(req): Json<CreateOrder>,
) -> Result<(StatusCode, Json<OrderView>), ApiError> {
    let view = state.orders.create(req).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /orders — list all orders.
pub async fn list<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(Json(state.orders.find_all().await?))
}

/// GET /orders/{id} — load one order.
pub async fn get<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>, ApiError> {
    Ok(Json(state.orders.find_by_id(OrderId::from(id)).await?))
}

/// GET /orders/customer/{customer_id} — list a customer's orders.
pub async fn by_customer<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    Ok(Json(
        state
            .orders
            .find_by_customer(CustomerId::from(customer_id))
            .await?,
    ))
}

/// GET /orders/status/{status} — list orders in a given status.
pub async fn by_status<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<OrderView>>, ApiError> {
    let status = OrderStatus::from_str(&status).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Json(state.orders.find_by_status(status).await?))
}

/// PUT /orders/{id}/status — move an order to a new status.
pub async fn update_status<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateOrderStatus>,
) -> Result<Json<OrderView>, ApiError> {
    let view = state
        .orders
        .update_status(OrderId::from(id), req.status)
        .await?;
    Ok(Json(view))
}

/// DELETE /orders/{id} — delete a pending or cancelled order.
pub async fn delete<G: StorageGateway + Clone + 'static>(
    State(state): State<Arc<AppState<G>>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.orders.delete(OrderId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
