//! Response views with display fields denormalized.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, OrderItemId, ProductId};
use serde::Serialize;
use store::OrderStatus;

/// An order as returned to callers: customer and product names are resolved
/// for display, amounts are integer cents.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}

/// A line item within an [`OrderView`].
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub subtotal_cents: i64,
}
