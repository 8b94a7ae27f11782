//! Persisted record types.
//!
//! Orders own their items; items point at products by id only, so there are
//! no object cycles to keep consistent — relations are ids, lookups go
//! through the gateway.

use chrono::{DateTime, Utc};
use common::{CustomerId, Money, OrderId, OrderItemId, ProductId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer record with a fresh id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: email.into(),
            phone,
            address,
            created_at: Utc::now(),
        }
    }
}

/// A product record with its available stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product record with a fresh id.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: Money,
        stock_quantity: i64,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            description,
            price,
            stock_quantity,
            created_at: Utc::now(),
        }
    }
}

/// A line item within an order.
///
/// The unit price is a snapshot of the product's price at order-creation
/// time, not a live reference to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        Self {
            id: OrderItemId::new(),
            product_id,
            quantity,
            unit_price,
        }
    }

    /// Returns `quantity × unit_price`.
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An order record together with its items.
///
/// Items are fixed after creation; the only mutation the lifecycle allows
/// afterwards is a status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Creates a new pending order, deriving the total from the items.
    pub fn new(customer_id: CustomerId, items: Vec<OrderItem>) -> Self {
        let total_amount = items.iter().map(OrderItem::subtotal).sum();
        Self {
            id: OrderId::new(),
            customer_id,
            status: OrderStatus::Pending,
            total_amount,
            created_at: Utc::now(),
            items,
        }
    }

    /// Recomputes the total from the items.
    pub fn computed_total(&self) -> Money {
        self.items.iter().map(OrderItem::subtotal).sum()
    }
}
