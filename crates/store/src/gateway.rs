//! The storage gateway trait.

use async_trait::async_trait;
use common::{CustomerId, OrderId, ProductId};

use crate::error::Result;
use crate::records::{Customer, Order, Product};
use crate::status::OrderStatus;

/// A relative change to one product's stock, applied atomically with the
/// order write it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    /// Negative to reserve stock, positive to restore it.
    pub delta: i64,
}

/// Persistence operations the domain layer depends on.
///
/// Every method is atomic on its own. The three compound order operations
/// ([`create_order`](Self::create_order), [`save_order`](Self::save_order),
/// [`delete_order`](Self::delete_order)) additionally group the order write
/// and its stock adjustments into one transactional unit: either everything
/// commits or nothing does. Implementations must keep read-check-write on a
/// single product's stock from interleaving with another adjustment of the
/// same product.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    // Customers

    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>>;

    async fn list_customers(&self) -> Result<Vec<Customer>>;

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>>;

    async fn insert_customer(&self, customer: &Customer) -> Result<()>;

    async fn update_customer(&self, customer: &Customer) -> Result<()>;

    /// Fails with [`StoreError::ForeignKey`](crate::StoreError::ForeignKey)
    /// if any order references the customer.
    async fn delete_customer(&self, id: CustomerId) -> Result<()>;

    // Products

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Case-insensitive substring match on the product name.
    async fn find_products_by_name(&self, name: &str) -> Result<Vec<Product>>;

    async fn list_products_in_stock(&self) -> Result<Vec<Product>>;

    async fn insert_product(&self, product: &Product) -> Result<()>;

    async fn update_product(&self, product: &Product) -> Result<()>;

    /// Fails with [`StoreError::ForeignKey`](crate::StoreError::ForeignKey)
    /// if any order item references the product.
    async fn delete_product(&self, id: ProductId) -> Result<()>;

    // Orders

    /// Loads an order together with its items.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    async fn list_orders(&self) -> Result<Vec<Order>>;

    async fn list_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>>;

    /// Persists a new order with its items and applies the stock
    /// reservations in the same transaction.
    async fn create_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()>;

    /// Persists an order's mutable fields (status, total) and applies any
    /// stock restorations in the same transaction.
    async fn save_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()>;

    /// Deletes an order and its items, applying any stock restorations in
    /// the same transaction.
    async fn delete_order(&self, id: OrderId, stock: &[StockAdjustment]) -> Result<()>;
}
