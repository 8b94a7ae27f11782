//! In-memory storage gateway implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{CustomerId, OrderId, ProductId};
use tokio::sync::RwLock;

use crate::{
    Customer, Order, OrderStatus, Product, Result, StockAdjustment, StorageGateway, StoreError,
};

#[derive(Debug, Default)]
struct Inner {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory storage gateway for tests and single-process deployments.
///
/// Compound operations take the write lock once, so an order write and its
/// stock adjustments are observed together or not at all. Referential and
/// unique constraints are simulated explicitly to match the PostgreSQL
/// implementation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.inner.read().await.orders.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.customers.clear();
        inner.products.clear();
        inner.orders.clear();
    }
}

/// Validates every adjustment against the staged result before applying any,
/// so a failing adjustment leaves all products untouched.
fn apply_adjustments(
    products: &mut HashMap<ProductId, Product>,
    stock: &[StockAdjustment],
) -> Result<()> {
    let mut staged: HashMap<ProductId, i64> = HashMap::new();
    for adj in stock {
        let base = match staged.get(&adj.product_id) {
            Some(value) => *value,
            None => {
                products
                    .get(&adj.product_id)
                    .ok_or(StoreError::MissingProduct {
                        product_id: adj.product_id,
                    })?
                    .stock_quantity
            }
        };
        let next = base + adj.delta;
        if next < 0 {
            return Err(StoreError::NegativeStock {
                product_id: adj.product_id,
            });
        }
        staged.insert(adj.product_id, next);
    }

    for (id, stock_quantity) in staged {
        if let Some(product) = products.get_mut(&id) {
            product.stock_quantity = stock_quantity;
        }
    }
    Ok(())
}

fn check_unique_email(inner: &Inner, email: &str, exclude: Option<CustomerId>) -> Result<()> {
    let taken = inner
        .customers
        .values()
        .any(|c| c.email == email && Some(c.id) != exclude);
    if taken {
        return Err(StoreError::UniqueViolation {
            constraint: "customers_email_key".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl StorageGateway for InMemoryStore {
    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.inner.read().await.customers.get(&id).cloned())
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let inner = self.inner.read().await;
        let mut customers: Vec<_> = inner.customers.values().cloned().collect();
        customers.sort_by_key(|c| c.created_at);
        Ok(customers)
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let inner = self.inner.read().await;
        Ok(inner
            .customers
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        let mut inner = self.inner.write().await;
        check_unique_email(&inner, &customer.email, None)?;
        inner.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<()> {
        let mut inner = self.inner.write().await;
        check_unique_email(&inner, &customer.email, Some(customer.id))?;
        inner.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<()> {
        let mut inner = self.inner.write().await;
        if inner.orders.values().any(|o| o.customer_id == id) {
            return Err(StoreError::ForeignKey {
                entity: "Customer",
            });
        }
        inner.customers.remove(&id);
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.inner.read().await.products.get(&id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<_> = inner.products.values().cloned().collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn find_products_by_name(&self, name: &str) -> Result<Vec<Product>> {
        let needle = name.to_lowercase();
        let inner = self.inner.read().await;
        let mut products: Vec<_> = inner
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn list_products_in_stock(&self) -> Result<Vec<Product>> {
        let inner = self.inner.read().await;
        let mut products: Vec<_> = inner
            .products
            .values()
            .filter(|p| p.stock_quantity > 0)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn insert_product(&self, product: &Product) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.products.insert(product.id, product.clone());
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut inner = self.inner.write().await;
        let referenced = inner
            .orders
            .values()
            .flat_map(|o| o.items.iter())
            .any(|item| item.product_id == id);
        if referenced {
            return Err(StoreError::ForeignKey { entity: "Product" });
        }
        inner.products.remove(&id);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.inner.read().await.orders.get(&id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<_> = inner.orders.values().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn list_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<_> = inner
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<_> = inner
            .orders
            .values()
            .filter(|o| o.status == status)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn create_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()> {
        let mut inner = self.inner.write().await;
        apply_adjustments(&mut inner.products, stock)?;
        inner.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn save_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()> {
        let mut inner = self.inner.write().await;
        apply_adjustments(&mut inner.products, stock)?;
        inner.orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn delete_order(&self, id: OrderId, stock: &[StockAdjustment]) -> Result<()> {
        let mut inner = self.inner.write().await;
        apply_adjustments(&mut inner.products, stock)?;
        inner.orders.remove(&id);
        Ok(())
    }
}
