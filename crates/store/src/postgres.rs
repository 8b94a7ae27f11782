//! PostgreSQL storage gateway implementation.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use common::{CustomerId, Money, OrderId, OrderItemId, ProductId};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::{
    Customer, Order, OrderItem, OrderStatus, Product, Result, StockAdjustment, StorageGateway,
    StoreError,
};

/// PostgreSQL-backed storage gateway.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a gateway over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the given database URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_customer(row: PgRow) -> Result<Customer> {
        Ok(Customer {
            id: CustomerId::from(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::from(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            stock_quantity: row.try_get("stock_quantity")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem> {
        Ok(OrderItem {
            id: OrderItemId::from(row.try_get::<Uuid, _>("id")?),
            product_id: ProductId::from(row.try_get::<Uuid, _>("product_id")?),
            quantity: row.try_get::<i32, _>("quantity")? as u32,
            unit_price: Money::from_cents(row.try_get("unit_price_cents")?),
        })
    }

    fn row_to_order(row: &PgRow, items: Vec<OrderItem>) -> Result<Order> {
        let status: String = row.try_get("status")?;
        Ok(Order {
            id: OrderId::from(row.try_get::<Uuid, _>("id")?),
            customer_id: CustomerId::from(row.try_get::<Uuid, _>("customer_id")?),
            status: OrderStatus::from_str(&status)?,
            total_amount: Money::from_cents(row.try_get("total_cents")?),
            created_at: row.try_get("created_at")?,
            items,
        })
    }

    async fn items_for_orders(&self, order_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<OrderItem>>> {
        let rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, quantity, unit_price_cents
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, position
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            let order_id: Uuid = row.try_get("order_id")?;
            grouped
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(&row)?);
        }
        Ok(grouped)
    }

    async fn collect_orders(&self, rows: Vec<PgRow>) -> Result<Vec<Order>> {
        let ids: Vec<Uuid> = rows
            .iter()
            .map(|row| row.try_get::<Uuid, _>("id"))
            .collect::<std::result::Result<_, _>>()?;
        let mut items = self.items_for_orders(&ids).await?;

        rows.iter()
            .map(|row| {
                let id: Uuid = row.try_get("id")?;
                Self::row_to_order(row, items.remove(&id).unwrap_or_default())
            })
            .collect()
    }
}

/// Maps constraint violations onto typed storage errors.
fn translate(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db) = err {
        if db.is_unique_violation() {
            return StoreError::UniqueViolation {
                constraint: db.constraint().unwrap_or("unknown").to_string(),
            };
        }
        if db.is_foreign_key_violation() {
            let entity = match db.constraint() {
                Some("orders_customer_id_fkey") => "Customer",
                Some("order_items_product_id_fkey") => "Product",
                _ => "Record",
            };
            return StoreError::ForeignKey { entity };
        }
    }
    StoreError::Database(err)
}

/// Applies stock deltas as relative updates inside the transaction.
///
/// The CHECK constraint on `stock_quantity` turns a racing decrement that
/// would go negative into a rollback instead of a lost invariant.
async fn apply_adjustments(
    tx: &mut Transaction<'_, Postgres>,
    stock: &[StockAdjustment],
) -> Result<()> {
    for adj in stock {
        let result = sqlx::query(
            "UPDATE products SET stock_quantity = stock_quantity + $2 WHERE id = $1",
        )
        .bind(adj.product_id.as_uuid())
        .bind(adj.delta)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e
                && db.is_check_violation()
            {
                return StoreError::NegativeStock {
                    product_id: adj.product_id,
                };
            }
            translate(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingProduct {
                product_id: adj.product_id,
            });
        }
    }
    Ok(())
}

#[async_trait]
impl StorageGateway for PostgresStore {
    async fn get_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, address, created_at FROM customers WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, address, created_at FROM customers ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }

    async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let row = sqlx::query(
            "SELECT id, name, email, phone, address, created_at FROM customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn insert_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, phone, address, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, email = $3, phone = $4, address = $5
            WHERE id = $1
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<()> {
        sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        Ok(())
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at
            FROM products
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn find_products_by_name(&self, name: &str) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at
            FROM products
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY created_at
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn list_products_in_stock(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, stock_quantity, created_at
            FROM products
            WHERE stock_quantity > 0
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn insert_product(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, stock_quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock_quantity)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price_cents = $4, stock_quantity = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.stock_quantity)
        .execute(&self.pool)
        .await
        .map_err(translate)?;
        Ok(())
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(translate)?;
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            "SELECT id, customer_id, status, total_cents, created_at FROM orders WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.items_for_orders(&[id.as_uuid()]).await?;
        let order = Self::row_to_order(&row, items.remove(&id.as_uuid()).unwrap_or_default())?;
        Ok(Some(order))
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT id, customer_id, status, total_cents, created_at FROM orders ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        self.collect_orders(rows).await
    }

    async fn list_orders_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, status, total_cents, created_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        self.collect_orders(rows).await
    }

    async fn list_orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, status, total_cents, created_at
            FROM orders
            WHERE status = $1
            ORDER BY created_at
            "#,
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.collect_orders(rows).await
    }

    async fn create_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        apply_adjustments(&mut tx, stock).await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, status, total_cents, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.customer_id.as_uuid())
        .bind(order.status.as_str())
        .bind(order.total_amount.cents())
        .bind(order.created_at)
        .execute(&mut *tx)
        .await
        .map_err(translate)?;

        for (position, item) in order.items.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, order_id, product_id, position, quantity, unit_price_cents)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(item.id.as_uuid())
            .bind(order.id.as_uuid())
            .bind(item.product_id.as_uuid())
            .bind(position as i32)
            .bind(item.quantity as i32)
            .bind(item.unit_price.cents())
            .execute(&mut *tx)
            .await
            .map_err(translate)?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save_order(&self, order: &Order, stock: &[StockAdjustment]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        apply_adjustments(&mut tx, stock).await?;

        sqlx::query("UPDATE orders SET status = $2, total_cents = $3 WHERE id = $1")
            .bind(order.id.as_uuid())
            .bind(order.status.as_str())
            .bind(order.total_amount.cents())
            .execute(&mut *tx)
            .await
            .map_err(translate)?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete_order(&self, id: OrderId, stock: &[StockAdjustment]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        apply_adjustments(&mut tx, stock).await?;

        // Items go with the order via ON DELETE CASCADE.
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(translate)?;

        tx.commit().await?;
        Ok(())
    }
}
