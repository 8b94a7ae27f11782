//! The order lifecycle engine.

use std::collections::HashMap;

use common::{CustomerId, OrderId, ProductId};
use store::{Order, OrderItem, OrderStatus, StorageGateway};

use crate::commands::CreateOrder;
use crate::error::{DomainError, Result};
use crate::stock::StockLedger;
use crate::views::{OrderItemView, OrderView};

/// Service for managing the order lifecycle.
///
/// Orders move `PENDING → CONFIRMED → PROCESSING → SHIPPED → DELIVERED`,
/// with `CANCELLED` reachable from any non-terminal status. Only the
/// cancelled-terminal rule is checked on transition; the engine deliberately
/// accepts any other target status, matching how the lifecycle has always
/// behaved. Every stock mutation goes through the [`StockLedger`] and is
/// committed atomically with the order write.
pub struct OrderService<G: StorageGateway> {
    store: G,
}

impl<G: StorageGateway> OrderService<G> {
    /// Creates a new order service over the given gateway.
    pub fn new(store: G) -> Self {
        Self { store }
    }

    /// Creates a pending order, reserving stock for every requested item.
    ///
    /// Item prices are snapshotted from the product at this moment; later
    /// product price changes do not affect existing orders.
    #[tracing::instrument(skip(self, cmd), fields(customer_id = %cmd.customer_id))]
    pub async fn create(&self, cmd: CreateOrder) -> Result<OrderView> {
        cmd.validate()?;

        let customer = self
            .store
            .get_customer(cmd.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", cmd.customer_id))?;

        let mut ledger = StockLedger::new(&self.store);
        let mut items = Vec::with_capacity(cmd.items.len());
        for request in &cmd.items {
            let product = ledger
                .adjust(request.product_id, -i64::from(request.quantity))
                .await?;
            items.push(OrderItem::new(product.id, request.quantity, product.price));
        }

        let order = Order::new(customer.id, items);
        self.store
            .create_order(&order, &ledger.into_adjustments())
            .await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id, total_cents = order.total_amount.cents(), "order created");

        self.view(order).await
    }

    /// Moves an order to a new status.
    ///
    /// Cancelling restores every item's reserved stock; a cancelled order
    /// rejects all further status changes, so the restoration can never run
    /// twice.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: OrderId, new_status: OrderStatus) -> Result<OrderView> {
        let mut order = self
            .store
            .get_order(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        if order.status.is_cancelled() {
            return Err(DomainError::InvalidTransition {
                reason: "cannot update status of a cancelled order",
            });
        }

        let adjustments = if new_status.is_cancelled() {
            let restored = self.restorations(&order).await?;
            metrics::counter!("orders_cancelled_total").increment(1);
            tracing::info!(order_id = %order.id, "order cancelled, stock restored");
            restored
        } else {
            Vec::new()
        };

        order.status = new_status;
        self.store.save_order(&order, &adjustments).await?;

        self.view(order).await
    }

    /// Deletes an order, allowed only while PENDING or after cancellation.
    ///
    /// A pending order still holds its reservation, so deleting it restores
    /// stock the same way cancelling does.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: OrderId) -> Result<()> {
        let order = self
            .store
            .get_order(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;

        if !order.status.can_delete() {
            return Err(DomainError::InvalidState {
                reason: "cannot delete an order that is already being processed",
            });
        }

        let adjustments = if order.status.holds_reservation() {
            self.restorations(&order).await?
        } else {
            Vec::new()
        };

        self.store.delete_order(order.id, &adjustments).await?;
        metrics::counter!("orders_deleted_total").increment(1);
        Ok(())
    }

    /// Loads a single order as a view.
    pub async fn find_by_id(&self, id: OrderId) -> Result<OrderView> {
        let order = self
            .store
            .get_order(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Order", id))?;
        self.view(order).await
    }

    /// Lists all orders.
    pub async fn find_all(&self) -> Result<Vec<OrderView>> {
        let orders = self.store.list_orders().await?;
        self.views(orders).await
    }

    /// Lists a customer's orders. An unknown customer yields an empty list.
    pub async fn find_by_customer(&self, customer_id: CustomerId) -> Result<Vec<OrderView>> {
        let orders = self.store.list_orders_by_customer(customer_id).await?;
        self.views(orders).await
    }

    /// Lists orders in a given status.
    pub async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<OrderView>> {
        let orders = self.store.list_orders_by_status(status).await?;
        self.views(orders).await
    }

    /// Stages a full stock restoration for every item of the order.
    async fn restorations(&self, order: &Order) -> Result<Vec<store::StockAdjustment>> {
        let mut ledger = StockLedger::new(&self.store);
        for item in &order.items {
            ledger
                .adjust(item.product_id, i64::from(item.quantity))
                .await?;
        }
        Ok(ledger.into_adjustments())
    }

    /// Assembles the response view, denormalizing customer and product names.
    async fn view(&self, order: Order) -> Result<OrderView> {
        let customer = self
            .store
            .get_customer(order.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", order.customer_id))?;

        let mut names: HashMap<ProductId, String> = HashMap::new();
        let mut items = Vec::with_capacity(order.items.len());
        for item in &order.items {
            let product_name = match names.get(&item.product_id) {
                Some(name) => name.clone(),
                None => {
                    let product = self
                        .store
                        .get_product(item.product_id)
                        .await?
                        .ok_or_else(|| DomainError::not_found("Product", item.product_id))?;
                    names.insert(item.product_id, product.name.clone());
                    product.name
                }
            };
            items.push(OrderItemView {
                id: item.id,
                product_id: item.product_id,
                product_name,
                quantity: item.quantity,
                unit_price_cents: item.unit_price.cents(),
                subtotal_cents: item.subtotal().cents(),
            });
        }

        Ok(OrderView {
            id: order.id,
            customer_id: order.customer_id,
            customer_name: customer.name,
            status: order.status,
            total_cents: order.total_amount.cents(),
            created_at: order.created_at,
            items,
        })
    }

    async fn views(&self, orders: Vec<Order>) -> Result<Vec<OrderView>> {
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            views.push(self.view(order).await?);
        }
        Ok(views)
    }
}
