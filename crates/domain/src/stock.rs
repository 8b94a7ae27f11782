//! The stock ledger: the single choke point for product stock mutation.

use std::collections::HashMap;

use common::ProductId;
use store::{Product, StockAdjustment, StorageGateway};

use crate::error::{DomainError, Result};

struct Staged {
    product: Product,
    delta: i64,
}

/// Accumulates stock adjustments against staged product copies.
///
/// `adjust` resolves the product, checks the non-negative invariant and
/// stages the change; a rejected adjustment leaves previously staged state
/// untouched. Nothing is persisted here — the caller hands the accumulated
/// adjustments to the storage gateway as part of one atomic order write, so
/// an adjustment that fails late never leaks earlier decrements into
/// storage.
pub struct StockLedger<'g, G: StorageGateway> {
    gateway: &'g G,
    staged: HashMap<ProductId, Staged>,
    touched: Vec<ProductId>,
}

impl<'g, G: StorageGateway> StockLedger<'g, G> {
    /// Creates an empty ledger over the given gateway.
    pub fn new(gateway: &'g G) -> Self {
        Self {
            gateway,
            staged: HashMap::new(),
            touched: Vec::new(),
        }
    }

    /// Applies a relative stock change to a product.
    ///
    /// Negative deltas reserve stock, positive deltas restore it. Returns
    /// the staged product (with the adjusted stock) so callers can snapshot
    /// its current price and name.
    pub async fn adjust(&mut self, product_id: ProductId, delta: i64) -> Result<Product> {
        let mut staged = match self.staged.remove(&product_id) {
            Some(staged) => staged,
            None => {
                let product = self
                    .gateway
                    .get_product(product_id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Product", product_id))?;
                self.touched.push(product_id);
                Staged { product, delta: 0 }
            }
        };

        let next = staged.product.stock_quantity + delta;
        if next < 0 {
            let err = DomainError::InsufficientStock {
                name: staged.product.name.clone(),
            };
            self.staged.insert(product_id, staged);
            return Err(err);
        }

        staged.product.stock_quantity = next;
        staged.delta += delta;
        let snapshot = staged.product.clone();
        self.staged.insert(product_id, staged);
        Ok(snapshot)
    }

    /// Consumes the ledger, yielding the net adjustment per touched product
    /// in first-touch order.
    pub fn into_adjustments(self) -> Vec<StockAdjustment> {
        let StockLedger {
            mut staged,
            touched,
            ..
        } = self;
        touched
            .into_iter()
            .filter_map(|product_id| {
                staged.remove(&product_id).map(|s| StockAdjustment {
                    product_id,
                    delta: s.delta,
                })
            })
            .filter(|adj| adj.delta != 0)
            .collect()
    }
}
