//! Product directory service.

use common::{Money, ProductId};
use store::{Product, StorageGateway};

use crate::commands::ProductRequest;
use crate::error::{DomainError, Result};

/// CRUD over products. Validation is field-level only; stock consistency
/// for order flows is the lifecycle engine's job.
pub struct ProductService<G: StorageGateway> {
    store: G,
}

impl<G: StorageGateway> ProductService<G> {
    pub fn new(store: G) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    pub async fn find_by_id(&self, id: ProductId) -> Result<Product> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Product", id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Product>> {
        Ok(self.store.find_products_by_name(name).await?)
    }

    pub async fn find_in_stock(&self) -> Result<Vec<Product>> {
        Ok(self.store.list_products_in_stock().await?)
    }

    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: ProductRequest) -> Result<Product> {
        request.validate()?;

        let product = Product::new(
            request.name,
            request.description,
            Money::from_cents(request.price_cents),
            request.stock_quantity,
        );
        self.store.insert_product(&product).await?;
        Ok(product)
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn update(&self, id: ProductId, request: ProductRequest) -> Result<Product> {
        request.validate()?;

        let mut product = self.find_by_id(id).await?;
        product.name = request.name;
        product.description = request.description;
        product.price = Money::from_cents(request.price_cents);
        product.stock_quantity = request.stock_quantity;

        self.store.update_product(&product).await?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        self.find_by_id(id).await?;
        self.store.delete_product(id).await?;
        Ok(())
    }
}
