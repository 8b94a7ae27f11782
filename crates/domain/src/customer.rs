//! Customer directory service.

use common::CustomerId;
use store::{Customer, StorageGateway};

use crate::commands::CustomerRequest;
use crate::error::{DomainError, Result};

/// CRUD over customers with one business rule: the email must be unique
/// across all customers.
pub struct CustomerService<G: StorageGateway> {
    store: G,
}

impl<G: StorageGateway> CustomerService<G> {
    pub fn new(store: G) -> Self {
        Self { store }
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>> {
        Ok(self.store.list_customers().await?)
    }

    pub async fn find_by_id(&self, id: CustomerId) -> Result<Customer> {
        self.store
            .get_customer(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer", id))
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create(&self, request: CustomerRequest) -> Result<Customer> {
        request.validate()?;

        if self
            .store
            .find_customer_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(DomainError::DuplicateEmail {
                email: request.email,
            });
        }

        let customer = Customer::new(request.name, request.email, request.phone, request.address);
        self.store.insert_customer(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self, request))]
    pub async fn update(&self, id: CustomerId, request: CustomerRequest) -> Result<Customer> {
        request.validate()?;

        let mut customer = self.find_by_id(id).await?;

        if let Some(existing) = self.store.find_customer_by_email(&request.email).await?
            && existing.id != id
        {
            return Err(DomainError::DuplicateEmail {
                email: request.email,
            });
        }

        customer.name = request.name;
        customer.email = request.email;
        customer.phone = request.phone;
        customer.address = request.address;

        self.store.update_customer(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: CustomerId) -> Result<()> {
        // Existence check first so a missing id reads as 404, not a no-op.
        self.find_by_id(id).await?;
        self.store.delete_customer(id).await?;
        Ok(())
    }
}
