//! Request types accepted by the domain services.

use common::{CustomerId, ProductId};
use serde::Deserialize;
use store::OrderStatus;

use crate::error::{DomainError, Result};

/// Fields for creating or updating a customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CustomerRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "name",
                constraint: "must not be blank",
            });
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(DomainError::Validation {
                field: "email",
                constraint: "must be a valid email address",
            });
        }
        Ok(())
    }
}

/// Fields for creating or updating a product.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock_quantity: i64,
}

impl ProductRequest {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "name",
                constraint: "must not be blank",
            });
        }
        if self.price_cents < 0 {
            return Err(DomainError::Validation {
                field: "price_cents",
                constraint: "must not be negative",
            });
        }
        if self.stock_quantity < 0 {
            return Err(DomainError::Validation {
                field: "stock_quantity",
                constraint: "must not be negative",
            });
        }
        Ok(())
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Request to create an order with its items.
///
/// Creation is the only point where items enter an order; there is no
/// add/remove item operation later in the lifecycle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrder {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(DomainError::Validation {
                field: "items",
                constraint: "must not be empty",
            });
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            return Err(DomainError::Validation {
                field: "quantity",
                constraint: "must be greater than 0",
            });
        }
        Ok(())
    }
}

/// Request to move an order to a new status.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UpdateOrderStatus {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_customer_name_is_rejected() {
        let request = CustomerRequest {
            name: "  ".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: None,
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation { field: "name", .. })
        ));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let request = CustomerRequest {
            name: "Ada".to_string(),
            email: "not-an-email".to_string(),
            phone: None,
            address: None,
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation { field: "email", .. })
        ));
    }

    #[test]
    fn negative_price_is_rejected() {
        let request = ProductRequest {
            name: "Widget".to_string(),
            description: None,
            price_cents: -1,
            stock_quantity: 0,
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation {
                field: "price_cents",
                ..
            })
        ));
    }

    #[test]
    fn order_without_items_is_rejected() {
        let request = CreateOrder {
            customer_id: CustomerId::new(),
            items: vec![],
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation { field: "items", .. })
        ));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let request = CreateOrder {
            customer_id: CustomerId::new(),
            items: vec![OrderItemRequest {
                product_id: ProductId::new(),
                quantity: 0,
            }],
        };
        assert!(matches!(
            request.validate(),
            Err(DomainError::Validation {
                field: "quantity",
                ..
            })
        ));
    }
}
