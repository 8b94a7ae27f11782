//! Order status enumeration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The status of an order in its lifecycle.
///
/// ```text
/// PENDING ──► CONFIRMED ──► PROCESSING ──► SHIPPED ──► DELIVERED
///     │            │             │             │
///     └────────────┴─────────────┴─────────────┴──► CANCELLED
/// ```
///
/// Only the cancelled-terminal rule is enforced by the lifecycle engine;
/// forward progression between the other statuses is not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Order created, stock reserved, awaiting confirmation.
    #[default]
    Pending,

    /// Order confirmed by the seller.
    Confirmed,

    /// Order is being prepared for shipment.
    Processing,

    /// Order handed to the carrier.
    Shipped,

    /// Order received by the customer.
    Delivered,

    /// Order cancelled, reserved stock returned (terminal state).
    Cancelled,
}

impl OrderStatus {
    /// Returns true if this is the terminal state (no further transitions).
    pub fn is_cancelled(&self) -> bool {
        matches!(self, OrderStatus::Cancelled)
    }

    /// Returns true if an order in this status may be deleted.
    pub fn can_delete(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Cancelled)
    }

    /// Returns true if an order in this status still holds its stock
    /// reservation.
    pub fn holds_reservation(&self) -> bool {
        !self.is_cancelled()
    }

    /// Returns the status as its uppercase wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string is not one of the status tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid order status: {0:?}")]
pub struct InvalidStatus(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "CONFIRMED" => Ok(OrderStatus::Confirmed),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "SHIPPED" => Ok(OrderStatus::Shipped),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}
