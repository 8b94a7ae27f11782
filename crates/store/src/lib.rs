//! Storage gateway for the sales API.
//!
//! Holds the persisted record types and the [`StorageGateway`] trait the
//! domain layer calls into, with an in-memory implementation for tests and
//! small deployments and a PostgreSQL implementation for everything else.
//! Compound order writes (create, status change, delete) are single atomic
//! operations: the order, its items and the accompanying product stock
//! adjustments commit or roll back together.

mod error;
mod gateway;
mod memory;
mod postgres;
mod records;
mod status;

pub use error::{Result, StoreError};
pub use gateway::{StockAdjustment, StorageGateway};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use records::{Customer, Order, OrderItem, Product};
pub use status::{InvalidStatus, OrderStatus};
