//! Persistence adapters for the storefront domain.
//!
//! The domain crate knows nothing about storage; this crate maps its
//! entities onto repositories with two backends:
//! - [`InMemoryRepository`] for tests and the demo binary
//! - PostgreSQL repositories built on `sqlx`

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use common::EntityId;
pub use error::{RepositoryError, Result};
pub use memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
    InMemoryRepository,
};
pub use postgres::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
    run_migrations,
};
pub use repository::{
    CustomerRepository, Entity, OrderRepository, ProductRepository, Repository,
};
