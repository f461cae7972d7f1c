use async_trait::async_trait;
use common::EntityId;
use domain::{Customer, Order, Product};

use crate::Result;

/// An entity that can be stored in a repository.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Entity name used in errors, logs, and metrics.
    const NAME: &'static str;

    /// Returns the entity's identifier.
    fn entity_id(&self) -> &EntityId;
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

impl Entity for Product {
    const NAME: &'static str = "Product";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

impl Entity for Order {
    const NAME: &'static str = "Order";

    fn entity_id(&self) -> &EntityId {
        self.id()
    }
}

/// Storage for one entity type, addressed by id.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Stores a new entity.
    ///
    /// Fails with `AlreadyExists` if an entity with the same id is stored.
    async fn create(&self, entity: &T) -> Result<()>;

    /// Overwrites a stored entity.
    ///
    /// Fails with `NotFound` if no entity with that id is stored.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Loads an entity by id.
    ///
    /// Fails with `NotFound` if absent.
    async fn find(&self, id: &EntityId) -> Result<T>;

    /// Loads every stored entity, ordered by id.
    async fn find_all(&self) -> Result<Vec<T>>;

    /// Deletes an entity by id.
    ///
    /// Fails with `NotFound` if absent.
    async fn delete(&self, id: &EntityId) -> Result<()>;
}

/// Repository of customers.
pub trait CustomerRepository: Repository<Customer> {}

impl<T: Repository<Customer> + ?Sized> CustomerRepository for T {}

/// Repository of products.
pub trait ProductRepository: Repository<Product> {}

impl<T: Repository<Product> + ?Sized> ProductRepository for T {}

/// Repository of orders and their items.
pub trait OrderRepository: Repository<Order> {}

impl<T: Repository<Order> + ?Sized> OrderRepository for T {}

/// Counts a successful write against `entity`.
pub(crate) fn record_write(entity: &'static str, operation: &'static str) {
    metrics::counter!("repository_operations", "entity" => entity, "operation" => operation)
        .increment(1);
}
