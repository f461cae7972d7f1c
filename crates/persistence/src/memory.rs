use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::{Customer, Order, Product};
use tokio::sync::RwLock;

use crate::repository::record_write;
use crate::{Entity, Repository, RepositoryError, Result};

/// In-memory repository implementation for testing.
///
/// Clones share the same storage, and this implementation provides the same
/// interface as the PostgreSQL repositories.
#[derive(Clone)]
pub struct InMemoryRepository<T: Entity> {
    entities: Arc<RwLock<HashMap<EntityId, T>>>,
}

/// In-memory customer storage.
pub type InMemoryCustomerRepository = InMemoryRepository<Customer>;

/// In-memory product storage.
pub type InMemoryProductRepository = InMemoryRepository<Product>;

/// In-memory order storage.
pub type InMemoryOrderRepository = InMemoryRepository<Order>;

impl<T: Entity> InMemoryRepository<T> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        self.entities.write().await.clear();
    }

    fn not_found(id: &EntityId) -> RepositoryError {
        RepositoryError::NotFound {
            entity: T::NAME,
            id: id.clone(),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: &T) -> Result<()> {
        let id = entity.entity_id();
        let mut store = self.entities.write().await;

        if store.contains_key(id) {
            return Err(RepositoryError::AlreadyExists {
                entity: T::NAME,
                id: id.clone(),
            });
        }

        store.insert(id.clone(), entity.clone());
        record_write(T::NAME, "create");
        Ok(())
    }

    async fn update(&self, entity: &T) -> Result<()> {
        let id = entity.entity_id();
        let mut store = self.entities.write().await;

        let slot = store.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        *slot = entity.clone();
        record_write(T::NAME, "update");
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<T> {
        self.entities
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let store = self.entities.read().await;
        let mut entities: Vec<_> = store.values().cloned().collect();
        entities.sort_by(|a, b| a.entity_id().cmp(b.entity_id()));
        Ok(entities)
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.entities
            .write()
            .await
            .remove(id)
            .ok_or_else(|| Self::not_found(id))?;
        record_write(T::NAME, "delete");
        Ok(())
    }
}
