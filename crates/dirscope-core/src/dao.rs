//! Generic data-access contract
//!
//! Shared by every storage backend. Backends that cannot honor an operation
//! return [`Error::MethodNotAllowed`](crate::Error::MethodNotAllowed) instead
//! of silently doing nothing.

use crate::types::Entity;
use crate::Result;
use async_trait::async_trait;

/// CRUD-style access to entities of type `T`
#[async_trait]
pub trait GenericDao<T: Entity>: Send + Sync {
    /// Whether an entity with this key exists
    async fn exists(&self, id: &T::Id) -> Result<bool>;

    async fn find_all(&self) -> Result<Vec<T>>;

    async fn find_by_id(&self, id: &T::Id) -> Result<T>;

    /// Persist a new entity, returning the stored form
    async fn save(&self, entity: T) -> Result<T>;

    /// Replace an existing entity, returning the stored form
    async fn update(&self, entity: T) -> Result<T>;

    async fn delete(&self, entity: &T) -> Result<()>;

    async fn delete_by_id(&self, id: &T::Id) -> Result<()>;
}
