//! Storage port — the generic persistence contract.
//!
//! One trait covers every entity kind; adapters provide one implementation
//! per kind, each backed by its own table keyed on the entity's id.

use std::future::Future;

use hearth_domain::entity::Entity;
use hearth_domain::error::HearthError;

/// Generic CRUD persistence for a single entity type.
///
/// Each method is atomic with respect to one entity row. The store makes
/// no cross-row guarantees; callers performing multi-entity updates must
/// tolerate partial application on failure.
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Insert a new entity.
    ///
    /// Fails with [`HearthError::AlreadyExists`] when the id is taken.
    /// Returns the entity as round-tripped through the store, so any
    /// normalization the store applies is visible to the caller.
    fn create(&self, entity: T) -> impl Future<Output = Result<T, HearthError>> + Send;

    /// Look up an entity by id. Absence is `Ok(None)`, not an error.
    fn get(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, HearthError>> + Send;

    /// All stored entities, in no guaranteed order.
    fn list(&self) -> impl Future<Output = Result<Vec<T>, HearthError>> + Send;

    /// Overwrite all fields of an existing entity.
    ///
    /// Fails with [`HearthError::NotFound`] when no row with the entity's
    /// id exists. Returns the round-tripped entity.
    fn update(&self, entity: T) -> impl Future<Output = Result<T, HearthError>> + Send;

    /// Remove an entity by id.
    ///
    /// Fails with [`HearthError::NotFound`] when no row with `id` exists.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HearthError>> + Send;
}
