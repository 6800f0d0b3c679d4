//! Shared test doubles for service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use hearth_domain::entity::Entity;
use hearth_domain::error::{AlreadyExistsError, HearthError, NotFoundError};

use crate::ports::EntityStore;

/// In-memory [`EntityStore`] honouring the full store contract.
///
/// Cloning yields a handle onto the same data, so a test can seed or
/// inspect entities behind the service under test.
pub(crate) struct InMemoryStore<T: Entity> {
    items: Arc<Mutex<HashMap<T::Id, T>>>,
}

impl<T: Entity> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Entity> EntityStore<T> for InMemoryStore<T> {
    fn create(&self, entity: T) -> impl Future<Output = Result<T, HearthError>> + Send {
        let mut items = self.items.lock().unwrap();
        let result: Result<T, HearthError> = if items.contains_key(&entity.id()) {
            Err(AlreadyExistsError {
                entity: T::KIND,
                id: entity.id().to_string(),
            }
            .into())
        } else {
            items.insert(entity.id(), entity.clone());
            Ok(entity)
        };
        async move { result }
    }

    fn get(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, HearthError>> + Send {
        let items = self.items.lock().unwrap();
        let result = items.get(&id).cloned();
        async move { Ok(result) }
    }

    fn list(&self) -> impl Future<Output = Result<Vec<T>, HearthError>> + Send {
        let items = self.items.lock().unwrap();
        let result: Vec<T> = items.values().cloned().collect();
        async move { Ok(result) }
    }

    fn update(&self, entity: T) -> impl Future<Output = Result<T, HearthError>> + Send {
        let mut items = self.items.lock().unwrap();
        let result: Result<T, HearthError> = if items.contains_key(&entity.id()) {
            items.insert(entity.id(), entity.clone());
            Ok(entity)
        } else {
            Err(NotFoundError {
                entity: T::KIND,
                id: entity.id().to_string(),
            }
            .into())
        };
        async move { result }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HearthError>> + Send {
        let mut items = self.items.lock().unwrap();
        let result: Result<(), HearthError> = if items.remove(&id).is_some() {
            Ok(())
        } else {
            Err(NotFoundError {
                entity: T::KIND,
                id: id.to_string(),
            }
            .into())
        };
        async move { result }
    }
}

#[cfg(test)]
mod tests {
    use hearth_domain::device::{Device, DeviceType};
    use hearth_domain::id::DeviceId;

    use super::*;

    fn switch(name: &str) -> Device {
        Device::builder()
            .name(name)
            .device_type(DeviceType::Switch)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_reject_create_when_id_already_exists() {
        let store = InMemoryStore::<Device>::default();
        let device = switch("Porch Light");

        store.create(device.clone()).await.unwrap();
        let result = store.create(device).await;

        assert!(matches!(result, Err(HearthError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn should_return_none_when_getting_absent_id() {
        let store = InMemoryStore::<Device>::default();
        let result = store.get(DeviceId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_reject_update_when_id_is_absent() {
        let store = InMemoryStore::<Device>::default();
        let result = store.update(switch("Porch Light")).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_delete_when_id_is_absent() {
        let store = InMemoryStore::<Device>::default();
        let result = store.delete(DeviceId::new()).await;
        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_share_data_between_cloned_handles() {
        let store = InMemoryStore::<Device>::default();
        let handle = store.clone();

        let device = store.create(switch("Porch Light")).await.unwrap();

        let fetched = handle.get(device.id).await.unwrap();
        assert_eq!(fetched, Some(device));
    }
}
