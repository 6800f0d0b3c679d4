//! Hub service — use-cases for hubs and their device associations.
//!
//! Pairing touches two entities. The device side is persisted first, then
//! the hub side; there is no enclosing transaction, so a hub persist
//! failure leaves the device paired while the hub's list is unchanged.
//! That divergence direction is fixed and covered by tests.

use hearth_domain::device::Device;
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, InvalidStateError, NotFoundError};
use hearth_domain::hub::Hub;
use hearth_domain::id::{DeviceId, HubId};

use crate::ports::EntityStore;

/// Application service for hub CRUD and device pairing.
pub struct HubService<HS, DS> {
    hub_store: HS,
    device_store: DS,
}

impl<HS, DS> HubService<HS, DS>
where
    HS: EntityStore<Hub>,
    DS: EntityStore<Device>,
{
    /// Create a new service backed by the given stores.
    pub fn new(hub_store: HS, device_store: DS) -> Self {
        Self {
            hub_store,
            device_store,
        }
    }

    /// Create a new hub with a freshly generated id, uninstalled and with
    /// no paired devices.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when the name is empty, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self, name), fields(name = %name))]
    pub async fn create_hub(&self, name: String) -> Result<Hub, HearthError> {
        let hub = Hub::builder().name(name).build()?;
        self.hub_store.create(hub).await
    }

    /// Look up a hub by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no hub with `id` exists, or
    /// a storage error from the store.
    pub async fn get_hub(&self, id: HubId) -> Result<Hub, HearthError> {
        self.hub_store.get(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: Hub::KIND,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all hubs.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_hubs(&self) -> Result<Vec<Hub>, HearthError> {
        self.hub_store.list().await
    }

    /// Pair a device with a hub, updating both sides of the association.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when either entity is missing,
    /// [`HearthError::InvalidState`] when the device is already paired
    /// (to any hub), or a storage error from either store.
    #[tracing::instrument(skip(self))]
    pub async fn pair_device(
        &self,
        hub_id: HubId,
        device_id: DeviceId,
    ) -> Result<Hub, HearthError> {
        let mut hub = self.get_hub(hub_id).await?;
        let mut device = self.load_device(device_id).await?;

        if let Some(existing) = device.paired_hub_id {
            return Err(InvalidStateError::DeviceAlreadyPaired {
                device_id,
                hub_id: existing,
            }
            .into());
        }

        hub.pair(device_id);
        device.paired_hub_id = Some(hub_id);

        self.device_store.update(device).await?;
        self.hub_store.update(hub).await
    }

    /// Get a paired device's current state through its hub.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when either entity is missing,
    /// [`HearthError::InvalidState`] when the device is not paired with
    /// this hub, or a storage error from either store.
    pub async fn get_device_state(
        &self,
        hub_id: HubId,
        device_id: DeviceId,
    ) -> Result<Device, HearthError> {
        let hub = self.get_hub(hub_id).await?;
        let device = self.load_device(device_id).await?;

        if !hub.is_paired(device_id) {
            return Err(InvalidStateError::DeviceNotPaired { device_id, hub_id }.into());
        }

        Ok(device)
    }

    /// List all devices paired with a hub.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when the hub is missing, or when
    /// a paired id no longer resolves to a device — the latter is a
    /// data-integrity fault and is surfaced rather than skipped. Storage
    /// errors propagate from either store.
    pub async fn list_devices(&self, hub_id: HubId) -> Result<Vec<Device>, HearthError> {
        let hub = self.get_hub(hub_id).await?;

        let mut devices = Vec::with_capacity(hub.paired_device_ids.len());
        for device_id in hub.paired_device_ids {
            devices.push(self.load_device(device_id).await?);
        }
        Ok(devices)
    }

    /// Remove a device from a hub, clearing both sides of the association.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when either entity is missing,
    /// [`HearthError::InvalidState`] when the device is not paired with
    /// this hub, or a storage error from either store.
    #[tracing::instrument(skip(self))]
    pub async fn remove_device(
        &self,
        hub_id: HubId,
        device_id: DeviceId,
    ) -> Result<Hub, HearthError> {
        let mut hub = self.get_hub(hub_id).await?;
        let mut device = self.load_device(device_id).await?;

        if !hub.is_paired(device_id) {
            return Err(InvalidStateError::DeviceNotPaired { device_id, hub_id }.into());
        }

        hub.unpair(device_id);
        device.paired_hub_id = None;

        self.device_store.update(device).await?;
        self.hub_store.update(hub).await
    }

    async fn load_device(&self, device_id: DeviceId) -> Result<Device, HearthError> {
        self.device_store.get(device_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: Device::KIND,
                id: device_id.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use hearth_domain::device::{DeviceState, DeviceType};

    use super::*;
    use crate::test_support::InMemoryStore;

    type TestService = HubService<InMemoryStore<Hub>, InMemoryStore<Device>>;

    fn make_service() -> (TestService, InMemoryStore<Hub>, InMemoryStore<Device>) {
        let hub_store = InMemoryStore::default();
        let device_store = InMemoryStore::default();
        let svc = HubService::new(hub_store.clone(), device_store.clone());
        (svc, hub_store, device_store)
    }

    async fn seed_switch(store: &InMemoryStore<Device>, name: &str) -> Device {
        let device = Device::builder()
            .name(name)
            .device_type(DeviceType::Switch)
            .build()
            .unwrap();
        store.create(device).await.unwrap()
    }

    #[tokio::test]
    async fn should_create_hub_with_empty_associations() {
        let (svc, _hubs, _devices) = make_service();

        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();

        assert!(hub.paired_device_ids.is_empty());
        assert!(hub.dwelling_id.is_none());
    }

    #[tokio::test]
    async fn should_update_both_sides_when_pairing() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;

        let updated = svc.pair_device(hub.id, device.id).await.unwrap();

        assert!(updated.is_paired(device.id));
        let paired = devices.get(device.id).await.unwrap().unwrap();
        assert_eq!(paired.paired_hub_id, Some(hub.id));
    }

    #[tokio::test]
    async fn should_reject_pairing_when_device_already_paired_to_same_hub() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;
        svc.pair_device(hub.id, device.id).await.unwrap();

        let result = svc.pair_device(hub.id, device.id).await;

        assert!(matches!(result, Err(HearthError::InvalidState(_))));
    }

    #[tokio::test]
    async fn should_reject_pairing_when_device_paired_to_different_hub() {
        let (svc, _hubs, devices) = make_service();
        let first = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let second = svc.create_hub("Garage Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;
        svc.pair_device(first.id, device.id).await.unwrap();

        let result = svc.pair_device(second.id, device.id).await;

        assert!(matches!(result, Err(HearthError::InvalidState(_))));
        let hub = svc.get_hub(second.id).await.unwrap();
        assert!(hub.paired_device_ids.is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_pairing_with_missing_hub() {
        let (svc, _hubs, devices) = make_service();
        let device = seed_switch(&devices, "Porch Light").await;

        let result = svc.pair_device(HubId::new(), device.id).await;

        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_pairing_missing_device() {
        let (svc, _hubs, _devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();

        let result = svc.pair_device(hub.id, DeviceId::new()).await;

        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_device_state_when_paired() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;
        svc.pair_device(hub.id, device.id).await.unwrap();

        let fetched = svc.get_device_state(hub.id, device.id).await.unwrap();

        assert_eq!(fetched.state, DeviceState::Switch { is_on: false });
    }

    #[tokio::test]
    async fn should_reject_device_state_query_when_not_paired() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;

        let result = svc.get_device_state(hub.id, device.id).await;

        assert!(matches!(result, Err(HearthError::InvalidState(_))));
    }

    #[tokio::test]
    async fn should_list_paired_devices() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let first = seed_switch(&devices, "Porch Light").await;
        let second = seed_switch(&devices, "Garden Light").await;
        svc.pair_device(hub.id, first.id).await.unwrap();
        svc.pair_device(hub.id, second.id).await.unwrap();

        let listed = svc.list_devices(hub.id).await.unwrap();

        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn should_fail_listing_when_paired_id_no_longer_resolves() {
        let (svc, hubs, _devices) = make_service();
        let mut hub = Hub::builder().name("Main Hub").build().unwrap();
        hub.pair(DeviceId::new());
        let hub = hubs.create(hub).await.unwrap();

        let result = svc.list_devices(hub.id).await;

        assert!(matches!(result, Err(HearthError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_clear_both_sides_when_removing_device() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;
        svc.pair_device(hub.id, device.id).await.unwrap();

        let updated = svc.remove_device(hub.id, device.id).await.unwrap();

        assert!(updated.paired_device_ids.is_empty());
        let unpaired = devices.get(device.id).await.unwrap().unwrap();
        assert!(unpaired.paired_hub_id.is_none());
    }

    #[tokio::test]
    async fn should_reject_removal_when_device_not_paired() {
        let (svc, _hubs, devices) = make_service();
        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;

        let result = svc.remove_device(hub.id, device.id).await;

        assert!(matches!(result, Err(HearthError::InvalidState(_))));
    }

    // -----------------------------------------------------------------
    // Partial application: the device side is persisted first, so a hub
    // persist failure leaves the device paired and the hub unchanged.
    // -----------------------------------------------------------------

    /// Store whose `update` always fails, delegating everything else.
    struct UpdateFails<T: Entity> {
        inner: InMemoryStore<T>,
    }

    impl<T: Entity> EntityStore<T> for UpdateFails<T> {
        fn create(&self, entity: T) -> impl Future<Output = Result<T, HearthError>> + Send {
            self.inner.create(entity)
        }

        fn get(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, HearthError>> + Send {
            self.inner.get(id)
        }

        fn list(&self) -> impl Future<Output = Result<Vec<T>, HearthError>> + Send {
            self.inner.list()
        }

        fn update(&self, _entity: T) -> impl Future<Output = Result<T, HearthError>> + Send {
            async {
                Err(HearthError::Storage(Box::new(std::io::Error::other(
                    "update failed",
                ))))
            }
        }

        fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), HearthError>> + Send {
            self.inner.delete(id)
        }
    }

    #[tokio::test]
    async fn should_leave_device_paired_when_hub_persist_fails() {
        let hubs = InMemoryStore::default();
        let devices = InMemoryStore::default();
        let svc = HubService::new(
            UpdateFails {
                inner: hubs.clone(),
            },
            devices.clone(),
        );

        let hub = svc.create_hub("Main Hub".to_string()).await.unwrap();
        let device = seed_switch(&devices, "Porch Light").await;

        let result = svc.pair_device(hub.id, device.id).await;
        assert!(matches!(result, Err(HearthError::Storage(_))));

        let device = devices.get(device.id).await.unwrap().unwrap();
        assert_eq!(device.paired_hub_id, Some(hub.id));
        let hub = hubs.get(hub.id).await.unwrap().unwrap();
        assert!(hub.paired_device_ids.is_empty());
    }
}
