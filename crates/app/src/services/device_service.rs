//! Device service — use-cases for managing devices and their states.

use hearth_domain::device::{Device, DeviceState, DeviceType};
use hearth_domain::entity::Entity;
use hearth_domain::error::{HearthError, InvalidStateError, NotFoundError};
use hearth_domain::id::DeviceId;

use crate::ports::EntityStore;

/// Application service for device CRUD and state management.
pub struct DeviceService<S> {
    store: S,
}

impl<S: EntityStore<Device>> DeviceService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new device with a freshly generated id, unpaired.
    ///
    /// The state variant is validated against the type at construction;
    /// a mismatched initial state never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when the name is empty,
    /// [`HearthError::TypeMismatch`] when `initial_state` does not match
    /// `device_type`, or a storage error from the store.
    #[tracing::instrument(skip(self, name, initial_state), fields(name = %name))]
    pub async fn create_device(
        &self,
        name: String,
        device_type: DeviceType,
        initial_state: DeviceState,
    ) -> Result<Device, HearthError> {
        let device = Device::builder()
            .name(name)
            .device_type(device_type)
            .state(initial_state)
            .build()?;
        self.store.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when no device with `id` exists,
    /// or a storage error from the store.
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, HearthError> {
        self.store.get(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: Device::KIND,
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_devices(&self) -> Result<Vec<Device>, HearthError> {
        self.store.list().await
    }

    /// Replace a device's state with a variant of the same type.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when the device does not exist,
    /// [`HearthError::TypeMismatch`] when `new_state`'s variant differs
    /// from the stored device's, or a storage error from the store.
    #[tracing::instrument(skip(self, new_state))]
    pub async fn modify_device_state(
        &self,
        id: DeviceId,
        new_state: DeviceState,
    ) -> Result<Device, HearthError> {
        let mut device = self.get_device(id).await?;
        device.set_state(new_state)?;
        self.store.update(device).await
    }

    /// Delete an unpaired device.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::NotFound`] when the device does not exist,
    /// [`HearthError::InvalidState`] when it is paired to a hub, or a
    /// storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), HearthError> {
        let device = self.get_device(id).await?;
        if let Some(hub_id) = device.paired_hub_id {
            return Err(InvalidStateError::DeviceStillPaired {
                device_id: id,
                hub_id,
            }
            .into());
        }
        self.store.delete(id).await
    }
}
