//! Hub — a controller that devices pair with.
//!
//! Pairing is bidirectional: a device id appears in
//! [`paired_device_ids`](Hub::paired_device_ids) exactly when that device's
//! `paired_hub_id` points back at this hub. Both sides are updated together
//! by the hub service; neither is mutated in isolation.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{HearthError, ValidationError};
use crate::id::{DeviceId, DwellingId, HubId};

/// A smart-home hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: HubId,
    pub name: String,
    pub dwelling_id: Option<DwellingId>,
    pub paired_device_ids: Vec<DeviceId>,
}

impl Hub {
    /// Create a builder for constructing a [`Hub`].
    #[must_use]
    pub fn builder() -> HubBuilder {
        HubBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when `name` is empty.
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    /// Whether the given device is in this hub's paired set.
    #[must_use]
    pub fn is_paired(&self, device_id: DeviceId) -> bool {
        self.paired_device_ids.contains(&device_id)
    }

    /// Add a device to the paired set. Membership stays unique.
    pub fn pair(&mut self, device_id: DeviceId) {
        if !self.is_paired(device_id) {
            self.paired_device_ids.push(device_id);
        }
    }

    /// Remove a device from the paired set.
    pub fn unpair(&mut self, device_id: DeviceId) {
        self.paired_device_ids.retain(|id| *id != device_id);
    }
}

impl Entity for Hub {
    type Id = HubId;

    const KIND: &'static str = "Hub";

    fn id(&self) -> HubId {
        self.id
    }
}

/// Step-by-step builder for [`Hub`].
#[derive(Debug, Default)]
pub struct HubBuilder {
    id: Option<HubId>,
    name: Option<String>,
}

impl HubBuilder {
    #[must_use]
    pub fn id(mut self, id: HubId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`Hub`].
    ///
    /// New hubs start uninstalled with no paired devices.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Hub, HearthError> {
        let hub = Hub {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            dwelling_id: None,
            paired_device_ids: Vec::new(),
        };
        hub.validate()?;
        Ok(hub)
    }
}
