//! Device — a controllable thing in the home: camera, switch, dimmer,
//! lock, or thermostat.
//!
//! A device's [`state`](Device::state) variant must always match its
//! [`device_type`](Device::device_type); the invariant is checked at
//! construction and on every state change. A device pairs with at most
//! one hub, tracked by [`paired_hub_id`](Device::paired_hub_id) and
//! mirrored by the hub's paired set.

pub mod state;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{HearthError, TypeMismatchError, ValidationError};
use crate::id::{DeviceId, HubId};

pub use state::{DeviceState, ThermostatMode};

/// The closed set of supported device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Camera,
    Dimmer,
    Lock,
    Switch,
    Thermostat,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => f.write_str("camera"),
            Self::Dimmer => f.write_str("dimmer"),
            Self::Lock => f.write_str("lock"),
            Self::Switch => f.write_str("switch"),
            Self::Thermostat => f.write_str("thermostat"),
        }
    }
}

/// A smart-home device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    pub state: DeviceState,
    pub paired_hub_id: Option<HubId>,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] when `name` is empty, or
    /// [`HearthError::TypeMismatch`] when the state variant does not match
    /// the device type.
    pub fn validate(&self) -> Result<(), HearthError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if !self.state.matches(self.device_type) {
            return Err(TypeMismatchError {
                expected: self.device_type,
                found: self.state.device_type(),
            }
            .into());
        }
        Ok(())
    }

    /// Replace the device's state with a variant of the same type.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::TypeMismatch`] when `new_state`'s variant
    /// differs from the device's type. The stored state is untouched on
    /// failure.
    pub fn set_state(&mut self, new_state: DeviceState) -> Result<(), HearthError> {
        if !new_state.matches(self.device_type) {
            return Err(TypeMismatchError {
                expected: self.device_type,
                found: new_state.device_type(),
            }
            .into());
        }
        self.state = new_state;
        Ok(())
    }

    /// Whether the device is currently paired to a hub.
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.paired_hub_id.is_some()
    }
}

impl Entity for Device {
    type Id = DeviceId;

    const KIND: &'static str = "Device";

    fn id(&self) -> DeviceId {
        self.id
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    device_type: Option<DeviceType>,
    state: Option<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: DeviceType) -> Self {
        self.device_type = Some(device_type);
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// A missing state defaults to the type's default variant. New devices
    /// are always unpaired.
    ///
    /// # Errors
    ///
    /// Returns [`HearthError::Validation`] if the name or type is missing,
    /// or [`HearthError::TypeMismatch`] if an explicit state does not match
    /// the type.
    pub fn build(self) -> Result<Device, HearthError> {
        let device_type = self
            .device_type
            .ok_or(ValidationError::MissingDeviceType)?;
        let state = self
            .state
            .unwrap_or_else(|| DeviceState::default_for(device_type));
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            device_type,
            state,
            paired_hub_id: None,
        };
        device.validate()?;
        Ok(device)
    }
}
