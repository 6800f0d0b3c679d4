//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HearthError`]
//! via `#[from]`. Adapters box their error types into the
//! [`Storage`](HearthError::Storage) variant at the boundary.

use crate::device::DeviceType;
use crate::id::{DeviceId, DwellingId, HubId};

/// Top-level domain error.
#[derive(Debug, thiserror::Error)]
pub enum HearthError {
    /// A domain invariant failed during construction or validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// An entity with the same identifier is already stored.
    #[error(transparent)]
    AlreadyExists(#[from] AlreadyExistsError),

    /// A business rule forbids the requested operation.
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    /// A device state variant does not match the device's type.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),

    /// Persistence failed. The source is the adapter's own error type.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invariant violations caught at construction time.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name field is empty.
    #[error("name must not be empty")]
    EmptyName,

    /// A device cannot be built without a type.
    #[error("device type is required")]
    MissingDeviceType,

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A lookup by identifier found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Entity kind, e.g. `"Device"`.
    pub entity: &'static str,
    /// The identifier that was looked up.
    pub id: String,
}

/// An insert collided with an existing identifier.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} already exists")]
pub struct AlreadyExistsError {
    /// Entity kind, e.g. `"Device"`.
    pub entity: &'static str,
    /// The identifier that collided.
    pub id: String,
}

/// Business-rule violations on pairing, installation, and deletion.
#[derive(Debug, thiserror::Error)]
pub enum InvalidStateError {
    /// The device is already paired, possibly to a different hub.
    #[error("device {device_id} is already paired to hub {hub_id}")]
    DeviceAlreadyPaired {
        device_id: DeviceId,
        hub_id: HubId,
    },

    /// The device is not in the hub's paired set.
    #[error("device {device_id} is not paired with hub {hub_id}")]
    DeviceNotPaired {
        device_id: DeviceId,
        hub_id: HubId,
    },

    /// A paired device cannot be deleted.
    #[error("cannot delete device {device_id} while paired to hub {hub_id}")]
    DeviceStillPaired {
        device_id: DeviceId,
        hub_id: HubId,
    },

    /// The hub is already installed, possibly in a different dwelling.
    #[error("hub {hub_id} is already installed in dwelling {dwelling_id}")]
    HubAlreadyInstalled {
        hub_id: HubId,
        dwelling_id: DwellingId,
    },
}

/// A state variant was applied to a device of a different type.
#[derive(Debug, thiserror::Error)]
#[error("cannot apply {found} state to a {expected} device")]
pub struct TypeMismatchError {
    /// The device's declared type.
    pub expected: DeviceType,
    /// The variant that was supplied.
    pub found: DeviceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_message_with_entity_and_id() {
        let err = NotFoundError {
            entity: "Device",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Device abc not found");
    }

    #[test]
    fn should_surface_inner_message_through_transparent_variant() {
        let hub_id = HubId::new();
        let dwelling_id = DwellingId::new();
        let err = HearthError::from(InvalidStateError::HubAlreadyInstalled {
            hub_id,
            dwelling_id,
        });
        assert_eq!(
            err.to_string(),
            format!("hub {hub_id} is already installed in dwelling {dwelling_id}")
        );
    }

    #[test]
    fn should_render_type_mismatch_with_both_types() {
        let err = TypeMismatchError {
            expected: DeviceType::Switch,
            found: DeviceType::Dimmer,
        };
        assert_eq!(err.to_string(), "cannot apply dimmer state to a switch device");
    }
}
