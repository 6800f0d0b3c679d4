//! Device state — one variant per device type.
//!
//! Serialized with an internal `type` tag so stored and wire payloads are
//! self-describing, e.g. `{"type":"dimmer","brightness":40,"is_on":true}`.

use serde::{Deserialize, Serialize};

use super::DeviceType;

fn default_resolution() -> String {
    "1080p".to_string()
}

fn default_locked() -> bool {
    true
}

fn default_temperature() -> f64 {
    78.0
}

/// Operating mode of a thermostat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    #[default]
    Off,
    Heat,
    Cool,
}

/// Type-specific operational state of a device.
///
/// Fields omitted from an incoming payload take the documented defaults,
/// so `{"type":"lock"}` deserializes to a locked lock with no pin code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeviceState {
    Camera {
        #[serde(default)]
        is_recording: bool,
        #[serde(default = "default_resolution")]
        resolution: String,
    },
    Switch {
        #[serde(default)]
        is_on: bool,
    },
    Dimmer {
        #[serde(default)]
        brightness: i64,
        #[serde(default)]
        is_on: bool,
    },
    Lock {
        #[serde(default = "default_locked")]
        is_locked: bool,
        #[serde(default)]
        pin_code: Option<String>,
    },
    Thermostat {
        #[serde(default)]
        mode: ThermostatMode,
        #[serde(default = "default_temperature")]
        current_temperature: f64,
        #[serde(default = "default_temperature")]
        target_temperature: f64,
    },
}

impl DeviceState {
    /// The default state variant for a device type.
    #[must_use]
    pub fn default_for(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Camera => Self::Camera {
                is_recording: false,
                resolution: default_resolution(),
            },
            DeviceType::Switch => Self::Switch { is_on: false },
            DeviceType::Dimmer => Self::Dimmer {
                brightness: 0,
                is_on: false,
            },
            DeviceType::Lock => Self::Lock {
                is_locked: true,
                pin_code: None,
            },
            DeviceType::Thermostat => Self::Thermostat {
                mode: ThermostatMode::Off,
                current_temperature: default_temperature(),
                target_temperature: default_temperature(),
            },
        }
    }

    /// The device type this variant belongs to.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Camera { .. } => DeviceType::Camera,
            Self::Switch { .. } => DeviceType::Switch,
            Self::Dimmer { .. } => DeviceType::Dimmer,
            Self::Lock { .. } => DeviceType::Lock,
            Self::Thermostat { .. } => DeviceType::Thermostat,
        }
    }

    /// Whether this variant matches the given device type.
    #[must_use]
    pub fn matches(&self, device_type: DeviceType) -> bool {
        self.device_type() == device_type
    }
}
