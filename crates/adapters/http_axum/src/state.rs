//! Shared application state for axum handlers.

use std::sync::Arc;

use hearth_app::ports::EntityStore;
use hearth_app::services::device_service::DeviceService;
use hearth_app::services::dwelling_service::DwellingService;
use hearth_app::services::hub_service::HubService;
use hearth_domain::device::Device;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::hub::Hub;

/// Application state shared across all axum handlers.
///
/// Generic over the store types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<DS, HS, WS> {
    /// Device CRUD and state service.
    pub device_service: Arc<DeviceService<DS>>,
    /// Hub CRUD and pairing service.
    pub hub_service: Arc<HubService<HS, DS>>,
    /// Dwelling CRUD and installation service.
    pub dwelling_service: Arc<DwellingService<WS, HS>>,
}

impl<DS, HS, WS> Clone for AppState<DS, HS, WS> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            hub_service: Arc::clone(&self.hub_service),
            dwelling_service: Arc::clone(&self.dwelling_service),
        }
    }
}

impl<DS, HS, WS> AppState<DS, HS, WS>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        device_service: DeviceService<DS>,
        hub_service: HubService<HS, DS>,
        dwelling_service: DwellingService<WS, HS>,
    ) -> Self {
        Self {
            device_service: Arc::new(device_service),
            hub_service: Arc::new(hub_service),
            dwelling_service: Arc::new(dwelling_service),
        }
    }
}
