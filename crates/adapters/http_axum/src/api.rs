//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod dwellings;
#[allow(clippy::missing_errors_doc)]
pub mod hubs;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use hearth_app::ports::EntityStore;
use hearth_domain::device::Device;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::error::{HearthError, ValidationError};
use hearth_domain::hub::Hub;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a typed id from a path segment, mapping failures to a 400.
pub(crate) fn parse_id<T: FromStr>(value: &str) -> Result<T, ApiError> {
    T::from_str(value).map_err(|_| {
        ApiError::from(HearthError::Validation(ValidationError::InvalidId(
            value.to_string(),
        )))
    })
}

/// Build the `/api` sub-router.
pub fn routes<DS, HS, WS>() -> Router<AppState<DS, HS, WS>>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DS, HS, WS>).post(devices::create::<DS, HS, WS>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DS, HS, WS>).delete(devices::delete::<DS, HS, WS>),
        )
        .route(
            "/devices/{id}/state",
            put(devices::update_state::<DS, HS, WS>),
        )
        // Hubs
        .route(
            "/hubs",
            get(hubs::list::<DS, HS, WS>).post(hubs::create::<DS, HS, WS>),
        )
        .route("/hubs/{id}", get(hubs::get::<DS, HS, WS>))
        .route("/hubs/{id}/devices", get(hubs::list_devices::<DS, HS, WS>))
        .route(
            "/hubs/{id}/devices/{device_id}",
            get(hubs::get_device_state::<DS, HS, WS>)
                .post(hubs::pair_device::<DS, HS, WS>)
                .delete(hubs::remove_device::<DS, HS, WS>),
        )
        // Dwellings
        .route(
            "/dwellings",
            get(dwellings::list::<DS, HS, WS>).post(dwellings::create::<DS, HS, WS>),
        )
        .route("/dwellings/{id}", get(dwellings::get::<DS, HS, WS>))
        .route(
            "/dwellings/{id}/occupancy",
            put(dwellings::set_occupancy::<DS, HS, WS>),
        )
        .route(
            "/dwellings/{id}/hubs",
            get(dwellings::list_hubs::<DS, HS, WS>),
        )
        .route(
            "/dwellings/{id}/hubs/{hub_id}",
            post(dwellings::install_hub::<DS, HS, WS>),
        )
}
