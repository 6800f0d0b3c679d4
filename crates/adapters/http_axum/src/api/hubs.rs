//! JSON REST handlers for hubs and device pairing.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hearth_app::ports::EntityStore;
use hearth_domain::device::Device;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::hub::Hub;
use hearth_domain::id::{DeviceId, HubId};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a hub.
#[derive(Deserialize)]
pub struct CreateHubRequest {
    pub name: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Hub>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Hub>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Hub>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the paired-devices list endpoint.
pub enum ListDevicesResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListDevicesResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the device-state endpoint.
pub enum DeviceStateResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceStateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the pair endpoint.
pub enum PairResponse {
    Ok(Json<Hub>),
}

impl IntoResponse for PairResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the remove endpoint.
pub enum RemoveResponse {
    Ok(Json<Hub>),
}

impl IntoResponse for RemoveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/hubs`
pub async fn list<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
) -> Result<ListResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hubs = state.hub_service.list_hubs().await?;
    Ok(ListResponse::Ok(Json(hubs)))
}

/// `GET /api/hubs/{id}`
pub async fn get<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hub_id: HubId = parse_id(&id)?;
    let hub = state.hub_service.get_hub(hub_id).await?;
    Ok(GetResponse::Ok(Json(hub)))
}

/// `POST /api/hubs`
pub async fn create<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Json(req): Json<CreateHubRequest>,
) -> Result<CreateResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let created = state.hub_service.create_hub(req.name).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/hubs/{id}/devices`
pub async fn list_devices<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<ListDevicesResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hub_id: HubId = parse_id(&id)?;
    let devices = state.hub_service.list_devices(hub_id).await?;
    Ok(ListDevicesResponse::Ok(Json(devices)))
}

/// `GET /api/hubs/{id}/devices/{device_id}`
pub async fn get_device_state<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path((id, device_id)): Path<(String, String)>,
) -> Result<DeviceStateResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hub_id: HubId = parse_id(&id)?;
    let device_id: DeviceId = parse_id(&device_id)?;
    let device = state
        .hub_service
        .get_device_state(hub_id, device_id)
        .await?;
    Ok(DeviceStateResponse::Ok(Json(device)))
}

/// `POST /api/hubs/{id}/devices/{device_id}`
pub async fn pair_device<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path((id, device_id)): Path<(String, String)>,
) -> Result<PairResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hub_id: HubId = parse_id(&id)?;
    let device_id: DeviceId = parse_id(&device_id)?;
    let hub = state.hub_service.pair_device(hub_id, device_id).await?;
    Ok(PairResponse::Ok(Json(hub)))
}

/// `DELETE /api/hubs/{id}/devices/{device_id}`
pub async fn remove_device<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path((id, device_id)): Path<(String, String)>,
) -> Result<RemoveResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let hub_id: HubId = parse_id(&id)?;
    let device_id: DeviceId = parse_id(&device_id)?;
    let hub = state.hub_service.remove_device(hub_id, device_id).await?;
    Ok(RemoveResponse::Ok(Json(hub)))
}
