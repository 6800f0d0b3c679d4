//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hearth_app::ports::EntityStore;
use hearth_domain::device::{Device, DeviceState, DeviceType};
use hearth_domain::dwelling::Dwelling;
use hearth_domain::hub::Hub;
use hearth_domain::id::DeviceId;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Defaults to the type's default variant when omitted.
    #[serde(default)]
    pub state: Option<DeviceState>,
}

/// Request body for replacing a device's state.
#[derive(Deserialize)]
pub struct UpdateStateRequest {
    pub state: DeviceState,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
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
    Ok(Json<Device>),
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
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update-state endpoint.
pub enum UpdateStateResponse {
    Ok(Json<Device>),
}

impl IntoResponse for UpdateStateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
) -> Result<ListResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/{id}`
pub async fn get<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let device = state.device_service.get_device(device_id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let initial_state = req
        .state
        .unwrap_or_else(|| DeviceState::default_for(req.device_type));

    let created = state
        .device_service
        .create_device(req.name, req.device_type, initial_state)
        .await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/devices/{id}/state`
pub async fn update_state<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStateRequest>,
) -> Result<UpdateStateResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    let updated = state
        .device_service
        .modify_device_state(device_id, req.state)
        .await?;
    Ok(UpdateStateResponse::Ok(Json(updated)))
}

/// `DELETE /api/devices/{id}`
pub async fn delete<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let device_id: DeviceId = parse_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
