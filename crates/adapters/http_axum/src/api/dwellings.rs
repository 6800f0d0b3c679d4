//! JSON REST handlers for dwellings and hub installation.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hearth_app::ports::EntityStore;
use hearth_domain::device::Device;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::hub::Hub;
use hearth_domain::id::{DwellingId, HubId};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a dwelling.
#[derive(Deserialize)]
pub struct CreateDwellingRequest {
    pub name: String,
}

/// Request body for setting occupancy.
#[derive(Deserialize)]
pub struct SetOccupancyRequest {
    pub is_occupied: bool,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Dwelling>>),
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
    Ok(Json<Dwelling>),
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
    Created(Json<Dwelling>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the occupancy endpoint.
pub enum OccupancyResponse {
    Ok(Json<Dwelling>),
}

impl IntoResponse for OccupancyResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the installed-hubs list endpoint.
pub enum ListHubsResponse {
    Ok(Json<Vec<Hub>>),
}

impl IntoResponse for ListHubsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the install endpoint.
pub enum InstallResponse {
    Ok(Json<Dwelling>),
}

impl IntoResponse for InstallResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/dwellings`
pub async fn list<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
) -> Result<ListResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let dwellings = state.dwelling_service.list_dwellings().await?;
    Ok(ListResponse::Ok(Json(dwellings)))
}

/// `GET /api/dwellings/{id}`
pub async fn get<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let dwelling_id: DwellingId = parse_id(&id)?;
    let dwelling = state.dwelling_service.get_dwelling(dwelling_id).await?;
    Ok(GetResponse::Ok(Json(dwelling)))
}

/// `POST /api/dwellings`
pub async fn create<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Json(req): Json<CreateDwellingRequest>,
) -> Result<CreateResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let created = state.dwelling_service.create_dwelling(req.name).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/dwellings/{id}/occupancy`
pub async fn set_occupancy<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
    Json(req): Json<SetOccupancyRequest>,
) -> Result<OccupancyResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let dwelling_id: DwellingId = parse_id(&id)?;
    let updated = state
        .dwelling_service
        .set_occupied_status(dwelling_id, req.is_occupied)
        .await?;
    Ok(OccupancyResponse::Ok(Json(updated)))
}

/// `GET /api/dwellings/{id}/hubs`
pub async fn list_hubs<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path(id): Path<String>,
) -> Result<ListHubsResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let dwelling_id: DwellingId = parse_id(&id)?;
    let hubs = state.dwelling_service.list_hubs(dwelling_id).await?;
    Ok(ListHubsResponse::Ok(Json(hubs)))
}

/// `POST /api/dwellings/{id}/hubs/{hub_id}`
pub async fn install_hub<DS, HS, WS>(
    State(state): State<AppState<DS, HS, WS>>,
    Path((id, hub_id)): Path<(String, String)>,
) -> Result<InstallResponse, ApiError>
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    let dwelling_id: DwellingId = parse_id(&id)?;
    let hub_id: HubId = parse_id(&hub_id)?;
    let dwelling = state
        .dwelling_service
        .install_hub(dwelling_id, hub_id)
        .await?;
    Ok(InstallResponse::Ok(Json(dwelling)))
}
