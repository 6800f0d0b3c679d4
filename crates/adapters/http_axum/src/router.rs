//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use hearth_app::ports::EntityStore;
use hearth_domain::device::Device;
use hearth_domain::dwelling::Dwelling;
use hearth_domain::hub::Hub;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts API routes under `/api` and a health check at `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<DS, HS, WS>(state: AppState<DS, HS, WS>) -> Router
where
    DS: EntityStore<Device> + Send + Sync + 'static,
    HS: EntityStore<Hub> + Send + Sync + 'static,
    WS: EntityStore<Dwelling> + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
