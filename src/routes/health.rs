use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    response::{ApiResponse, Meta},
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct HealthData {
    pub status: String,
    pub database: bool,
    /// Whether platform credentials were configured at startup.
    pub sync_enabled: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "OK", body = ApiResponse<HealthData>),
    ),
    tag = "Health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthData>> {
    let database = match state.orm.ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "database ping failed");
            false
        }
    };
    let data = HealthData {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
        sync_enabled: state.sync.is_some(),
    };

    Json(ApiResponse::success("Health check", data, Some(Meta::empty())))
}
