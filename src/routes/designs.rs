use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::designs::{CreateDesignRequest, DesignList, DesignSyncResult},
    error::AppResult,
    middleware::auth::AuthUser,
    models::DesignProduct,
    response::ApiResponse,
    services::design_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_designs).post(create_design))
        .route("/{id}", get(get_design))
        .route("/{id}/sync", post(sync_design))
}

#[utoipa::path(
    get,
    path = "/api/designs",
    responses(
        (status = 200, description = "List designs", body = ApiResponse<DesignList>)
    ),
    tag = "Designs"
)]
pub async fn list_designs(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DesignList>>> {
    let resp = design_service::list_designs(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/designs/{id}",
    params(
        ("id" = i32, Path, description = "Design ID")
    ),
    responses(
        (status = 200, description = "Get design", body = ApiResponse<DesignProduct>),
        (status = 404, description = "Design not found"),
    ),
    tag = "Designs"
)]
pub async fn get_design(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DesignProduct>>> {
    let resp = design_service::get_design(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/designs",
    request_body = CreateDesignRequest,
    responses(
        (status = 201, description = "Create design", body = ApiResponse<DesignProduct>),
        (status = 400, description = "Invalid design"),
        (status = 401, description = "Missing, invalid or expired token"),
        (status = 403, description = "Not an admin"),
    ),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn create_design(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateDesignRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<DesignProduct>>)> {
    let resp = design_service::create_design(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/designs/{id}/sync",
    params(
        ("id" = i32, Path, description = "Design ID")
    ),
    responses(
        (
            status = 200,
            description = "Pushed to fulfillment and storefront",
            body = ApiResponse<DesignSyncResult>
        ),
        (status = 404, description = "Design not found"),
        (status = 409, description = "Design cannot be synced in its current state"),
        (status = 502, description = "A platform call failed"),
        (status = 503, description = "Platform sync is not configured"),
    ),
    security(("bearer_auth" = [])),
    tag = "Designs"
)]
pub async fn sync_design(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<DesignSyncResult>>> {
    let resp = design_service::sync_design(&state, &user, id).await?;
    Ok(Json(resp))
}
