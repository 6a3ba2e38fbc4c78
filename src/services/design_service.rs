use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::dto::designs::{CreateDesignRequest, DesignList, DesignSyncResult};
use crate::{
    entity::{
        design_products::{ActiveModel, Column, DesignStatus, Entity as DesignProducts},
        products::Entity as Products,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::DesignProduct,
    money::decimal_to_cents,
    response::{ApiResponse, Meta},
    state::AppState,
    sync::types::DesignParams,
};

pub async fn list_designs(state: &AppState) -> AppResult<ApiResponse<DesignList>> {
    let items: Vec<DesignProduct> = DesignProducts::find()
        .order_by_asc(Column::Id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(DesignProduct::from)
        .collect();
    let meta = Meta::total(items.len() as i64);
    Ok(ApiResponse::success("Designs", DesignList { items }, Some(meta)))
}

pub async fn get_design(state: &AppState, id: i32) -> AppResult<ApiResponse<DesignProduct>> {
    let design = DesignProducts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Design", DesignProduct::from(design), None))
}

pub async fn create_design(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDesignRequest,
) -> AppResult<ApiResponse<DesignProduct>> {
    ensure_admin(user)?;

    let title = payload.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::BadRequest("Design title is required".into()));
    }
    let price_cents = decimal_to_cents(payload.price).map_err(AppError::BadRequest)?;
    serde_json::from_value::<DesignParams>(payload.design_params.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid design_params: {e}")))?;

    if let Some(product_id) = payload.product_id {
        if Products::find_by_id(product_id).one(&state.orm).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Product {product_id} does not exist"
            )));
        }
    }

    let now = Utc::now();
    let design = ActiveModel {
        product_id: Set(payload.product_id),
        title: Set(title),
        description: Set(payload.description),
        price_cents: Set(price_cents),
        design_params: Set(payload.design_params),
        status: Set(DesignStatus::Draft),
        fulfillment_product_id: Set(None),
        storefront_product_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(design_id = design.id, user_id = user.user_id, "design created");
    Ok(ApiResponse::success(
        "Design created",
        DesignProduct::from(design),
        Some(Meta::empty()),
    ))
}

pub async fn sync_design(
    state: &AppState,
    user: &AuthUser,
    id: i32,
) -> AppResult<ApiResponse<DesignSyncResult>> {
    ensure_admin(user)?;
    let sync = state
        .sync
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Platform sync is not configured".into()))?;

    let report = sync.push_design(&state.orm, id).await?;
    let design = DesignProducts::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Design synced",
        DesignSyncResult {
            design: DesignProduct::from(design),
            report,
        },
        Some(Meta::empty()),
    ))
}
