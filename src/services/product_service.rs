use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set};

use crate::dto::products::{CreateProductRequest, ProductList};
use crate::{
    entity::products::{ActiveModel, Column, Entity as Products},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Product,
    money::decimal_to_cents,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

/// Lists products in insertion order. Without paging parameters every row is
/// returned.
pub async fn list_products(
    state: &AppState,
    query: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let finder = Products::find().order_by_asc(Column::Id);
    let total = finder.clone().count(&state.orm).await? as i64;

    let (models, meta) = if query.is_requested() {
        let (page, limit, offset) = query.normalize();
        let models = finder
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&state.orm)
            .await?;
        (models, Meta::new(page, limit, total))
    } else {
        (finder.all(&state.orm).await?, Meta::total(total))
    };

    let items = models.into_iter().map(Product::from).collect();
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id).one(&state.orm).await?;
    let result = match result {
        Some(p) => Product::from(p),
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Product name is required".into()));
    }
    let price_cents = decimal_to_cents(payload.price).map_err(AppError::BadRequest)?;

    let active = ActiveModel {
        name: Set(name),
        description: Set(payload.description.filter(|d| !d.trim().is_empty())),
        price_cents: Set(price_cents),
        last_synced: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let product = active.insert(&state.orm).await?;

    tracing::info!(product_id = product.id, user_id = user.user_id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        Product::from(product),
        Some(Meta::empty()),
    ))
}
