#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use butterflyblue_api::{
    config::{AppConfig, DatabaseConfig},
    db::{create_orm_conn, run_migrations},
    entity::{
        design_products::{self, DesignStatus},
        products, users,
    },
    routes::build_router,
    services::auth_service::{hash_password, issue_token},
    state::AppState,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-do-not-use";

pub fn test_config() -> AppConfig {
    AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
            encryption_key: None,
        },
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: TEST_SECRET.into(),
        jwt_ttl_hours: 1,
    }
}

/// Fresh in-memory database with the schema applied.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let config = test_config();
    let orm = create_orm_conn(&config.database.url, None).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm, config))
}

pub async fn create_user(state: &AppState, email: &str, is_admin: bool) -> anyhow::Result<i32> {
    let user = users::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(hash_password("password123")?),
        is_admin: Set(is_admin),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

pub async fn create_product(
    state: &AppState,
    name: &str,
    price_cents: i64,
) -> anyhow::Result<products::Model> {
    Ok(products::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        price_cents: Set(price_cents),
        last_synced: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

pub fn design_params() -> Value {
    serde_json::json!({
        "blueprint_id": 6,
        "print_provider_id": 99,
        "variants": [{ "id": 12100 }, { "id": 12101, "price_cents": 2599 }],
        "print_areas": [{ "variant_ids": [12100, 12101], "placeholders": [] }],
        "tags": ["faith", "tee"],
        "product_type": "T-Shirt"
    })
}

/// Inserts a design with the given remote ids already recorded.
pub async fn create_design(
    state: &AppState,
    product_id: Option<i32>,
    fulfillment_product_id: Option<&str>,
    storefront_product_id: Option<&str>,
) -> anyhow::Result<design_products::Model> {
    let status = match (fulfillment_product_id, storefront_product_id) {
        (_, Some(_)) => DesignStatus::Published,
        (Some(_), None) => DesignStatus::Pending,
        (None, None) => DesignStatus::Draft,
    };
    let now = Utc::now();
    Ok(design_products::ActiveModel {
        product_id: Set(product_id),
        title: Set("Faith Over Fear Tee".into()),
        description: Set(Some("Soft cotton tee".into())),
        price_cents: Set(2499),
        design_params: Set(design_params()),
        status: Set(status),
        fulfillment_product_id: Set(fulfillment_product_id.map(str::to_owned)),
        storefront_product_id: Set(storefront_product_id.map(str::to_owned)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?)
}

pub fn token_for(user_id: i32, is_admin: bool) -> anyhow::Result<String> {
    let (token, _) = issue_token(TEST_SECRET, user_id, is_admin, Duration::hours(1))?;
    Ok(token)
}

pub fn expired_token_for(user_id: i32, is_admin: bool) -> anyhow::Result<String> {
    let (token, _) = issue_token(TEST_SECRET, user_id, is_admin, Duration::hours(-2))?;
    Ok(token)
}

/// Signs arbitrary claims with the test secret.
pub fn signed_token(claims: &Value) -> anyhow::Result<String> {
    Ok(jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )?)
}

pub fn app(state: AppState) -> Router {
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response: Response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, json))
}
