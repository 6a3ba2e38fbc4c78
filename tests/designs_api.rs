mod common;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::MockServer;

use butterflyblue_api::sync::{FulfillmentClient, StorefrontClient, SyncService};
use common::{
    app, create_design, create_product, create_user, design_params, send, setup_state, token_for,
};

#[tokio::test]
async fn admin_creates_and_lists_designs() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin_id = create_user(&state, "admin@example.com", true).await?;
    let product = create_product(&state, "Faith Over Fear Tee", 2499).await?;
    let app = app(state);
    let token = token_for(admin_id, true)?;

    let payload = json!({
        "title": "Faith Over Fear Tee",
        "price": "24.99",
        "product_id": product.id,
        "design_params": design_params()
    });
    let (status, body) = send(&app, "POST", "/api/designs", Some(&token), Some(payload)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "draft");
    assert_eq!(body["data"]["sync_state"], "never_synced");
    let id = body["data"]["id"].as_i64().expect("id");

    let (status, body) = send(&app, "GET", "/api/designs", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (status, body) = send(&app, "GET", &format!("/api/designs/{id}"), None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["price"], "24.99");

    let (status, _) = send(&app, "GET", "/api/designs/999", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn rejects_invalid_designs() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin_id = create_user(&state, "admin@example.com", true).await?;
    let customer_id = create_user(&state, "customer@example.com", false).await?;
    let app = app(state);

    let valid = json!({ "title": "Tee", "price": "24.99", "design_params": design_params() });
    let customer = token_for(customer_id, false)?;
    let (status, _) = send(&app, "POST", "/api/designs", Some(&customer), Some(valid)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = token_for(admin_id, true)?;
    for payload in [
        json!({ "title": "Tee", "price": "24.99", "design_params": { "tags": [] } }),
        json!({
            "title": "Tee",
            "price": "24.99",
            "product_id": 77,
            "design_params": design_params()
        }),
        json!({ "title": "", "price": "24.99", "design_params": design_params() }),
    ] {
        let (status, _) =
            send(&app, "POST", "/api/designs", Some(&admin), Some(payload.clone())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
    }
    Ok(())
}

#[tokio::test]
async fn sync_without_credentials_is_unavailable() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let admin_id = create_user(&state, "admin@example.com", true).await?;
    let design = create_design(&state, None, None, None).await?;
    let app = app(state);

    let uri = format!("/api/designs/{}/sync", design.id);
    let (status, _) = send(&app, "POST", &uri, None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = token_for(admin_id, true)?;
    let (status, _) = send(&app, "POST", &uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn sync_maps_workflow_errors_to_statuses() -> anyhow::Result<()> {
    let printify = MockServer::start().await;
    let shopify = MockServer::start().await;
    let sync = SyncService::new(
        FulfillmentClient::new(&printify.uri(), "pf-token", "shop-42", 5)?,
        StorefrontClient::new(&shopify.uri(), "sf-key", "sf-secret", 5)?,
    );

    let state = setup_state().await?.with_sync(sync);
    let admin_id = create_user(&state, "admin@example.com", true).await?;
    let orphan = create_design(&state, None, None, Some("9001")).await?;
    let fresh = create_design(&state, None, None, None).await?;
    let app = app(state);
    let token = token_for(admin_id, true)?;

    let orphan_uri = format!("/api/designs/{}/sync", orphan.id);
    let (status, _) = send(&app, "POST", &orphan_uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "POST", "/api/designs/999/sync", Some(&token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing is mounted, so the fulfillment platform answers 404.
    let fresh_uri = format!("/api/designs/{}/sync", fresh.id);
    let (status, _) = send(&app, "POST", &fresh_uri, Some(&token), None).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    Ok(())
}
