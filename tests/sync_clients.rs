use serde_json::json;
use wiremock::matchers::{basic_auth, bearer_token, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use butterflyblue_api::sync::{
    FulfillmentClient, StorefrontClient, SyncError,
    types::{NewFulfillmentProduct, NewFulfillmentVariant, StorefrontProductUpdate},
};

const SHOP: &str = "shop-42";

fn fulfillment(server: &MockServer) -> FulfillmentClient {
    FulfillmentClient::new(&server.uri(), "pf-token", SHOP, 5).expect("client")
}

fn storefront(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(&server.uri(), "sf-key", "sf-secret", 5).expect("client")
}

fn fulfillment_product(id: &str, sku: &str, price: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Product {id}"),
        "variants": [{ "id": 1, "sku": sku, "price": price, "is_enabled": true }]
    })
}

#[tokio::test]
async fn fulfillment_list_walks_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/shops/{SHOP}/products.json")))
        .and(bearer_token("pf-token"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_page": 1,
            "last_page": 2,
            "data": [fulfillment_product("a", "TEE-S", 1999)]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/shops/{SHOP}/products.json")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_page": 2,
            "last_page": 2,
            "data": [fulfillment_product("b", "MUG-11", 1499)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = fulfillment(&server).list_products().await.expect("products");
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(products[1].variants[0].price, 1499);
}

#[tokio::test]
async fn fulfillment_create_and_publish() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/shops/{SHOP}/products.json")))
        .and(bearer_token("pf-token"))
        .and(body_partial_json(json!({ "title": "Faith Tee", "blueprint_id": 6 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fulfillment_product("new-1", "TEE-S", 2499)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/shops/{SHOP}/products/new-1/publish.json")))
        .and(body_partial_json(json!({ "title": true, "variants": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = fulfillment(&server);
    let created = client
        .create_product(&NewFulfillmentProduct {
            title: "Faith Tee".into(),
            description: String::new(),
            blueprint_id: 6,
            print_provider_id: 99,
            variants: vec![NewFulfillmentVariant {
                id: 12100,
                price: 2499,
                is_enabled: true,
            }],
            print_areas: json!([]),
            tags: vec![],
        })
        .await
        .expect("created");
    assert_eq!(created.id, "new-1");
    client.publish_product(&created.id).await.expect("published");
}

#[tokio::test]
async fn fulfillment_missing_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/shops/{SHOP}/products/gone.json")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fulfillment(&server).get_product("gone").await.unwrap_err();
    assert!(matches!(err, SyncError::NotFound { .. }), "{err:?}");
}

#[tokio::test]
async fn server_errors_keep_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/7.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = storefront(&server).get_product("7").await.unwrap_err();
    match err {
        SyncError::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"nope\": true}"))
        .mount(&server)
        .await;

    let err = storefront(&server).get_product("7").await.unwrap_err();
    assert!(matches!(err, SyncError::Deserialize { .. }), "{err:?}");
}

#[tokio::test]
async fn storefront_list_follows_link_header() {
    let server = MockServer::start().await;
    let next = format!("{}/products.json?limit=250&page_info=abc", server.uri());
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(basic_auth("sf-key", "sf-secret"))
        .and(query_param("page_info", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{
                "id": 2,
                "title": "Mug",
                "variants": [{ "sku": "MUG-11", "price": "14.99" }]
            }]
        })))
        .expect(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(basic_auth("sf-key", "sf-secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!("<{next}>; rel=\"next\"").as_str())
                .set_body_json(json!({
                    "products": [{
                        "id": 1,
                        "title": "Tee",
                        "variants": [{ "sku": "TEE-S", "price": "24.99" }]
                    }]
                })),
        )
        .expect(1)
        .with_priority(2)
        .mount(&server)
        .await;

    let products = storefront(&server).list_products().await.expect("products");
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, [1, 2]);
}

#[tokio::test]
async fn storefront_update_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/products/55.json"))
        .and(basic_auth("sf-key", "sf-secret"))
        .and(body_partial_json(json!({ "product": { "title": "Renamed" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": { "id": 55, "title": "Renamed", "variants": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/55.json"))
        .and(basic_auth("sf-key", "sf-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = storefront(&server);
    let update = StorefrontProductUpdate {
        title: Some("Renamed".into()),
        ..Default::default()
    };
    let updated = client.update_product("55", &update).await.expect("updated");
    assert_eq!(updated.title, "Renamed");
    client.delete_product("55").await.expect("deleted");
}
