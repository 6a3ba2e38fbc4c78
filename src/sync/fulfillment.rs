//! HTTP client for the print-on-demand fulfillment platform.

use std::time::Duration;

use reqwest::Client;

use super::error::SyncError;
use super::http::{send, send_json};
use super::types::{
    FulfillmentProduct, FulfillmentProductPage, NewFulfillmentProduct, PublishRequest,
};

/// Safety bound on page walks.
const MAX_PAGES: u32 = 100;
const PAGE_LIMIT: u32 = 50;

/// Bearer-token client scoped to a single fulfillment shop.
pub struct FulfillmentClient {
    client: Client,
    base_url: String,
    api_token: String,
    shop_id: String,
}

impl FulfillmentClient {
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        api_token: &str,
        shop_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, SyncError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("butterflyblue/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_token: api_token.to_owned(),
            shop_id: shop_id.to_owned(),
        })
    }

    fn shop_url(&self, path: &str) -> String {
        format!("{}/shops/{}/{}", self.base_url, self.shop_id, path)
    }

    /// Fetches every product in the shop, walking the page numbers.
    pub async fn list_products(&self) -> Result<Vec<FulfillmentProduct>, SyncError> {
        let url = self.shop_url("products.json");
        let mut products = Vec::new();
        let mut page = 1;

        loop {
            let request = self
                .client
                .get(&url)
                .bearer_auth(&self.api_token)
                .query(&[("page", page), ("limit", PAGE_LIMIT)]);
            let parsed: FulfillmentProductPage =
                send_json(request, &url, &format!("fulfillment products page {page}")).await?;

            tracing::debug!(page, count = parsed.data.len(), "fetched fulfillment page");
            products.extend(parsed.data);

            if parsed.current_page >= parsed.last_page || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        Ok(products)
    }

    pub async fn get_product(&self, product_id: &str) -> Result<FulfillmentProduct, SyncError> {
        let url = self.shop_url(&format!("products/{product_id}.json"));
        let request = self.client.get(&url).bearer_auth(&self.api_token);
        send_json(request, &url, &format!("fulfillment product {product_id}")).await
    }

    pub async fn create_product(
        &self,
        product: &NewFulfillmentProduct,
    ) -> Result<FulfillmentProduct, SyncError> {
        let url = self.shop_url("products.json");
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(product);
        let created: FulfillmentProduct =
            send_json(request, &url, "fulfillment product create").await?;
        tracing::info!(fulfillment_product_id = %created.id, "created fulfillment product");
        Ok(created)
    }

    /// Asks the fulfillment platform to publish the product to its connected
    /// sales channel.
    pub async fn publish_product(&self, product_id: &str) -> Result<(), SyncError> {
        let url = self.shop_url(&format!("products/{product_id}/publish.json"));
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&PublishRequest::default());
        send(request, &url).await?;
        tracing::info!(fulfillment_product_id = %product_id, "published fulfillment product");
        Ok(())
    }
}
