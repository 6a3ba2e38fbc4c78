//! HTTP client for the storefront platform's Admin REST API.

use std::time::Duration;

use reqwest::Client;

use super::error::SyncError;
use super::http::{next_link, send, send_json};
use super::types::{
    NewStorefrontProduct, StorefrontProduct, StorefrontProductEnvelope, StorefrontProductList,
    StorefrontProductUpdate,
};

const MAX_PAGES: usize = 100;
const PAGE_LIMIT: u32 = 250;

/// Basic-auth client for `/admin/api/{version}/products` endpoints.
///
/// `base_url` is the versioned Admin API root, for example
/// `https://shop.myshopify.com/admin/api/2024-01`.
pub struct StorefrontClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl StorefrontClient {
    /// # Errors
    ///
    /// Returns [`SyncError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        api_secret: &str,
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
            api_key: api_key.to_owned(),
            api_secret: api_secret.to_owned(),
        })
    }

    fn product_url(&self, product_id: &str) -> String {
        format!("{}/products/{product_id}.json", self.base_url)
    }

    /// Fetches every product, following the cursor in the `Link` header.
    pub async fn list_products(&self) -> Result<Vec<StorefrontProduct>, SyncError> {
        let mut url = format!("{}/products.json?limit={PAGE_LIMIT}", self.base_url);
        let mut products = Vec::new();

        for page in 1..=MAX_PAGES {
            let request = self
                .client
                .get(&url)
                .basic_auth(&self.api_key, Some(&self.api_secret));
            let response = send(request, &url).await?;
            let link_header = response
                .headers()
                .get(reqwest::header::LINK)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);

            let body = response.text().await?;
            let parsed = serde_json::from_str::<StorefrontProductList>(&body).map_err(|e| {
                SyncError::Deserialize {
                    context: format!("storefront products page {page}"),
                    source: e,
                }
            })?;
            tracing::debug!(page, count = parsed.products.len(), "fetched storefront page");
            products.extend(parsed.products);

            match next_link(link_header.as_deref()) {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(products)
    }

    pub async fn get_product(&self, product_id: &str) -> Result<StorefrontProduct, SyncError> {
        let url = self.product_url(product_id);
        let request = self
            .client
            .get(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret));
        let envelope: StorefrontProductEnvelope<StorefrontProduct> =
            send_json(request, &url, &format!("storefront product {product_id}")).await?;
        Ok(envelope.product)
    }

    pub async fn create_product(
        &self,
        product: &NewStorefrontProduct,
    ) -> Result<StorefrontProduct, SyncError> {
        let url = format!("{}/products.json", self.base_url);
        let request = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&StorefrontProductEnvelope { product });
        let envelope: StorefrontProductEnvelope<StorefrontProduct> =
            send_json(request, &url, "storefront product create").await?;
        tracing::info!(storefront_product_id = envelope.product.id, "created storefront product");
        Ok(envelope.product)
    }

    pub async fn update_product(
        &self,
        product_id: &str,
        update: &StorefrontProductUpdate,
    ) -> Result<StorefrontProduct, SyncError> {
        let url = self.product_url(product_id);
        let request = self
            .client
            .put(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(&StorefrontProductEnvelope { product: update });
        let envelope: StorefrontProductEnvelope<StorefrontProduct> =
            send_json(request, &url, &format!("storefront product update {product_id}")).await?;
        tracing::info!(storefront_product_id = %product_id, "updated storefront product");
        Ok(envelope.product)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<(), SyncError> {
        let url = self.product_url(product_id);
        let request = self
            .client
            .delete(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret));
        send(request, &url).await?;
        tracing::info!(storefront_product_id = %product_id, "deleted storefront product");
        Ok(())
    }
}
