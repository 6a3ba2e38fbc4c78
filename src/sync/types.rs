//! Wire types for the two platform APIs, plus the design parameter blob
//! stored on each `DesignProduct`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Fulfillment platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FulfillmentProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Vec<FulfillmentVariant>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FulfillmentVariant {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    /// Price in cents.
    pub price: i64,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

/// One page of `GET /shops/{shop}/products.json`.
#[derive(Debug, Deserialize)]
pub struct FulfillmentProductPage {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    pub data: Vec<FulfillmentProduct>,
}

fn first_page() -> u32 {
    1
}

/// A saved fulfillment export: either a raw API page or a bare product array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FulfillmentExport {
    Page { data: Vec<FulfillmentProduct> },
    Products(Vec<FulfillmentProduct>),
}

impl FulfillmentExport {
    pub fn into_products(self) -> Vec<FulfillmentProduct> {
        match self {
            FulfillmentExport::Page { data } => data,
            FulfillmentExport::Products(products) => products,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFulfillmentProduct {
    pub title: String,
    pub description: String,
    pub blueprint_id: i64,
    pub print_provider_id: i64,
    pub variants: Vec<NewFulfillmentVariant>,
    pub print_areas: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewFulfillmentVariant {
    pub id: i64,
    pub price: i64,
    pub is_enabled: bool,
}

/// Body of `POST /shops/{shop}/products/{id}/publish.json`: which fields the
/// fulfillment platform should push to the connected sales channel.
#[derive(Debug, Clone, Serialize)]
pub struct PublishRequest {
    pub title: bool,
    pub description: bool,
    pub images: bool,
    pub variants: bool,
    pub tags: bool,
}

impl Default for PublishRequest {
    fn default() -> Self {
        Self {
            title: true,
            description: true,
            images: true,
            variants: true,
            tags: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Storefront platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontProduct {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub variants: Vec<StorefrontVariant>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontVariant {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    /// Decimal string, e.g. `"20.99"`.
    pub price: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct StorefrontProductEnvelope<T> {
    pub product: T,
}

#[derive(Debug, Deserialize)]
pub struct StorefrontProductList {
    pub products: Vec<StorefrontProduct>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStorefrontProduct {
    pub title: String,
    pub body_html: String,
    pub vendor: String,
    pub product_type: String,
    pub tags: String,
    pub status: String,
    pub variants: Vec<NewStorefrontVariant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStorefrontVariant {
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub inventory_policy: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StorefrontProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

// ---------------------------------------------------------------------------
// Design parameters
// ---------------------------------------------------------------------------

/// The JSON blob stored in `design_products.design_params`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DesignParams {
    pub blueprint_id: i64,
    pub print_provider_id: i64,
    #[serde(default)]
    pub variants: Vec<DesignVariant>,
    #[serde(default)]
    pub print_areas: serde_json::Value,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub product_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DesignVariant {
    pub id: i64,
    /// Overrides the design price for this variant.
    #[serde(default)]
    pub price_cents: Option<i64>,
}
