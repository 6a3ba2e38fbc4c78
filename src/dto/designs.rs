use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{models::DesignProduct, sync::SyncReport};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDesignRequest {
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "24.99")]
    pub price: Decimal,
    /// Catalog product this design is sold as, if any.
    pub product_id: Option<i32>,
    /// Fulfillment blueprint, print provider, variants and print areas.
    #[schema(value_type = Object)]
    pub design_params: serde_json::Value,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DesignList {
    #[schema(value_type = Vec<DesignProduct>)]
    pub items: Vec<DesignProduct>,
}

#[derive(Serialize, ToSchema)]
pub struct DesignSyncResult {
    pub design: DesignProduct,
    pub report: SyncReport,
}
