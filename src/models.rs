use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    design_products::{DesignStatus, Model as DesignProductModel},
    products::Model as ProductModel,
    users::Model as UserModel,
};
use crate::money::cents_to_decimal;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            is_admin: model.is_admin,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    pub last_synced: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductModel> for Product {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: cents_to_decimal(model.price_cents),
            last_synced: model.last_synced,
            created_at: model.created_at,
        }
    }
}

/// Where a design stands relative to the two external platforms, derived
/// from which remote ids are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    NeverSynced,
    FulfillmentOnly,
    StorefrontOnly,
    FullySynced,
}

impl SyncState {
    pub fn from_ids(fulfillment_id: Option<&str>, storefront_id: Option<&str>) -> Self {
        match (fulfillment_id, storefront_id) {
            (None, None) => SyncState::NeverSynced,
            (Some(_), None) => SyncState::FulfillmentOnly,
            (None, Some(_)) => SyncState::StorefrontOnly,
            (Some(_), Some(_)) => SyncState::FullySynced,
        }
    }

    pub fn of(model: &DesignProductModel) -> Self {
        Self::from_ids(
            model.fulfillment_product_id.as_deref(),
            model.storefront_product_id.as_deref(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DesignProduct {
    pub id: i32,
    pub product_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "24.99")]
    pub price: Decimal,
    #[schema(value_type = Object)]
    pub design_params: serde_json::Value,
    pub status: DesignStatus,
    pub sync_state: SyncState,
    pub fulfillment_product_id: Option<String>,
    pub storefront_product_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DesignProductModel> for DesignProduct {
    fn from(model: DesignProductModel) -> Self {
        let sync_state = SyncState::of(&model);
        Self {
            id: model.id,
            product_id: model.product_id,
            title: model.title,
            description: model.description,
            price: cents_to_decimal(model.price_cents),
            design_params: model.design_params,
            status: model.status,
            sync_state,
            fulfillment_product_id: model.fulfillment_product_id,
            storefront_product_id: model.storefront_product_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
