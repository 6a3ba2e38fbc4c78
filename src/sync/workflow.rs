//! Push/publish workflow for a single design, plus live reconciliation.
//!
//! Steps run sequentially and each remote id is written back as soon as the
//! platform returns it, so a failed run leaves the design in a resumable
//! partial state rather than losing the remote record.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Serialize;
use utoipa::ToSchema;

use super::error::SyncError;
use super::fulfillment::FulfillmentClient;
use super::reconcile::{Mismatch, fulfillment_skus, reconcile, storefront_skus};
use super::storefront::StorefrontClient;
use super::types::{
    DesignParams, FulfillmentProduct, NewFulfillmentProduct, NewFulfillmentVariant,
    NewStorefrontProduct, NewStorefrontVariant, StorefrontProduct, StorefrontProductUpdate,
};
use crate::{
    config::SyncConfig,
    entity::{
        design_products::{
            ActiveModel as DesignActive, DesignStatus, Entity as DesignProducts,
            Model as DesignModel,
        },
        products::{ActiveModel as ProductActive, Entity as Products},
    },
    models::SyncState,
    money::cents_to_decimal,
};

const STOREFRONT_VENDOR: &str = "ButterflyBlue";
const DEFAULT_PRODUCT_TYPE: &str = "Custom Product";

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SyncReport {
    pub design_id: i32,
    pub fulfillment_product_id: String,
    pub storefront_product_id: String,
    /// True when the run picked up from a previously recorded partial state.
    pub resumed: bool,
    pub mismatches: Vec<Mismatch>,
}

pub struct SyncService {
    fulfillment: FulfillmentClient,
    storefront: StorefrontClient,
}

impl SyncService {
    pub fn new(fulfillment: FulfillmentClient, storefront: StorefrontClient) -> Self {
        Self {
            fulfillment,
            storefront,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Result<Self, SyncError> {
        let fulfillment = FulfillmentClient::new(
            &config.printify_api_url,
            &config.printify_api_token,
            &config.printify_shop_id,
            config.http_timeout_secs,
        )?;
        let storefront = StorefrontClient::new(
            &config.shopify_api_url,
            &config.shopify_api_key,
            &config.shopify_api_secret,
            config.http_timeout_secs,
        )?;
        Ok(Self::new(fulfillment, storefront))
    }

    pub fn fulfillment(&self) -> &FulfillmentClient {
        &self.fulfillment
    }

    pub fn storefront(&self) -> &StorefrontClient {
        &self.storefront
    }

    /// Create on fulfillment → publish → create on storefront → fetch the
    /// listing back and compare SKUs/prices.
    pub async fn push_design(
        &self,
        db: &DatabaseConnection,
        design_id: i32,
    ) -> Result<SyncReport, SyncError> {
        let mut design = load_design(db, design_id).await?;
        let state = SyncState::of(&design);
        tracing::info!(design_id, ?state, "starting design sync");

        if design.status == DesignStatus::Archived {
            return Err(SyncError::InconsistentState {
                design_id,
                reason: "archived designs are not synced".into(),
            });
        }
        if state == SyncState::StorefrontOnly {
            return Err(SyncError::InconsistentState {
                design_id,
                reason: "storefront listing recorded without a fulfillment product".into(),
            });
        }
        let resumed = state != SyncState::NeverSynced;

        let params: DesignParams =
            serde_json::from_value(design.design_params.clone()).map_err(|e| {
                SyncError::Deserialize {
                    context: format!("design_params of design {design_id}"),
                    source: e,
                }
            })?;

        let fulfillment_id = match design.fulfillment_product_id.clone() {
            Some(id) => id,
            None => {
                let created = self
                    .fulfillment
                    .create_product(&new_fulfillment_product(&design, &params))
                    .await?;
                design = record_fulfillment_id(db, design, &created.id).await?;
                created.id
            }
        };

        self.fulfillment.publish_product(&fulfillment_id).await?;
        let fulfillment_product = self.fulfillment.get_product(&fulfillment_id).await?;

        let storefront_id = match design.storefront_product_id.clone() {
            Some(id) => id,
            None => {
                let listing = new_storefront_product(&design, &params, &fulfillment_product);
                let created = self.storefront.create_product(&listing).await?;
                let id = created.id.to_string();
                design = record_storefront_id(db, design, Some(&id)).await?;
                id
            }
        };

        // Only enabled variants are listed, so only they are expected back.
        let mut listed = fulfillment_product;
        listed.variants.retain(|variant| variant.is_enabled);
        let listing = self.storefront.get_product(&storefront_id).await?;
        let mismatches = reconcile(
            &fulfillment_skus(std::slice::from_ref(&listed)),
            &storefront_skus(std::slice::from_ref(&listing)),
        );
        for mismatch in &mismatches {
            tracing::warn!(design_id, %mismatch, "post-sync mismatch");
        }

        mark_synced(db, &design).await?;
        tracing::info!(
            design_id,
            fulfillment_product_id = %fulfillment_id,
            storefront_product_id = %storefront_id,
            mismatches = mismatches.len(),
            "design sync finished"
        );

        Ok(SyncReport {
            design_id,
            fulfillment_product_id: fulfillment_id,
            storefront_product_id: storefront_id,
            resumed,
            mismatches,
        })
    }

    /// Deletes the storefront listing and forgets its id. The fulfillment
    /// product is kept, so the design drops back to `pending`.
    pub async fn unpublish_design(
        &self,
        db: &DatabaseConnection,
        design_id: i32,
    ) -> Result<DesignModel, SyncError> {
        let design = load_design(db, design_id).await?;
        let Some(storefront_id) = design.storefront_product_id.clone() else {
            return Err(SyncError::InconsistentState {
                design_id,
                reason: "design has no storefront listing".into(),
            });
        };

        match self.storefront.delete_product(&storefront_id).await {
            Ok(()) => {}
            Err(SyncError::NotFound { url }) => {
                tracing::warn!(design_id, %url, "storefront listing already gone");
            }
            Err(err) => return Err(err),
        }
        record_storefront_id(db, design, None).await
    }

    /// Pushes the design's current title and description to its listing.
    pub async fn update_storefront_listing(
        &self,
        db: &DatabaseConnection,
        design_id: i32,
    ) -> Result<StorefrontProduct, SyncError> {
        let design = load_design(db, design_id).await?;
        let Some(storefront_id) = design.storefront_product_id.as_deref() else {
            return Err(SyncError::InconsistentState {
                design_id,
                reason: "design has no storefront listing".into(),
            });
        };
        let update = StorefrontProductUpdate {
            title: Some(design.title.clone()),
            body_html: Some(design.description.clone().unwrap_or_default()),
            ..Default::default()
        };
        self.storefront.update_product(storefront_id, &update).await
    }

    /// Compares the full live catalogs of both platforms.
    pub async fn reconcile_live(&self) -> Result<Vec<Mismatch>, SyncError> {
        let fulfillment = self.fulfillment.list_products().await?;
        let storefront = self.storefront.list_products().await?;
        tracing::info!(
            fulfillment_products = fulfillment.len(),
            storefront_products = storefront.len(),
            "reconciling live catalogs"
        );
        Ok(reconcile(
            &fulfillment_skus(&fulfillment),
            &storefront_skus(&storefront),
        ))
    }
}

async fn load_design(db: &DatabaseConnection, design_id: i32) -> Result<DesignModel, SyncError> {
    DesignProducts::find_by_id(design_id)
        .one(db)
        .await?
        .ok_or(SyncError::DesignNotFound(design_id))
}

async fn record_fulfillment_id(
    db: &DatabaseConnection,
    design: DesignModel,
    fulfillment_id: &str,
) -> Result<DesignModel, SyncError> {
    let mut active: DesignActive = design.into();
    active.fulfillment_product_id = Set(Some(fulfillment_id.to_owned()));
    active.status = Set(DesignStatus::Pending);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

/// Sets or clears the storefront id, moving status to match.
async fn record_storefront_id(
    db: &DatabaseConnection,
    design: DesignModel,
    storefront_id: Option<&str>,
) -> Result<DesignModel, SyncError> {
    let status = match (storefront_id, design.fulfillment_product_id.is_some()) {
        (Some(_), _) => DesignStatus::Published,
        (None, true) => DesignStatus::Pending,
        (None, false) => DesignStatus::Draft,
    };
    let mut active: DesignActive = design.into();
    active.storefront_product_id = Set(storefront_id.map(str::to_owned));
    active.status = Set(status);
    active.updated_at = Set(Utc::now());
    Ok(active.update(db).await?)
}

async fn mark_synced(db: &DatabaseConnection, design: &DesignModel) -> Result<(), SyncError> {
    let Some(product_id) = design.product_id else {
        return Ok(());
    };
    let Some(product) = Products::find_by_id(product_id).one(db).await? else {
        tracing::warn!(design_id = design.id, product_id, "linked catalog product missing");
        return Ok(());
    };
    let mut active: ProductActive = product.into();
    active.last_synced = Set(Some(Utc::now()));
    active.update(db).await?;
    Ok(())
}

fn new_fulfillment_product(design: &DesignModel, params: &DesignParams) -> NewFulfillmentProduct {
    NewFulfillmentProduct {
        title: design.title.clone(),
        description: design.description.clone().unwrap_or_default(),
        blueprint_id: params.blueprint_id,
        print_provider_id: params.print_provider_id,
        variants: params
            .variants
            .iter()
            .map(|variant| NewFulfillmentVariant {
                id: variant.id,
                price: variant.price_cents.unwrap_or(design.price_cents),
                is_enabled: true,
            })
            .collect(),
        print_areas: params.print_areas.clone(),
        tags: params.tags.clone(),
    }
}

/// Storefront variants mirror the enabled fulfillment variants so the SKUs
/// line up. A product with no enabled variants gets one default variant at
/// the design price.
fn new_storefront_product(
    design: &DesignModel,
    params: &DesignParams,
    fulfillment: &FulfillmentProduct,
) -> NewStorefrontProduct {
    let mut variants: Vec<NewStorefrontVariant> = fulfillment
        .variants
        .iter()
        .filter(|variant| variant.is_enabled)
        .map(|variant| NewStorefrontVariant {
            price: cents_to_decimal(variant.price).to_string(),
            sku: variant.sku.clone().filter(|sku| !sku.is_empty()),
            inventory_policy: "continue".into(),
        })
        .collect();
    if variants.is_empty() {
        variants.push(NewStorefrontVariant {
            price: cents_to_decimal(design.price_cents).to_string(),
            sku: None,
            inventory_policy: "continue".into(),
        });
    }

    NewStorefrontProduct {
        title: design.title.clone(),
        body_html: design.description.clone().unwrap_or_default(),
        vendor: STOREFRONT_VENDOR.into(),
        product_type: params
            .product_type
            .clone()
            .unwrap_or_else(|| DEFAULT_PRODUCT_TYPE.into()),
        tags: params.tags.join(", "),
        status: "active".into(),
        variants,
    }
}
