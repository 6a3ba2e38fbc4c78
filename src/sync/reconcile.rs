//! SKU-keyed price reconciliation between the fulfillment and storefront
//! platforms.
//!
//! Both sides are reduced to flat `(sku, price)` lists, either from saved
//! exports (fulfillment JSON, storefront CSV) or from the live APIs, and then
//! compared in a single linear pass.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::error::SyncError;
use super::types::{FulfillmentExport, FulfillmentProduct, StorefrontProduct};
use crate::money::{cents_to_decimal, parse_price};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentSku {
    pub sku: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontSku {
    pub sku: String,
    /// Price exactly as the storefront reports it.
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    MissingInStorefront {
        sku: String,
    },
    MissingInFulfillment {
        sku: String,
    },
    PriceMismatch {
        sku: String,
        #[schema(value_type = String)]
        fulfillment: Decimal,
        #[schema(value_type = String)]
        storefront: Decimal,
    },
    InvalidStorefrontPrice {
        sku: String,
        raw: String,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MissingInStorefront { sku } => write!(f, "SKU {sku} missing in storefront"),
            Mismatch::MissingInFulfillment { sku } => {
                write!(f, "SKU {sku} missing in fulfillment")
            }
            Mismatch::PriceMismatch {
                sku,
                fulfillment,
                storefront,
            } => write!(
                f,
                "Price mismatch for SKU {sku}: storefront=${storefront}, fulfillment=${fulfillment}"
            ),
            Mismatch::InvalidStorefrontPrice { sku, raw } => {
                write!(f, "Unreadable storefront price for SKU {sku}: {raw:?}")
            }
        }
    }
}

/// Compares the two SKU lists. Fulfillment-side findings come first, in
/// fulfillment order, followed by storefront SKUs unknown to fulfillment.
/// When a SKU repeats, its first occurrence wins.
pub fn reconcile(fulfillment: &[FulfillmentSku], storefront: &[StorefrontSku]) -> Vec<Mismatch> {
    let mut storefront_by_sku: HashMap<&str, &str> = HashMap::with_capacity(storefront.len());
    for entry in storefront {
        storefront_by_sku
            .entry(entry.sku.as_str())
            .or_insert(entry.price.as_str());
    }

    let mut mismatches = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(fulfillment.len());

    for entry in fulfillment {
        if !seen.insert(entry.sku.as_str()) {
            continue;
        }
        let Some(raw) = storefront_by_sku.get(entry.sku.as_str()) else {
            mismatches.push(Mismatch::MissingInStorefront {
                sku: entry.sku.clone(),
            });
            continue;
        };
        let fulfillment_price = cents_to_decimal(entry.price_cents);
        match parse_price(raw) {
            Some(storefront_price) if storefront_price == fulfillment_price => {}
            Some(storefront_price) => mismatches.push(Mismatch::PriceMismatch {
                sku: entry.sku.clone(),
                fulfillment: fulfillment_price,
                storefront: storefront_price,
            }),
            None => mismatches.push(Mismatch::InvalidStorefrontPrice {
                sku: entry.sku.clone(),
                raw: (*raw).to_owned(),
            }),
        }
    }

    let mut reported: HashSet<&str> = HashSet::new();
    for entry in storefront {
        if !seen.contains(entry.sku.as_str()) && reported.insert(entry.sku.as_str()) {
            mismatches.push(Mismatch::MissingInFulfillment {
                sku: entry.sku.clone(),
            });
        }
    }

    mismatches
}

/// Flattens fulfillment products into every variant that carries a SKU,
/// enabled or not.
pub fn fulfillment_skus(products: &[FulfillmentProduct]) -> Vec<FulfillmentSku> {
    products
        .iter()
        .flat_map(|product| product.variants.iter())
        .filter_map(|variant| {
            let sku = variant.sku.as_deref()?.trim();
            (!sku.is_empty()).then(|| FulfillmentSku {
                sku: sku.to_owned(),
                price_cents: variant.price,
            })
        })
        .collect()
}

/// Flattens storefront products into variants that carry a SKU.
pub fn storefront_skus(products: &[StorefrontProduct]) -> Vec<StorefrontSku> {
    products
        .iter()
        .flat_map(|product| product.variants.iter())
        .filter_map(|variant| {
            let sku = variant.sku.as_deref()?.trim();
            (!sku.is_empty()).then(|| StorefrontSku {
                sku: sku.to_owned(),
                price: variant.price.clone(),
            })
        })
        .collect()
}

/// Parses a saved fulfillment export (bare array or `{ "data": [...] }`).
pub fn parse_fulfillment_export(json: &str) -> Result<Vec<FulfillmentProduct>, serde_json::Error> {
    serde_json::from_str::<FulfillmentExport>(json).map(FulfillmentExport::into_products)
}

pub fn load_fulfillment_export(path: &Path) -> Result<Vec<FulfillmentProduct>, SyncError> {
    let json = std::fs::read_to_string(path)?;
    parse_fulfillment_export(&json).map_err(|e| SyncError::Export {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

const SKU_HEADERS: [&str; 2] = ["sku", "variant sku"];
const PRICE_HEADERS: [&str; 2] = ["price", "variant price"];

/// Reads a storefront CSV export. Accepts either `SKU`/`Price` columns or the
/// storefront's native `Variant SKU`/`Variant Price` columns. Rows without a
/// SKU (image-only rows in native exports) are skipped.
pub fn parse_storefront_csv<R: Read>(reader: R) -> Result<Vec<StorefrontSku>, SyncError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find = |candidates: &[&str]| {
        headers
            .iter()
            .position(|h| candidates.iter().any(|c| h.eq_ignore_ascii_case(c)))
    };
    let missing = |column: &str| SyncError::Export {
        path: "storefront CSV".to_owned(),
        reason: format!("no {column} column in header {:?}", headers.iter().collect::<Vec<_>>()),
    };
    let sku_idx = find(&SKU_HEADERS).ok_or_else(|| missing("SKU"))?;
    let price_idx = find(&PRICE_HEADERS).ok_or_else(|| missing("Price"))?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let sku = record.get(sku_idx).unwrap_or_default();
        if sku.is_empty() {
            continue;
        }
        rows.push(StorefrontSku {
            sku: sku.to_owned(),
            price: record.get(price_idx).unwrap_or_default().to_owned(),
        });
    }
    Ok(rows)
}

pub fn load_storefront_csv(path: &Path) -> Result<Vec<StorefrontSku>, SyncError> {
    let file = std::fs::File::open(path)?;
    parse_storefront_csv(file)
}

/// Compares two export files on disk.
pub fn reconcile_exports(
    fulfillment_path: &Path,
    storefront_path: &Path,
) -> Result<Vec<Mismatch>, SyncError> {
    let fulfillment = fulfillment_skus(&load_fulfillment_export(fulfillment_path)?);
    let storefront = load_storefront_csv(storefront_path)?;
    tracing::info!(
        fulfillment_skus = fulfillment.len(),
        storefront_skus = storefront.len(),
        "reconciling exports"
    );
    Ok(reconcile(&fulfillment, &storefront))
}
