use std::path::PathBuf;

use butterflyblue_api::sync::{
    Mismatch,
    reconcile::{load_fulfillment_export, load_storefront_csv, reconcile_exports},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_both_export_formats() {
    let products = load_fulfillment_export(&fixture("printify_products.json")).expect("json");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].variants.len(), 3);

    let rows = load_storefront_csv(&fixture("shopify_products.csv")).expect("csv");
    let skus: Vec<&str> = rows.iter().map(|r| r.sku.as_str()).collect();
    assert_eq!(
        skus,
        ["FOF-TEE-S", "FOF-TEE-M", "FOF-TEE-XL", "BB-MUG-11", "GR-HOOD-L"]
    );
}

#[test]
fn reports_mismatches_between_exports() {
    let mismatches = reconcile_exports(
        &fixture("printify_products.json"),
        &fixture("shopify_products.csv"),
    )
    .expect("reconcile");

    let lines: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "Price mismatch for SKU FOF-TEE-M: storefront=$20.99, fulfillment=$19.99",
            "SKU BB-MUG-15 missing in storefront",
            "SKU GR-HOOD-L missing in fulfillment",
        ]
    );
    assert!(matches!(mismatches[0], Mismatch::PriceMismatch { .. }));
}

#[test]
fn disabled_fulfillment_variant_still_counts_as_present() {
    // FOF-TEE-XL is disabled in the fulfillment export but listed at the same
    // price in the storefront export.
    let mismatches = reconcile_exports(
        &fixture("printify_products.json"),
        &fixture("shopify_products.csv"),
    )
    .expect("reconcile");
    assert!(
        mismatches.iter().all(|m| !m.to_string().contains("FOF-TEE-XL")),
        "{mismatches:?}"
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = reconcile_exports(&fixture("nope.json"), &fixture("shopify_products.csv"))
        .unwrap_err();
    assert!(matches!(err, butterflyblue_api::sync::SyncError::Io(_)), "{err:?}");
}
