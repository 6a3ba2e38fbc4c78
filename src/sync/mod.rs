//! Outbound synchronization between the fulfillment platform (print-on-demand
//! production) and the storefront platform (customer-facing listings).

pub mod error;
pub mod fulfillment;
mod http;
pub mod reconcile;
pub mod storefront;
pub mod types;
pub mod workflow;

pub use error::SyncError;
pub use fulfillment::FulfillmentClient;
pub use reconcile::{Mismatch, reconcile};
pub use storefront::StorefrontClient;
pub use workflow::{SyncReport, SyncService};
