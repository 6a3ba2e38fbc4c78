use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;

use butterflyblue_api::{
    config::{DatabaseConfig, SyncConfig},
    db::{create_orm_conn, run_migrations},
    sync::{Mismatch, SyncService, reconcile::reconcile_exports},
};

#[derive(Debug, Parser)]
#[command(name = "sync", about = "Sync designs between the fulfillment and storefront platforms")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create, publish and list a design on both platforms.
    Push { design_id: i32 },
    /// Remove a design's storefront listing.
    Unpublish { design_id: i32 },
    /// Push the design's current title and description to its listing.
    UpdateListing { design_id: i32 },
    /// Compare a fulfillment JSON export against a storefront CSV export.
    Reconcile {
        #[arg(long)]
        fulfillment: PathBuf,
        #[arg(long)]
        storefront: PathBuf,
    },
    /// Compare the live catalogs of both platforms.
    ReconcileLive,
    /// Print a storefront product as JSON.
    StorefrontGet { product_id: String },
    /// Delete a storefront product.
    StorefrontDelete { product_id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,butterflyblue_api=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(err) => {
            tracing::error!(error = ?err, "sync command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but found mismatches.
async fn run(command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Reconcile {
            fulfillment,
            storefront,
        } => {
            let mismatches = reconcile_exports(&fulfillment, &storefront)?;
            Ok(print_mismatches(&mismatches))
        }
        Command::ReconcileLive => {
            let sync = service()?;
            let mismatches = sync.reconcile_live().await?;
            Ok(print_mismatches(&mismatches))
        }
        Command::Push { design_id } => {
            let sync = service()?;
            let db = database().await?;
            let report = sync.push_design(&db, design_id).await?;
            println!(
                "design {} synced: fulfillment={} storefront={}{}",
                report.design_id,
                report.fulfillment_product_id,
                report.storefront_product_id,
                if report.resumed { " (resumed)" } else { "" }
            );
            Ok(print_mismatches(&report.mismatches))
        }
        Command::Unpublish { design_id } => {
            let sync = service()?;
            let db = database().await?;
            let design = sync.unpublish_design(&db, design_id).await?;
            println!("design {} unpublished, status {:?}", design.id, design.status);
            Ok(true)
        }
        Command::UpdateListing { design_id } => {
            let sync = service()?;
            let db = database().await?;
            let listing = sync.update_storefront_listing(&db, design_id).await?;
            println!("storefront product {} updated", listing.id);
            Ok(true)
        }
        Command::StorefrontGet { product_id } => {
            let sync = service()?;
            let product = sync.storefront().get_product(&product_id).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(true)
        }
        Command::StorefrontDelete { product_id } => {
            let sync = service()?;
            sync.storefront().delete_product(&product_id).await?;
            println!("storefront product {product_id} deleted");
            Ok(true)
        }
    }
}

fn service() -> anyhow::Result<SyncService> {
    let config = SyncConfig::from_env()?;
    Ok(SyncService::from_config(&config)?)
}

async fn database() -> anyhow::Result<DatabaseConnection> {
    let database = DatabaseConfig::from_env();
    let orm = create_orm_conn(&database.url, database.encryption_key.as_deref()).await?;
    run_migrations(&orm).await?;
    Ok(orm)
}

fn print_mismatches(mismatches: &[Mismatch]) -> bool {
    if mismatches.is_empty() {
        println!("no mismatches");
        return true;
    }
    for mismatch in mismatches {
        println!("{mismatch}");
    }
    println!("{} mismatch(es) found", mismatches.len());
    false
}
