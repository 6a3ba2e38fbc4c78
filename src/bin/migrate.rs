use butterflyblue_api::{
    config::DatabaseConfig,
    db::{create_orm_conn, run_migrations},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let database = DatabaseConfig::from_env();
    let orm = create_orm_conn(&database.url, database.encryption_key.as_deref()).await?;
    run_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
