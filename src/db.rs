use std::str::FromStr;

use anyhow::Result;
use sea_orm::{Database, DatabaseConnection, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::migration::Migrator;

/// Create a SeaORM connection.
///
/// SQLite URLs are opened through a hand-built sqlx pool so the optional
/// SQLCipher key is issued as the first pragma on every connection. Any other
/// URL goes straight to `Database::connect`.
pub async fn create_orm_conn(
    database_url: &str,
    encryption_key: Option<&str>,
) -> Result<DatabaseConnection> {
    if !database_url.starts_with("sqlite:") {
        if encryption_key.is_some() {
            tracing::warn!("DATABASE_ENCRYPTION_KEY is only applied to SQLite databases");
        }
        let conn = Database::connect(database_url).await?;
        return Ok(conn);
    }

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if let Some(key) = encryption_key {
        options = options.pragma("key", quote_pragma(key));
    }

    // Every in-memory connection is its own database, so pin the pool to one.
    let max_connections = if is_in_memory(database_url) { 1 } else { 5 };
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Apply all pending schema migrations.
pub async fn run_migrations(conn: &DatabaseConnection) -> Result<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn quote_pragma(key: &str) -> String {
    format!("'{}'", key.replace('\'', "''"))
}
