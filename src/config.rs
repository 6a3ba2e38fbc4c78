use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://butterflyblue.db?mode=rwc";
const DEFAULT_PRINTIFY_API_URL: &str = "https://api.printify.com/v1";
const DEFAULT_SHOPIFY_API_VERSION: &str = "2024-01";

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// SQLCipher key applied as `PRAGMA key` on SQLite connections.
    pub encryption_key: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            encryption_key: non_empty_var("DATABASE_ENCRYPTION_KEY"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig::from_env();
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let jwt_ttl_hours = env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(24);
        Ok(Self {
            port,
            database,
            host,
            jwt_secret,
            jwt_ttl_hours,
        })
    }
}

/// Credentials and endpoints for the two commerce platforms.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub printify_api_url: String,
    pub printify_api_token: String,
    pub printify_shop_id: String,
    /// Full Admin API base, e.g. `https://shop.myshopify.com/admin/api/2024-01`.
    pub shopify_api_url: String,
    pub shopify_api_key: String,
    pub shopify_api_secret: String,
    pub http_timeout_secs: u64,
}

impl SyncConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let printify_api_url = env::var("PRINTIFY_API_URL")
            .unwrap_or_else(|_| DEFAULT_PRINTIFY_API_URL.to_string());
        let printify_api_token = required_var("PRINTIFY_API_TOKEN")?;
        let printify_shop_id = required_var("PRINTIFY_SHOP_ID")?;

        let shopify_api_url = match non_empty_var("SHOPIFY_API_URL") {
            Some(url) => url,
            None => {
                let store = required_var("SHOPIFY_STORE_NAME")?;
                let version = env::var("SHOPIFY_API_VERSION")
                    .unwrap_or_else(|_| DEFAULT_SHOPIFY_API_VERSION.to_string());
                shopify_admin_url(&store, &version)
            }
        };
        let shopify_api_key = required_var("SHOPIFY_API_KEY")?;
        let shopify_api_secret = required_var("SHOPIFY_API_SECRET")?;

        let http_timeout_secs = env::var("SYNC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        Ok(Self {
            printify_api_url,
            printify_api_token,
            printify_shop_id,
            shopify_api_url,
            shopify_api_key,
            shopify_api_secret,
            http_timeout_secs,
        })
    }

    /// Returns `None` when no sync credentials are present at all, so the web
    /// server can start without them.
    pub fn from_env_optional() -> anyhow::Result<Option<Self>> {
        if non_empty_var("PRINTIFY_API_TOKEN").is_none()
            && non_empty_var("SHOPIFY_API_KEY").is_none()
        {
            return Ok(None);
        }
        Self::from_env().map(Some)
    }
}

/// Builds the Admin REST base URL for a store. Accepts either a bare store
/// handle (`butterflyblue`) or a full domain (`butterflyblue.myshopify.com`).
pub fn shopify_admin_url(store: &str, api_version: &str) -> String {
    let store = store
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    let domain = if store.contains('.') {
        store.to_string()
    } else {
        format!("{store}.myshopify.com")
    };
    format!("https://{domain}/admin/api/{api_version}")
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn required_var(key: &str) -> anyhow::Result<String> {
    non_empty_var(key).ok_or_else(|| anyhow::anyhow!("{key} is not set"))
}
