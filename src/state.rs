use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, sync::SyncService};

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub config: Arc<AppConfig>,
    /// Present only when platform credentials are configured.
    pub sync: Option<Arc<SyncService>>,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            orm,
            config: Arc::new(config),
            sync: None,
        }
    }

    pub fn with_sync(mut self, sync: SyncService) -> Self {
        self.sync = Some(Arc::new(sync));
        self
    }
}
