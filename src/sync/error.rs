use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote resource not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus { status: u16, url: String, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("design {0} not found")]
    DesignNotFound(i32),

    #[error("design {design_id} cannot be synced: {reason}")]
    InconsistentState { design_id: i32, reason: String },

    #[error("invalid export {path}: {reason}")]
    Export { path: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
