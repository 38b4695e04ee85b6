use connectors::sql::base::error::{ConnectorError, DbError};
use pager::error::PagerError;
use pager_config::error::SettingsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Settings(#[from] SettingsError),

    #[error("Failed to connect: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("{0}")]
    Pager(#[from] PagerError),

    #[error("Invalid data file: {0}")]
    InvalidDataFile(String),

    #[error("Shutdown requested")]
    ShutdownRequested,
}
