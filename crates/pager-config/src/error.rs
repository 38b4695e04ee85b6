use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("{key} must be a positive integer, got `{value}`")]
    InvalidNumber { key: String, value: String },

    #[error("{key} must be greater than zero")]
    Zero { key: String },

    #[error("Missing required setting {0}")]
    Missing(String),
}
