use crate::{
    env::{EnvManager, redact_url},
    error::SettingsError,
};
use std::time::Duration;

pub const DATABASE_URL: &str = "DATABASE_URL";
pub const PAGE_SIZE: &str = "PAGER_PAGE_SIZE";
pub const SEARCH_LIMIT: &str = "PAGER_SEARCH_LIMIT";
pub const QUERY_TIMEOUT_MS: &str = "PAGER_QUERY_TIMEOUT_MS";
pub const LOG_LEVEL: &str = "PAGER_LOG_LEVEL";

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerSettings {
    /// Only needed when paging a Postgres database.
    pub database_url: Option<String>,
    pub page_size: usize,
    pub search_limit: usize,
    pub query_timeout: Duration,
    pub log_level: String,
}

impl Default for PagerSettings {
    fn default() -> Self {
        PagerSettings {
            database_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl PagerSettings {
    pub fn from_env(env: &EnvManager) -> Result<Self, SettingsError> {
        Ok(PagerSettings {
            database_url: env.get(DATABASE_URL).map(str::to_string),
            page_size: positive(env, PAGE_SIZE, DEFAULT_PAGE_SIZE as u64)? as usize,
            search_limit: positive(env, SEARCH_LIMIT, DEFAULT_SEARCH_LIMIT as u64)? as usize,
            query_timeout: Duration::from_millis(positive(
                env,
                QUERY_TIMEOUT_MS,
                DEFAULT_QUERY_TIMEOUT_MS,
            )?),
            log_level: env
                .get(LOG_LEVEL)
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
        })
    }

    pub fn require_database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| SettingsError::Missing(DATABASE_URL.to_string()))
    }

    /// The database URL with its password masked, for logging.
    pub fn database_url_redacted(&self) -> Option<String> {
        self.database_url.as_deref().map(redact_url)
    }
}

fn positive(env: &EnvManager, key: &str, default: u64) -> Result<u64, SettingsError> {
    let Some(raw) = env.get(key) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| SettingsError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        })?;

    if value == 0 {
        return Err(SettingsError::Zero {
            key: key.to_string(),
        });
    }
    Ok(value.into())
}
