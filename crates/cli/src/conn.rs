use crate::error::CliError;
use async_trait::async_trait;
use connectors::sql::{base::adapter::SqlAdapter, postgres::adapter::PgAdapter};
use pager_config::env::redact_url;
use tracing::{error, info};

/// Trait for "pinging" a data source
#[async_trait]
pub trait ConnectionPinger {
    /// Attempts to ping; returns Err if unreachable
    async fn ping(&self) -> Result<(), CliError>;
}

/// Postgres pinger
pub struct PostgresConnectionPinger {
    pub conn_str: String,
}

#[async_trait]
impl ConnectionPinger for PostgresConnectionPinger {
    async fn ping(&self) -> Result<(), CliError> {
        let target = redact_url(&self.conn_str);
        info!(%target, "Pinging Postgres");

        let adapter = PgAdapter::connect(&self.conn_str).await.map_err(|e| {
            error!(%target, %e, "Postgres connection failed");
            e
        })?;

        adapter.ping().await.map_err(|e| {
            error!(%target, %e, "Postgres ping query failed");
            e
        })?;

        info!(%target, "Postgres ping succeeded");
        Ok(())
    }
}
