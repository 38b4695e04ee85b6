use crate::sql::{
    base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::{ConnectorError, DbError},
        query::generator::QueryGenerator,
        requests::FetchRowsRequest,
    },
    postgres::{params::PgParamStore, row::to_row_data, utils::connect_client},
};
use async_trait::async_trait;
use model::records::row::RowData;
use planner::query::dialect;
use std::sync::Arc;
use tokio_postgres::Client;
use tracing::debug;

#[derive(Clone)]
pub struct PgAdapter {
    client: Arc<Client>,
    dialect: dialect::Postgres,
}

impl PgAdapter {
    pub async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let client = Arc::new(connect_client(url).await?);
        Ok(PgAdapter {
            client,
            dialect: dialect::Postgres,
        })
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
        let generator = QueryGenerator::new(&self.dialect);
        let (sql, params) = generator.select(request);
        debug!(%sql, params = params.len(), "Executing select");

        let bindings = PgParamStore::from_values(params);
        let rows = self.client.query(&sql, &bindings.as_refs()).await?;

        Ok(rows
            .iter()
            .map(|row| to_row_data(row, &request.table))
            .collect())
    }

    async fn ping(&self) -> Result<(), DbError> {
        self.client.simple_query("SELECT 1").await?;
        Ok(())
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Postgres
    }
}
