use crate::sql::base::{error::DbError, requests::FetchRowsRequest};
use async_trait::async_trait;
use model::records::row::RowData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Memory,
}

/// A row store the pager can read pages from.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    /// Runs the `SELECT` described by `request` and returns the rows in the
    /// order the store produced them.
    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), DbError>;

    fn kind(&self) -> DatabaseKind;
}
