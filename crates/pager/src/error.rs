use crate::request::MAX_PAGE_SIZE;
use connectors::sql::base::error::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PagerError {
    #[error("Page size must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    InvalidPageSize(usize),

    /// The store rejected or failed the page query.
    #[error("Query failed: {0}")]
    Query(#[from] DbError),

    #[error("Failed to encode cursor: {0}")]
    CursorEncode(#[from] serde_json::Error),

    #[error("Invalid row for `{entity}`: {reason}")]
    InvalidRow { entity: String, reason: String },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Query timed out after {0} ms")]
    Timeout(u64),

    #[error("Walk stopped after {0} pages without reaching the end")]
    WalkLimit(usize),
}
