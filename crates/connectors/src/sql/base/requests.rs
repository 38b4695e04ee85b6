use model::pagination::cursor::Cursor;
use planner::query::{
    ast::{common::OrderDir, expr::Expr},
    keyset::KeysetOffset,
};

#[derive(Debug, Clone)]
pub struct FetchRowsRequest {
    pub table: String,
    /// Projected columns; empty means `*`.
    pub columns: Vec<String>,
    pub filter: Option<Expr>,
    /// Explicit ordering, used only when no keyset strategy is set.
    pub order_by: Vec<(String, OrderDir)>,
    pub limit: usize,
    pub cursor: Option<Cursor>,
    pub strategy: Option<KeysetOffset>,
}

pub struct FetchRowsRequestBuilder {
    table: String,
    columns: Vec<String>,
    filter: Option<Expr>,
    order_by: Vec<(String, OrderDir)>,
    limit: usize,
    cursor: Option<Cursor>,
    strategy: Option<KeysetOffset>,
}

impl FetchRowsRequestBuilder {
    pub fn new(table: &str) -> Self {
        FetchRowsRequestBuilder {
            table: table.to_string(),
            columns: Vec::new(),
            filter: None,
            order_by: Vec::new(),
            limit: 0,
            cursor: None,
            strategy: None,
        }
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    pub fn filter(mut self, filter: Option<Expr>) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, column: &str, direction: OrderDir) -> Self {
        self.order_by.push((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn cursor(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn strategy(mut self, strategy: KeysetOffset) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(self) -> FetchRowsRequest {
        FetchRowsRequest {
            table: self.table,
            columns: self.columns,
            filter: self.filter,
            order_by: self.order_by,
            limit: self.limit,
            cursor: self.cursor,
            strategy: self.strategy,
        }
    }
}
