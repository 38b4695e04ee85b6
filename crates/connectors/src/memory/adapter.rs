use crate::{
    memory::eval::{self, Evaluator},
    sql::base::{
        adapter::{DatabaseKind, SqlAdapter},
        error::DbError,
        query::generator::QueryGenerator,
        requests::FetchRowsRequest,
    },
};
use async_trait::async_trait;
use model::{
    core::value::Value,
    records::row::{FieldValue, RowData},
};
use planner::query::{
    ast::{common::OrderDir, expr::Expr, select::Select},
    dialect,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::debug;

/// Tables held in memory, queried through the same `Select` AST the
/// Postgres adapter renders to SQL.
#[derive(Clone, Default)]
pub struct MemoryAdapter {
    tables: Arc<RwLock<HashMap<String, Vec<RowData>>>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `table` if it does not exist yet.
    pub async fn create_table(&self, table: &str) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default();
    }

    pub async fn insert(&self, table: &str, row: RowData) {
        self.insert_many(table, [row]).await;
    }

    pub async fn insert_many(&self, table: &str, rows: impl IntoIterator<Item = RowData>) {
        self.tables
            .write()
            .await
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Replaces the row of `table` whose `pk` equals `id`. Returns whether a
    /// row was replaced.
    pub async fn update(&self, table: &str, pk: &str, id: i64, row: RowData) -> bool {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return false;
        };
        match rows
            .iter_mut()
            .find(|r| r.get_value(pk).as_i64() == Some(id))
        {
            Some(existing) => {
                *existing = row;
                true
            }
            None => false,
        }
    }

    pub async fn row_count(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }

    fn execute(select: &Select, rows: &[RowData]) -> Result<Vec<RowData>, DbError> {
        let mut keyed = Vec::new();
        for row in rows {
            if let Some(condition) = &select.where_clause {
                if !eval::matches(condition, row)? {
                    continue;
                }
            }
            let key = select
                .order_by
                .iter()
                .map(|order| order.expr.evaluate(row))
                .collect::<Result<Vec<_>, _>>()?;
            keyed.push((key, row));
        }

        let directions = select
            .order_by
            .iter()
            .map(|order| order.direction.unwrap_or(OrderDir::Asc))
            .collect::<Vec<_>>();
        keyed.sort_by(|(a, _), (b, _)| eval::compare_keys(&directions, a, b));

        let limit = match &select.limit {
            Some(expr) => Self::limit_value(expr)?,
            None => keyed.len(),
        };

        Ok(keyed
            .into_iter()
            .take(limit)
            .map(|(_, row)| Self::project(&select.columns, row))
            .collect())
    }

    fn limit_value(expr: &Expr) -> Result<usize, DbError> {
        let limit = expr.evaluate(&RowData::new("", vec![]))?;
        limit
            .as_i64()
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| DbError::Evaluation(format!("LIMIT must be non-negative, got {limit}")))
    }

    fn project(columns: &[Expr], row: &RowData) -> RowData {
        if columns.iter().any(|c| matches!(c, Expr::Wildcard)) {
            return row.clone();
        }

        let field_values = columns
            .iter()
            .filter_map(|column| match column {
                Expr::Identifier(ident) => Some(FieldValue {
                    name: ident.name.clone(),
                    value: row.get_value(&ident.name),
                }),
                _ => None,
            })
            .collect();
        RowData::new(&row.entity, field_values)
    }
}

#[async_trait]
impl SqlAdapter for MemoryAdapter {
    async fn fetch_rows(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
        let dialect = dialect::Postgres;
        let select = QueryGenerator::new(&dialect).select_ast(request);

        let tables = self.tables.read().await;
        let rows = tables
            .get(&request.table)
            .ok_or_else(|| DbError::UnknownTable(request.table.clone()))?;

        let result = Self::execute(&select, rows)?;
        debug!(
            table = %request.table,
            scanned = rows.len(),
            returned = result.len(),
            "Executed select in memory"
        );
        Ok(result)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }

    fn kind(&self) -> DatabaseKind {
        DatabaseKind::Memory
    }
}
