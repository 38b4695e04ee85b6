use crate::sql::base::requests::FetchRowsRequest;
use model::core::value::Value;
use planner::{
    query::{
        ast::{expr::Expr, select::Select},
        builder::select::SelectBuilder,
        dialect::Dialect,
        ident,
        renderer::{Render, Renderer},
        value,
    },
    table_ref,
};

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Builds the `SELECT` AST for a fetch request.
    ///
    /// With a keyset strategy the strategy owns ORDER BY and LIMIT and its
    /// predicate is conjoined with the request filter. Without one the
    /// explicit `order_by` list is used as-is.
    pub fn select_ast(&self, request: &FetchRowsRequest) -> Select {
        let columns = if request.columns.is_empty() {
            vec![Expr::Wildcard]
        } else {
            request.columns.iter().map(|c| ident(c)).collect()
        };

        let mut select = SelectBuilder::new()
            .select(columns)
            .from(table_ref!(&request.table), None);

        if let Some(filter) = &request.filter {
            select = select.where_clause(filter.clone());
        }

        match &request.strategy {
            Some(strategy) => {
                select = strategy.apply_to_builder(select, request.cursor.as_ref(), request.limit);
            }
            None => {
                for (column, direction) in &request.order_by {
                    select = select.order_by(ident(column), Some(*direction));
                }
                select = select.limit(value(Value::Int(request.limit as i64)));
            }
        }

        select.build()
    }

    /// Generates a SQL SELECT statement and its parameters.
    pub fn select(&self, request: &FetchRowsRequest) -> (String, Vec<Value>) {
        self.render_ast(self.select_ast(request))
    }

    fn render_ast(&self, ast: impl Render) -> (String, Vec<Value>) {
        let mut renderer = Renderer::new(self.dialect);
        ast.render(&mut renderer);
        renderer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::base::requests::FetchRowsRequestBuilder;
    use model::pagination::{
        cursor::{Cursor, SortValue},
        sort::{SortDirection, SortKind},
    };
    use planner::query::{
        ast::{common::OrderDir, expr::BinaryOperator},
        dialect::Postgres,
        keyset::KeysetOffset,
    };

    #[test]
    fn test_select_with_filter_and_keyset() {
        let filter = Expr::binary(
            ident("status"),
            BinaryOperator::Eq,
            value(Value::String("paid".into())),
        );
        let request = FetchRowsRequestBuilder::new("orders")
            .filter(Some(filter))
            .strategy(KeysetOffset::new(
                "created_at",
                SortKind::Int,
                "id",
                SortDirection::Desc,
            ))
            .cursor(Some(Cursor::with_sort_value(12, SortValue::Int(100))))
            .limit(3)
            .build();

        let dialect = Postgres;
        let (sql, params) = QueryGenerator::new(&dialect).select(&request);

        assert_eq!(
            sql,
            r#"SELECT * FROM "orders" WHERE (("status" = $1::text) AND (("created_at" < $2::int8) OR (("created_at" = $3::int8) AND ("id" > $4::int8)))) ORDER BY "created_at" DESC, "id" ASC LIMIT $5::int8"#
        );
        assert_eq!(params.len(), 5);
        assert_eq!(params[0], Value::String("paid".into()));
        assert_eq!(params[4], Value::Int(3));
    }

    #[test]
    fn test_select_without_strategy_uses_explicit_order() {
        let request = FetchRowsRequestBuilder::new("products")
            .columns(vec!["id".into(), "name".into()])
            .order_by("created_at", OrderDir::Desc)
            .order_by("id", OrderDir::Asc)
            .limit(10)
            .build();

        let dialect = Postgres;
        let (sql, params) = QueryGenerator::new(&dialect).select(&request);

        assert_eq!(
            sql,
            r#"SELECT "id", "name" FROM "products" ORDER BY "created_at" DESC, "id" ASC LIMIT $1::int8"#
        );
        assert_eq!(params, vec![Value::Int(10)]);
    }
}
