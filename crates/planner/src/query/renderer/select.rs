use crate::query::{
    ast::{
        common::OrderDir,
        select::{FromClause, OrderByExpr, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.render(r);
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }

        // 3. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        // 4. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            for (i, order) in self.order_by.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                order.render(r);
            }
        }

        // 5. LIMIT
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r);
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        r.render_table_ref(&self.table);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(&r.dialect.quote_identifier(alias));
        }
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) {
        self.expr.render(r);
        if let Some(dir) = &self.direction {
            let dir_str = match dir {
                OrderDir::Asc => "ASC",
                OrderDir::Desc => "DESC",
            };
            r.sql.push(' ');
            r.sql.push_str(dir_str);
        }
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::{
            common::{OrderDir, TableRef},
            expr::{BinaryOperator, Expr, Ident},
            select::{FromClause, OrderByExpr, Select},
        },
        dialect::Postgres,
        ident,
        renderer::{Render, Renderer},
        value,
    };

    fn qual_ident(qualifier: &str, name: &str) -> Expr {
        Expr::Identifier(Ident {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        })
    }

    #[test]
    fn test_simple_select_postgres() {
        let ast = Select {
            columns: vec![ident("id"), ident("name")],
            from: Some(FromClause {
                table: TableRef {
                    schema: None,
                    name: "products".to_string(),
                },
                alias: None,
            }),
            where_clause: Some(Expr::binary(
                ident("id"),
                BinaryOperator::Eq,
                value(Value::Int(123)),
            )),
            ..Default::default()
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, r#"SELECT "id", "name" FROM "products" WHERE ("id" = $1::int8)"#);
        assert_eq!(params, vec![Value::Int(123)]);
    }

    #[test]
    fn test_qualified_select_with_order_and_limit() {
        let ast = Select {
            columns: vec![Expr::Wildcard],
            from: Some(FromClause {
                table: TableRef {
                    schema: Some("shop".to_string()),
                    name: "orders".to_string(),
                },
                alias: Some("o".to_string()),
            }),
            where_clause: Some(Expr::binary(
                qual_ident("o", "payment_status"),
                BinaryOperator::NotEq,
                value(Value::String("refunded".to_string())),
            )),
            order_by: vec![
                OrderByExpr {
                    expr: qual_ident("o", "total"),
                    direction: Some(OrderDir::Desc),
                },
                OrderByExpr {
                    expr: qual_ident("o", "id"),
                    direction: Some(OrderDir::Asc),
                },
            ],
            limit: Some(value(Value::Int(11))),
        };

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        ast.render(&mut renderer);
        let (sql, params) = renderer.finish();

        let expected_sql = r#"SELECT * FROM "shop"."orders" AS "o" WHERE ("o"."payment_status" <> $1::text) ORDER BY "o"."total" DESC, "o"."id" ASC LIMIT $2::int8"#;
        assert_eq!(sql, expected_sql);
        assert_eq!(
            params,
            vec![Value::String("refunded".to_string()), Value::Int(11)]
        );
    }
}
