use crate::query::{
    ast::expr::{BinaryOp, BinaryOperator, Expr, Ident},
    renderer::{Render, Renderer},
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_param(val.clone()),
            Expr::BinaryOp(op) => op.render(r),
            Expr::Cast { expr, data_type } => {
                r.sql.push_str("CAST(");
                expr.render(r);
                r.sql.push_str(" AS ");
                r.sql.push_str(data_type);
                r.sql.push(')');
            }
            Expr::Wildcard => r.sql.push('*'),
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) {
        r.sql.push('(');
        self.left.render(r);

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::NotEq => " <> ",
            BinaryOperator::Lt => " < ",
            BinaryOperator::LtEq => " <= ",
            BinaryOperator::Gt => " > ",
            BinaryOperator::GtEq => " >= ",
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
            BinaryOperator::ILike => {
                let keyword = r.dialect.ilike_operator();
                r.sql.push(' ');
                r.sql.push_str(keyword);
                " "
            }
        };
        r.sql.push_str(op_str);

        self.right.render(r);
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::query::{
        ast::expr::{BinaryOperator, Expr},
        dialect::Postgres,
        ident,
        renderer::{Render, Renderer},
        value,
    };

    #[test]
    fn test_render_nested_boolean_expression() {
        let expr = Expr::binary(
            ident("status"),
            BinaryOperator::Eq,
            value(Value::String("paid".into())),
        )
        .or(Expr::binary(
            ident("id"),
            BinaryOperator::Gt,
            value(Value::Int(3)),
        ));

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        let (sql, params) = renderer.finish();

        assert_eq!(sql, r#"(("status" = $1::text) OR ("id" > $2::int8))"#);
        assert_eq!(params, vec![Value::String("paid".into()), Value::Int(3)]);
    }

    #[test]
    fn test_render_cast_column() {
        let expr = Expr::binary(
            ident("payment_status").cast("text"),
            BinaryOperator::Eq,
            value(Value::String("paid".into())),
        );

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        let (sql, _) = renderer.finish();

        assert_eq!(sql, r#"(CAST("payment_status" AS text) = $1::text)"#);
    }

    #[test]
    fn test_render_ilike() {
        let expr = Expr::binary(
            ident("name"),
            BinaryOperator::ILike,
            value(Value::String("%lamp%".into())),
        );

        let dialect = Postgres;
        let mut renderer = Renderer::new(&dialect);
        expr.render(&mut renderer);
        let (sql, _) = renderer.finish();

        assert_eq!(sql, r#"("name" ILIKE $1::text)"#);
    }
}
