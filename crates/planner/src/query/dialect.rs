//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::value::Value;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    fn get_placeholder(&self, index: usize) -> String;

    /// Returns the cast appended to a placeholder so the server infers the
    /// parameter type from the bound value rather than from the column.
    ///
    /// - PostgreSQL: `$1::int8`, `$2::numeric`, ...
    fn param_cast(&self, value: &Value) -> Option<&'static str>;

    /// Returns the keyword for a case-insensitive pattern match.
    fn ilike_operator(&self) -> &'static str;

    /// Returns the name of the dialect (e.g., "PostgreSQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn get_placeholder(&self, index: usize) -> String {
        // PostgreSQL uses $1, $2, etc.
        format!("${}", index + 1)
    }

    fn param_cast(&self, value: &Value) -> Option<&'static str> {
        match value {
            Value::Int(_) => Some("int8"),
            Value::Float(_) => Some("float8"),
            Value::Decimal(_) => Some("numeric"),
            Value::String(_) => Some("text"),
            Value::Boolean(_) => Some("bool"),
            Value::Json(_) => Some("jsonb"),
            Value::Date(_) => Some("date"),
            Value::Timestamp(_) => Some("timestamptz"),
            Value::Null => None,
        }
    }

    fn ilike_operator(&self) -> &'static str {
        "ILIKE"
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}
