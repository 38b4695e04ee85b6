//! Per-entity pagination metadata and the translation of request filters,
//! search text and fixture rows into the query layer's types.

use crate::{
    entities::{orders::ORDERS, products::PRODUCTS, purchases::PURCHASES},
    error::PagerError,
    request::Filters,
};
use model::{
    core::value::Value,
    pagination::{
        cursor::SortValue,
        sort::{SortDirection, SortKind},
    },
    records::row::RowData,
};
use planner::query::{
    ast::expr::{BinaryOperator, Expr},
    conjunction, disjunction, ident,
    keyset::KeysetOffset,
    value,
};
use std::{fmt, str::FromStr};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Products,
    Orders,
    Purchases,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Products,
        EntityKind::Orders,
        EntityKind::Purchases,
    ];

    pub fn spec(&self) -> &'static EntitySpec {
        match self {
            EntityKind::Products => &PRODUCTS,
            EntityKind::Orders => &ORDERS,
            EntityKind::Purchases => &PURCHASES,
        }
    }
}

impl FromStr for EntityKind {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "products" | "product" => Ok(EntityKind::Products),
            "orders" | "order" => Ok(EntityKind::Orders),
            "purchases" | "purchase" => Ok(EntityKind::Purchases),
            other => Err(PagerError::UnknownEntity(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

/// A column the pager may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortField {
    /// Name used by clients, e.g. `createdAt`.
    pub name: &'static str,
    pub column: &'static str,
    pub kind: SortKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Int,
}

/// An equality filter clients may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub name: &'static str,
    pub column: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    /// Text filters compare the column as text so enum columns match too.
    pub fn column_expr(&self) -> Expr {
        match self.kind {
            FilterKind::Text => ident(self.column).cast("text"),
            FilterKind::Int => ident(self.column),
        }
    }

    pub fn is_named(&self, key: &str) -> bool {
        self.name.eq_ignore_ascii_case(key) || self.column.eq_ignore_ascii_case(key)
    }

    /// Converts a request value into a value of this filter's type.
    /// Integer filters also accept numeric strings, as they arrive from query strings.
    pub fn coerce(&self, raw: &serde_json::Value) -> Option<Value> {
        match (self.kind, raw) {
            (FilterKind::Text, serde_json::Value::String(s)) => Some(Value::String(s.clone())),
            (FilterKind::Int, serde_json::Value::Number(n)) => n.as_i64().map(Value::Int),
            (FilterKind::Int, serde_json::Value::String(s)) => s.trim().parse().ok().map(Value::Int),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct EntitySpec {
    pub name: &'static str,
    pub table: &'static str,
    pub pk: &'static str,
    /// The creation timestamp; used when no (or an unknown) sort field is requested.
    pub default_sort: SortField,
    pub sortable: &'static [SortField],
    pub filterable: &'static [FilterField],
    /// Text columns matched by the search bypass.
    pub searchable: &'static [&'static str],
}

impl EntitySpec {
    /// Resolves a requested sort field by client name or column name.
    pub fn resolve_sort(&self, requested: Option<&str>) -> SortField {
        let Some(requested) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.default_sort;
        };

        match self.sortable.iter().find(|field| {
            field.name.eq_ignore_ascii_case(requested) || field.column.eq_ignore_ascii_case(requested)
        }) {
            Some(field) => *field,
            None => {
                warn!(
                    entity = self.name,
                    sort_field = requested,
                    fallback = self.default_sort.name,
                    "Unknown sort field; using the default sort"
                );
                self.default_sort
            }
        }
    }

    pub fn keyset(&self, sort: SortField, direction: SortDirection) -> KeysetOffset {
        KeysetOffset::new(sort.column, sort.kind, self.pk, direction)
    }

    /// Builds the conjunction of all recognised filters. Unknown keys and
    /// values of the wrong type are dropped with a warning; `null` values
    /// mean "no filter".
    pub fn filter_expr(&self, filters: &Filters) -> Option<Expr> {
        let conditions = filters.iter().filter_map(|(key, raw)| {
            if raw.is_null() {
                return None;
            }

            let Some(field) = self.filterable.iter().find(|f| f.is_named(key)) else {
                warn!(entity = self.name, filter = %key, "Ignoring unknown filter");
                return None;
            };

            match field.coerce(raw) {
                Some(v) => Some(Expr::binary(field.column_expr(), BinaryOperator::Eq, value(v))),
                None => {
                    warn!(
                        entity = self.name,
                        filter = %key,
                        value = %raw,
                        expected = ?field.kind,
                        "Ignoring filter with a value of the wrong type"
                    );
                    None
                }
            }
        });

        conjunction(conditions)
    }

    /// Builds `col1 ILIKE '%q%' OR col2 ILIKE '%q%' ...` for a non-blank query.
    pub fn search_expr(&self, query: &str) -> Option<Expr> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let pattern = format!("%{}%", escape_like(query));
        disjunction(self.searchable.iter().map(|column| {
            Expr::binary(
                ident(column),
                BinaryOperator::ILike,
                value(Value::String(pattern.clone())),
            )
        }))
    }

    /// Reads a fixture row. Sortable columns are converted to their sort
    /// kind (decimal strings, RFC 3339 timestamps); other columns keep their
    /// natural JSON type.
    pub fn row_from_json(&self, json: &serde_json::Value) -> Result<RowData, PagerError> {
        let object = json
            .as_object()
            .ok_or_else(|| self.invalid_row("expected a JSON object".to_string()))?;

        let mut row = RowData::new(self.table, Vec::with_capacity(object.len()));
        for (key, raw) in object {
            let plain = Value::from_json(raw);
            let typed = match self.sortable.iter().find(|f| f.column.eq_ignore_ascii_case(key)) {
                Some(field) if !plain.is_null() => SortValue::from_value(&plain, field.kind)
                    .map(Value::from)
                    .ok_or_else(|| {
                        self.invalid_row(format!("`{key}` is not a valid {:?}: {raw}", field.kind))
                    })?,
                _ => plain,
            };
            row.set(key, typed);
        }

        if row.get_value(self.pk).as_i64().is_none() {
            return Err(self.invalid_row(format!("missing integer `{}`", self.pk)));
        }
        Ok(row)
    }

    fn invalid_row(&self, reason: String) -> PagerError {
        PagerError::InvalidRow {
            entity: self.name.to_string(),
            reason,
        }
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
