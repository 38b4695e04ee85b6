//! Keyset ("seek") pagination over a composite `(sort column, primary key)` order.
//!
//! Rows are ordered by `sort_col <dir>, pk ASC`. Resuming after a cursor
//! `(id = c, sortValue = v)` selects exactly the rows strictly after it:
//!
//! - ascending:  `(sort_col > v) OR (sort_col = v AND pk > c)`
//! - descending: `(sort_col < v) OR (sort_col = v AND pk > c)`
//!
//! The primary key comparison is always ascending so rows sharing a sort value
//! keep a stable order across page boundaries. A cursor without a usable
//! sort value resumes with `pk > c`.

use crate::query::{
    ast::{
        common::OrderDir,
        expr::{BinaryOperator, Expr},
    },
    builder::select::{FromState, SelectBuilder},
    ident, value,
};
use model::{
    core::value::Value,
    pagination::{
        cursor::{Cursor, SortValue},
        sort::{SortDirection, SortKind},
    },
    records::row::RowData,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeysetOffset {
    pub sort_col: String,
    pub sort_kind: SortKind,
    pub pk: String,
    pub direction: SortDirection,
}

impl KeysetOffset {
    pub fn new(sort_col: &str, sort_kind: SortKind, pk: &str, direction: SortDirection) -> Self {
        Self {
            sort_col: sort_col.to_string(),
            sort_kind,
            pk: pk.to_string(),
            direction,
        }
    }

    /// Builds the condition selecting rows strictly after `cursor`.
    pub fn predicate(&self, cursor: &Cursor) -> Expr {
        // (pk > ?)
        let after_id = Expr::binary(
            ident(&self.pk),
            BinaryOperator::Gt,
            value(Value::Int(cursor.id)),
        );

        let sort_value = match &cursor.sort_value {
            Some(v) if v.kind() == self.sort_kind => v.clone(),
            Some(v) => {
                debug!(
                    cursor_kind = ?v.kind(),
                    sort_kind = ?self.sort_kind,
                    column = %self.sort_col,
                    "Cursor was issued under another sort; resuming by id only"
                );
                return after_id;
            }
            None => return after_id,
        };

        let beyond = match self.direction {
            SortDirection::Asc => BinaryOperator::Gt,
            SortDirection::Desc => BinaryOperator::Lt,
        };

        // (col > ?) or (col < ?)
        let cond1 = Expr::binary(
            ident(&self.sort_col),
            beyond,
            value(sort_value.clone().into()),
        );

        // (col = ? AND pk > ?)
        let cond2 = Expr::binary(
            ident(&self.sort_col),
            BinaryOperator::Eq,
            value(sort_value.into()),
        )
        .and(after_id);

        cond1.or(cond2)
    }

    /// Applies the pagination logic (WHERE, ORDER BY and LIMIT) to a builder.
    ///
    /// `limit` is the number of rows to fetch, including any look-ahead row
    /// the caller uses to detect a following page.
    pub fn apply_to_builder(
        &self,
        mut builder: SelectBuilder<FromState>,
        cursor: Option<&Cursor>,
        limit: usize,
    ) -> SelectBuilder<FromState> {
        // No cursor means first page: no keyset condition.
        if let Some(cursor) = cursor {
            builder = builder.and_where(self.predicate(cursor));
        }

        builder = builder.order_by(ident(&self.sort_col), Some(self.direction.into()));
        builder = builder.order_by(ident(&self.pk), Some(OrderDir::Asc));

        builder.limit(value(Value::Int(limit as i64)))
    }

    /// Generates the cursor pointing at `row`.
    ///
    /// Returns `None` if the row has no integer primary key. A row whose sort
    /// column is NULL yields an id-only cursor.
    pub fn next_cursor(&self, row: &RowData) -> Option<Cursor> {
        let id = row.get_value(&self.pk).as_i64()?;

        match SortValue::from_value(&row.get_value(&self.sort_col), self.sort_kind) {
            Some(sort_value) => Some(Cursor::with_sort_value(id, sort_value)),
            None => {
                warn!(
                    id,
                    column = %self.sort_col,
                    "Boundary row has no usable sort value; issuing an id-only cursor"
                );
                Some(Cursor::from_id(id))
            }
        }
    }
}
