use crate::{core::value::Value, pagination::sort::SortKind};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value of the active sort column for the last row of a page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum SortValue {
    Int(i64),
    /// Serialized as a string so the exact scale survives the round trip.
    Decimal(Decimal),
    /// Serialized as RFC 3339 with full sub-second precision.
    Timestamp(DateTime<Utc>),
}

impl SortValue {
    pub fn kind(&self) -> SortKind {
        match self {
            SortValue::Int(_) => SortKind::Int,
            SortValue::Decimal(_) => SortKind::Decimal,
            SortValue::Timestamp(_) => SortKind::Timestamp,
        }
    }

    /// Reads a sort value of the given kind out of a row value.
    /// Returns `None` for `Null` or values that cannot represent the kind.
    pub fn from_value(value: &Value, kind: SortKind) -> Option<SortValue> {
        match (kind, value) {
            (SortKind::Int, Value::Int(v)) => Some(SortValue::Int(*v)),
            (SortKind::Int, other) => other.as_i64().map(SortValue::Int),

            (SortKind::Decimal, Value::Decimal(v)) => Some(SortValue::Decimal(*v)),
            (SortKind::Decimal, Value::Int(v)) => Some(SortValue::Decimal(Decimal::from(*v))),
            (SortKind::Decimal, Value::Float(v)) => Decimal::from_f64(*v).map(SortValue::Decimal),
            (SortKind::Decimal, Value::String(s)) => {
                Decimal::from_str(s.trim()).ok().map(SortValue::Decimal)
            }

            (SortKind::Timestamp, Value::Timestamp(v)) => Some(SortValue::Timestamp(*v)),
            (SortKind::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|ts| SortValue::Timestamp(ts.with_timezone(&Utc))),

            _ => None,
        }
    }
}

impl From<SortValue> for Value {
    fn from(value: SortValue) -> Self {
        match value {
            SortValue::Int(v) => Value::Int(v),
            SortValue::Decimal(v) => Value::Decimal(v),
            SortValue::Timestamp(v) => Value::Timestamp(v),
        }
    }
}

/// Position of the last row seen by a keyset walk.
///
/// `id` is the primary key of that row and always acts as the final
/// tie-breaker. `sort_value` is only meaningful for the sort column the
/// cursor was issued under; a cursor without one resumes purely by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_value: Option<SortValue>,
}

impl Cursor {
    pub fn from_id(id: i64) -> Self {
        Cursor {
            id,
            sort_value: None,
        }
    }

    pub fn with_sort_value(id: i64, sort_value: SortValue) -> Self {
        Cursor {
            id,
            sort_value: Some(sort_value),
        }
    }
}
