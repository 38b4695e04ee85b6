//! Decoding of `tokio_postgres` rows into [`RowData`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use model::{
    core::value::Value,
    records::row::{FieldValue, RowData},
};
use rust_decimal::Decimal;
use std::error::Error;
use tokio_postgres::{
    Row,
    types::{FromSql, Kind, Type},
};
use tracing::warn;

type DecodeResult = Result<Option<Value>, tokio_postgres::Error>;

pub fn to_row_data(row: &Row, table: &str) -> RowData {
    let field_values = row
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| FieldValue {
            name: column.name().to_string(),
            value: decode_column(row, idx, column.type_()),
        })
        .collect();

    RowData::new(table, field_values)
}

fn decode_column(row: &Row, idx: usize, ty: &Type) -> Value {
    let decoded: DecodeResult = match *ty {
        Type::INT2 => get::<i16>(row, idx).map(|v| v.map(|v| Value::Int(v.into()))),
        Type::INT4 => get::<i32>(row, idx).map(|v| v.map(|v| Value::Int(v.into()))),
        Type::INT8 => get::<i64>(row, idx).map(|v| v.map(Value::Int)),
        Type::FLOAT4 => get::<f32>(row, idx).map(|v| v.map(|v| Value::Float(v.into()))),
        Type::FLOAT8 => get::<f64>(row, idx).map(|v| v.map(Value::Float)),
        Type::NUMERIC => get::<Decimal>(row, idx).map(|v| v.map(Value::Decimal)),
        Type::BOOL => get::<bool>(row, idx).map(|v| v.map(Value::Boolean)),
        Type::DATE => get::<NaiveDate>(row, idx).map(|v| v.map(Value::Date)),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, idx).map(|v| v.map(Value::Timestamp)),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, idx)
            .map(|v| v.map(|naive| Value::Timestamp(naive.and_utc()))),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, idx).map(|v| v.map(Value::Json)),
        _ => get::<PgText>(row, idx).map(|v| v.map(|text| Value::String(text.0))),
    };

    match decoded {
        Ok(Some(value)) => value,
        Ok(None) => Value::Null,
        Err(err) => {
            warn!(
                column = %row.columns()[idx].name(),
                pg_type = %ty.name(),
                %err,
                "Unsupported column type; returning NULL"
            );
            Value::Null
        }
    }
}

fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Result<Option<T>, tokio_postgres::Error> {
    row.try_get::<_, Option<T>>(idx)
}

/// Text-like columns, including user-defined enums such as `order_status`.
struct PgText(String);

impl<'a> FromSql<'a> for PgText {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        Ok(PgText(std::str::from_utf8(raw)?.to_string()))
    }

    fn accepts(ty: &Type) -> bool {
        matches!(ty.kind(), Kind::Enum(_)) || <String as FromSql>::accepts(ty)
    }
}
