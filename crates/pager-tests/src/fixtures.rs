use chrono::{DateTime, Duration, TimeZone, Utc};
use connectors::memory::adapter::MemoryAdapter;
use model::{
    core::value::Value,
    pagination::sort::SortDirection,
    records::row::RowData,
};
use pager::{
    entity::EntityKind,
    pager::Pager,
    request::{Filters, Page},
};
use rust_decimal::Decimal;
use std::{cmp::Ordering, sync::Arc};

pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Money amount from cents.
pub fn money(cents: i64) -> Value {
    Value::Decimal(Decimal::new(cents, 2))
}

pub fn at_minute(minute: i64) -> Value {
    Value::Timestamp(epoch() + Duration::minutes(minute))
}

pub fn product(id: i64, price_cents: i64, stock: i64, minute: i64) -> RowData {
    RowData::new("products", vec![])
        .with("id", Value::Int(id))
        .with("name", Value::String(format!("Product {id}")))
        .with("sku", Value::String(format!("SKU-{id:04}")))
        .with("price", money(price_cents))
        .with("stock", Value::Int(stock))
        .with("status", Value::String(if id % 3 == 0 { "archived" } else { "active" }.into()))
        .with("brand_id", Value::Int(id % 4))
        .with("category_id", Value::Int(id % 2))
        .with("created_at", at_minute(minute))
}

pub fn order(id: i64, total_cents: i64, minute: i64, payment_status: &str) -> RowData {
    RowData::new("orders", vec![])
        .with("id", Value::Int(id))
        .with("customer_name", Value::String(format!("Customer {}", id % 7)))
        .with("customer_email", Value::String(format!("customer{}@example.com", id % 7)))
        .with("total", money(total_cents))
        .with("status", Value::String("placed".into()))
        .with("payment_status", Value::String(payment_status.into()))
        .with("customer_id", Value::Int(id % 7))
        .with("created_at", at_minute(minute))
}

pub fn purchase(id: i64, quantity: i64, unit_cost_cents: i64, minute: i64) -> RowData {
    RowData::new("purchases", vec![])
        .with("id", Value::Int(id))
        .with("supplier_name", Value::String(format!("Supplier {}", id % 3)))
        .with("reference", Value::String(format!("PO-{id:05}")))
        .with("quantity_purchased", Value::Int(quantity))
        .with("unit_cost", money(unit_cost_cents))
        .with("product_id", Value::Int(id % 5))
        .with("supplier_id", Value::Int(id % 3))
        .with("created_at", at_minute(minute))
}

pub async fn memory_store(rows: Vec<RowData>) -> MemoryAdapter {
    let store = MemoryAdapter::new();
    for kind in EntityKind::ALL {
        store.create_table(kind.spec().table).await;
    }
    for row in rows {
        let table = row.entity.clone();
        store.insert(&table, row).await;
    }
    store
}

pub async fn pager_over(entity: EntityKind, rows: Vec<RowData>) -> (Pager, MemoryAdapter) {
    let store = memory_store(rows).await;
    (Pager::new(Arc::new(store.clone()), entity), store)
}

pub fn filters(json: serde_json::Value) -> Filters {
    serde_json::from_value(json).unwrap_or_default()
}

pub fn ids(page: &Page) -> Vec<i64> {
    page.rows
        .iter()
        .filter_map(|row| row.get_value("id").as_i64())
        .collect()
}

pub fn walked_ids(pages: &[Page]) -> Vec<i64> {
    pages.iter().flat_map(ids).collect()
}

/// Builds a row for `entity` from three small keys so that generated data
/// has plenty of ties on every sortable column.
pub fn row_for(entity: EntityKind, id: i64, (a, b, c): (i64, i64, i64)) -> RowData {
    match entity {
        EntityKind::Products => product(id, a * 250, b, c),
        EntityKind::Orders => order(id, a * 250, c, if b % 2 == 0 { "paid" } else { "pending" }),
        EntityKind::Purchases => purchase(id, b, a * 250, c),
    }
}

/// A filter every entity understands and that keeps roughly half the rows.
pub fn sample_filter(entity: EntityKind) -> Filters {
    match entity {
        EntityKind::Products => filters(serde_json::json!({ "status": "active" })),
        EntityKind::Orders => filters(serde_json::json!({ "paymentStatus": "paid" })),
        EntityKind::Purchases => filters(serde_json::json!({ "supplierId": 1 })),
    }
}

pub fn matches_filters(entity: EntityKind, row: &RowData, filters: &Filters) -> bool {
    let spec = entity.spec();
    filters.iter().all(|(key, raw)| {
        match spec.filterable.iter().find(|f| f.is_named(key)) {
            Some(field) => match field.coerce(raw) {
                Some(expected) => row.get_value(field.column).equal(&expected),
                None => true,
            },
            None => true,
        }
    })
}

/// Reference order for a walk: filtered rows sorted by `(column, id)` with
/// the id tie-break always ascending.
pub fn expected_ids(
    entity: EntityKind,
    rows: &[RowData],
    sort_field: Option<&str>,
    direction: SortDirection,
    filters: &Filters,
) -> Vec<i64> {
    let column = entity.spec().resolve_sort(sort_field).column;
    let mut kept: Vec<&RowData> = rows
        .iter()
        .filter(|row| matches_filters(entity, row, filters))
        .collect();

    kept.sort_by(|a, b| {
        let by_column = a
            .get_value(column)
            .compare(&b.get_value(column))
            .unwrap_or(Ordering::Equal);
        let by_column = match direction {
            SortDirection::Asc => by_column,
            SortDirection::Desc => by_column.reverse(),
        };
        by_column.then_with(|| a.get_value("id").compare(&b.get_value("id")).unwrap_or(Ordering::Equal))
    });

    kept.iter()
        .filter_map(|row| row.get_value("id").as_i64())
        .collect()
}
