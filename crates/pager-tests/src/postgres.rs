//! Runs the same walks against Postgres and the memory store.
//!
//! Needs a scratch database in `DATABASE_URL`; the tests drop and recreate
//! the entity tables. Run with `cargo test -p pager-tests -- --ignored`.

use model::records::row::RowData;
use pager_config::{env::EnvManager, settings::PagerSettings};
use tokio_postgres::{Client, NoTls};

pub const PRODUCTS_DDL: &str = "
    DROP TABLE IF EXISTS products;
    CREATE TABLE products (
        id integer PRIMARY KEY,
        name text NOT NULL,
        sku text NOT NULL,
        price numeric(10, 2) NOT NULL,
        stock integer NOT NULL,
        status text NOT NULL,
        brand_id integer,
        category_id integer,
        created_at timestamptz NOT NULL
    );";

pub const ORDERS_DDL: &str = "
    DROP TABLE IF EXISTS orders;
    CREATE TABLE orders (
        id bigint PRIMARY KEY,
        customer_name text NOT NULL,
        customer_email text NOT NULL,
        total numeric(12, 2) NOT NULL,
        status text NOT NULL,
        payment_status text NOT NULL,
        customer_id integer,
        created_at timestamptz NOT NULL
    );";

/// Products with a zone-less `created_at`.
pub const NAIVE_PRODUCTS_DDL: &str = "
    DROP TABLE IF EXISTS products;
    CREATE TABLE products (
        id integer PRIMARY KEY,
        name text NOT NULL,
        sku text NOT NULL,
        price numeric(10, 2) NOT NULL,
        stock integer NOT NULL,
        status text NOT NULL,
        brand_id integer,
        category_id integer,
        created_at timestamp NOT NULL
    );";

/// Orders whose statuses are enum types.
pub const ENUM_ORDERS_DDL: &str = "
    DROP TABLE IF EXISTS orders;
    DROP TYPE IF EXISTS order_status;
    DROP TYPE IF EXISTS payment_status;
    CREATE TYPE order_status AS ENUM ('placed', 'shipped', 'cancelled');
    CREATE TYPE payment_status AS ENUM ('pending', 'paid', 'refunded');
    CREATE TABLE orders (
        id bigint PRIMARY KEY,
        customer_name text NOT NULL,
        customer_email text NOT NULL,
        total numeric(12, 2) NOT NULL,
        status order_status NOT NULL,
        payment_status payment_status NOT NULL,
        customer_id integer,
        created_at timestamptz NOT NULL
    );";

pub fn database_url() -> Option<String> {
    let settings = PagerSettings::from_env(&EnvManager::new()).ok()?;
    settings.require_database_url().ok().map(str::to_string)
}

pub async fn pg_client(url: &str) -> Client {
    let (client, connection) = tokio_postgres::connect(url, NoTls)
        .await
        .expect("Failed to connect to Postgres");
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::error!(%err, "Postgres connection closed");
        }
    });
    client
}

/// Recreates a table and fills it with `rows`, rendering values as literals.
pub async fn seed(client: &Client, ddl: &str, table: &str, rows: &[RowData]) {
    client.batch_execute(ddl).await.expect("Failed to create table");
    let Some(first) = rows.first() else {
        return;
    };

    let columns = first
        .field_values
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let values = rows
        .iter()
        .map(|row| {
            let literals = row
                .field_values
                .iter()
                .map(|f| f.value.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("({literals})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    client
        .batch_execute(&format!("INSERT INTO {table} ({columns}) VALUES {values}"))
        .await
        .expect("Failed to seed table");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use connectors::sql::{base::adapter::SqlAdapter, postgres::adapter::PgAdapter};
    use model::core::value::Value;
    use model::pagination::sort::SortDirection;
    use pager::{entity::EntityKind, pager::Pager, request::Filters};
    use serde_json::json;
    use std::sync::Arc;
    use tracing_test::traced_test;

    async fn pg_pager(entity: EntityKind) -> Option<Pager> {
        let url = database_url()?;
        let adapter = PgAdapter::connect(&url).await.expect("Failed to connect");
        adapter.ping().await.expect("Ping failed");
        Some(Pager::new(Arc::new(adapter), entity))
    }

    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a scratch Postgres database in DATABASE_URL"]
    async fn test_postgres_products_match_memory_store() {
        let Some(url) = database_url() else {
            return;
        };
        let rows: Vec<_> = (1..=37)
            .map(|id| row_for(EntityKind::Products, id, (id % 4, id % 5, id % 3)))
            .collect();
        seed(&pg_client(&url).await, PRODUCTS_DDL, "products", &rows).await;

        let Some(pg) = pg_pager(EntityKind::Products).await else {
            return;
        };
        let (memory, _) = pager_over(EntityKind::Products, rows.clone()).await;

        let active = filters(json!({ "status": "active", "categoryId": "1" }));
        for filter in [Filters::new(), active] {
            for sort in ["price", "stock", "createdAt"] {
                for direction in [SortDirection::Asc, SortDirection::Desc] {
                    let from_pg = pg.walk(6, &filter, Some(sort), direction, 50).await.unwrap();
                    let from_memory = memory
                        .walk(6, &filter, Some(sort), direction, 50)
                        .await
                        .unwrap();

                    assert_eq!(walked_ids(&from_pg), walked_ids(&from_memory));
                    assert_eq!(
                        walked_ids(&from_pg),
                        expected_ids(EntityKind::Products, &rows, Some(sort), direction, &filter)
                    );
                    assert_eq!(from_pg.last().unwrap().rows, from_memory.last().unwrap().rows);
                }
            }
        }

        let hits = pg.search("sku-000", &Filters::new()).await.unwrap();
        let mut found = ids(&hits);
        found.sort_unstable();
        assert_eq!(found, (1..=9).collect::<Vec<_>>());
    }

    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a scratch Postgres database in DATABASE_URL"]
    async fn test_postgres_orders_with_bigint_ids() {
        let Some(url) = database_url() else {
            return;
        };
        let rows: Vec<_> = (1..=25)
            .map(|id| row_for(EntityKind::Orders, id, (id % 3, id % 2, id % 5)))
            .collect();
        seed(&pg_client(&url).await, ORDERS_DDL, "orders", &rows).await;

        let Some(pg) = pg_pager(EntityKind::Orders).await else {
            return;
        };
        let paid = filters(json!({ "paymentStatus": "paid" }));
        let pages = pg
            .walk(4, &paid, Some("total"), SortDirection::Desc, 50)
            .await
            .unwrap();

        assert_eq!(
            walked_ids(&pages),
            expected_ids(EntityKind::Orders, &rows, Some("total"), SortDirection::Desc, &paid)
        );
        assert!(logs_contain("Executing select"));
    }

    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a scratch Postgres database in DATABASE_URL"]
    async fn test_postgres_naive_timestamps_outside_utc() {
        let Some(url) = database_url() else {
            return;
        };
        let rows: Vec<_> = (1..=6).map(|id| product(id, 1000, 1, id * 20)).collect();
        let client = pg_client(&url).await;
        seed(&client, NAIVE_PRODUCTS_DDL, "products", &rows).await;
        client
            .batch_execute("ALTER ROLE CURRENT_USER SET TimeZone = 'Europe/Berlin'")
            .await
            .unwrap();

        let walked = match pg_pager(EntityKind::Products).await {
            Some(pg) => pg.walk(2, &Filters::new(), None, SortDirection::Asc, 10).await,
            None => return,
        };
        client
            .batch_execute("ALTER ROLE CURRENT_USER RESET TimeZone")
            .await
            .unwrap();

        let pages = walked.unwrap();
        assert_eq!(walked_ids(&pages), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(pages[0].rows[0].get_value("created_at"), at_minute(20));
    }

    #[traced_test]
    #[tokio::test]
    #[ignore = "needs a scratch Postgres database in DATABASE_URL"]
    async fn test_postgres_enum_status_filters() {
        let Some(url) = database_url() else {
            return;
        };
        let rows: Vec<_> = (1..=12)
            .map(|id| {
                let status = if id % 3 == 0 { "placed" } else { "shipped" };
                let paid = if id % 2 == 0 { "paid" } else { "pending" };
                order(id, 500 + id, id, paid).with("status", Value::String(status.into()))
            })
            .collect();
        seed(&pg_client(&url).await, ENUM_ORDERS_DDL, "orders", &rows).await;

        let Some(pg) = pg_pager(EntityKind::Orders).await else {
            return;
        };
        let placed = filters(json!({ "status": "placed" }));
        let page = pg
            .fetch_page(10, &placed, None, SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![3, 6, 9, 12]);
        assert!(page.rows.iter().all(|row| row.get_value("status") == Value::String("placed".into())));

        let placed_and_paid = filters(json!({ "status": "placed", "paymentStatus": "paid" }));
        let pages = pg
            .walk(1, &placed_and_paid, Some("total"), SortDirection::Desc, 10)
            .await
            .unwrap();
        assert_eq!(walked_ids(&pages), vec![12, 6]);
    }
}
