//! Chooses the store the CLI pages over: a JSON data file loaded into
//! memory, or the Postgres database named by `DATABASE_URL`.

use crate::error::CliError;
use connectors::{
    memory::adapter::MemoryAdapter,
    sql::{base::adapter::SqlAdapter, postgres::adapter::PgAdapter},
};
use pager::entity::EntityKind;
use pager_config::settings::PagerSettings;
use std::{path::Path, sync::Arc};
use tracing::info;

pub async fn open_adapter(
    settings: &PagerSettings,
    data: Option<&Path>,
) -> Result<Arc<dyn SqlAdapter>, CliError> {
    match data {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            let store = load_memory_store(&source).await?;
            info!(path = %path.display(), "Paging over in-memory data");
            Ok(Arc::new(store))
        }
        None => {
            let url = settings.require_database_url()?;
            let adapter = PgAdapter::connect(url).await?;
            info!(
                database = settings.database_url_redacted().unwrap_or_default(),
                "Connected to Postgres"
            );
            Ok(Arc::new(adapter))
        }
    }
}

/// Loads a document of the form `{"products": [...], "orders": [...]}`.
/// Every entity gets a table, empty if the document does not mention it.
pub async fn load_memory_store(source: &str) -> Result<MemoryAdapter, CliError> {
    let document: serde_json::Value = serde_json::from_str(source)?;
    let tables = document
        .as_object()
        .ok_or_else(|| CliError::InvalidDataFile("expected an object of entity arrays".into()))?;

    let store = MemoryAdapter::new();
    for kind in EntityKind::ALL {
        store.create_table(kind.spec().table).await;
    }

    for (name, rows) in tables {
        let spec = name.parse::<EntityKind>()?.spec();
        let rows = rows
            .as_array()
            .ok_or_else(|| CliError::InvalidDataFile(format!("`{name}` must be an array")))?
            .iter()
            .map(|row| spec.row_from_json(row))
            .collect::<Result<Vec<_>, _>>()?;

        info!(entity = spec.name, rows = rows.len(), "Loaded rows");
        store.insert_many(spec.table, rows).await;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::pagination::sort::SortDirection;
    use pager::{pager::Pager, request::Filters};
    use pager_config::env::EnvManager;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_memory_store() {
        let store = load_memory_store(
            r#"{
                "products": [
                    {"id": 1, "price": "10.00", "created_at": "2024-01-01T00:00:00Z"},
                    {"id": 2, "price": "12.50", "created_at": "2024-01-02T00:00:00Z"}
                ],
                "orders": []
            }"#,
        )
        .await
        .unwrap();

        assert_eq!(store.row_count("products").await, 2);
        assert_eq!(store.row_count("orders").await, 0);
        assert_eq!(store.row_count("purchases").await, 0);
    }

    fn settings() -> PagerSettings {
        PagerSettings::from_env(&EnvManager::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_open_adapter_pages_over_data_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{"purchases": [
                {"id": 3, "unit_cost": "4.10", "quantity_purchased": 2, "created_at": "2024-01-03T00:00:00Z"},
                {"id": 1, "unit_cost": "2.00", "quantity_purchased": 5, "created_at": "2024-01-01T00:00:00Z"},
                {"id": 2, "unit_cost": "2.00", "quantity_purchased": 1, "created_at": "2024-01-02T00:00:00Z"}
            ]}"#,
        )
        .unwrap();

        let adapter = open_adapter(&settings(), Some(file.path())).await.unwrap();
        let pager = Pager::new(adapter, EntityKind::Purchases);
        let page = pager
            .fetch_page(2, &Filters::new(), Some("unitCost"), SortDirection::Asc, None)
            .await
            .unwrap();

        let ids: Vec<_> = page.rows.iter().filter_map(|r| r.get_value("id").as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.next_cursor.map(|c| c.id), Some(2));
    }

    #[tokio::test]
    async fn test_open_adapter_reports_missing_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            open_adapter(&settings(), Some(&missing)).await,
            Err(CliError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_load_memory_store_rejects_bad_documents() {
        assert!(matches!(
            load_memory_store("[]").await,
            Err(CliError::InvalidDataFile(_))
        ));
        assert!(matches!(
            load_memory_store(r#"{"customers": []}"#).await,
            Err(CliError::Pager(_))
        ));
        assert!(matches!(
            load_memory_store(r#"{"orders": [{"total": "1.00"}]}"#).await,
            Err(CliError::Pager(_))
        ));
    }
}
