use crate::{
    entity::{EntityKind, EntitySpec},
    error::PagerError,
    request::{DEFAULT_SEARCH_LIMIT, Filters, MAX_PAGE_SIZE, Page, PageRequest},
};
use connectors::sql::base::{
    adapter::SqlAdapter,
    requests::{FetchRowsRequest, FetchRowsRequestBuilder},
};
use model::{
    pagination::{cursor::Cursor, sort::SortDirection},
    records::row::RowData,
};
use planner::query::{ast::common::OrderDir, conjunction};
use std::{sync::Arc, time::Instant};
use tracing::{debug, error, info};

/// Pages over one entity's table in `(sort column, id)` order.
///
/// Each call issues one read-only query; the pager keeps no state between
/// pages, so clones can be shared freely across tasks.
#[derive(Clone)]
pub struct Pager {
    adapter: Arc<dyn SqlAdapter>,
    spec: &'static EntitySpec,
    search_limit: usize,
}

impl Pager {
    pub fn new(adapter: Arc<dyn SqlAdapter>, entity: EntityKind) -> Self {
        Pager {
            adapter,
            spec: entity.spec(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    pub fn with_search_limit(mut self, search_limit: usize) -> Self {
        self.search_limit = search_limit;
        self
    }

    pub fn spec(&self) -> &'static EntitySpec {
        self.spec
    }

    /// Returns the page of rows strictly after `cursor`.
    ///
    /// Fetches one row more than `page_size` to learn whether another page
    /// exists; the next cursor points at the last row actually returned.
    pub async fn fetch_page(
        &self,
        page_size: usize,
        filters: &Filters,
        sort_field: Option<&str>,
        direction: SortDirection,
        cursor: Option<&Cursor>,
    ) -> Result<Page, PagerError> {
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(PagerError::InvalidPageSize(page_size));
        }

        let sort = self.spec.resolve_sort(sort_field);
        let strategy = self.spec.keyset(sort, direction);
        let request = FetchRowsRequestBuilder::new(self.spec.table)
            .filter(self.spec.filter_expr(filters))
            .strategy(strategy.clone())
            .cursor(cursor.cloned())
            .limit(page_size + 1)
            .build();

        let started = Instant::now();
        let mut rows = self.run(&request).await?;

        let has_next = rows.len() > page_size;
        rows.truncate(page_size);

        let next_cursor = match rows.last() {
            Some(last) if has_next => Some(strategy.next_cursor(last).ok_or_else(|| {
                PagerError::InvalidRow {
                    entity: self.spec.name.to_string(),
                    reason: format!("boundary row has no integer `{}`", self.spec.pk),
                }
            })?),
            _ => None,
        };

        info!(
            entity = self.spec.name,
            sort = sort.name,
            %direction,
            resumed = cursor.is_some(),
            rows = rows.len(),
            has_next,
            took_ms = started.elapsed().as_millis() as u64,
            "Fetched page"
        );

        Ok(Page { rows, next_cursor })
    }

    /// Bounded free-text lookup over the entity's searchable columns.
    ///
    /// Results are ordered by the default sort then id, capped at the search
    /// limit, and never carry a cursor.
    pub async fn search(&self, query: &str, filters: &Filters) -> Result<Page, PagerError> {
        let condition = conjunction(
            self.spec
                .filter_expr(filters)
                .into_iter()
                .chain(self.spec.search_expr(query)),
        );
        let request = FetchRowsRequestBuilder::new(self.spec.table)
            .filter(condition)
            .order_by(self.spec.default_sort.column, OrderDir::Asc)
            .order_by(self.spec.pk, OrderDir::Asc)
            .limit(self.search_limit)
            .build();

        let started = Instant::now();
        let rows = self.run(&request).await?;

        info!(
            entity = self.spec.name,
            query = query.trim(),
            rows = rows.len(),
            took_ms = started.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(Page {
            rows,
            next_cursor: None,
        })
    }

    /// Serves a route-level request: search text selects the search path,
    /// anything else is a keyset page.
    pub async fn fetch(&self, request: &PageRequest) -> Result<Page, PagerError> {
        match request.search_text() {
            Some(query) => self.search(query, &request.filters).await,
            None => {
                let cursor = request.decoded_cursor();
                self.fetch_page(
                    request.page_size,
                    &request.filters,
                    request.sort_field.as_deref(),
                    request.direction(),
                    cursor.as_ref(),
                )
                .await
            }
        }
    }

    /// Follows `nextCursor` from the first page until the last one.
    ///
    /// Fails with [`PagerError::WalkLimit`] rather than looping forever if the
    /// walk has not ended after `max_pages` pages.
    pub async fn walk(
        &self,
        page_size: usize,
        filters: &Filters,
        sort_field: Option<&str>,
        direction: SortDirection,
        max_pages: usize,
    ) -> Result<Vec<Page>, PagerError> {
        let mut pages: Vec<Page> = Vec::new();
        let mut cursor: Option<Cursor> = None;

        loop {
            if pages.len() >= max_pages {
                return Err(PagerError::WalkLimit(max_pages));
            }

            let page = self
                .fetch_page(page_size, filters, sort_field, direction, cursor.as_ref())
                .await?;
            cursor = page.next_cursor.clone();
            pages.push(page);

            if cursor.is_none() {
                break;
            }
        }

        debug!(
            entity = self.spec.name,
            pages = pages.len(),
            rows = pages.iter().map(|p| p.rows.len()).sum::<usize>(),
            "Walk finished"
        );
        Ok(pages)
    }

    async fn run(&self, request: &FetchRowsRequest) -> Result<Vec<RowData>, PagerError> {
        self.adapter.fetch_rows(request).await.map_err(|err| {
            error!(entity = self.spec.name, %err, "Page query failed");
            PagerError::Query(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};
    use connectors::{
        memory::adapter::MemoryAdapter,
        sql::base::{adapter::DatabaseKind, error::DbError},
    };
    use model::{
        core::value::Value,
        pagination::{codec, cursor::SortValue},
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use tracing_test::traced_test;

    fn product(id: i64, price: i64) -> RowData {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(id);
        RowData::new("products", vec![])
            .with("id", Value::Int(id))
            .with("name", Value::String(format!("Product {id}")))
            .with("sku", Value::String(format!("SKU-{id:03}")))
            .with("price", Value::Decimal(Decimal::new(price * 100, 2)))
            .with("stock", Value::Int(id % 4))
            .with("status", Value::String(if id % 2 == 0 { "active" } else { "draft" }.into()))
            .with("created_at", Value::Timestamp(created))
    }

    async fn pager_over(rows: Vec<RowData>) -> Pager {
        let store = MemoryAdapter::new();
        store.insert_many("products", rows).await;
        Pager::new(Arc::new(store), EntityKind::Products)
    }

    fn ids(page: &Page) -> Vec<i64> {
        page.rows
            .iter()
            .filter_map(|r| r.get_value("id").as_i64())
            .collect()
    }

    struct FailingAdapter;

    #[async_trait]
    impl SqlAdapter for FailingAdapter {
        async fn fetch_rows(&self, _request: &FetchRowsRequest) -> Result<Vec<RowData>, DbError> {
            Err(DbError::Unknown("connection reset by peer".into()))
        }

        async fn ping(&self) -> Result<(), DbError> {
            Err(DbError::Unknown("connection reset by peer".into()))
        }

        fn kind(&self) -> DatabaseKind {
            DatabaseKind::Postgres
        }
    }

    #[tokio::test]
    async fn test_twelve_products_in_pages_of_five() {
        // prices descend as ids ascend, so price order differs from id order
        let pager = pager_over((1..=12).map(|id| product(id, 200 - id)).collect()).await;
        let none = Filters::new();

        let first = pager
            .fetch_page(5, &none, Some("price"), SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(ids(&first), vec![12, 11, 10, 9, 8]);
        assert_eq!(
            first.next_cursor,
            Some(Cursor::with_sort_value(8, SortValue::Decimal(Decimal::new(19200, 2))))
        );

        let second = pager
            .fetch_page(5, &none, Some("price"), SortDirection::Asc, first.next_cursor.as_ref())
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![7, 6, 5, 4, 3]);
        assert_eq!(second.next_cursor.as_ref().map(|c| c.id), Some(3));

        let third = pager
            .fetch_page(5, &none, Some("price"), SortDirection::Asc, second.next_cursor.as_ref())
            .await
            .unwrap();
        assert_eq!(ids(&third), vec![2, 1]);
        assert_eq!(third.next_cursor, None);
    }

    #[tokio::test]
    async fn test_equal_sort_values_break_ties_by_id() {
        let pager = pager_over(vec![product(7, 1000), product(3, 1000), product(5, 10)]).await;
        let none = Filters::new();

        let first = pager
            .fetch_page(2, &none, Some("price"), SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(ids(&first), vec![5, 3]);

        let second = pager
            .fetch_page(2, &none, Some("price"), SortDirection::Asc, first.next_cursor.as_ref())
            .await
            .unwrap();
        assert_eq!(ids(&second), vec![7]);

        // Descending order keeps the ascending id tie-break.
        let desc = pager
            .fetch_page(10, &none, Some("price"), SortDirection::Desc, None)
            .await
            .unwrap();
        assert_eq!(ids(&desc), vec![3, 7, 5]);
    }

    #[tokio::test]
    async fn test_exhausted_page_has_no_cursor() {
        let pager = pager_over((1..=4).map(|id| product(id, id)).collect()).await;
        let none = Filters::new();

        let exact = pager
            .fetch_page(4, &none, None, SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(exact.rows.len(), 4);
        assert_eq!(exact.next_cursor, None);

        let short = pager
            .fetch_page(9, &none, None, SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(short.rows.len(), 4);
        assert!(!short.has_next());
    }

    #[tokio::test]
    async fn test_default_sort_cursor_carries_created_at() {
        let pager = pager_over((1..=3).map(|id| product(id, id)).collect()).await;
        let page = pager
            .fetch_page(1, &Filters::new(), None, SortDirection::Asc, None)
            .await
            .unwrap();
        let cursor = page.next_cursor.unwrap();
        assert_eq!(cursor.id, 1);
        assert!(matches!(cursor.sort_value, Some(SortValue::Timestamp(_))));
    }

    #[tokio::test]
    async fn test_filters_are_applied_before_limit() {
        let pager = pager_over((1..=10).map(|id| product(id, id)).collect()).await;
        let filters: Filters = serde_json::from_value(json!({"status": "active"})).unwrap();

        let pages = pager
            .walk(2, &filters, Some("price"), SortDirection::Desc, 10)
            .await
            .unwrap();
        let walked: Vec<i64> = pages.iter().flat_map(ids).collect();
        assert_eq!(walked, vec![10, 8, 6, 4, 2]);
        assert!(pages.iter().all(|p| p.rows.len() <= 2));
    }

    #[tokio::test]
    async fn test_invalid_page_size() {
        let pager = pager_over(vec![product(1, 1)]).await;
        let result = pager
            .fetch_page(0, &Filters::new(), None, SortDirection::Asc, None)
            .await;
        assert!(matches!(result, Err(PagerError::InvalidPageSize(0))));

        let result = pager
            .fetch_page(usize::MAX, &Filters::new(), None, SortDirection::Asc, None)
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, PagerError::InvalidPageSize(usize::MAX)));
        assert_eq!(
            err.to_string(),
            format!("Page size must be between 1 and {MAX_PAGE_SIZE}, got {}", usize::MAX)
        );

        let largest = pager
            .fetch_page(MAX_PAGE_SIZE, &Filters::new(), None, SortDirection::Asc, None)
            .await
            .unwrap();
        assert_eq!(largest.rows.len(), 1);
    }

    #[traced_test]
    #[tokio::test]
    async fn test_store_failure_is_an_error_not_an_empty_page() {
        let pager = Pager::new(Arc::new(FailingAdapter), EntityKind::Orders);
        let result = pager.fetch(&PageRequest::default()).await;

        assert!(matches!(result, Err(PagerError::Query(_))));
        assert!(logs_contain("Page query failed"));
    }

    #[tokio::test]
    async fn test_search_is_bounded_and_cursorless() {
        let pager = pager_over((1..=30).map(|id| product(id, id)).collect())
            .await
            .with_search_limit(4);

        let request = PageRequest {
            search: Some(" product 1".into()),
            cursor: Some(codec::encode(&Cursor::from_id(25)).unwrap()),
            ..PageRequest::default()
        };
        let page = pager.fetch(&request).await.unwrap();

        // "Product 1", "Product 10".."Product 19" match; first four by created_at
        assert_eq!(ids(&page), vec![1, 10, 11, 12]);
        assert_eq!(page.next_cursor, None);
    }

    #[tokio::test]
    async fn test_search_respects_filters() {
        let pager = pager_over((1..=12).map(|id| product(id, id)).collect()).await;
        let filters: Filters = serde_json::from_value(json!({"status": "draft"})).unwrap();

        let page = pager.search("SKU-01", &filters).await.unwrap();
        assert_eq!(ids(&page), vec![11]);
    }

    #[tokio::test]
    async fn test_walk_limit() {
        let pager = pager_over((1..=6).map(|id| product(id, id)).collect()).await;
        let result = pager
            .walk(1, &Filters::new(), None, SortDirection::Asc, 3)
            .await;
        assert!(matches!(result, Err(PagerError::WalkLimit(3))));
    }
}
