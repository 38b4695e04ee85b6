use crate::error::PagerError;
use model::{
    pagination::{codec, cursor::Cursor, sort::SortDirection},
    records::row::RowData,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
/// The look-ahead row must still fit in a `LIMIT` bound as `int8`.
pub const MAX_PAGE_SIZE: usize = i64::MAX as usize - 1;

/// Equality filters keyed by client field name (or column name).
pub type Filters = BTreeMap<String, serde_json::Value>;

/// A list request as received from the route layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default)]
    pub filters: Filters,
    #[serde(default)]
    pub sort_field: Option<String>,
    /// Kept as text so that unknown directions fall back to ascending.
    #[serde(default)]
    pub sort_direction: Option<String>,
    /// Opaque token from a previous response's `nextCursor`.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Free-text query; when non-blank the cursor contract is bypassed.
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page_size: DEFAULT_PAGE_SIZE,
            filters: Filters::new(),
            sort_field: None,
            sort_direction: None,
            cursor: None,
            search: None,
        }
    }
}

impl PageRequest {
    pub fn direction(&self) -> SortDirection {
        SortDirection::parse_lenient(self.sort_direction.as_deref())
    }

    /// Decodes the cursor token; unusable tokens mean "first page".
    pub fn decoded_cursor(&self) -> Option<Cursor> {
        codec::decode_opt(self.cursor.as_deref())
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// One page of rows in `(sort column, id)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub rows: Vec<RowData>,
    /// Position of the last row, or `None` on the last page.
    pub next_cursor: Option<Cursor>,
}

impl Page {
    pub fn has_next(&self) -> bool {
        self.next_cursor.is_some()
    }

    pub fn next_token(&self) -> Result<Option<String>, PagerError> {
        Ok(self.next_cursor.as_ref().map(codec::encode).transpose()?)
    }
}

/// Wire shape of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageResponse {
    Page {
        rows: Vec<serde_json::Value>,
        #[serde(rename = "nextCursor")]
        next_cursor: Option<String>,
    },
    Error {
        error: String,
    },
}

impl PageResponse {
    pub fn from_page(page: &Page) -> Self {
        match page.next_token() {
            Ok(next_cursor) => PageResponse::Page {
                rows: page.rows.iter().map(RowData::to_json).collect(),
                next_cursor,
            },
            Err(err) => PageResponse::from_error(&err),
        }
    }

    pub fn from_error(err: &PagerError) -> Self {
        PageResponse::Error {
            error: err.to_string(),
        }
    }
}

impl From<Result<Page, PagerError>> for PageResponse {
    fn from(result: Result<Page, PagerError>) -> Self {
        match result {
            Ok(page) => PageResponse::from_page(&page),
            Err(err) => PageResponse::from_error(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectors::sql::base::error::DbError;
    use model::{core::value::Value, pagination::cursor::SortValue};
    use serde_json::json;

    #[test]
    fn test_request_defaults() {
        let request: PageRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.direction(), SortDirection::Asc);
        assert_eq!(request.decoded_cursor(), None);
        assert_eq!(request.search_text(), None);
    }

    #[test]
    fn test_request_camel_case_fields() {
        let request: PageRequest = serde_json::from_value(json!({
            "pageSize": 5,
            "filters": {"status": "active"},
            "sortField": "price",
            "sortDirection": "DESC",
            "cursor": "{\"id\":7,\"sortValue\":{\"kind\":\"int\",\"value\":3}}",
            "search": "  "
        }))
        .unwrap();

        assert_eq!(request.page_size, 5);
        assert_eq!(request.direction(), SortDirection::Desc);
        assert_eq!(
            request.decoded_cursor(),
            Some(Cursor::with_sort_value(7, SortValue::Int(3)))
        );
        assert_eq!(request.search_text(), None);
    }

    #[test]
    fn test_response_shapes() {
        let page = Page {
            rows: vec![RowData::new("products", vec![]).with("id", Value::Int(1))],
            next_cursor: Some(Cursor::from_id(1)),
        };
        assert_eq!(
            serde_json::to_value(PageResponse::from_page(&page)).unwrap(),
            json!({"rows": [{"id": 1}], "nextCursor": "{\"id\":1}"})
        );

        let last = Page {
            rows: vec![],
            next_cursor: None,
        };
        assert_eq!(
            serde_json::to_value(PageResponse::from_page(&last)).unwrap(),
            json!({"rows": [], "nextCursor": null})
        );

        let failed = PageResponse::from(Err(PagerError::Query(DbError::Unknown(
            "connection reset".into(),
        ))));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"error": "Query failed: Unknown error: connection reset"})
        );
    }

    #[test]
    fn test_response_deserializes_either_shape() {
        let ok: PageResponse = serde_json::from_value(json!({"rows": [], "nextCursor": null})).unwrap();
        assert!(matches!(ok, PageResponse::Page { .. }));

        let err: PageResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(err, PageResponse::Error { error: "boom".into() });
    }
}
