use clap::{Args, Subcommand};
use pager::{entity::EntityKind, request::Filters};

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one page
    Page {
        #[command(flatten)]
        query: PageArgs,

        /// Cursor token from a previous page's `nextCursor`
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Follow cursors from the first page to the last, printing one page per line
    Walk {
        #[command(flatten)]
        query: PageArgs,

        #[arg(long, default_value_t = 1_000, help = "Stop after this many pages")]
        max_pages: usize,
    },
    /// Bounded free-text search; never returns a cursor
    Search {
        #[arg(long, value_parser = clap::value_parser!(EntityKind))]
        entity: EntityKind,

        #[arg(long)]
        query: String,

        #[arg(long = "filter", value_parser = parse_filter, help = "key=value, repeatable")]
        filters: Vec<(String, String)>,
    },
    /// Check that the configured database is reachable
    TestConn {
        /// Connection string; defaults to DATABASE_URL
        #[arg(long)]
        conn_str: Option<String>,
    },
}

#[derive(Args)]
pub struct PageArgs {
    #[arg(long, value_parser = clap::value_parser!(EntityKind))]
    pub entity: EntityKind,

    #[arg(long, help = "Rows per page; defaults to PAGER_PAGE_SIZE")]
    pub page_size: Option<usize>,

    #[arg(long, help = "Sort field, e.g. price or createdAt")]
    pub sort: Option<String>,

    #[arg(long, help = "asc or desc")]
    pub dir: Option<String>,

    #[arg(long = "filter", value_parser = parse_filter, help = "key=value, repeatable")]
    pub filters: Vec<(String, String)>,
}

pub fn to_filters(pairs: &[(String, String)]) -> Filters {
    pairs
        .iter()
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect()
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("paymentStatus=paid").unwrap(),
            ("paymentStatus".to_string(), "paid".to_string())
        );
        assert_eq!(
            parse_filter("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_filter("=paid").is_err());
        assert!(parse_filter("paid").is_err());
    }

    #[test]
    fn test_to_filters() {
        let filters = to_filters(&[("brandId".into(), "4".into())]);
        assert_eq!(filters.get("brandId"), Some(&serde_json::json!("4")));
    }
}
