use crate::{
    commands::{Commands, PageArgs, to_filters},
    conn::{ConnectionPinger, PostgresConnectionPinger},
    error::CliError,
    output::{print_json, print_line},
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use model::pagination::{codec, cursor::Cursor, sort::SortDirection};
use pager::{
    entity::EntityKind,
    error::PagerError,
    pager::Pager,
    request::{Page, PageResponse},
};
use pager_config::{env::EnvManager, settings::PagerSettings};
use std::{future::Future, path::PathBuf, time::Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod conn;
mod error;
mod output;
mod shutdown;
mod source;

#[derive(Parser)]
#[command(
    name = "keyset",
    version = "0.1.0",
    about = "Keyset pagination over products, orders and purchases"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Load variables from this .env file")]
    env_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Page over a JSON data file instead of the database"
    )]
    data: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => ExitCode::Success,
        Err(CliError::ShutdownRequested) => ExitCode::ShutdownRequested,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = &cli.env_file {
        env.load_from_file(path)?;
    }
    let settings = PagerSettings::from_env(&env)?;

    init_tracing(&settings.log_level);
    debug!(
        page_size = settings.page_size,
        search_limit = settings.search_limit,
        timeout_ms = settings.query_timeout.as_millis() as u64,
        database = settings.database_url_redacted().unwrap_or_default(),
        "Loaded settings"
    );

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();
    let cancelled = shutdown.cancel_token();

    tokio::select! {
        result = execute(cli.command, cli.data, &settings) => result,
        _ = cancelled.cancelled() => Err(CliError::ShutdownRequested),
    }
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level; logs go to stderr so stdout stays JSON.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn execute(
    command: Commands,
    data: Option<PathBuf>,
    settings: &PagerSettings,
) -> Result<(), CliError> {
    match command {
        Commands::TestConn { conn_str } => {
            let conn_str = match conn_str {
                Some(conn_str) => conn_str,
                None => settings.require_database_url()?.to_string(),
            };
            PostgresConnectionPinger { conn_str }.ping().await?;
            print_json(&serde_json::json!({ "ok": true }))
        }
        Commands::Page { query, cursor } => {
            let pager = open_pager(settings, data, query.entity).await?;
            let cursor = codec::decode_opt(cursor.as_deref());
            let result = fetch_page(&pager, &query, settings, cursor.as_ref()).await;
            respond(result)
        }
        Commands::Search {
            entity,
            query,
            filters,
        } => {
            let pager = open_pager(settings, data, entity).await?;
            let filters = to_filters(&filters);
            let result = with_timeout(settings.query_timeout, pager.search(&query, &filters)).await;
            respond(result)
        }
        Commands::Walk { query, max_pages } => {
            let pager = open_pager(settings, data, query.entity).await?;
            walk(&pager, &query, settings, max_pages).await
        }
    }
}

async fn open_pager(
    settings: &PagerSettings,
    data: Option<PathBuf>,
    entity: EntityKind,
) -> Result<Pager, CliError> {
    let adapter = source::open_adapter(settings, data.as_deref()).await?;
    Ok(Pager::new(adapter, entity).with_search_limit(settings.search_limit))
}

async fn fetch_page(
    pager: &Pager,
    query: &PageArgs,
    settings: &PagerSettings,
    cursor: Option<&Cursor>,
) -> Result<Page, PagerError> {
    let filters = to_filters(&query.filters);
    let direction = SortDirection::parse_lenient(query.dir.as_deref());
    let page_size = query.page_size.unwrap_or(settings.page_size);

    with_timeout(
        settings.query_timeout,
        pager.fetch_page(page_size, &filters, query.sort.as_deref(), direction, cursor),
    )
    .await
}

async fn walk(
    pager: &Pager,
    query: &PageArgs,
    settings: &PagerSettings,
    max_pages: usize,
) -> Result<(), CliError> {
    let mut cursor: Option<Cursor> = None;
    let mut pages = 0usize;
    let mut rows = 0usize;

    loop {
        if pages >= max_pages {
            let err = PagerError::WalkLimit(max_pages);
            print_line(&PageResponse::from_error(&err))?;
            return Err(err.into());
        }

        let page = match fetch_page(pager, query, settings, cursor.as_ref()).await {
            Ok(page) => page,
            Err(err) => {
                print_line(&PageResponse::from_error(&err))?;
                return Err(err.into());
            }
        };

        pages += 1;
        rows += page.rows.len();
        print_line(&PageResponse::from_page(&page))?;

        cursor = page.next_cursor;
        if cursor.is_none() {
            break;
        }
    }

    info!(entity = %query.entity, pages, rows, "Walk finished");
    Ok(())
}

async fn with_timeout<F>(limit: Duration, fetch: F) -> Result<Page, PagerError>
where
    F: Future<Output = Result<Page, PagerError>>,
{
    tokio::time::timeout(limit, fetch)
        .await
        .unwrap_or_else(|_| Err(PagerError::Timeout(limit.as_millis() as u64)))
}

/// Prints the response; a failed fetch prints `{"error": ...}` and still fails the command.
fn respond(result: Result<Page, PagerError>) -> Result<(), CliError> {
    match result {
        Ok(page) => print_json(&PageResponse::from_page(&page)),
        Err(err) => {
            print_json(&PageResponse::from_error(&err))?;
            Err(err.into())
        }
    }
}
