//! gql-fetch - send a GraphQL query over HTTP and print the outcome.

mod cli;

use cli::Cli;
use gql_fetch::config::{Config, EndpointConfig};
use gql_fetch::error::{FetchError, Result};
use gql_fetch::logging;
use gql_fetch::query::{OutcomeSlots, QueryExecutor, QueryWatcher};
use gql_fetch::transport::{GraphQlTransport, HttpTransport};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    logging::init_stderr_logging();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let endpoint = resolve_endpoint(&cli)?;
    info!("Endpoint: {}", endpoint.display_string());

    if let Some(warning) = development_warning(&endpoint) {
        warn!("{}", warning);
    }

    let transport: Arc<dyn GraphQlTransport> = Arc::new(HttpTransport::new()?);

    if cli.watch {
        return watch_stdin(&cli, endpoint, transport).await;
    }

    let query = cli.read_query()?;
    if query.is_none() {
        warn!("No query given; sending a null query");
    }

    let outcome = QueryExecutor::new(&endpoint, transport.as_ref())
        .execute(query.as_deref())
        .await;
    print_json(&mut std::io::stdout().lock(), &outcome)
}

/// Resolves the endpoint configuration with precedence:
/// 1. CLI arguments (highest)
/// 2. Config file
/// 3. Environment variables
fn resolve_endpoint(cli: &Cli) -> Result<EndpointConfig> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let file = Config::load_from_file(&config_path)?.endpoint;

    Ok(EndpointConfig::resolve(file, &cli.to_endpoint_config()?))
}

/// The HTTP transport cannot send a relative URL, so development mode fails
/// every query unless something in front of this process rewrites it.
fn development_warning(endpoint: &EndpointConfig) -> Option<String> {
    endpoint.mode().is_development().then(|| {
        format!(
            "Development mode sends the relative endpoint '{}'; without a proxy in front \
             of this process the HTTP request cannot be sent and every query fails",
            endpoint.endpoint.as_deref().unwrap_or_default()
        )
    })
}

/// Runs one query per stdin line, re-issuing only when the line changes.
async fn watch_stdin(
    cli: &Cli,
    endpoint: EndpointConfig,
    transport: Arc<dyn GraphQlTransport>,
) -> Result<()> {
    let mut watcher =
        QueryWatcher::new(Arc::new(endpoint), transport).with_policy(cli.stale_policy());

    let publications = watcher.publications();
    let printer = tokio::spawn(async move {
        print_publications(publications, &mut std::io::stdout()).await
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| FetchError::internal(format!("Failed to read stdin: {e}")))?
    {
        if let Some(handle) = watcher.set_query(line.as_str()) {
            in_flight.push(handle);
        }
    }

    for handle in in_flight {
        if let Err(e) = handle.await {
            warn!("Query task ended abnormally: {}", e);
        }
    }

    // Dropping the watcher closes the stream once every task has finished.
    drop(watcher);
    let printed = printer
        .await
        .map_err(|e| FetchError::internal(format!("Printer task failed: {e}")))?;
    info!("Printed {} publications", printed);
    Ok(())
}

/// Prints each publication until the stream ends; returns how many were printed.
async fn print_publications<W: Write>(
    mut publications: mpsc::UnboundedReceiver<OutcomeSlots>,
    out: &mut W,
) -> usize {
    let mut printed = 0;
    while let Some(slots) = publications.recv().await {
        match print_json(out, &slots) {
            Ok(()) => printed += 1,
            Err(e) => error!("{}", e),
        }
    }
    printed
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| FetchError::internal(format!("Failed to encode outcome: {e}")))?;
    writeln!(out, "{json}")
        .map_err(|e| FetchError::internal(format!("Failed to write outcome: {e}")))
}
