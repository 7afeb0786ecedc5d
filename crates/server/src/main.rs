//! vidscout-mcp server entry point.
//!
//! Boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::{Context, Result, anyhow};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;
use vidscout_client::{FetchConfig, HttpFetcher, Scraper, SearchService};
use vidscout_core::{AppConfig, CacheDb, DetailCache};

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let cache = CacheDb::open(&config.db_path)
        .await
        .map_err(|e| anyhow!("failed to open query cache at {}: {e}", config.db_path.display()))?;

    let fetcher = HttpFetcher::new(FetchConfig::from(&config)).context("failed to build HTTP client")?;
    let service = SearchService::new(Scraper::new(fetcher), cache).with_default_max_results(config.default_max_results);

    let details = DetailCache::new();
    let _sweeper = details.spawn_sweeper(config.detail_sweep_interval());

    tracing::info!(db_path = %config.db_path.display(), "Starting vidscout-mcp server on stdio transport");

    let handler = handler::VidscoutServer::new(service, details);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
