//! Dolibarr MCP Server - Main entry point
//!
//! Serves the Dolibarr ERP/CRM REST API as Model Context Protocol tools over stdio.

use anyhow::{Context, Result};
use dolibarr_mcp_server::client::{AsyncDolibarrClient, AsyncDolibarrClientImpl};
use dolibarr_mcp_server::{Config, DolibarrClient, DolibarrMcpServer, Repositories};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries MCP frames
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting Dolibarr MCP Server with API URL: {}",
        config.dolibarr_api_url
    );
    info!("API key: {}", config.masked_api_key());
    info!(
        "Defaults: limit={}, sort_order={}, agenda_limit={}, timeout={}s, event_owner={}",
        config.default_limit,
        config.default_sort_order,
        config.default_agenda_limit,
        config.request_timeout,
        config.default_event_owner_id
    );

    let http = Arc::new(AsyncDolibarrClientImpl::new(DolibarrClient::new(&config)));
    let metrics = http.metrics().clone();
    let client = http as Arc<dyn AsyncDolibarrClient>;

    let repos = Repositories::new(client, &config);

    // Fail fast on a wrong URL or key rather than on the first tool call
    repos
        .contacts
        .search(None, Some(1), None)
        .await
        .context("Dolibarr connection check failed")?;
    info!("Connection to Dolibarr verified");

    let server = DolibarrMcpServer::new(repos, &config);
    info!(
        "Dolibarr MCP Server initialized with {} tools",
        server.tool_names().len()
    );

    info!("Starting MCP server with stdio transport");
    dolibarr_mcp_server::server::run_server(server).await?;

    info!("Dolibarr API traffic: {}", metrics.summary());
    info!("Dolibarr MCP Server shutdown complete");
    Ok(())
}
