//! MCP server implementation for Dolibarr.
//!
//! This module provides the MCP protocol server that exposes Dolibarr CRM
//! resources to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::DolibarrMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the Dolibarr MCP server with stdio transport.
///
/// Communicates via stdin/stdout using the MCP protocol and returns once the
/// client disconnects.
pub async fn run_server(server: DolibarrMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
