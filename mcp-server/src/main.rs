//! Flowerly MCP Server
//!
//! This MCP server lets an AI agent use Flowerly as a logged-in user.
//! It reads its settings from environment variables (or `.env`) and exposes tools for:
//! - Logging in and out
//! - Browsing the feed page by page
//! - Posting, editing, liking and commenting
//! - Viewing and editing the profile

mod context;
mod render;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::FlowerlyServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Flowerly MCP server");

    let server = FlowerlyServer::from_env().await?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}
