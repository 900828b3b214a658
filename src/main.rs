//! CRM LLM Tools - Main entry point
//!
//! Serves the CRM tools over MCP stdio. `crm-llm-tools schemas <adapter>`
//! prints the schema list for one adapter instead.

use anyhow::{bail, Result};
use crm_llm_tools::{AdapterKind, Config, CrmMcpServer, Toolkit};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting CRM tools with API URL: {}", config.crm_api_url);

    let toolkit = match Toolkit::new(config) {
        Ok(toolkit) => toolkit,
        Err(e) => {
            error!("Failed to build toolkit: {}", e);
            return Err(e.into());
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {}
        [command, adapter] if command == "schemas" => {
            let kind: AdapterKind = adapter.parse().map_err(anyhow::Error::msg)?;
            let schemas = toolkit.schemas(kind)?;
            println!("{}", serde_json::to_string_pretty(&schemas)?);
            return Ok(());
        }
        _ => bail!("Usage: crm-llm-tools [schemas <function-calling|tool-use|mcp>]"),
    }

    let server = CrmMcpServer::new(&toolkit)?;

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    crm_llm_tools::server::run_server(server).await?;

    info!(
        "CRM tools shutdown complete: {:?}",
        toolkit.metrics().summary()
    );
    Ok(())
}
