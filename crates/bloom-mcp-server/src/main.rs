use std::path::PathBuf;
use std::sync::Arc;

use bloom_graphql::HttpClient;
use bloom_mcp_server::server::Server;
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use runtime::Config;
use tracing::info;

mod runtime;

/// Clap styling
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Arguments to the MCP server
#[derive(Debug, clap::Parser)]
#[command(
    version,
    styles = STYLES,
    about = "Bloom MCP Server - explore and call the Bloom Growth GraphQL API from an AI agent",
)]
struct Args {
    /// Path to the config file
    ///
    /// Without one, configuration comes from `BLOOM_API_URL`, `BLOOM_API_TOKEN` and
    /// `BLOOM_MCP_*` environment variables.
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config: Config = match Args::parse().config {
        Some(config_path) => runtime::read_config(config_path)?,
        None => runtime::read_config_from_env()?,
    };

    let _guard = config.logging.setup()?;

    info!(
        "Bloom MCP Server v{} // connecting to {}",
        std::env!("CARGO_PKG_VERSION"),
        config.endpoint.as_deref().unwrap_or("<no endpoint>")
    );

    let client = HttpClient::builder()
        .maybe_endpoint(config.endpoint_url())
        .maybe_token(config.token)
        .headers(config.headers)
        .maybe_timeout(config.timeout)
        .build()?;

    Ok(Server::builder()
        .transport(config.transport)
        .client(Arc::new(client))
        .root_types(config.root_types)
        .build()
        .start()
        .await?)
}
