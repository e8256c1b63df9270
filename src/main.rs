//! sitedev - local development server for the static booking site
//!
//! Serves the working directory over HTTP with dev cache headers and CORS,
//! and proxies the booking widget's API calls.

use clap::Parser;
use sitedev::config::{AppState, Config};
use sitedev::{logger, server};
use std::sync::Arc;

/// Serve the site from the working directory and proxy booking API calls
#[derive(Parser, Debug)]
#[command(name = "sitedev", version, about)]
struct Args {
    /// Port to listen on
    port: Option<u16>,

    /// Config file base name (TOML, optional)
    #[arg(long, default_value = "config", value_name = "PATH")]
    config: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut cfg = Config::load_from(&args.config)?;
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    logger::init(
        cfg.logging.access_log_file.as_deref(),
        cfg.logging.error_log_file.as_deref(),
    )?;

    // One request at a time: a single-threaded runtime is all this needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run(cfg))
}

async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.socket_addr()?;
    let listener = server::create_listener(addr)
        .map_err(|e| format!("Failed to start server on {addr}: {e}"))?;

    logger::log_server_start(&addr, &cfg.upstream);

    let state = Arc::new(AppState::new(cfg)?);
    server::serve(listener, state).await?;
    Ok(())
}
