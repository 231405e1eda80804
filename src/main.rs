//! Generic Proxy server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                ┌──────────────────────────────────────────────┐
//!     GET /generic_proxy/   │                 GENERIC PROXY                │
//!       <encoded-url>       │                                              │
//!     ──────────────────────┼─▶ http::server ──▶ proxy::handler            │
//!                           │   (request id,      │ method check           │
//!                           │    trace span)      │ target validation      │
//!                           │                     ▼                        │
//!                           │                proxy::fetch ─────────────────┼──▶ Origin
//!                           │                (deadline, size guard)        │
//!     ◀─────────────────────┼── status + allow-listed headers + body ◀─────┼───
//!                           │                                              │
//!                           │   config · observability · lifecycle         │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use generic_proxy::config::ObservabilityConfig;
use generic_proxy::lifecycle::{signals, startup, Shutdown};
use generic_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "generic-proxy")]
#[command(about = "Fetch-and-relay proxy for arbitrary http/https resources", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match startup::resolve_config(cli.config.as_deref(), cli.bind) {
        Ok(config) => config,
        Err(e) => {
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("generic-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        timeout_ms = config.fetch.timeout_ms,
        max_response_size = config.fetch.max_response_size,
        user_agent = %config.fetch.user_agent,
        "Configuration loaded"
    );

    let (server, listener) = startup::start(config).await?;

    let shutdown = Shutdown::new();
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            result??;
        }
        _ = signals::wait_for_shutdown() => {
            shutdown.trigger();
            server_task.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
