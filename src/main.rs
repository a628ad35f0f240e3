//! Mux-hosted service.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                 mux-server                   │
//!                          │                                              │
//!   Client Request         │  ┌─────────┐   ┌──────────┐   ┌──────────┐   │
//!   ───────────────────────┼─▶│  axum   │──▶│   Mux    │──▶│  route   │   │
//!                          │  │ (trace, │   │ (lookup, │   │  chain   │   │
//!                          │  │ timeout)│   │  log)    │   │ + handler│   │
//!                          │  └─────────┘   └────┬─────┘   └──────────┘   │
//!                          │                     │ no match               │
//!   Client Response        │                     ▼                        │
//!   ◀──────────────────────┼──────────────── 404 Not Found                │
//!                          └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use service_mux::config::{self, MuxConfig};
use service_mux::lifecycle::{startup, Shutdown};
use service_mux::observability::logging;
use service_mux::HttpServer;

#[derive(Parser)]
#[command(name = "mux-server")]
#[command(about = "HTTP service hosted on the request multiplexer", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port, overriding the configured bind address port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => MuxConfig::default(),
    };

    if let Some(port) = cli.port {
        let mut addr: std::net::SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    logging::init_logging(&config.logging)?;

    tracing::info!(
        service = %config.server.name,
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    // Registration errors end the process here, before anything listens.
    let mux = startup::build_mux(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let _signals = shutdown.trigger_on_signal();

    let server = HttpServer::new(config, mux);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
