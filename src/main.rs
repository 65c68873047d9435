//! godirectd: an HTTP server responding to `?go-get=1` queries.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ net listener ──▶ http server ──▶ resolve
//!                                        │              (first matching rule,
//!                                        │               template expansion)
//!     Client Response                    ▼
//!     ◀────────────── access log ◀── response (HTML go-import / text error)
//! ```
//!
//! See <https://go.dev/ref/mod#vcs-find> for the protocol.

use clap::Parser;

use godirect::cli::Cli;
use godirect::lifecycle::{self, signals::wait_for_shutdown_signal, Shutdown};
use godirect::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability)?;

    tracing::info!("godirectd v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rule_file = ?config.resolver.rule_file,
        host_header = %config.resolver.host_header,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    if let Err(e) = lifecycle::run(config, server_shutdown).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
