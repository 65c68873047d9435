//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the resolver from the configured rule source
//! - Bind the listener and start the metrics exporter
//! - Serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing is served
//! - Subsystems initialize in order, not concurrently

use axum::http::header::InvalidHeaderName;
use metrics_exporter_prometheus::BuildError;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::{load_rule_set, LoadError, ServerConfig};
use crate::http::{HostSource, HttpServer};
use crate::net::{self, ListenerError};
use crate::observability::metrics;
use crate::resolve::Resolver;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load rules: {0}")]
    Rules(#[from] LoadError),

    #[error("invalid host header: {0}")]
    HostHeader(#[from] InvalidHeaderName),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("invalid metrics address: {0}")]
    MetricsAddress(#[from] AddrParseError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Load the rule set and build the HTTP server, without binding anything.
pub fn build_server(config: &ServerConfig) -> Result<HttpServer, StartupError> {
    let rules = load_rule_set(&config.resolver)?;
    let host_source = HostSource::from_name(&config.resolver.host_header)?;

    tracing::info!(
        rules = rules.len(),
        host_source = ?host_source,
        "Resolver ready"
    );

    Ok(HttpServer::new(
        Resolver::new(rules),
        host_source,
        &config.timeouts,
    ))
}

/// Start every subsystem and serve until `shutdown` fires.
pub async fn run(
    config: ServerConfig,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), StartupError> {
    let server = build_server(&config)?;
    let listener = net::bind(&config.listener).await?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    server.run(listener, shutdown).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_server_with_default_rules() {
        let server = build_server(&ServerConfig::default()).unwrap();
        assert_eq!(server.rule_count(), 1);
    }

    #[test]
    fn test_bad_rule_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "^only three fields").unwrap();

        let mut config = ServerConfig::default();
        config.resolver.rule_file = Some(file.path().to_path_buf());

        let err = build_server(&config).unwrap_err();
        assert!(matches!(err, StartupError::Rules(LoadError::FieldCount { count: 3, .. })));
    }

    #[test]
    fn test_empty_rule_file_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# rules moved elsewhere").unwrap();

        let mut config = ServerConfig::default();
        config.resolver.rule_file = Some(file.path().to_path_buf());

        let err = build_server(&config).unwrap_err();
        assert!(matches!(err, StartupError::Rules(LoadError::Empty { .. })));
    }

    #[test]
    fn test_bad_host_header_is_fatal() {
        let mut config = ServerConfig::default();
        config.resolver.host_header = "bad header".into();
        assert!(matches!(
            build_server(&config),
            Err(StartupError::HostHeader(_))
        ));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();

        let shutdown = crate::lifecycle::Shutdown::new();
        let handle = tokio::spawn(run(config, shutdown.subscribe()));

        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
