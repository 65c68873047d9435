//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use godirect::config::ServerConfig;
use godirect::lifecycle::{self, Shutdown};

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Build a server from `config` and serve it on `127.0.0.1:0`.
pub async fn start_server(config: ServerConfig) -> TestServer {
    let server = lifecycle::build_server(&config).expect("server builds");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer { addr, shutdown }
}

/// HTTP client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

/// Extract the go-import `content` attribute from a response body.
#[allow(dead_code)]
pub fn go_import_content(body: &str) -> Option<&str> {
    let start = body.find(r#"content=""#)? + r#"content=""#.len();
    let end = body[start..].find('"')?;
    Some(&body[start..start + end])
}
