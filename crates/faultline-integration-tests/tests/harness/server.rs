//! Test server wrapper that starts Faultline on a random port

use std::net::SocketAddr;

use axum::Router;
use faultline_config::Config;
use faultline_server::Server;
use tokio_util::sync::CancellationToken;

use super::routes::failure_routes;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a server with the failure-raising test routes
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::start_with_routes(config, failure_routes()).await
    }

    /// Start a server around the given routes, bound to port 0
    pub async fn start_with_routes(config: Config, routes: Router) -> anyhow::Result<Self> {
        let server = Server::with_routes(&config, routes)?;
        let shutdown = CancellationToken::new();

        // Bind here so the actual port is known
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let cancelled = shutdown.clone();
        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move { cancelled.cancelled().await })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// Absolute URL for a path on this server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
