//! Test server wrapper that starts the backend on a random port

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use perugo_config::Config;
use perugo_rdf::{DestinoRecord, DestinoSource, RdfState};
use perugo_server::Server;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::spawn(Server::new(&config)?).await
    }

    /// Start a test server whose graph routes read `destinations` from memory
    pub async fn start_with_destinations(config: Config, destinations: Vec<DestinoRecord>) -> anyhow::Result<Self> {
        let state = RdfState::new(Box::new(MemorySource(destinations)), 10);
        Self::spawn(Server::with_rdf_state(&config, Some(Arc::new(state)))?).await
    }

    async fn spawn(server: Server) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind here so the actual port is known
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown,
            client: reqwest::Client::new(),
        })
    }

    /// URL of `path` on the running test server
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

/// Destinations held in memory, newest first
struct MemorySource(Vec<DestinoRecord>);

#[async_trait::async_trait]
impl DestinoSource for MemorySource {
    async fn recent(&self, limit: u32) -> perugo_rdf::Result<Vec<DestinoRecord>> {
        Ok(self.0.iter().take(limit as usize).cloned().collect())
    }

    async fn by_slug(&self, slug: &str) -> perugo_rdf::Result<Option<DestinoRecord>> {
        Ok(self.0.iter().find(|d| d.slug.as_deref() == Some(slug)).cloned())
    }
}
