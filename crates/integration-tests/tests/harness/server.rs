//! Test server wrapper that starts voxgate on a random port

use std::{net::SocketAddr, sync::Arc};

use tokio_util::sync::CancellationToken;
use tts::SpeechEngine;
use voxgate_config::Config;
use voxgate_server::Server;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server that spawns the configured engine program
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::serve(Server::new(&config)?).await
    }

    /// Start a test server around an in-process engine
    pub async fn start_with_engine(config: Config, engine: Arc<dyn SpeechEngine>) -> anyhow::Result<Self> {
        Self::serve(Server::with_engine(&config, engine)?).await
    }

    async fn serve(server: Server) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
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

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// POST a JSON speech request
    pub async fn speech(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/v1/audio/speech"))
            .json(&body)
            .send()
            .await
            .expect("request must reach the test server")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
