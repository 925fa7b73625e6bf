use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use tts::SpeechEngine;
use voxgate_config::Config;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration, spawning the configured engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the engine's
    /// speaker table cannot be loaded
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let tts_state = tts::build_server(config)?;
        Ok(Self::assemble(config, tts_state))
    }

    /// Build the server around an already loaded engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the engine reports
    /// no speakers
    pub fn with_engine(config: &Config, engine: Arc<dyn SpeechEngine>) -> anyhow::Result<Self> {
        config.validate()?;
        let tts_state = tts::build_server_with_engine(config, engine)?;
        Ok(Self::assemble(config, tts_state))
    }

    fn assemble(config: &Config, tts_state: Arc<tts::Server>) -> Self {
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(health_handler));
        }

        // Speech and catalog routes
        app = app.merge(tts::endpoint_router().with_state(tts_state));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Self {
            router: app,
            listen_address: config.server.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the configured listen address
    #[must_use]
    pub fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    async fn get_status(router: Router, path: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn default_config_serves_health_and_catalog() {
        let server = Server::new(&Config::default()).unwrap();
        assert_eq!(server.listen_address().to_string(), "0.0.0.0:8000");

        let router = server.into_router();
        assert_eq!(get_status(router.clone(), "/health").await, (StatusCode::OK, "ok".to_string()));

        let (status, body) = get_status(router, "/v1/audio/voices").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("EN_INDIA"), "{body}");
    }

    #[tokio::test]
    async fn health_route_follows_config() {
        let mut config = Config::default();
        config.server.health.path = "/healthz".to_string();
        let router = Server::new(&config).unwrap().into_router();
        assert_eq!(get_status(router.clone(), "/healthz").await.0, StatusCode::OK);
        assert_eq!(get_status(router, "/health").await.0, StatusCode::NOT_FOUND);

        config.server.health.enabled = false;
        let router = Server::new(&config).unwrap().into_router();
        assert_eq!(get_status(router, "/healthz").await.0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn health_path_on_an_endpoint_is_an_error() {
        let mut config = Config::default();
        config.server.health.path = "/v1/models".to_string();

        let err = Server::new(&config).err().unwrap();
        assert!(err.to_string().contains("server.health.path"), "{err}");
    }

    #[test]
    fn listen_address_can_be_overridden() {
        let addr: SocketAddr = "127.0.0.1:9100".parse().unwrap();
        let server = Server::new(&Config::default()).unwrap().with_listen_address(addr);
        assert_eq!(server.listen_address(), addr);
    }
}
