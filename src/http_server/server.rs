//! # HTTP Server
//!
//! Combines the blog routes, the health probe and the upload file server
//! into one router.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::blog_routes::{blog_routes, BlogState};
use super::config::ServerConfig;
use super::health_routes::health_routes;

/// HTTP server for the blog
pub struct HttpServer {
    config: ServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: ServerConfig) -> Self {
        let state = Arc::new(BlogState::from_config(&config));
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router
    pub fn build_router(config: &ServerConfig, state: Arc<BlogState>) -> Router {
        Router::new()
            .merge(health_routes(state.clone()))
            .merge(blog_routes(state))
            .nest_service("/uploads", ServeDir::new(&config.upload_dir))
            .layer(DefaultBodyLimit::max(config.max_payload_bytes))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        info!(
            addr = %addr,
            data_file = %self.config.data_file.display(),
            upload_dir = %self.config.upload_dir.display(),
            sites_dir = %self.config.sites_dir.display(),
            "blog server listening"
        );
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
