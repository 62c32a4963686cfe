//! Web server for Stowage.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::catalog::start_expiry_sweeper;
use crate::config::Config;

use super::handlers::{AppState, SharedDatabase};
use super::router::{create_health_router, create_router, create_swagger_router};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
    /// Sweep settings.
    sweep_enabled: bool,
    sweep_interval_secs: u64,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: SharedDatabase) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let app_state = AppState::new(db, config.quota.reclaim_on_delete);

        Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
            sweep_enabled: config.sweep.enabled,
            sweep_interval_secs: config.sweep.interval_secs,
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router())
    }

    /// Start the expiry sweep background task.
    fn start_sweep_task(&self) {
        if !self.sweep_enabled {
            tracing::info!("Expiry sweep disabled by configuration");
            return;
        }
        start_expiry_sweeper(
            self.app_state.db.clone(),
            self.sweep_interval_secs,
            self.app_state.reclaim_on_delete,
        );
        tracing::info!(
            "Expiry sweep task started (runs every {} seconds)",
            self.sweep_interval_secs
        );
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        // Start the sweep only after a successful bind
        self.start_sweep_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        self.start_sweep_task();

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
