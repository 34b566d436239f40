//! Web server for DevDrop.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::{DevDropError, Result};

use super::router::create_router;
use super::state::AppState;

/// HTTP server bound to the configured address.
pub struct WebServer {
    addr: SocketAddr,
    app_state: Arc<AppState>,
    max_upload_bytes: usize,
}

impl WebServer {
    /// Create a server, opening every store named in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| DevDropError::Config(format!("invalid server address: {e}")))?;
        let app_state = AppState::from_config(config)?;

        Ok(Self::with_state(addr, app_state, config.max_upload_bytes()))
    }

    /// Create a server around prepared state.
    pub fn with_state(addr: SocketAddr, app_state: AppState, max_upload_bytes: usize) -> Self {
        Self {
            addr,
            app_state: Arc::new(app_state),
            max_upload_bytes,
        }
    }

    /// Get the configured address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Run the web server until it fails.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = create_router(self.app_state, self.max_upload_bytes);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("DevDrop running at http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = create_router(self.app_state, self.max_upload_bytes);

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("DevDrop running at http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
