//! Server Implementation
//!
//! HTTP server startup and shutdown

use crate::core::{Config, ServerState};
use crate::services::{HttpService, build_app};
use crate::utils::AppResult;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with an already initialized state
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    /// Serve until Ctrl-C
    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = build_app(state)?;

        tracing::info!(
            port = self.config.http_port,
            environment = %self.config.environment,
            timezone = %self.config.timezone,
            "Order server starting"
        );

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        HttpService::new(self.config.clone())
            .start_server(app, shutdown)
            .await
    }
}
