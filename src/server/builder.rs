//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use tracing::info;

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
pub async fn run_server() -> Result<()> {
    info!("🚀 Starting telegate gateway");

    let config_path = "config/gateway.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("✅ Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "⚠️  No usable configuration file ({}), falling back to environment and defaults",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "🌐 Gateway starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("📋 API Endpoints:");
    info!("   GET  /vehicles/:id - Vehicle info");
    info!("   GET  /vehicles/:id/doors - Door security status");
    info!("   GET  /vehicles/:id/fuel - Fuel level");
    info!("   GET  /vehicles/:id/battery - Battery level");
    info!("   POST /vehicles/:id/engine - Start/stop engine");

    server.start().await
}
