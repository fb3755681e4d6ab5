//! Configuration management for the gateway.
//!
//! All tunables live in one explicit [`Config`] passed into the server at
//! construction time, so tests can point the gateway at a stub vendor
//! endpoint instead of the real service.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::utils::error::{GatewayError, Result};

/// Default upstream endpoint for the telematics vendor.
pub const DEFAULT_VENDOR_URL: &str = "http://gmapi.azurewebsites.net";

/// Main configuration struct for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {e}")))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {e}")))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = GatewayConfig::default();

        if let Ok(host) = std::env::var("GATEWAY_HOST") {
            gateway.server.host = host;
        }
        if let Ok(port) = std::env::var("GATEWAY_PORT") {
            gateway.server.port = port
                .parse()
                .map_err(|_| GatewayError::Config(format!("Invalid GATEWAY_PORT: {port}")))?;
        }
        if let Ok(base_url) = std::env::var("VENDOR_BASE_URL") {
            gateway.vendor.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("VENDOR_TIMEOUT_SECS") {
            gateway.vendor.request_timeout_secs = timeout.parse().map_err(|_| {
                GatewayError::Config(format!("Invalid VENDOR_TIMEOUT_SECS: {timeout}"))
            })?;
        }

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get vendor configuration
    pub fn vendor(&self) -> &VendorConfig {
        &self.gateway.vendor
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {e}")))?;

        self.gateway
            .vendor
            .validate()
            .map_err(|e| GatewayError::Config(format!("Vendor config error: {e}")))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}

/// Gateway configuration, mirroring the layout of the YAML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub vendor: VendorConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// CORS configuration. Disabled by default; an empty origin list with CORS
/// enabled allows any origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allowed_origins: Vec<String>,
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

/// Upstream vendor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Base URL of the vendor service.
    pub base_url: String,
    /// Per-call timeout; the vendor offers no cancellation contract, so
    /// expiry is treated as an upstream failure.
    pub request_timeout_secs: u64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VENDOR_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl VendorConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("base_url is not a valid URL: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url scheme must be http or https, got {}", url.scheme()));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}
