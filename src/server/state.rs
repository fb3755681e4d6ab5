//! Application state shared across HTTP handlers.

use std::sync::Arc;

use crate::config::Config;
use crate::core::vendor::VendorClient;

/// HTTP server state shared across handlers.
///
/// Everything in here is read-only per request; the gateway keeps no
/// mutable state between requests.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Upstream vendor client
    pub vendor: Arc<VendorClient>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, vendor: VendorClient) -> Self {
        Self {
            config: Arc::new(config),
            vendor: Arc::new(vendor),
        }
    }
}
