//! # telegate
//!
//! A vehicle telematics gateway written in Rust. It fronts a third-party
//! telematics provider and exposes a simple, consistent REST contract:
//! flat typed responses, a fixed error taxonomy, and a bounded retry
//! policy on the engine start/stop command.
//!
//! ## Features
//!
//! - **Normalized responses**: the vendor's value-wrapped JSON is reshaped
//!   into flat domain objects at a single boundary
//! - **Closed error taxonomy**: every failure is classified into one of a
//!   fixed set of structured error envelopes with stable codes
//! - **Bounded retries**: transient engine action failures are retried up
//!   to a fixed budget, with guaranteed termination
//! - **Explicit configuration**: one config struct, so tests can point the
//!   gateway at a stub vendor
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telegate::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::types::{
    ActionResult, ActionStatus, DoorStatus, EnergyLevel, EngineAction, VehicleInfo,
};
pub use utils::error::{ApiError, ErrorKind, GatewayError, Result};

use tracing::info;

/// A minimal gateway facade over the HTTP server.
pub struct Gateway {
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting telegate gateway");

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
