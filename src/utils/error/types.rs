//! Error types for the gateway.

use thiserror::Error;
use tracing::error;

use crate::core::action::ActionError;
use crate::core::normalize::NormalizeError;
use crate::core::vendor::VendorError;

/// Result type alias for gateway startup and configuration paths.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Faults raised while loading configuration or running the server.
///
/// Request-level failures never use this type; they are classified into
/// [`ApiError`] and serialized for the client.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Server runtime errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Closed set of client-facing error categories. Serialized as the `type`
/// field of every error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoVehicleId,
    InvalidVehicleId,
    NoFuel,
    NoBattery,
    InvalidAction,
    InvalidMethod,
    InvalidRoute,
    UpstreamError,
}

/// A classified request failure.
///
/// Errors are plain data, not control flow: each variant carries its
/// context, fixes an HTTP status, and renders its client-facing `info`
/// text through `Display`. Handlers and tests pattern-match on the
/// variant rather than relying on thrown exceptions.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No vehicle ID was provided, please provide a vehicle ID and try again.")]
    NoVehicleId { path: String },

    #[error("Vehicle ID {id} is invalid, please check your vehicle ID and try again.")]
    InvalidVehicleId { id: String },

    #[error(
        "Vehicle ID {id} does not use fuel. Path /fuel is only valid for gas or hybrid vehicles. Did you mean /battery?"
    )]
    NoFuel { id: String },

    #[error(
        "Vehicle ID {id} does not use a battery. Path /battery is only valid for electric or hybrid vehicles. Did you mean /fuel?"
    )]
    NoBattery { id: String },

    #[error("Action {action} is invalid. Allowed actions are START and STOP for the /engine endpoint.")]
    InvalidAction { action: String },

    #[error("Method {method} is invalid for {path} - allowed methods are {}.", .allowed.join(", "))]
    InvalidMethod {
        method: String,
        path: String,
        allowed: &'static [&'static str],
    },

    #[error("Route {path} is invalid. Please check your route and try again.")]
    InvalidRoute { path: String },

    /// The `detail` is for the server log only; `Display` stays vendor-free.
    #[error("There was an error contacting the vehicle service, please try again later.")]
    Upstream { detail: String },
}

impl ApiError {
    /// Classify an upstream transport or payload fault, logging the detail
    /// that must not reach the client.
    pub fn upstream(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        error!(%detail, "upstream vendor failure");
        ApiError::Upstream { detail }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NoVehicleId { .. } => ErrorKind::NoVehicleId,
            ApiError::InvalidVehicleId { .. } => ErrorKind::InvalidVehicleId,
            ApiError::NoFuel { .. } => ErrorKind::NoFuel,
            ApiError::NoBattery { .. } => ErrorKind::NoBattery,
            ApiError::InvalidAction { .. } => ErrorKind::InvalidAction,
            ApiError::InvalidMethod { .. } => ErrorKind::InvalidMethod,
            ApiError::InvalidRoute { .. } => ErrorKind::InvalidRoute,
            ApiError::Upstream { .. } => ErrorKind::UpstreamError,
        }
    }

    /// Map a normalizer signal onto the request's vehicle id.
    pub fn from_normalize(err: NormalizeError, id: &str) -> Self {
        match err {
            NormalizeError::VehicleNotFound => ApiError::InvalidVehicleId { id: id.to_string() },
            NormalizeError::NoFuel => ApiError::NoFuel { id: id.to_string() },
            NormalizeError::NoBattery => ApiError::NoBattery { id: id.to_string() },
            NormalizeError::Malformed(detail) => ApiError::upstream(detail),
        }
    }

    /// Map a retry engine outcome onto the request's vehicle id.
    pub fn from_action(err: ActionError, id: &str) -> Self {
        match err {
            ActionError::VehicleNotFound => ApiError::InvalidVehicleId { id: id.to_string() },
            ActionError::Vendor(e) => ApiError::upstream(e.to_string()),
            ActionError::Malformed(detail) => ApiError::upstream(detail),
        }
    }
}

impl From<VendorError> for ApiError {
    fn from(err: VendorError) -> Self {
        ApiError::upstream(err.to_string())
    }
}
