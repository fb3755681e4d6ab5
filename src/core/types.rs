//! Normalized domain model served to gateway clients.
//!
//! These are the flat, typed shapes the REST surface speaks. They are
//! independent of the vendor wire format; nothing in here knows about
//! value-wrapped fields or string-encoded booleans.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Static vehicle details.
///
/// `door_count` is a binary classification: 4 when the vendor flags the
/// vehicle as a four-door sedan, 2 otherwise. No other door counts exist
/// in this domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInfo {
    pub vin: String,
    pub color: String,
    pub door_count: u8,
    pub drive_train: String,
}

/// Lock state of a single door.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoorStatus {
    pub location: String,
    pub locked: bool,
}

/// Remaining fuel or battery charge as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyLevel {
    pub percent: f64,
}

/// Engine command accepted on the action endpoint.
///
/// Input is case-insensitive; anything that does not uppercase to `START`
/// or `STOP` is rejected before the vendor is contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineAction {
    Start,
    Stop,
}

/// Rejection for action values outside the accepted set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("engine action must be START or STOP")]
pub struct InvalidEngineAction;

impl FromStr for EngineAction {
    type Err = InvalidEngineAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "START" => Ok(EngineAction::Start),
            "STOP" => Ok(EngineAction::Stop),
            _ => Err(InvalidEngineAction),
        }
    }
}

/// Per-attempt outcome reported by the vendor for an engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionStatus {
    Executed,
    Failed,
}

impl ActionStatus {
    pub fn is_executed(self) -> bool {
        matches!(self, ActionStatus::Executed)
    }
}

/// Final result of an engine action after the retry protocol has run.
///
/// `FAILED` here is a legitimate terminal outcome, not a transport fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub status: ActionStatus,
}
