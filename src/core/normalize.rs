//! Normalization from the vendor wire format to the domain model.
//!
//! Pure functions. Each one inspects the envelope's top-level status before
//! touching nested fields (the not-found path carries no payload), unwraps
//! the vendor's value wrappers, and coerces its string-typed scalars into
//! real booleans and numbers. Raw vendor strings never leak past this
//! module.

use serde_json::Value;
use thiserror::Error;

use crate::core::types::{ActionResult, ActionStatus, DoorStatus, EnergyLevel, VehicleInfo};
use crate::core::vendor::wire::{
    self, ActionEnvelope, EnergyData, Envelope, Field, InfoData, SecurityData,
};

/// Business signals the normalizer can raise. `Malformed` is the only
/// unexpected one; the rest are legitimate vendor answers this API treats
/// as client-facing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("vendor reports no such vehicle")]
    VehicleNotFound,
    #[error("vehicle does not use fuel")]
    NoFuel,
    #[error("vehicle does not have a battery")]
    NoBattery,
    #[error("malformed vendor payload: {0}")]
    Malformed(String),
}

fn payload<D>(envelope: Envelope<D>) -> Result<D, NormalizeError> {
    if envelope.status == wire::STATUS_NOT_FOUND {
        return Err(NormalizeError::VehicleNotFound);
    }
    envelope
        .data
        .ok_or_else(|| NormalizeError::Malformed("missing data payload".to_string()))
}

fn text(field: &Field, name: &str) -> Result<String, NormalizeError> {
    field
        .value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| NormalizeError::Malformed(format!("{name} is not a string")))
}

/// Strict boolean coercion: only the literal string `"True"` is true.
/// Anything else, including a real JSON boolean, reads as false rather
/// than being silently accepted.
fn flag(field: &Field) -> bool {
    field.value.as_str() == Some("True")
}

fn percent(field: &Field, name: &str) -> Result<f64, NormalizeError> {
    let parsed = match &field.value {
        Value::String(s) => s.parse::<f64>().ok(),
        other => other.as_f64(),
    };
    parsed.ok_or_else(|| NormalizeError::Malformed(format!("{name} is not numeric")))
}

/// Map a vehicle info envelope to [`VehicleInfo`].
pub fn vehicle_info(envelope: Envelope<InfoData>) -> Result<VehicleInfo, NormalizeError> {
    let data = payload(envelope)?;

    Ok(VehicleInfo {
        vin: text(&data.vin, "vin")?,
        color: text(&data.color, "color")?,
        door_count: if flag(&data.four_door_sedan) { 4 } else { 2 },
        drive_train: text(&data.drive_train, "driveTrain")?,
    })
}

/// Map a security status envelope to an ordered door list. Order and count
/// come from the vendor; no 2-or-4 enforcement happens here.
pub fn door_statuses(envelope: Envelope<SecurityData>) -> Result<Vec<DoorStatus>, NormalizeError> {
    let data = payload(envelope)?;

    data.doors
        .values
        .iter()
        .map(|door| {
            Ok(DoorStatus {
                location: text(&door.location, "door location")?,
                locked: flag(&door.locked),
            })
        })
        .collect()
}

fn energy_level(
    field: Option<&Field>,
    absent: NormalizeError,
    name: &str,
) -> Result<EnergyLevel, NormalizeError> {
    match field {
        // A missing field and a Null-typed field both mean the vehicle has
        // no such measurement.
        None => Err(absent),
        Some(f) if f.is_null() => Err(absent),
        Some(f) => Ok(EnergyLevel {
            percent: percent(f, name)?,
        }),
    }
}

/// Extract the fuel level, or [`NormalizeError::NoFuel`] for vehicles
/// without a tank.
pub fn fuel_level(envelope: Envelope<EnergyData>) -> Result<EnergyLevel, NormalizeError> {
    let data = payload(envelope)?;
    energy_level(data.tank_level.as_ref(), NormalizeError::NoFuel, "tankLevel")
}

/// Extract the battery level, or [`NormalizeError::NoBattery`] for vehicles
/// without a battery.
pub fn battery_level(envelope: Envelope<EnergyData>) -> Result<EnergyLevel, NormalizeError> {
    let data = payload(envelope)?;
    energy_level(
        data.battery_level.as_ref(),
        NormalizeError::NoBattery,
        "batteryLevel",
    )
}

/// Map a single engine action attempt to [`ActionResult`].
pub fn action_result(envelope: ActionEnvelope) -> Result<ActionResult, NormalizeError> {
    if envelope.status == wire::STATUS_NOT_FOUND {
        return Err(NormalizeError::VehicleNotFound);
    }

    let result = envelope
        .action_result
        .ok_or_else(|| NormalizeError::Malformed("missing actionResult".to_string()))?;

    let status = match result.status.as_str() {
        "EXECUTED" => ActionStatus::Executed,
        "FAILED" => ActionStatus::Failed,
        other => {
            return Err(NormalizeError::Malformed(format!(
                "unknown action status {other:?}"
            )));
        }
    };

    Ok(ActionResult { status })
}
