//! Common test utilities for telegate
//!
//! Provides a scripted vendor built on wiremock plus an in-process gateway
//! app wired against it, so end-to-end tests exercise the exact routing and
//! middleware stack the binary serves.

use actix_web::web;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use telegate::config::Config;
use telegate::core::vendor::VendorClient;
use telegate::server::state::AppState;

pub const INFO_SERVICE: &str = "getVehicleInfoService";
pub const SECURITY_SERVICE: &str = "getSecurityStatusService";
pub const ENERGY_SERVICE: &str = "getEnergyService";
pub const ACTION_SERVICE: &str = "actionEngineService";

/// Gateway configuration pointing at the stub vendor.
pub fn test_config(vendor_url: &str) -> Config {
    let mut config = Config::default();
    config.gateway.vendor.base_url = vendor_url.to_string();
    config.gateway.vendor.request_timeout_secs = 5;
    config
}

/// Application state wired against the stub vendor.
pub fn app_state(vendor_url: &str) -> web::Data<AppState> {
    let config = test_config(vendor_url);
    let vendor = VendorClient::new(&config.gateway.vendor).expect("vendor client");
    web::Data::new(AppState::new(config, vendor))
}

/// Vendor payload for `getVehicleInfoService`.
pub fn info_body(vin: &str, color: &str, four_door: bool, drive_train: &str) -> Value {
    let flag = |b: bool| if b { "True" } else { "False" };
    json!({
        "service": "getVehicleInfo",
        "status": "200",
        "data": {
            "vin": { "type": "String", "value": vin },
            "color": { "type": "String", "value": color },
            "fourDoorSedan": { "type": "Boolean", "value": flag(four_door) },
            "twoDoorCoupe": { "type": "Boolean", "value": flag(!four_door) },
            "driveTrain": { "type": "String", "value": drive_train }
        }
    })
}

/// Vendor payload for `getSecurityStatusService`.
pub fn doors_body(locks: &[(&str, bool)]) -> Value {
    let values: Vec<Value> = locks
        .iter()
        .map(|(location, locked)| {
            json!({
                "location": { "type": "String", "value": location },
                "locked": { "type": "Boolean", "value": if *locked { "True" } else { "False" } }
            })
        })
        .collect();

    json!({
        "service": "getSecurityStatus",
        "status": "200",
        "data": { "doors": { "type": "Array", "values": values } }
    })
}

/// Vendor payload for `getEnergyService`. `None` renders the vendor's
/// Null-typed wrapper for an absent capability.
pub fn energy_body(tank: Option<f64>, battery: Option<f64>) -> Value {
    let level = |v: Option<f64>| match v {
        Some(percent) => json!({ "type": "Number", "value": percent.to_string() }),
        None => json!({ "type": "Null", "value": "null" }),
    };

    json!({
        "service": "getEnergy",
        "status": "200",
        "data": { "tankLevel": level(tank), "batteryLevel": level(battery) }
    })
}

/// Vendor payload for `actionEngineService`.
pub fn action_body(status: &str) -> Value {
    json!({
        "service": "actionEngine",
        "status": "200",
        "actionResult": { "status": status }
    })
}

/// The vendor's unknown-vehicle payload: HTTP 200 with a string "404".
pub fn not_found_body(id: &str) -> Value {
    json!({
        "service": "getVehicleInfo",
        "status": "404",
        "reason": format!("Vehicle id: {id} not found.")
    })
}

/// Mount a vendor response for one service and vehicle id.
pub async fn mount_service(server: &MockServer, service: &str, id: &str, response: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/{service}")))
        .and(body_partial_json(json!({ "id": id })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}
