//! Request handlers for the vehicle endpoints.
//!
//! Every handler follows the same shape: extract the vehicle id, call the
//! vendor, run the payload through the normalizer, and let `?` classify
//! anything that went wrong into an [`ApiError`]. Success bodies are the
//! flat normalized objects, unwrapped.

use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::debug;

use crate::core::types::EngineAction;
use crate::core::vendor::VehicleVendor;
use crate::core::{action, normalize};
use crate::server::state::AppState;
use crate::utils::error::ApiError;

/// Register the vehicle routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vehicles")
            .route("", web::get().to(missing_vehicle_id))
            .route("/{id}", web::get().to(vehicle_info))
            .route("/{id}/doors", web::get().to(security_status))
            .route("/{id}/fuel", web::get().to(fuel_range))
            .route("/{id}/battery", web::get().to(battery_range))
            .route("/{id}/engine", web::post().to(start_stop_engine)),
    );
}

/// `GET /vehicles` without an id segment.
async fn missing_vehicle_id(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(ApiError::NoVehicleId {
        path: req.path().to_string(),
    })
}

/// `GET /vehicles/{id}`
async fn vehicle_info(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let envelope = state.vendor.vehicle_info(&id).await?;
    let info = normalize::vehicle_info(envelope).map_err(|e| ApiError::from_normalize(e, &id))?;

    Ok(HttpResponse::Ok().json(info))
}

/// `GET /vehicles/{id}/doors`
async fn security_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let envelope = state.vendor.security_status(&id).await?;
    let doors = normalize::door_statuses(envelope).map_err(|e| ApiError::from_normalize(e, &id))?;

    Ok(HttpResponse::Ok().json(doors))
}

/// `GET /vehicles/{id}/fuel`
async fn fuel_range(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let envelope = state.vendor.energy_level(&id).await?;
    let level = normalize::fuel_level(envelope).map_err(|e| ApiError::from_normalize(e, &id))?;

    Ok(HttpResponse::Ok().json(level))
}

/// `GET /vehicles/{id}/battery`
async fn battery_range(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let envelope = state.vendor.energy_level(&id).await?;
    let level = normalize::battery_level(envelope).map_err(|e| ApiError::from_normalize(e, &id))?;

    Ok(HttpResponse::Ok().json(level))
}

#[derive(Debug, Deserialize)]
struct EngineRequest {
    #[serde(default)]
    action: Option<String>,
}

/// `POST /vehicles/{id}/engine`
///
/// The action is validated before any vendor call; a malformed action must
/// not cost an upstream round trip.
async fn start_stop_engine(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<EngineRequest>>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let requested = body
        .and_then(|json| json.into_inner().action)
        .unwrap_or_default();

    let action: EngineAction = requested.parse().map_err(|_| ApiError::InvalidAction {
        action: requested.clone(),
    })?;

    debug!(%id, ?action, "dispatching engine action");

    let result = action::perform_action(state.vendor.as_ref(), &id, action)
        .await
        .map_err(|e| ApiError::from_action(e, &id))?;

    Ok(HttpResponse::Ok().json(result))
}
