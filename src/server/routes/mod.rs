//! HTTP route modules
//!
//! This module registers all routes and provides the small static
//! handlers: the welcome payload and the health check.

pub mod fallback;
pub mod vehicles;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::debug;

/// Register every route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(welcome))
        .route("/health", web::get().to(health));
    vehicles::configure(cfg);
}

/// One entry in the welcome payload's route catalog.
#[derive(Debug, Clone, Serialize)]
struct RouteInfo {
    route: &'static str,
    method: &'static str,
    description: &'static str,
}

static ROUTE_CATALOG: [RouteInfo; 5] = [
    RouteInfo {
        route: "/vehicles/:id",
        method: "GET",
        description: "Returns a vehicle object that contains information about a vehicle with the specified ID",
    },
    RouteInfo {
        route: "/vehicles/:id/doors",
        method: "GET",
        description: "Returns an object containing information about the locked status of each door",
    },
    RouteInfo {
        route: "/vehicles/:id/fuel",
        method: "GET",
        description: "Returns a percentage of fuel remaining in the tank of the vehicle",
    },
    RouteInfo {
        route: "/vehicles/:id/battery",
        method: "GET",
        description: "Returns a percentage of battery remaining in the battery of the vehicle",
    },
    RouteInfo {
        route: "/vehicles/:id/engine",
        method: "POST",
        description: "Allows you to start or stop the engine of the vehicle",
    },
];

#[derive(Debug, Clone, Serialize)]
struct WelcomePayload {
    message: &'static str,
    routes: &'static [RouteInfo],
}

/// Welcome payload listing the available routes.
async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(WelcomePayload {
        message: "Welcome to the Vehicle API",
        routes: &ROUTE_CATALOG,
    })
}

#[derive(Debug, Clone, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: &'static str,
}

/// Basic health check endpoint for load balancers and monitoring.
async fn health() -> HttpResponse {
    debug!("Health check requested");

    HttpResponse::Ok().json(HealthStatus {
        status: "healthy",
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
