//! Fallback classification for unmatched requests.
//!
//! Installed as the application's default service, so it sees every request
//! no registered route and method combination matched. It distinguishes a
//! recognized path used with the wrong method (405) from a path that maps
//! to no resource at all (404).

use std::sync::LazyLock;

use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse};
use regex::Regex;

use crate::utils::error::ApiError;

static ENGINE_PATHS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/vehicles/[^/]+/engine/?$").expect("engine path pattern"));

static DETAIL_PATHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/vehicles/[^/]+(?:/(?:doors|fuel|battery))?/?$").expect("detail path pattern")
});

const GET_ONLY: &[&str] = &["GET"];
const POST_ONLY: &[&str] = &["POST"];

/// Default service handler.
pub async fn unmatched(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    Err(classify(req.method(), req.path()))
}

/// Engine paths accept POST only; every other vehicle path accepts GET
/// only. Family checks run before the unknown-route fallback, so a
/// recognized path with the wrong method never turns into a 404.
fn classify(method: &Method, path: &str) -> ApiError {
    if ENGINE_PATHS.is_match(path) && method != Method::POST {
        return ApiError::InvalidMethod {
            method: method.to_string(),
            path: path.to_string(),
            allowed: POST_ONLY,
        };
    }

    if DETAIL_PATHS.is_match(path) && method != Method::GET {
        return ApiError::InvalidMethod {
            method: method.to_string(),
            path: path.to_string(),
            allowed: GET_ONLY,
        };
    }

    ApiError::InvalidRoute {
        path: path.to_string(),
    }
}
