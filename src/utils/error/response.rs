//! HTTP envelope construction for classified request failures.

use std::borrow::Cow;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{ApiError, ErrorKind};

/// The documented route surface, echoed on every error for client
/// self-discovery.
pub static POSSIBLE_ROUTES: [&str; 5] = [
    "GET /vehicles/:id",
    "GET /vehicles/:id/doors",
    "GET /vehicles/:id/fuel",
    "GET /vehicles/:id/battery",
    "POST /vehicles/:id/engine",
];

const EXAMPLE_PATH: &str = "/vehicles/1587";

/// Wire shape of every error response. Built fresh per failure, never
/// cached or mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Cow<'static, str>>,
    pub timestamp: DateTime<Utc>,
    pub possible_routes: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_path: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable_methods: Option<&'static [&'static str]>,
}

impl ApiError {
    /// HTTP status fixed by the error kind.
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NoVehicleId | ErrorKind::InvalidAction => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidVehicleId | ErrorKind::InvalidRoute => StatusCode::NOT_FOUND,
            ErrorKind::NoFuel | ErrorKind::NoBattery => StatusCode::NOT_ACCEPTABLE,
            ErrorKind::InvalidMethod => StatusCode::METHOD_NOT_ALLOWED,
            ErrorKind::UpstreamError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The resource path echoed alongside the error. Kind-fixed templates
    /// for the vehicle endpoints, the request path for routing errors.
    fn resource_path(&self) -> Option<Cow<'static, str>> {
        match self {
            ApiError::NoVehicleId { .. } | ApiError::InvalidVehicleId { .. } => {
                Some(Cow::Borrowed("/vehicles/:id"))
            }
            ApiError::NoFuel { .. } => Some(Cow::Borrowed("/vehicles/:id/fuel")),
            ApiError::NoBattery { .. } => Some(Cow::Borrowed("/vehicles/:id/battery")),
            ApiError::InvalidAction { .. } => Some(Cow::Borrowed("/vehicles/:id/engine")),
            ApiError::InvalidMethod { path, .. } | ApiError::InvalidRoute { path } => {
                Some(Cow::Owned(path.clone()))
            }
            ApiError::Upstream { .. } => None,
        }
    }

    /// Build the response body for this failure.
    pub fn envelope(&self) -> ErrorEnvelope {
        let status = self.status();
        let mut body = ErrorBody {
            code: status.as_u16().to_string(),
            kind: self.kind(),
            info: self.to_string(),
            incomplete_path: None,
            example_path: None,
            invalid_method: None,
            acceptable_methods: None,
        };

        match self {
            ApiError::NoVehicleId { path } => {
                body.incomplete_path = Some(path.clone());
                body.example_path = Some(EXAMPLE_PATH);
            }
            ApiError::InvalidMethod {
                method, allowed, ..
            } => {
                body.invalid_method = Some(method.clone());
                body.acceptable_methods = Some(*allowed);
            }
            _ => {}
        }

        ErrorEnvelope {
            success: false,
            error: body,
            path: self.resource_path(),
            timestamp: Utc::now(),
            possible_routes: &POSSIBLE_ROUTES,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self.envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        let cases = [
            (
                ApiError::NoVehicleId {
                    path: "/vehicles".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidVehicleId { id: "12345".into() },
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::NoFuel { id: "1235".into() },
                StatusCode::NOT_ACCEPTABLE,
            ),
            (
                ApiError::NoBattery { id: "1234".into() },
                StatusCode::NOT_ACCEPTABLE,
            ),
            (
                ApiError::InvalidAction {
                    action: "STARTS".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::InvalidMethod {
                    method: "POST".into(),
                    path: "/vehicles/1234/doors".into(),
                    allowed: &["GET"],
                },
                StatusCode::METHOD_NOT_ALLOWED,
            ),
            (
                ApiError::InvalidRoute {
                    path: "/garage".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Upstream {
                    detail: "boom".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "{:?}", err.kind());
        }
    }

    #[test]
    fn envelope_carries_the_documented_fields() {
        let err = ApiError::InvalidVehicleId { id: "12345".into() };
        let json = serde_json::to_value(err.envelope()).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "404");
        assert_eq!(json["error"]["type"], "INVALID_VEHICLE_ID");
        assert!(json["error"]["info"].as_str().unwrap().contains("12345"));
        assert_eq!(json["path"], "/vehicles/:id");
        assert!(json["timestamp"].is_string());
        assert_eq!(json["possibleRoutes"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn no_vehicle_id_envelope_includes_path_hints() {
        let err = ApiError::NoVehicleId {
            path: "/vehicles".into(),
        };
        let json = serde_json::to_value(err.envelope()).unwrap();

        assert_eq!(json["error"]["code"], "400");
        assert_eq!(json["error"]["incompletePath"], "/vehicles");
        assert_eq!(json["error"]["examplePath"], "/vehicles/1587");
    }

    #[test]
    fn invalid_method_envelope_names_the_allowed_method() {
        let err = ApiError::InvalidMethod {
            method: "POST".into(),
            path: "/vehicles/1234/doors".into(),
            allowed: &["GET"],
        };
        let json = serde_json::to_value(err.envelope()).unwrap();

        assert_eq!(json["error"]["invalidMethod"], "POST");
        assert_eq!(json["error"]["acceptableMethods"][0], "GET");
        assert_eq!(json["path"], "/vehicles/1234/doors");
    }

    #[test]
    fn upstream_envelope_hides_internal_detail() {
        let err = ApiError::Upstream {
            detail: "tcp connect error to 10.0.0.7".into(),
        };
        let json = serde_json::to_value(err.envelope()).unwrap();

        assert_eq!(json["error"]["type"], "UPSTREAM_ERROR");
        assert_eq!(json["error"]["code"], "500");
        assert!(!json["error"]["info"].as_str().unwrap().contains("10.0.0.7"));
    }

    #[test]
    fn context_fields_are_omitted_when_absent() {
        let err = ApiError::NoFuel { id: "1235".into() };
        let json = serde_json::to_value(err.envelope()).unwrap();

        assert!(json["error"].get("incompletePath").is_none());
        assert!(json["error"].get("invalidMethod").is_none());
        assert!(json["error"].get("acceptableMethods").is_none());
    }
}
