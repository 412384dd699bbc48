use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gasguard_domain::DomainError;
use serde_json::json;
use tracing::{error, warn};

/// Wire-facing error wrapper: maps the domain taxonomy onto HTTP.
///
/// Storage failures are 500 and never collapse into a "disconnected"
/// answer; a device that cannot be reached is 502 — an expected
/// operating condition, not an internal fault; bad input is 400 and is
/// rejected before any relay or store work happens.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            DomainError::StoreError(e) => {
                error!(error = %e, "store failure surfaced to caller");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "storage unavailable" }),
                )
            }
            DomainError::DeviceUnreachable(cause) | DomainError::DeviceNotConnected(cause) => {
                warn!(cause = %cause, "command not delivered");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "device unreachable" }),
                )
            }
            DomainError::InvalidCommand(msg)
            | DomainError::InvalidThreshold(msg)
            | DomainError::InvalidTimeRange(msg) => {
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
