use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform JSON error payload returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// Human readable description of the failure.
    pub message: String,
    /// Canonical reason phrase (e.g. `Not Found`).
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            error: status.canonical_reason().unwrap_or("Unknown").to_owned(),
        }
    }
}

/// Builds a JSON error response with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(status, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_reason_phrase() {
        let body = ErrorBody::new(StatusCode::NOT_FOUND, "missing");
        assert_eq!(body.status_code, 404);
        assert_eq!(body.error, "Not Found");
        assert_eq!(body.message, "missing");
    }

    #[test]
    fn body_serializes_camel_case() {
        let body = ErrorBody::new(StatusCode::BAD_REQUEST, "bad");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 400);
        assert_eq!(json["error"], "Bad Request");
    }
}
