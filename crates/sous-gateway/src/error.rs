use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sous_core::{FieldError, ValidationErrors};

/// Detail returned for any failure the client cannot act on.
pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error occurred";

/// Errors surfaced to HTTP clients.
///
/// Every variant renders as `{"detail": ...}`. Internal variants carry a fixed
/// category message; the cause is logged where it happened and never sent.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or wrong `X-API-Key`.
    Unauthorized,
    /// The body parsed but failed field validation.
    Validation(ValidationErrors),
    /// The body could not be read as the expected JSON shape.
    MalformedBody(String),
    /// The body exceeded the request body limit.
    PayloadTooLarge,
    /// Handler or pipeline failure with a client-safe detail message.
    Internal(&'static str),
    /// No route matched the path.
    NotFound,
    /// The route exists but not for this method.
    MethodNotAllowed,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::MalformedBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Unauthorized => json!("Invalid API Key"),
            ApiError::Validation(errors) => json!(errors),
            ApiError::MalformedBody(msg) => json!([FieldError::body(&[], "json_invalid", msg)]),
            ApiError::PayloadTooLarge => json!("Request body too large"),
            ApiError::Internal(detail) => json!(detail),
            ApiError::NotFound => json!("Not Found"),
            ApiError::MethodNotAllowed => json!("Method Not Allowed"),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Buffering failures past the body limit surface as a 413 rejection.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}
