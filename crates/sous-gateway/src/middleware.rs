use crate::error::{ApiError, INTERNAL_ERROR_DETAIL};
use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Response header holding the request duration in seconds.
pub const PROCESS_TIME_HEADER: HeaderName = HeaderName::from_static("x-process-time");

/// Auth configuration for the protected routes.
#[derive(Clone)]
pub struct AuthConfig {
    api_key: String,
}

impl AuthConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Exact comparison against the configured key.
    pub fn matches(&self, presented: &str) -> bool {
        presented == self.api_key
    }
}

/// Auth middleware: validates the `X-API-Key` header.
///
/// Runs before body extraction, so an unauthenticated request never reaches
/// validation or handler code.
pub async fn api_key_middleware(
    State(auth): State<Arc<AuthConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let verdict = match request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(key) if auth.matches(key) => Ok(()),
        Some(_) => Err("invalid API key"),
        None => Err("missing API key"),
    };

    match verdict {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            warn!(path = %request.uri().path(), "Rejected request: {reason}");
            ApiError::Unauthorized.into_response()
        }
    }
}

/// Timing middleware: stamps every response with `X-Process-Time` and logs it.
///
/// Sits outside the panic recovery layer, so the downstream service always
/// yields a response and the header is set on success and failure alike.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let span = info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %method,
        path = %path,
    );

    async move {
        let mut response = next.run(request).await;
        let elapsed = started.elapsed().as_secs_f64();
        if let Ok(value) = HeaderValue::from_str(&elapsed.to_string()) {
            response.headers_mut().insert(PROCESS_TIME_HEADER, value);
        }

        let status = response.status();
        if status.is_server_error() {
            error!(
                status = status.as_u16(),
                "Request: {method} {path} - Status: {} - Processing time: {elapsed:.4}s",
                status.as_u16()
            );
        } else {
            info!(
                status = status.as_u16(),
                "Request: {method} {path} - Status: {} - Processing time: {elapsed:.4}s",
                status.as_u16()
            );
        }
        response
    }
    .instrument(span)
    .await
}

/// Converts a panic escaping a handler into the generic 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("non-string panic payload");
    error!(panic = message, "Unhandled failure while serving request");
    ApiError::Internal(INTERNAL_ERROR_DETAIL).into_response()
}
