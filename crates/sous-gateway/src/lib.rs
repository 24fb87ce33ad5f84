//! HTTP gateway for the Sous recipe service.
//!
//! [`GatewayServer::build`] assembles the axum router: a health check plus the
//! two API-key protected `/api/ai/*` routes, wrapped in the timing, panic
//! recovery and CORS layers.

/// CORS policy built from the allowed origins.
pub mod cors;
/// Client-facing errors and their `{"detail": ...}` bodies.
pub mod error;
/// Validating JSON extractor.
pub mod extract;
/// Route handlers and fallbacks.
pub mod handlers;
/// API-key gate, timing and panic recovery.
pub mod middleware;
/// Router assembly.
pub mod server;

pub use error::ApiError;
pub use middleware::{AuthConfig, API_KEY_HEADER, PROCESS_TIME_HEADER};
pub use server::{AppState, GatewayServer, MAX_REQUEST_BODY_BYTES};
