use crate::cors::cors_layer;
use crate::handlers::{health, method_not_allowed, not_found, recipe_parsing, recipe_suggestions};
use crate::middleware::{api_key_middleware, panic_response, timing_middleware, AuthConfig};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use sous_core::Settings;
use sous_inference::InferenceClient;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

/// Largest request body the recipe routes will buffer.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Shared application state.
pub struct AppState {
    /// Backend used by the recipe routes.
    pub inference: Arc<InferenceClient>,
}

/// The main gateway server.
pub struct GatewayServer;

impl GatewayServer {
    /// Build the gateway router.
    ///
    /// Layers, outermost first: timing and logging, panic recovery, CORS.
    /// The POST endpoints of the `/api/ai/*` routes additionally carry the
    /// API-key gate; other methods on those paths fall through to 405.
    pub fn build(settings: Arc<Settings>, inference: Arc<InferenceClient>) -> Router {
        let auth = Arc::new(AuthConfig::new(settings.api_key.clone()));
        let state = Arc::new(AppState { inference });

        let gate = axum_mw::from_fn_with_state(auth, api_key_middleware);

        Router::new()
            .route("/health", get(health).fallback(method_not_allowed))
            .route(
                "/api/ai/recipe-suggestions",
                post(recipe_suggestions)
                    .route_layer(gate.clone())
                    .fallback(method_not_allowed),
            )
            .route(
                "/api/ai/recipe-parsing",
                post(recipe_parsing)
                    .route_layer(gate)
                    .fallback(method_not_allowed),
            )
            .fallback(not_found)
            .with_state(state)
            .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
            .layer(cors_layer(&settings.allowed_origins))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(axum_mw::from_fn(timing_middleware))
    }
}
