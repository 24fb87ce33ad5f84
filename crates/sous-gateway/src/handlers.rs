use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::server::AppState;
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sous_core::{
    RecipeParsingRequest, RecipeParsingResponse, RecipeSuggestionRequest,
    RecipeSuggestionResponse,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

const SUGGESTIONS_FAILED: &str = "Failed to generate recipe suggestions";
const PARSING_FAILED: &str = "Failed to parse recipe";

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Current time, RFC 3339 in UTC.
    pub timestamp: String,
}

/// Health check endpoint for monitoring. No authentication.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Generate recipe suggestions from available ingredients and preferences.
pub async fn recipe_suggestions(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RecipeSuggestionRequest>,
) -> Result<Json<RecipeSuggestionResponse>, ApiError> {
    let started = Instant::now();
    info!(
        ingredients = request.ingredients().len(),
        dietary_preferences = request.dietary_preferences().len(),
        excluded_ingredients = request.excluded_ingredients().len(),
        "Processing recipe suggestions"
    );

    let suggestions = state.inference.suggest(&request).await.map_err(|e| {
        error!(error = %e, "Error generating recipe suggestions");
        ApiError::Internal(SUGGESTIONS_FAILED)
    })?;

    Ok(Json(RecipeSuggestionResponse {
        suggestions,
        processing_time: started.elapsed().as_secs_f64(),
    }))
}

/// Parse unstructured recipe text into a structured recipe.
pub async fn recipe_parsing(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RecipeParsingRequest>,
) -> Result<Json<RecipeParsingResponse>, ApiError> {
    let started = Instant::now();
    info!(chars = request.char_len(), "Parsing recipe text");

    let parsed_recipe = state.inference.parse(&request).await.map_err(|e| {
        error!(error = %e, "Error parsing recipe");
        ApiError::Internal(PARSING_FAILED)
    })?;

    Ok(Json(RecipeParsingResponse {
        parsed_recipe,
        processing_time: started.elapsed().as_secs_f64(),
    }))
}

/// Router fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Method fallback for known paths.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
