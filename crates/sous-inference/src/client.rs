use crate::backend::RecipeInference;
use crate::guard::GuardedInference;
use crate::stub::StubInference;
use sous_core::{
    ModelSettings, ParsedRecipe, RecipeParsingRequest, RecipeSuggestion, RecipeSuggestionRequest,
    SousResult,
};
use std::time::Duration;
use tracing::info;

/// Inference client that dispatches to a guarded backend.
///
/// Uses the `RecipeInference` trait to keep handlers independent of the
/// provider. Every backend is wrapped in [`GuardedInference`], so callers
/// always get a bounded call and validated output.
pub struct InferenceClient {
    backend: GuardedInference,
}

impl InferenceClient {
    /// Builds the client for the configured model.
    ///
    /// No provider protocol is implemented yet, so this is the placeholder
    /// backend bounded by `model.timeout`.
    pub fn new(model: &ModelSettings) -> Self {
        info!(
            model = %model.model_id,
            timeout_secs = model.timeout.as_secs(),
            "Using placeholder inference backend"
        );
        let timeout = model.timeout;
        Self::from_backend(Box::new(StubInference::new(model.clone())), timeout)
    }

    /// Create from a pre-built backend (for custom/external providers).
    pub fn from_backend(backend: Box<dyn RecipeInference>, timeout: Duration) -> Self {
        Self {
            backend: GuardedInference::new(backend, timeout),
        }
    }

    /// The per-call deadline applied to the backend.
    pub fn timeout(&self) -> Duration {
        self.backend.timeout()
    }

    /// Generate suggestions for the request.
    pub async fn suggest(
        &self,
        request: &RecipeSuggestionRequest,
    ) -> SousResult<Vec<RecipeSuggestion>> {
        self.backend.suggest(request).await
    }

    /// Parse the request's recipe text.
    pub async fn parse(&self, request: &RecipeParsingRequest) -> SousResult<ParsedRecipe> {
        self.backend.parse(request).await
    }
}
