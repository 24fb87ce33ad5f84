use async_trait::async_trait;
use sous_core::{
    ParsedRecipe, RecipeParsingRequest, RecipeSuggestion, RecipeSuggestionRequest, SousResult,
};

/// Trait for inference backends.
///
/// A backend turns validated requests into recipe data. The placeholder
/// [`StubInference`](crate::StubInference) answers with fixed data; a real
/// provider implements the same trait and is handed to
/// [`InferenceClient::from_backend`](crate::InferenceClient::from_backend).
#[async_trait]
pub trait RecipeInference: Send + Sync {
    /// Produce recipe suggestions for the supplied ingredients.
    async fn suggest(&self, request: &RecipeSuggestionRequest) -> SousResult<Vec<RecipeSuggestion>>;

    /// Extract a structured recipe from free-form text.
    async fn parse(&self, request: &RecipeParsingRequest) -> SousResult<ParsedRecipe>;
}
