use crate::backend::RecipeInference;
use async_trait::async_trait;
use sous_core::{
    ParsedRecipe, RecipeParsingRequest, RecipeSuggestion, RecipeSuggestionRequest, SousError,
    SousResult,
};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// A `RecipeInference` implementation that wraps another backend, bounding
/// every call by a deadline and rejecting output the gateway cannot serve.
///
/// A call that exceeds the deadline fails with [`SousError::Timeout`]; the
/// inner future is dropped, so no work outlives the request. Empty or
/// incomplete output fails with [`SousError::MalformedOutput`].
pub struct GuardedInference {
    inner: Box<dyn RecipeInference>,
    timeout: Duration,
}

impl GuardedInference {
    /// Wraps `inner` so every call is bounded by `timeout`.
    pub fn new(inner: Box<dyn RecipeInference>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = SousResult<T>>,
    ) -> SousResult<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    op,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Inference call timed out"
                );
                Err(SousError::Timeout(self.timeout))
            }
        }
    }
}

#[async_trait]
impl RecipeInference for GuardedInference {
    async fn suggest(
        &self,
        request: &RecipeSuggestionRequest,
    ) -> SousResult<Vec<RecipeSuggestion>> {
        let suggestions = self.bounded("suggest", self.inner.suggest(request)).await?;
        check_suggestions(&suggestions)?;
        Ok(suggestions)
    }

    async fn parse(&self, request: &RecipeParsingRequest) -> SousResult<ParsedRecipe> {
        let recipe = self.bounded("parse", self.inner.parse(request)).await?;
        check_parsed_recipe(&recipe)?;
        Ok(recipe)
    }
}

/// Rejects an empty suggestion list or a suggestion without a title.
pub fn check_suggestions(suggestions: &[RecipeSuggestion]) -> SousResult<()> {
    if suggestions.is_empty() {
        return Err(SousError::MalformedOutput("no suggestions returned".into()));
    }
    if let Some(index) = suggestions.iter().position(|s| s.title.trim().is_empty()) {
        return Err(SousError::MalformedOutput(format!(
            "suggestion {index} has an empty title"
        )));
    }
    Ok(())
}

/// Rejects a parsed recipe missing its title, ingredients or instructions.
pub fn check_parsed_recipe(recipe: &ParsedRecipe) -> SousResult<()> {
    if recipe.title.trim().is_empty() {
        return Err(SousError::MalformedOutput("parsed recipe has an empty title".into()));
    }
    if recipe.ingredients.is_empty() {
        return Err(SousError::MalformedOutput("parsed recipe has no ingredients".into()));
    }
    if recipe.instructions.is_empty() {
        return Err(SousError::MalformedOutput("parsed recipe has no instructions".into()));
    }
    Ok(())
}
