use crate::backend::RecipeInference;
use async_trait::async_trait;
use sous_core::{
    ConfidenceScore, ModelSettings, ParsedRecipe, RecipeIngredient, RecipeParsingRequest,
    RecipeSuggestion, RecipeSuggestionRequest, SousResult,
};
use tracing::debug;

/// How many of the supplied ingredients the placeholder suggestion uses.
const SUGGESTION_INGREDIENT_LIMIT: usize = 3;

/// Placeholder backend that answers with fixed recipe data.
///
/// No provider is contacted. The configured model is only recorded so logs show
/// which model a real backend would have used.
pub struct StubInference {
    model: ModelSettings,
}

impl StubInference {
    /// Creates the placeholder for the configured model.
    pub fn new(model: ModelSettings) -> Self {
        Self { model }
    }
}

#[async_trait]
impl RecipeInference for StubInference {
    async fn suggest(
        &self,
        request: &RecipeSuggestionRequest,
    ) -> SousResult<Vec<RecipeSuggestion>> {
        debug!(model = %self.model.model_id, "Serving placeholder suggestion");

        let ingredients = request
            .ingredients()
            .iter()
            .take(SUGGESTION_INGREDIENT_LIMIT)
            .map(|name| RecipeIngredient::new(name.as_str(), Some(1.0), Some("cup".to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(vec![RecipeSuggestion {
            title: "Sample Recipe".to_string(),
            description: "This is a sample recipe suggestion.".to_string(),
            ingredients,
            instructions: vec![
                "Mix all ingredients together.".to_string(),
                "Cook for 10 minutes.".to_string(),
                "Serve hot.".to_string(),
            ],
            cooking_time_minutes: Some(10),
            preparation_time_minutes: Some(5),
            servings: Some(2),
            confidence_score: ConfidenceScore::new(0.85)?,
        }])
    }

    async fn parse(&self, _request: &RecipeParsingRequest) -> SousResult<ParsedRecipe> {
        debug!(model = %self.model.model_id, "Serving placeholder parsed recipe");

        Ok(ParsedRecipe {
            title: "Parsed Recipe Title".to_string(),
            description: Some("This is a parsed recipe description.".to_string()),
            ingredients: vec![
                RecipeIngredient::new("ingredient 1", Some(1.0), Some("cup".to_string()))?,
                RecipeIngredient::new("ingredient 2", Some(2.0), Some("tablespoon".to_string()))?,
            ],
            instructions: vec![
                "Step 1: Prepare ingredients.".to_string(),
                "Step 2: Mix together.".to_string(),
                "Step 3: Cook and serve.".to_string(),
            ],
            cooking_time_minutes: Some(15),
            preparation_time_minutes: Some(10),
            servings: Some(4),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stub() -> StubInference {
        StubInference::new(ModelSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            model_id: "test/model".to_string(),
            site_url: "https://example.test".to_string(),
            app_name: "sous-tests".to_string(),
            timeout: Duration::from_secs(1),
        })
    }

    fn request(names: &[&str]) -> RecipeSuggestionRequest {
        let names = names.iter().map(|n| (*n).to_string()).collect();
        RecipeSuggestionRequest::new(names, vec![], vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_suggestion_uses_first_three_ingredients() {
        let out = stub()
            .suggest(&request(&["egg", "flour", "milk", "butter"]))
            .await
            .unwrap();
        assert_eq!(out.len(), 1);
        let names: Vec<_> = out[0].ingredients.iter().map(RecipeIngredient::name).collect();
        assert_eq!(names, vec!["egg", "flour", "milk"]);
        assert!(out[0]
            .ingredients
            .iter()
            .all(|i| i.quantity() == Some(1.0) && i.unit() == Some("cup")));
        assert_eq!(out[0].confidence_score.value(), 0.85);
    }

    #[tokio::test]
    async fn test_suggestion_with_single_ingredient() {
        let out = stub().suggest(&request(&["rice"])).await.unwrap();
        assert_eq!(out[0].ingredients.len(), 1);
    }

    #[tokio::test]
    async fn test_parse_returns_fixed_recipe() {
        let req = RecipeParsingRequest::new("Mix flour and water, bake.").unwrap();
        let recipe = stub().parse(&req).await.unwrap();
        assert_eq!(recipe.title, "Parsed Recipe Title");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.instructions.len(), 3);
        assert_eq!(recipe.servings, Some(4));
    }
}
