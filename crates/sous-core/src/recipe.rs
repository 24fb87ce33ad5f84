use crate::validation::{FieldError, FromPayload, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Minimum number of characters accepted in a recipe parsing request.
pub const MIN_RECIPE_TEXT_CHARS: usize = 10;

// --- Value types ---

/// A model's quality estimate for a suggestion, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceScore(f64);

impl ConfidenceScore {
    /// Creates a score, rejecting values outside `[0.0, 1.0]` and NaN.
    pub fn new(value: f64) -> Result<Self, ValidationErrors> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationErrors::single(FieldError::body(
                &["confidence_score"],
                "out_of_range",
                format!("Confidence score must be between 0.0 and 1.0, got {value}"),
            )))
        }
    }

    /// The raw score.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ConfidenceScore {
    type Error = ValidationErrors;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceScore> for f64 {
    fn from(score: ConfidenceScore) -> Self {
        score.0
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeIngredient {
    name: String,
    quantity: Option<f64>,
    unit: Option<String>,
}

impl RecipeIngredient {
    /// Creates an ingredient. The name must not be blank and a quantity, when
    /// present, must be a finite non-negative number.
    pub fn new(
        name: impl Into<String>,
        quantity: Option<f64>,
        unit: Option<String>,
    ) -> Result<Self, ValidationErrors> {
        let name = name.into();
        let mut errors = ValidationErrors::new();
        if name.trim().is_empty() {
            errors.push(FieldError::body(
                &["name"],
                "string_too_short",
                "Ingredient name must not be empty",
            ));
        }
        if let Some(q) = quantity {
            if !q.is_finite() || q < 0.0 {
                errors.push(FieldError::body(
                    &["quantity"],
                    "out_of_range",
                    "Quantity must be a finite non-negative number",
                ));
            }
        }
        errors.into_result(Self {
            name,
            quantity,
            unit,
        })
    }

    /// Ingredient name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount, if known.
    pub fn quantity(&self) -> Option<f64> {
        self.quantity
    }

    /// Unit of the amount, if known.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }
}

// --- Requests ---

/// Wire shape of `POST /api/ai/recipe-suggestions`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeSuggestionPayload {
    /// Ingredient names the user has on hand.
    pub ingredients: Vec<String>,
    /// Dietary preferences such as vegetarian or vegan.
    #[serde(default)]
    pub dietary_preferences: Option<Vec<String>>,
    /// Ingredients that must not appear in suggestions.
    #[serde(default)]
    pub excluded_ingredients: Option<Vec<String>>,
}

/// A validated recipe suggestion request: at least one non-blank ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSuggestionRequest {
    ingredients: Vec<String>,
    dietary_preferences: Vec<String>,
    excluded_ingredients: Vec<String>,
}

impl RecipeSuggestionRequest {
    /// Validates and builds a request.
    pub fn new(
        ingredients: Vec<String>,
        dietary_preferences: Vec<String>,
        excluded_ingredients: Vec<String>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if ingredients.is_empty() {
            errors.push(FieldError::body(
                &["ingredients"],
                "too_short",
                "List should have at least 1 item after validation, not 0",
            ));
        }
        for (index, name) in ingredients.iter().enumerate() {
            if name.trim().is_empty() {
                errors.push(
                    FieldError::body(
                        &["ingredients"],
                        "string_too_short",
                        "Ingredient name must not be empty",
                    )
                    .at_index(index),
                );
            }
        }
        errors.into_result(Self {
            ingredients,
            dietary_preferences,
            excluded_ingredients,
        })
    }

    /// Ingredient names in the order supplied.
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }

    /// Requested dietary preferences.
    pub fn dietary_preferences(&self) -> &[String] {
        &self.dietary_preferences
    }

    /// Ingredients to keep out of suggestions.
    pub fn excluded_ingredients(&self) -> &[String] {
        &self.excluded_ingredients
    }
}

impl FromPayload for RecipeSuggestionRequest {
    type Payload = RecipeSuggestionPayload;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationErrors> {
        Self::new(
            payload.ingredients,
            payload.dietary_preferences.unwrap_or_default(),
            payload.excluded_ingredients.unwrap_or_default(),
        )
    }
}

/// Wire shape of `POST /api/ai/recipe-parsing`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeParsingPayload {
    /// Free-form recipe text.
    pub recipe_text: String,
}

/// A validated recipe parsing request holding at least
/// [`MIN_RECIPE_TEXT_CHARS`] characters of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeParsingRequest {
    recipe_text: String,
}

impl RecipeParsingRequest {
    /// Validates and builds a request. Length is counted in characters.
    pub fn new(recipe_text: impl Into<String>) -> Result<Self, ValidationErrors> {
        let recipe_text = recipe_text.into();
        let len = recipe_text.chars().count();
        if len < MIN_RECIPE_TEXT_CHARS {
            return Err(ValidationErrors::single(FieldError::body(
                &["recipe_text"],
                "string_too_short",
                format!(
                    "String should have at least {MIN_RECIPE_TEXT_CHARS} characters, got {len}"
                ),
            )));
        }
        Ok(Self { recipe_text })
    }

    /// The submitted text.
    pub fn recipe_text(&self) -> &str {
        &self.recipe_text
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.recipe_text.chars().count()
    }
}

impl FromPayload for RecipeParsingRequest {
    type Payload = RecipeParsingPayload;

    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationErrors> {
        Self::new(payload.recipe_text)
    }
}

// --- Responses ---

/// A generated recipe suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSuggestion {
    /// Recipe title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps.
    pub instructions: Vec<String>,
    /// Cooking time in minutes.
    pub cooking_time_minutes: Option<u32>,
    /// Preparation time in minutes.
    pub preparation_time_minutes: Option<u32>,
    /// Number of servings.
    pub servings: Option<u32>,
    /// How confident the generator is in this suggestion.
    pub confidence_score: ConfidenceScore,
}

/// A recipe extracted from free-form text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedRecipe {
    /// Recipe title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Ingredient lines.
    pub ingredients: Vec<RecipeIngredient>,
    /// Ordered preparation steps.
    pub instructions: Vec<String>,
    /// Cooking time in minutes.
    pub cooking_time_minutes: Option<u32>,
    /// Preparation time in minutes.
    pub preparation_time_minutes: Option<u32>,
    /// Number of servings.
    pub servings: Option<u32>,
}

/// Body of a successful suggestion response.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSuggestionResponse {
    /// Generated suggestions, never empty.
    pub suggestions: Vec<RecipeSuggestion>,
    /// Seconds spent producing the suggestions.
    pub processing_time: f64,
}

/// Body of a successful parsing response.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeParsingResponse {
    /// The structured recipe.
    pub parsed_recipe: ParsedRecipe,
    /// Seconds spent parsing.
    pub processing_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(ConfidenceScore::new(0.0).is_ok());
        assert!(ConfidenceScore::new(1.0).is_ok());
        assert!(ConfidenceScore::new(1.01).is_err());
        assert!(ConfidenceScore::new(-0.1).is_err());
        assert!(ConfidenceScore::new(f64::NAN).is_err());
    }

    #[test]
    fn test_confidence_serializes_as_number() {
        let score = ConfidenceScore::new(0.85).unwrap();
        assert_eq!(serde_json::to_value(score).unwrap(), serde_json::json!(0.85));
        let parsed: Result<ConfidenceScore, _> = serde_json::from_str("1.5");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_ingredient_requires_name() {
        assert!(RecipeIngredient::new("egg", Some(1.0), Some("cup".into())).is_ok());
        assert!(RecipeIngredient::new("   ", None, None).is_err());
        assert!(RecipeIngredient::new("egg", Some(f64::INFINITY), None).is_err());
    }

    #[test]
    fn test_ingredient_serializes_nulls() {
        let ing = RecipeIngredient::new("salt", None, None).unwrap();
        let json = serde_json::to_value(&ing).unwrap();
        assert_eq!(json["name"], "salt");
        assert!(json["quantity"].is_null());
        assert!(json["unit"].is_null());
    }

    #[test]
    fn test_suggestion_request_rejects_empty_list() {
        let err = RecipeSuggestionRequest::new(vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err.len(), 1);
        let first = err.iter().next().unwrap();
        assert_eq!(first.loc, vec!["body", "ingredients"]);
        assert_eq!(first.kind, "too_short");
    }

    #[test]
    fn test_suggestion_request_reports_blank_entries() {
        let err = RecipeSuggestionRequest::new(strings(&["egg", "", " "]), vec![], vec![])
            .unwrap_err();
        let locs: Vec<_> = err.iter().map(|e| e.loc.join(".")).collect();
        assert_eq!(locs, vec!["body.ingredients.1", "body.ingredients.2"]);
    }

    #[test]
    fn test_suggestion_payload_defaults_optional_lists() {
        let payload: RecipeSuggestionPayload =
            serde_json::from_str(r#"{"ingredients": ["egg"]}"#).unwrap();
        let req = RecipeSuggestionRequest::from_payload(payload).unwrap();
        assert_eq!(req.ingredients(), ["egg".to_string()]);
        assert!(req.dietary_preferences().is_empty());
        assert!(req.excluded_ingredients().is_empty());
    }

    #[test]
    fn test_parsing_request_counts_chars() {
        assert!(RecipeParsingRequest::new("too short").is_err());
        assert!(RecipeParsingRequest::new("0123456789").is_ok());
        // Nine two-byte characters are still too short.
        let err = RecipeParsingRequest::new("ééééééééé").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(RecipeParsingRequest::new("éééééééééé").is_ok());
    }
}
