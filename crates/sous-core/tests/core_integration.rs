#![allow(clippy::unwrap_used, clippy::expect_used)]

use sous_core::*;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// 1. Wire payload -> validated request
// ---------------------------------------------------------------------------

#[test]
fn suggestion_payload_validates_through_trait() {
    let payload = serde_json::from_value(serde_json::json!({
        "ingredients": ["egg", "flour", "milk"],
        "dietary_preferences": ["vegetarian"],
        "excluded_ingredients": null
    }))
    .unwrap();

    let request = RecipeSuggestionRequest::from_payload(payload).unwrap();
    assert_eq!(request.ingredients().len(), 3);
    assert_eq!(request.dietary_preferences(), ["vegetarian".to_string()]);
    assert!(request.excluded_ingredients().is_empty());
}

#[test]
fn parsing_payload_rejects_short_text() {
    let payload = serde_json::from_value(serde_json::json!({"recipe_text": "short"})).unwrap();
    let errors = RecipeParsingRequest::from_payload(payload).unwrap_err();

    let json = serde_json::to_value(&errors).unwrap();
    assert_eq!(json[0]["loc"], serde_json::json!(["body", "recipe_text"]));
    assert_eq!(json[0]["type"], "string_too_short");
}

// ---------------------------------------------------------------------------
// 2. Response shapes serialise the way clients read them
// ---------------------------------------------------------------------------

#[test]
fn suggestion_response_shape() {
    let response = RecipeSuggestionResponse {
        suggestions: vec![RecipeSuggestion {
            title: "Pancakes".to_string(),
            description: "Fluffy.".to_string(),
            ingredients: vec![
                RecipeIngredient::new("flour", Some(2.0), Some("cup".into())).unwrap(),
            ],
            instructions: vec!["Whisk.".to_string(), "Fry.".to_string()],
            cooking_time_minutes: Some(10),
            preparation_time_minutes: None,
            servings: Some(4),
            confidence_score: ConfidenceScore::new(0.9).unwrap(),
        }],
        processing_time: 0.001,
    };

    let json = serde_json::to_value(&response).unwrap();
    let first = &json["suggestions"][0];
    assert_eq!(first["ingredients"][0]["unit"], "cup");
    assert_eq!(first["confidence_score"], 0.9);
    assert!(first["preparation_time_minutes"].is_null());
    assert_eq!(json["processing_time"], 0.001);
}

#[test]
fn parsing_response_shape() {
    let response = RecipeParsingResponse {
        parsed_recipe: ParsedRecipe {
            title: "Bread".to_string(),
            description: None,
            ingredients: vec![RecipeIngredient::new("water", None, None).unwrap()],
            instructions: vec!["Bake.".to_string()],
            cooking_time_minutes: Some(40),
            preparation_time_minutes: Some(120),
            servings: None,
        },
        processing_time: 0.0,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["parsed_recipe"]["title"], "Bread");
    assert!(json["parsed_recipe"]["description"].is_null());
}

// ---------------------------------------------------------------------------
// 3. Settings are injectable without touching the process environment
// ---------------------------------------------------------------------------

#[test]
fn settings_from_custom_lookup() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("OPENROUTER_API_KEY", "k"),
        ("OPENROUTER_MODEL", "m"),
        ("OPENROUTER_SITE_URL", "https://site.test"),
        ("OPENROUTER_APP_NAME", "app"),
        ("ALLOWED_ORIGINS", "*"),
        ("ENVIRONMENT", "staging"),
    ]);
    let settings = Settings::from_lookup(|k| env.get(k).map(|v| (*v).to_string())).unwrap();

    assert_eq!(settings.api_key, "k");
    assert_eq!(settings.allowed_origins, vec!["*"]);
    assert_eq!(settings.environment, Environment::Staging);
    assert_eq!(settings.environment.to_string(), "staging");
}

#[test]
fn settings_fail_fast_without_required() {
    let err = Settings::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, SousError::Config(_)));
    let msg = err.to_string();
    for key in [
        "OPENROUTER_API_KEY",
        "OPENROUTER_MODEL",
        "OPENROUTER_SITE_URL",
        "OPENROUTER_APP_NAME",
    ] {
        assert!(msg.contains(key), "{msg} should mention {key}");
    }
}
