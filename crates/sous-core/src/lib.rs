//! Core types and error definitions for the Sous recipe gateway.
//!
//! This crate provides the types shared across all Sous crates: the recipe
//! data model exchanged over HTTP, the validated request types, the unified
//! error enum and the process [`Settings`].
//!
//! # Main types
//!
//! - [`SousError`]: Unified error enum for all Sous subsystems.
//! - [`SousResult`]: Convenience alias for `Result<T, SousError>`.
//! - [`RecipeSuggestionRequest`] / [`RecipeParsingRequest`]: Validated request bodies.
//! - [`RecipeSuggestion`] / [`ParsedRecipe`]: Response payloads.
//! - [`Settings`]: Immutable configuration loaded once at startup.

/// Environment-sourced process configuration.
pub mod config;
/// Unified error type.
pub mod error;
/// Recipe request and response shapes.
pub mod recipe;
/// Field-level validation errors and the payload conversion trait.
pub mod validation;

pub use config::{Environment, ModelSettings, Settings};
pub use error::{SousError, SousResult};
pub use recipe::{
    ConfidenceScore, ParsedRecipe, RecipeIngredient, RecipeParsingPayload, RecipeParsingRequest,
    RecipeParsingResponse, RecipeSuggestion, RecipeSuggestionPayload, RecipeSuggestionRequest,
    RecipeSuggestionResponse, MIN_RECIPE_TEXT_CHARS,
};
pub use validation::{FieldError, FromPayload, ValidationErrors};
