//! Inference provider seam for the Sous gateway.
//!
//! Route handlers never talk to a model directly. They hold an
//! [`InferenceClient`], which forwards to a [`RecipeInference`] backend wrapped
//! in a [`GuardedInference`] that bounds every call by the configured timeout
//! and rejects unusable output.

/// The backend trait every inference provider implements.
pub mod backend;
/// The facade the gateway holds.
pub mod client;
/// Timeout and output checks around any backend.
pub mod guard;
/// Placeholder backend with fixed recipe data.
pub mod stub;

pub use backend::RecipeInference;
pub use client::InferenceClient;
pub use guard::GuardedInference;
pub use stub::StubInference;
