use crate::validation::ValidationErrors;
use std::time::Duration;
use thiserror::Error;

/// A convenience `Result` alias using [`SousError`].
pub type SousResult<T> = Result<T, SousError>;

/// Top-level error type for the Sous gateway.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Error, Debug)]
pub enum SousError {
    /// Missing or unparsable configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// A request or value failed field-level validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The inference backend failed to produce a result.
    #[error("Inference error: {0}")]
    Inference(String),

    /// The inference backend did not answer within the configured limit.
    #[error("Inference timed out after {0:?}")]
    Timeout(Duration),

    /// The inference backend answered with output that cannot be used.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn test_timeout_message_includes_limit() {
        let err = SousError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Inference timed out after 30s");
    }

    #[test]
    fn test_validation_converts() {
        let errors =
            ValidationErrors::single(FieldError::body(&["ingredients"], "too_short", "empty"));
        let err: SousError = errors.into();
        assert!(matches!(err, SousError::Validation(_)));
    }
}
