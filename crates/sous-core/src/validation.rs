use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure.
///
/// Serialises as `{"loc": [...], "msg": "...", "type": "..."}`, the shape
/// clients receive inside a 422 `detail` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path to the offending value, starting at the request part (`body`).
    pub loc: Vec<String>,
    /// Human-readable description of the failure.
    pub msg: String,
    /// Machine-readable failure category, e.g. `too_short`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    /// Creates an error located under the request body at `path`.
    pub fn body(path: &[&str], kind: impl Into<String>, msg: impl Into<String>) -> Self {
        let mut loc = Vec::with_capacity(path.len() + 1);
        loc.push("body".to_string());
        loc.extend(path.iter().map(|segment| (*segment).to_string()));
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    /// Appends a list index to the location.
    pub fn at_index(mut self, index: usize) -> Self {
        self.loc.push(index.to_string());
        self
    }
}

/// A non-empty-on-failure collection of [`FieldError`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", summary(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn summary(errors: &[FieldError]) -> String {
    let parts: Vec<String> = errors
        .iter()
        .map(|e| format!("{}: {}", e.loc.join("."), e.msg))
        .collect();
    format!("{} validation error(s): {}", errors.len(), parts.join("; "))
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a collection holding one error.
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Records another failure.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Returns true if no failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over the recorded failures.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Returns `value` if nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Conversion from a raw deserialised wire payload into a validated type.
///
/// The wire shape (`Payload`) only guarantees field presence and JSON types;
/// `from_payload` enforces the remaining constraints and is the only way to
/// obtain the validated value.
pub trait FromPayload: Sized {
    /// The serde-deserialisable wire shape.
    type Payload: DeserializeOwned;

    /// Validates `payload`, reporting every failing field.
    fn from_payload(payload: Self::Payload) -> Result<Self, ValidationErrors>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_body_location() {
        let err =
            FieldError::body(&["ingredients"], "too_short", "List should have at least 1 item");
        assert_eq!(err.loc, vec!["body", "ingredients"]);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "too_short");
        assert_eq!(json["loc"][1], "ingredients");
    }

    #[test]
    fn test_at_index_appends() {
        let err = FieldError::body(&["ingredients"], "string_too_short", "blank").at_index(2);
        assert_eq!(err.loc, vec!["body", "ingredients", "2"]);
    }

    #[test]
    fn test_errors_serialize_as_array() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::body(&["a"], "x", "first"));
        errors.push(FieldError::body(&["b"], "y", "second"));
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(
            errors.to_string(),
            "2 validation error(s): body.a: first; body.b: second"
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
        let failed = ValidationErrors::single(FieldError::body(&[], "x", "y")).into_result(7);
        assert!(failed.is_err());
    }
}
