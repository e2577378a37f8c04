//! Error types for registration and assertion failures.
//!
//! Two taxonomies. [`RegistryError`] covers malformed registration and
//! lookup calls: programmer errors, expected to surface at startup.
//! [`AssertionFailure`] is the structured failure a checked value produces
//! at its call site. They are distinct types so callers can tell a failed
//! contract from a misconfigured registry.

use crate::definition::ActualFn;
use crate::introspect::type_name_of;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

/// Tag identifying assertion failures across serialization boundaries.
pub const ASSERTION_FAILURE_NAME: &str = "AssertionFailure";

/// Machine-readable failure class carried by every assertion failure.
pub const ASSERTION_FAILURE_CODE: &str = "assertion_failure";

/// Structured assertion failure.
///
/// Carries machine-readable fields (expected kind, actual kind, comparison
/// operator) next to the rendered message. Constructed fresh at each
/// failure site and returned as the `Err` arm of the assertion call. The
/// diagnostic fields are private with accessors; the serde serialization
/// emits only the distinguishing tag and the message, and `Display` is the
/// message alone.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AssertionFailure {
    message: String,
    expected: String,
    actual: String,
    operator: String,
    generated_message: bool,
}

impl AssertionFailure {
    /// Build a failure for `arg` against the type named `expected`.
    ///
    /// `operator` falls back to `strictEqual` and `actual` to the generic
    /// kind extractor. `message` leads the rendered text, defaulting to
    /// `value`: `"value (bool) is required."`.
    pub fn new(
        expected: &str,
        operator: Option<&str>,
        actual: Option<&ActualFn>,
        arg: Option<&Value>,
        message: Option<&str>,
    ) -> Self {
        let actual = match actual {
            Some(extract) => extract(arg),
            None => type_name_of(arg),
        };
        Self {
            message: format!("{} ({expected}) is required.", message.unwrap_or("value")),
            expected: expected.to_string(),
            actual,
            operator: operator
                .unwrap_or(crate::definition::operator::STRICT_EQUAL)
                .to_string(),
            generated_message: message.is_none(),
        }
    }

    /// Build a failure for a standard comparison between two rendered values.
    pub(crate) fn comparison(
        actual: &Value,
        expected: &Value,
        operator: &str,
        message: Option<&str>,
    ) -> Self {
        Self {
            message: format!("{} ({expected}) is required.", message.unwrap_or("value")),
            expected: expected.to_string(),
            actual: actual.to_string(),
            operator: operator.to_string(),
            generated_message: message.is_none(),
        }
    }

    /// The distinguishing tag, visible to error-handling code.
    pub fn name(&self) -> &'static str {
        ASSERTION_FAILURE_NAME
    }

    /// The machine-readable failure class.
    pub fn code(&self) -> &'static str {
        ASSERTION_FAILURE_CODE
    }

    /// Whether the message was generated rather than supplied by the caller.
    pub fn generated_message(&self) -> bool {
        self.generated_message
    }

    /// Human-readable failure text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Logical type name the argument was checked against.
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// What the argument actually was, per the definition's extractor.
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// The comparison the failed check conceptually performed.
    pub fn operator(&self) -> &str {
        &self.operator
    }
}

// The diagnostic fields stay out of the default serialization; only the tag
// and the message travel.
impl Serialize for AssertionFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AssertionFailure", 2)?;
        state.serialize_field("name", ASSERTION_FAILURE_NAME)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Errors from malformed registration or lookup calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A logical type name (or a name derived from it) came out empty.
    #[error("assertion name must be a non-empty string")]
    EmptyName,

    /// A derived name is already installed on the target registry.
    #[error("assertion `{name}` is already registered")]
    Collision { name: String },

    /// Lookup of an entry that was never installed.
    #[error("no assertion registered under `{name}`")]
    Unknown { name: String },
}

/// Union of the two failure taxonomies, surfaced by name-based invocation.
#[derive(Debug, thiserror::Error)]
pub enum AssertError {
    /// A checked value failed its definition.
    #[error(transparent)]
    Failure(#[from] AssertionFailure),

    /// The invocation itself was malformed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::operator;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn defaults_fill_operator_actual_and_message() {
        let failure = AssertionFailure::new("bool", None, None, Some(&json!(1)), None);
        assert_eq!(failure.expected(), "bool");
        assert_eq!(failure.actual(), "number");
        assert_eq!(failure.operator(), operator::STRICT_EQUAL);
        assert_eq!(failure.message(), "value (bool) is required.");
        assert_eq!(failure.name(), ASSERTION_FAILURE_NAME);
        assert_eq!(failure.code(), ASSERTION_FAILURE_CODE);
        assert!(failure.generated_message());
    }

    #[test]
    fn supplied_operator_extractor_and_message_are_used() {
        let extract: ActualFn = Arc::new(crate::introspect::class_name_of);
        let failure = AssertionFailure::new(
            "int",
            Some("Number::as_i64"),
            Some(&extract),
            Some(&json!(1.5)),
            Some("retries"),
        );
        assert_eq!(failure.operator(), "Number::as_i64");
        assert_eq!(failure.actual(), "Float");
        assert_eq!(failure.message(), "retries (int) is required.");
        assert!(!failure.generated_message());
    }

    #[test]
    fn display_is_the_message_alone() {
        let failure = AssertionFailure::new("bool", None, None, Some(&json!(1)), None);
        insta::assert_snapshot!(failure.to_string(), @"value (bool) is required.");
    }

    #[test]
    fn serialization_exposes_only_tag_and_message() {
        let failure = AssertionFailure::new("bool", None, None, Some(&json!(1)), Some("flag"));
        let serialized = serde_json::to_value(&failure).expect("failure serializes");
        assert_eq!(
            serialized,
            json!({
                "name": "AssertionFailure",
                "message": "flag (bool) is required.",
            })
        );
    }

    #[test]
    fn taxonomies_are_distinguishable() {
        let failure: AssertError =
            AssertionFailure::new("bool", None, None, Some(&json!(1)), None).into();
        let config: AssertError = RegistryError::Unknown {
            name: "bool".to_string(),
        }
        .into();

        assert!(matches!(failure, AssertError::Failure(_)));
        assert!(matches!(config, AssertError::Registry(_)));
    }
}
