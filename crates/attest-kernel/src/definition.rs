//! Declarative type definitions.
//!
//! A [`Definition`] is the unit the registry consumes: a check predicate, a
//! diagnostic operator label, and an actual-value extractor. The registry
//! clones definitions into the derived assertion closures; a definition is
//! immutable once registered and is never inspected beyond running its check
//! and, on failure, its extractor.

use crate::introspect::type_name_of;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Comparison-operator labels carried into assertion failures.
///
/// Diagnostic only; the engine never evaluates them.
pub mod operator {
    /// The default label when a definition names none.
    pub const STRICT_EQUAL: &str = "strictEqual";

    /// Label for the negated standard comparison.
    pub const NOT_STRICT_EQUAL: &str = "notStrictEqual";
}

/// Check predicate over an assertion argument.
///
/// Pure and must not panic. `None` is an absent argument, so custom
/// definitions keep full authority over the absent case.
pub type CheckFn = Arc<dyn Fn(Option<&Value>) -> bool + Send + Sync>;

/// Extractor rendering what a failing argument actually was.
pub type ActualFn = Arc<dyn Fn(Option<&Value>) -> String + Send + Sync>;

/// A mapping from logical type name to its definition.
///
/// Ordered, so registration walks entries deterministically.
pub type Definitions = BTreeMap<String, Definition>;

/// Declarative record of the check and diagnostic metadata for one logical
/// type.
#[derive(Clone)]
pub struct Definition {
    check: CheckFn,
    operator: Option<String>,
    actual: Option<ActualFn>,
}

impl Definition {
    /// A definition with the given check, the default operator label, and
    /// the generic kind extractor.
    pub fn new(check: impl Fn(Option<&Value>) -> bool + Send + Sync + 'static) -> Self {
        Self {
            check: Arc::new(check),
            operator: None,
            actual: None,
        }
    }

    /// Name the comparison the check conceptually performs.
    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Supply the extractor used to describe a failing argument.
    pub fn actual(
        mut self,
        actual: impl Fn(Option<&Value>) -> String + Send + Sync + 'static,
    ) -> Self {
        self.actual = Some(Arc::new(actual));
        self
    }

    /// Run the check against an argument.
    pub fn passes(&self, arg: Option<&Value>) -> bool {
        (self.check)(arg)
    }

    /// The operator label, if one was named.
    pub fn operator_label(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// The actual-value extractor, if one was supplied.
    pub fn actual_extractor(&self) -> Option<&ActualFn> {
        self.actual.as_ref()
    }

    /// Describe an argument with this definition's extractor, falling back
    /// to the generic kind extractor.
    pub fn describe(&self, arg: Option<&Value>) -> String {
        match &self.actual {
            Some(actual) => actual(arg),
            None => type_name_of(arg),
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("operator", &self.operator)
            .field("has_actual", &self.actual.is_some())
            .finish_non_exhaustive()
    }
}
