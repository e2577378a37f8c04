//! # Attest Kernel
//!
//! Runtime type assertions over dynamic JSON values.
//!
//! A [`Definition`] declares one logical type: a check predicate plus the
//! diagnostic metadata a failure carries. The registry mechanically derives
//! four callable assertion entries per definition and installs them under
//! derived names:
//!
//! ```text
//! Definition            ← check + operator label + actual-value extractor
//!     │
//! DerivedNames          ← name, optionalName, arrayOfName, optionalArrayOfName
//!     │
//! Assert                ← the target namespace: entry table + truthy seed
//!     │
//! AssertionFailure      ← the structured error a failed check produces
//! ```
//!
//! The engine is value-agnostic within JSON: it never inspects an argument
//! itself; it only runs the definition's check and, on failure, its
//! extractor. Arguments are `Option<&Value>`; `None` is an absent argument
//! (a missing field), distinct from an explicit `null`.
//!
//! ```
//! use attest_kernel::{Assert, Definition, Definitions, RegisterOptions};
//! use serde_json::{Value, json};
//!
//! let mut defs = Definitions::new();
//! defs.insert(
//!     "bool".to_string(),
//!     Definition::new(|arg| matches!(arg, Some(Value::Bool(_)))),
//! );
//!
//! let mut assert = Assert::new();
//! assert.register(&defs, RegisterOptions::default()).unwrap();
//!
//! let flag = json!(true);
//! assert.apply("bool", Some(&flag), None).unwrap();
//! assert.apply("optionalBool", None, None).unwrap();
//! assert.apply("bool", Some(&json!(1)), None).unwrap_err();
//! ```

pub mod builtin;
pub mod definition;
pub mod error;
pub mod introspect;
pub mod registry;

pub use definition::{ActualFn, CheckFn, Definition, Definitions, operator};
pub use error::{
    ASSERTION_FAILURE_CODE, ASSERTION_FAILURE_NAME, AssertError, AssertionFailure, RegistryError,
};
pub use introspect::{capitalize, class_name_of, type_name_of};
pub use registry::{
    Assert, AssertFn, DerivedNames, RegisterOptions, default_assert, register_defaults, truthy,
};
