//! The target namespace and the registration/derivation engine.
//!
//! [`Assert`] owns a table of named assertion closures plus the seed truthy
//! check. Registration derives up to four entries per definition
//! (`name`, `optionalName`, `arrayOfName`, `optionalArrayOfName`) with one
//! naming rule, one failure construction path, and one treatment of absent
//! values across all of them.
//!
//! Name uniqueness is all-or-nothing per logical type: the four derived
//! names are checked before any variant of that type installs. Entries from
//! earlier types of the same `register` call stay installed when a later
//! type fails; there is no rollback.

use crate::definition::{Definition, Definitions, operator};
use crate::error::{AssertError, AssertionFailure, RegistryError};
use crate::introspect::capitalize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

/// An installed assertion entry: argument plus optional user message.
pub type AssertFn =
    Arc<dyn Fn(Option<&Value>, Option<&str>) -> Result<(), AssertionFailure> + Send + Sync>;

/// Which derived variants a `register` call installs. All default on.
///
/// Disabling a flag skips that variant for every entry of the call; it never
/// removes entries installed earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterOptions {
    /// Install the required form under the logical name itself.
    pub standard: bool,

    /// Install the `optionalName` form.
    pub optional: bool,

    /// Install the `arrayOfName` form.
    pub array_of: bool,

    /// Install the `optionalArrayOfName` form.
    pub optional_array_of: bool,
}

impl Default for RegisterOptions {
    fn default() -> Self {
        Self {
            standard: true,
            optional: true,
            array_of: true,
            optional_array_of: true,
        }
    }
}

/// The four physical names derived from one logical type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    /// The logical name itself (required form).
    pub standard: String,

    /// `optional` + capitalized name.
    pub optional: String,

    /// `arrayOf` + capitalized name.
    pub array_of: String,

    /// `optionalArrayOf` + capitalized name.
    pub optional_array_of: String,
}

impl DerivedNames {
    /// Derive the four names. Fails on an empty logical name.
    pub fn derive(name: &str) -> Result<Self, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        let capitalized = capitalize(name);
        Ok(Self {
            standard: name.to_string(),
            optional: format!("optional{capitalized}"),
            array_of: format!("arrayOf{capitalized}"),
            optional_array_of: format!("optionalArrayOf{capitalized}"),
        })
    }

    fn all(&self) -> [&str; 4] {
        [
            &self.standard,
            &self.optional,
            &self.array_of,
            &self.optional_array_of,
        ]
    }
}

/// The target namespace: a named-entry table plus the seed truthy check.
///
/// Registration mutates the table in place and returns `&mut Self` for
/// chaining. Invocation borrows the table immutably, carries no state, and
/// is safe for unrestricted concurrent use. Callers either own an instance
/// or go through [`default_assert`].
#[derive(Default)]
pub struct Assert {
    entries: BTreeMap<String, AssertFn>,
}

impl Assert {
    /// An empty namespace: just the truthy seed, no entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// A namespace pre-populated with the built-in definitions, all four
    /// variants enabled.
    pub fn with_builtins() -> Self {
        let mut assert = Self::new();
        assert
            .register(&crate::builtin::definitions(), RegisterOptions::default())
            .expect("built-in definitions register on an empty namespace");
        assert
    }

    /// The seed assertion the registry augments: fail on a falsy argument.
    ///
    /// Falsy: absent, `null`, `false`, numeric zero, the empty string.
    pub fn truthy(
        &self,
        arg: Option<&Value>,
        message: Option<&str>,
    ) -> Result<(), AssertionFailure> {
        truthy(arg, message)
    }

    /// Register every definition in `definitions`, deriving the variants
    /// `options` enables.
    ///
    /// Entries install eagerly in map order; a failure halts the call and
    /// leaves earlier entries in place. Within one entry the four derived
    /// names are checked before any variant installs, so a collision never
    /// leaves a type partially registered.
    pub fn register(
        &mut self,
        definitions: &Definitions,
        options: RegisterOptions,
    ) -> Result<&mut Self, RegistryError> {
        for (name, definition) in definitions {
            let derived = DerivedNames::derive(name)?;
            self.ensure_available(derived.all())?;
            if options.standard {
                self.install_standard(&derived.standard, name, definition);
            }
            if options.optional {
                self.install_optional(&derived.optional, name, definition);
            }
            if options.array_of {
                self.install_array_of(&derived.array_of, name, definition);
            }
            if options.optional_array_of {
                self.install_optional_array_of(&derived.optional_array_of, name, definition);
            }
        }
        Ok(self)
    }

    /// Register only the required form of a single type.
    pub fn register_standard_assert(
        &mut self,
        name: &str,
        definition: &Definition,
    ) -> Result<&mut Self, RegistryError> {
        let derived = DerivedNames::derive(name)?;
        self.ensure_available([derived.standard.as_str()])?;
        self.install_standard(&derived.standard, name, definition);
        Ok(self)
    }

    /// Register only the `optionalName` form of a single type.
    pub fn register_optional_assert(
        &mut self,
        name: &str,
        definition: &Definition,
    ) -> Result<&mut Self, RegistryError> {
        let derived = DerivedNames::derive(name)?;
        self.ensure_available([derived.optional.as_str()])?;
        self.install_optional(&derived.optional, name, definition);
        Ok(self)
    }

    /// Register only the `arrayOfName` form of a single type.
    pub fn register_array_of_assert(
        &mut self,
        name: &str,
        definition: &Definition,
    ) -> Result<&mut Self, RegistryError> {
        let derived = DerivedNames::derive(name)?;
        self.ensure_available([derived.array_of.as_str()])?;
        self.install_array_of(&derived.array_of, name, definition);
        Ok(self)
    }

    /// Register only the `optionalArrayOfName` form of a single type.
    pub fn register_optional_array_of_assert(
        &mut self,
        name: &str,
        definition: &Definition,
    ) -> Result<&mut Self, RegistryError> {
        let derived = DerivedNames::derive(name)?;
        self.ensure_available([derived.optional_array_of.as_str()])?;
        self.install_optional_array_of(&derived.optional_array_of, name, definition);
        Ok(self)
    }

    /// The entry installed under `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<&AssertFn> {
        self.entries.get(name)
    }

    /// Invoke the entry installed under `name`.
    pub fn apply(
        &self,
        name: &str,
        arg: Option<&Value>,
        message: Option<&str>,
    ) -> Result<(), AssertError> {
        let entry = self.entries.get(name).ok_or_else(|| RegistryError::Unknown {
            name: name.to_string(),
        })?;
        entry(arg, message)?;
        Ok(())
    }

    /// Installed entry names, in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Whether an entry is installed under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of installed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Standard comparison: fail unless `actual` equals `expected`.
    pub fn equal(
        &self,
        actual: &Value,
        expected: &Value,
        message: Option<&str>,
    ) -> Result<(), AssertionFailure> {
        if actual == expected {
            Ok(())
        } else {
            Err(AssertionFailure::comparison(
                actual,
                expected,
                operator::STRICT_EQUAL,
                message,
            ))
        }
    }

    /// Standard comparison: fail when `actual` equals `expected`.
    pub fn not_equal(
        &self,
        actual: &Value,
        expected: &Value,
        message: Option<&str>,
    ) -> Result<(), AssertionFailure> {
        if actual != expected {
            Ok(())
        } else {
            Err(AssertionFailure::comparison(
                actual,
                expected,
                operator::NOT_STRICT_EQUAL,
                message,
            ))
        }
    }

    fn ensure_available<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), RegistryError> {
        for name in names {
            if self.entries.contains_key(name) {
                return Err(RegistryError::Collision {
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }

    fn install(&mut self, physical: &str, entry: AssertFn) {
        self.entries.insert(physical.to_string(), entry);
    }

    fn install_standard(&mut self, physical: &str, name: &str, definition: &Definition) {
        let name = name.to_string();
        let definition = definition.clone();
        self.install(
            physical,
            Arc::new(move |arg, message| check_or_fail(&name, &definition, arg, message)),
        );
    }

    fn install_optional(&mut self, physical: &str, name: &str, definition: &Definition) {
        let name = name.to_string();
        let definition = definition.clone();
        self.install(
            physical,
            Arc::new(move |arg, message| {
                if is_absent(arg) {
                    return Ok(());
                }
                check_or_fail(&name, &definition, arg, message)
            }),
        );
    }

    fn install_array_of(&mut self, physical: &str, name: &str, definition: &Definition) {
        let physical_name = physical.to_string();
        let name = name.to_string();
        let definition = definition.clone();
        self.install(
            physical,
            Arc::new(move |arg, message| {
                check_each(&physical_name, &name, &definition, arg, message)
            }),
        );
    }

    fn install_optional_array_of(&mut self, physical: &str, name: &str, definition: &Definition) {
        let physical_name = physical.to_string();
        let name = name.to_string();
        let definition = definition.clone();
        self.install(
            physical,
            Arc::new(move |arg, message| {
                if is_absent(arg) {
                    return Ok(());
                }
                check_each(&physical_name, &name, &definition, arg, message)
            }),
        );
    }
}

impl fmt::Debug for Assert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assert")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Registry-free form of the base truthy assertion.
///
/// `serde_json` numbers cannot encode NaN, so zero is the only falsy number.
pub fn truthy(arg: Option<&Value>, message: Option<&str>) -> Result<(), AssertionFailure> {
    if is_falsy(arg) {
        return Err(AssertionFailure::new("truthy", None, None, arg, message));
    }
    Ok(())
}

/// The library's own default namespace: created once on first access,
/// pre-populated with the built-ins, shared process-wide behind its
/// registration lock.
pub fn default_assert() -> &'static RwLock<Assert> {
    static DEFAULT: OnceLock<RwLock<Assert>> = OnceLock::new();
    DEFAULT.get_or_init(|| RwLock::new(Assert::with_builtins()))
}

/// Register onto the default namespace, for callers that do not thread a
/// registry of their own. Returns the default namespace.
pub fn register_defaults(
    definitions: &Definitions,
    options: RegisterOptions,
) -> Result<&'static RwLock<Assert>, RegistryError> {
    let target = default_assert();
    target
        .write()
        .expect("default assert lock poisoned")
        .register(definitions, options)?;
    Ok(target)
}

/// An argument the optional variants skip: absent or explicit null.
fn is_absent(arg: Option<&Value>) -> bool {
    matches!(arg, None | Some(Value::Null))
}

fn is_falsy(arg: Option<&Value>) -> bool {
    match arg {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !*b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f == 0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

fn check_or_fail(
    name: &str,
    definition: &Definition,
    arg: Option<&Value>,
    message: Option<&str>,
) -> Result<(), AssertionFailure> {
    if definition.passes(arg) {
        Ok(())
    } else {
        Err(AssertionFailure::new(
            name,
            definition.operator_label(),
            definition.actual_extractor(),
            arg,
            message,
        ))
    }
}

// Whole-argument failures carry the variant's own derived name; element
// failures carry the base logical name. Fail-fast on the first bad element.
fn check_each(
    physical: &str,
    name: &str,
    definition: &Definition,
    arg: Option<&Value>,
    message: Option<&str>,
) -> Result<(), AssertionFailure> {
    let Some(Value::Array(items)) = arg else {
        return Err(AssertionFailure::new(
            physical,
            definition.operator_label(),
            definition.actual_extractor(),
            arg,
            message,
        ));
    };
    for item in items {
        check_or_fail(name, definition, Some(item), message)?;
    }
    Ok(())
}
