//! Value introspection helpers.
//!
//! Two extractors describe a failing argument: [`type_name_of`] answers with
//! the generic runtime kind (`"number"`, `"string"`, …), [`class_name_of`]
//! with the finer structural class (`"Integer"`, `"Float"`, …). The built-in
//! definitions default to these; custom definitions may reuse them or supply
//! their own.

use serde_json::Value;

/// Upcase the first character of a name, leaving the rest untouched.
///
/// This is the naming rule behind derived assertion entries:
/// `"optional"` + `capitalize("bool")` = `"optionalBool"`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Generic runtime kind of an assertion argument.
///
/// An absent argument reads as `"missing"`; everything else is its JSON kind.
pub fn type_name_of(arg: Option<&Value>) -> String {
    let name = match arg {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    };
    name.to_string()
}

/// Structural class of an assertion argument.
///
/// Finer than [`type_name_of`] for numbers: integers and floats are
/// distinguished, which is what a failed subtype check wants reported.
pub fn class_name_of(arg: Option<&Value>) -> String {
    let name = match arg {
        None => "Missing",
        Some(Value::Null) => "Null",
        Some(Value::Bool(_)) => "Boolean",
        Some(Value::Number(n)) if n.is_f64() => "Float",
        Some(Value::Number(_)) => "Integer",
        Some(Value::String(_)) => "String",
        Some(Value::Array(_)) => "Array",
        Some(Value::Object(_)) => "Object",
    };
    name.to_string()
}
