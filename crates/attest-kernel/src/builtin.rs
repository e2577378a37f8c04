//! Canonical built-in type definitions.
//!
//! This module is the single authority for the types the default namespace
//! ships with. Primitives report the generic kind on failure; the numeric
//! subtype family and the composite types report the structural class,
//! which is the distinction a failed subtype check wants surfaced.

use crate::definition::{Definition, Definitions, operator};
use crate::introspect::{class_name_of, type_name_of};
use serde_json::Value;

/// Names of every built-in definition, in map order.
pub const BUILTIN_NAMES: &[&str] = &[
    "array", "bool", "float", "int", "number", "object", "string", "uint",
];

/// A fresh definitions map holding every built-in type.
pub fn definitions() -> Definitions {
    let mut defs = Definitions::new();

    // Primitives.
    defs.insert(
        "bool".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Bool(_))))
            .operator(operator::STRICT_EQUAL)
            .actual(type_name_of),
    );
    defs.insert(
        "number".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Number(_))))
            .operator(operator::STRICT_EQUAL)
            .actual(type_name_of),
    );
    defs.insert(
        "string".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::String(_))))
            .operator(operator::STRICT_EQUAL)
            .actual(type_name_of),
    );

    // Numeric subtypes.
    defs.insert(
        "int".to_string(),
        Definition::new(|arg| {
            matches!(arg, Some(Value::Number(n)) if n.is_i64() || n.is_u64())
        })
        .operator("Number::as_i64")
        .actual(class_name_of),
    );
    defs.insert(
        "uint".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Number(n)) if n.is_u64()))
            .operator("Number::as_u64")
            .actual(class_name_of),
    );
    defs.insert(
        "float".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Number(n)) if n.is_f64()))
            .operator("Number::as_f64")
            .actual(class_name_of),
    );

    // Composites.
    defs.insert(
        "array".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Array(_))))
            .operator("Value::is_array")
            .actual(class_name_of),
    );
    defs.insert(
        "object".to_string(),
        Definition::new(|arg| matches!(arg, Some(Value::Object(_))))
            .operator("Value::is_object")
            .actual(class_name_of),
    );

    defs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_builtin_name_is_defined_and_nothing_else() {
        let defs = definitions();
        let names: Vec<&str> = defs.keys().map(String::as_str).collect();
        assert_eq!(names, BUILTIN_NAMES);
    }

    #[test]
    fn primitive_checks_match_their_kind() {
        let defs = definitions();
        assert!(defs["bool"].passes(Some(&json!(true))));
        assert!(!defs["bool"].passes(Some(&json!(1))));
        assert!(!defs["bool"].passes(None));

        assert!(defs["number"].passes(Some(&json!(1))));
        assert!(defs["number"].passes(Some(&json!(1.5))));
        assert!(!defs["number"].passes(Some(&json!("1"))));

        assert!(defs["string"].passes(Some(&json!(""))));
        assert!(defs["string"].passes(Some(&json!("abc"))));
        assert!(!defs["string"].passes(Some(&json!(null))));
    }

    #[test]
    fn numeric_subtypes_discriminate_representation() {
        let defs = definitions();
        assert!(defs["int"].passes(Some(&json!(-1))));
        assert!(defs["int"].passes(Some(&json!(0))));
        assert!(defs["int"].passes(Some(&json!(u64::MAX))));
        assert!(!defs["int"].passes(Some(&json!(1.5))));

        assert!(defs["uint"].passes(Some(&json!(0))));
        assert!(defs["uint"].passes(Some(&json!(u64::MAX))));
        assert!(!defs["uint"].passes(Some(&json!(-1))));
        assert!(!defs["uint"].passes(Some(&json!(1.5))));

        assert!(defs["float"].passes(Some(&json!(1.5))));
        assert!(defs["float"].passes(Some(&json!(1.0))));
        assert!(!defs["float"].passes(Some(&json!(1))));
    }

    #[test]
    fn composite_checks_report_the_structural_class() {
        let defs = definitions();
        assert!(defs["array"].passes(Some(&json!([]))));
        assert!(!defs["array"].passes(Some(&json!({}))));
        assert_eq!(defs["array"].describe(Some(&json!({}))), "Object");

        assert!(defs["object"].passes(Some(&json!({}))));
        assert!(!defs["object"].passes(Some(&json!([]))));
        assert_eq!(defs["object"].describe(Some(&json!([]))), "Array");
        assert_eq!(defs["object"].operator_label(), Some("Value::is_object"));
    }
}
