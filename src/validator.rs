//! Validate instances against schemas.
//!
//! This module contains the public face of validation: the
//! [`Validator`](struct.Validator.html) engine, the
//! [`Semantics`](trait.Semantics.html) extension point, and the
//! [`Field`](struct.Field.html) view that keyword evaluators receive.

use crate::errors::ValidationError;
use crate::schema::Schema;
use crate::types;
use crate::vm;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// The reserved field name under which the engine wraps the root value.
///
/// Validation is defined over fields of a containing object, so the entry
/// point places the root value in a synthetic single-field container with
/// this name. Failures against the root schema report it as their field.
pub const ROOT_FIELD: &str = "_data";

/// One field under validation: its name, its value if present, and the
/// object it belongs to.
///
/// Evaluators receive a `Field` rather than a bare value so that
/// presence-sensitive keywords (`optional`, `requires`) can distinguish
/// an absent field from a present one and can see its siblings.
pub struct Field<'a> {
    name: Cow<'a, str>,
    value: Option<&'a Value>,
    siblings: Option<&'a Map<String, Value>>,
}

impl<'a> Field<'a> {
    pub(crate) fn root(value: &'a Value) -> Self {
        Field {
            name: Cow::Borrowed(ROOT_FIELD),
            value: Some(value),
            siblings: None,
        }
    }

    pub(crate) fn property(name: &'a str, parent: &'a Map<String, Value>) -> Self {
        Field {
            name: Cow::Borrowed(name),
            value: parent.get(name),
            siblings: Some(parent),
        }
    }

    /// A view of one element of this field's array value.
    pub(crate) fn child_element(&self, element: &'a Value) -> Self {
        Field {
            name: self.name.clone(),
            value: Some(element),
            siblings: None,
        }
    }

    /// The name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's value, or `None` if it is absent from its container.
    pub fn value(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Whether a sibling field with the given name is present.
    pub fn has_sibling(&self, name: &str) -> bool {
        self.siblings
            .map_or(false, |siblings| siblings.contains_key(name))
    }
}

/// The pluggable part of the engine: type-name resolution and evaluation
/// of keywords outside the built-in vocabulary.
///
/// Both methods have default bodies, so an implementation overrides
/// exactly the behavior it wants to change and inherits the rest — the
/// engine itself never needs modification. To special-case one type name
/// and delegate the rest, call back into
/// [`types::matches`](../types/fn.matches.html):
///
/// ```
/// use jsv::{Schema, Semantics, Validator, ValidationError};
/// use serde_json::{json, Value};
///
/// // Accepts `"type": "function"` for strings that look like Javascript
/// // function definitions.
/// struct FunctionType;
///
/// impl Semantics for FunctionType {
///     fn type_matches(&self, name: &str, value: &Value) -> Result<bool, ValidationError> {
///         if name == "function" {
///             Ok(value.as_str().map_or(false, |s| s.starts_with("function")))
///         } else {
///             jsv::types::matches(name, value)
///         }
///     }
/// }
///
/// let schema: Schema = serde_json::from_value(json!({ "type": "function" })).unwrap();
/// let validator = Validator::with_semantics(FunctionType);
///
/// assert!(validator.validate(&json!("function (x) { return x; }"), &schema).is_ok());
/// assert!(validator.validate(&json!("42"), &schema).is_err());
/// ```
pub trait Semantics {
    /// Decides whether `value` is of the type `name`.
    ///
    /// The default is the built-in vocabulary of
    /// [`types::matches`](../types/fn.matches.html).
    fn type_matches(&self, name: &str, value: &Value) -> Result<bool, ValidationError> {
        types::matches(name, value)
    }

    /// Evaluates the keyword `keyword` with argument `argument` against
    /// `field`.
    ///
    /// The engine calls this for every schema keyword it does not itself
    /// recognize. The default rejects the keyword, so schemas cannot
    /// silently carry unrecognized constraints.
    fn check_keyword(
        &self,
        keyword: &str,
        field: &Field,
        _schema: &Schema,
        _argument: &Value,
    ) -> Result<(), ValidationError> {
        Err(ValidationError::unsupported_keyword(field.name(), keyword))
    }
}

/// The built-in vocabulary and nothing else.
///
/// Custom [`Semantics`](trait.Semantics.html) implementations delegate to
/// this for the behavior they do not override.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CoreSemantics;

impl Semantics for CoreSemantics {}

/// Validates instances against schemas.
///
/// A `Validator` is stateless between calls: every call to
/// [`validate`](#method.validate) gets a fresh schema registry, so the
/// same validator (and the same schema) can be shared freely across
/// threads and reused across unrelated validations.
#[derive(Debug, Default, Clone)]
pub struct Validator<S = CoreSemantics> {
    semantics: S,
}

impl Validator<CoreSemantics> {
    /// Constructs a validator over the built-in vocabulary.
    pub fn new() -> Self {
        Validator {
            semantics: CoreSemantics,
        }
    }
}

impl<S: Semantics> Validator<S> {
    /// Constructs a validator over a custom evaluator set.
    pub fn with_semantics(semantics: S) -> Self {
        Validator { semantics }
    }

    /// Validates `instance` against `schema`.
    ///
    /// Validation is fail-fast: the first violated constraint is returned
    /// and nothing after it is evaluated. Both inputs are borrowed
    /// immutably; the schema is never copied or altered.
    pub fn validate(&self, instance: &Value, schema: &Schema) -> Result<(), ValidationError> {
        vm::validate(&self.semantics, schema, instance)
    }
}

/// Validates `instance` against `schema` with the built-in vocabulary.
pub fn validate(instance: &Value, schema: &Schema) -> Result<(), ValidationError> {
    Validator::new().validate(instance, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(data: Value) -> Schema {
        serde_json::from_value(data).expect("failed to parse schema")
    }

    struct FunctionType;

    impl Semantics for FunctionType {
        fn type_matches(&self, name: &str, value: &Value) -> Result<bool, ValidationError> {
            if name == "function" {
                Ok(value.as_str().map_or(false, |s| s.starts_with("function")))
            } else {
                types::matches(name, value)
            }
        }
    }

    #[test]
    fn type_override_adds_a_name() {
        let validator = Validator::with_semantics(FunctionType);
        let function_schema = schema(json!({ "type": "function" }));

        assert!(validator
            .validate(&json!("function (x) { return x; }"), &function_schema)
            .is_ok());

        let err = validator.validate(&json!("42"), &function_schema).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn type_override_leaves_the_rest_of_the_engine_alone() {
        let validator = Validator::with_semantics(FunctionType);

        assert!(validator
            .validate(&json!("abc"), &schema(json!({ "type": "string", "maxLength": 5 })))
            .is_ok());
        assert!(validator
            .validate(&json!("abcdef"), &schema(json!({ "type": "string", "maxLength": 5 })))
            .is_err());

        let err = validator
            .validate(&json!(1), &schema(json!({ "type": "unicorn" })))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    struct DivisibleBy;

    impl Semantics for DivisibleBy {
        fn check_keyword(
            &self,
            keyword: &str,
            field: &Field,
            schema: &Schema,
            argument: &Value,
        ) -> Result<(), ValidationError> {
            if keyword != "divisibleBy" {
                return CoreSemantics.check_keyword(keyword, field, schema, argument);
            }

            let divisor = argument.as_i64().unwrap_or(1);
            match field.value().and_then(Value::as_i64) {
                Some(n) if n % divisor == 0 => Ok(()),
                _ => Err(ValidationError::new(
                    ErrorKind::RangeViolation,
                    field.name(),
                    keyword,
                    argument.clone(),
                    field.value().cloned(),
                    format!(
                        "value of field '{}' is not divisible by {}",
                        field.name(),
                        divisor
                    ),
                )),
            }
        }
    }

    #[test]
    fn keyword_extension_owns_its_keyword() {
        let validator = Validator::with_semantics(DivisibleBy);
        let by_five = schema(json!({ "type": "integer", "divisibleBy": 5 }));

        assert!(validator.validate(&json!(10), &by_five).is_ok());

        let err = validator.validate(&json!(7), &by_five).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);
        assert_eq!(err.keyword(), "divisibleBy");
    }

    #[test]
    fn keyword_extension_still_rejects_other_unknowns() {
        let validator = Validator::with_semantics(DivisibleBy);
        let err = validator
            .validate(&json!(10), &schema(json!({ "frobnicate": true })))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedSchemaKeyword);
        assert_eq!(err.keyword(), "frobnicate");
    }

    #[test]
    fn base_engine_rejects_unknown_keywords() {
        let err = validate(&json!(1), &schema(json!({ "frobnicate": true }))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedSchemaKeyword);
    }

    #[test]
    fn validation_is_idempotent_and_leaves_the_schema_alone() {
        let parsed = schema(json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer", "minimum": 0, "optional": true }
            }
        }));
        let before = parsed.clone();
        let instance = json!({ "name": "x", "age": 3 });

        let first = validate(&instance, &parsed);
        let second = validate(&instance, &parsed);
        assert_eq!(first, second);
        assert_eq!(parsed, before);

        let bad = json!({ "age": -1 });
        let first = validate(&bad, &parsed);
        let second = validate(&bad, &parsed);
        assert_eq!(first, second);
        assert_eq!(parsed, before);
    }

    #[test]
    fn failures_carry_instance_paths() {
        let nested = schema(json!({
            "type": "object",
            "properties": {
                "job": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        }));

        let err = validate(&json!({ "job": { "name": 5 } }), &nested).unwrap_err();
        assert_eq!(err.field(), "name");
        assert_eq!(err.path().to_string(), "/job/name");

        let err = validate(&json!({ "job": {} }), &nested).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.field(), "name");
        assert_eq!(err.path().to_string(), "/job");
    }
}
