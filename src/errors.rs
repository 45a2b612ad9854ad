//! The failure taxonomy for validation.

use failure::Fail;
use json_pointer::JsonPointer;
use serde_json::Value;

/// The location of a value within the instance, as a JSON pointer.
///
/// The empty pointer refers to the root of the instance.
pub type InstancePath = JsonPointer<String, Vec<String>>;

/// The broad category of a [`ValidationError`](struct.ValidationError.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The value did not satisfy the schema's `type` (or satisfied its
    /// `disallow`).
    TypeMismatch,

    /// A non-`optional` field was absent from its containing object.
    MissingRequiredField,

    /// A field named by `requires` was absent from the containing object.
    DependencyViolation,

    /// A `minimum`/`maximum` bound on a number, or a `minimum`/`maximum`/
    /// `minItems`/`maxItems` bound on an element count, was violated.
    RangeViolation,

    /// A `minLength`/`maxLength` bound on a string was violated.
    LengthViolation,

    /// A string did not match the schema's `pattern`.
    PatternMismatch,

    /// The value was not equal to any member of the schema's `enum`.
    EnumViolation,

    /// An object carried a key not declared under `properties` while
    /// `additionalProperties` was `false`.
    AdditionalPropertyViolation,

    /// The schema used a keyword outside the recognized vocabulary.
    UnsupportedSchemaKeyword,

    /// A type declaration named a type outside the recognized vocabulary.
    UnsupportedType,

    /// A metadata keyword (`title`, `description`) was not a string.
    MetadataTypeError,

    /// The schema's `pattern` is not a valid regular expression.
    InvalidPattern,
}

/// A single constraint violation.
///
/// `ValidationError` is the terminal result of a failed validation: the
/// engine stops at the first violated constraint and surfaces it as this
/// record. It names the field that was being checked, the keyword that
/// rejected it, the keyword's argument (`expected`), the offending value
/// (`actual`, absent for missing-field failures), and the path from the
/// root of the instance to the value.
#[derive(Debug, Fail, Clone, PartialEq)]
#[fail(display = "{}", message)]
pub struct ValidationError {
    kind: ErrorKind,
    field: String,
    keyword: String,
    expected: Value,
    actual: Option<Value>,
    path: InstancePath,
    message: String,
}

impl ValidationError {
    /// Constructs an error from its parts.
    ///
    /// Custom [`Semantics`](../validator/trait.Semantics.html)
    /// implementations use this to report failures for the keywords they
    /// add; the engine's own failures go through the named constructors
    /// below.
    pub fn new(
        kind: ErrorKind,
        field: &str,
        keyword: &str,
        expected: Value,
        actual: Option<Value>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError {
            kind,
            field: field.to_owned(),
            keyword: keyword.to_owned(),
            expected,
            actual,
            path: JsonPointer::new(Vec::new()),
            message: message.into(),
        }
    }

    pub fn type_mismatch(field: &str, expected: Value, actual: &Value) -> Self {
        let message = format!("value for field '{}' is not of type {}", field, expected);
        Self::new(
            ErrorKind::TypeMismatch,
            field,
            "type",
            expected,
            Some(actual.clone()),
            message,
        )
    }

    pub fn disallowed(field: &str, expected: Value, actual: &Value) -> Self {
        let message = format!("value for field '{}' is of disallowed type {}", field, expected);
        Self::new(
            ErrorKind::TypeMismatch,
            field,
            "disallow",
            expected,
            Some(actual.clone()),
            message,
        )
    }

    pub fn missing_required(field: &str) -> Self {
        let message = format!("required field '{}' is missing", field);
        Self::new(
            ErrorKind::MissingRequiredField,
            field,
            "optional",
            Value::Bool(false),
            None,
            message,
        )
    }

    pub fn dependency(field: &str, requires: &str) -> Self {
        let message = format!(
            "field '{}' requires field '{}' to be present",
            field, requires
        );
        Self::new(
            ErrorKind::DependencyViolation,
            field,
            "requires",
            Value::String(requires.to_owned()),
            None,
            message,
        )
    }

    pub fn below_minimum(field: &str, bound: f64, actual: &Value) -> Self {
        let message = format!(
            "value {} of field '{}' is less than minimum {}",
            actual, field, bound
        );
        Self::range(field, "minimum", bound, actual, message)
    }

    pub fn above_maximum(field: &str, bound: f64, actual: &Value) -> Self {
        let message = format!(
            "value {} of field '{}' is greater than maximum {}",
            actual, field, bound
        );
        Self::range(field, "maximum", bound, actual, message)
    }

    pub fn too_few_items(field: &str, bound: usize, actual: &Value) -> Self {
        let message = format!("field '{}' must have at least {} items", field, bound);
        Self::range(field, "minItems", bound as f64, actual, message)
    }

    pub fn too_many_items(field: &str, bound: usize, actual: &Value) -> Self {
        let message = format!("field '{}' must have at most {} items", field, bound);
        Self::range(field, "maxItems", bound as f64, actual, message)
    }

    fn range(field: &str, keyword: &str, bound: f64, actual: &Value, message: String) -> Self {
        Self::new(
            ErrorKind::RangeViolation,
            field,
            keyword,
            serde_json::json!(bound),
            Some(actual.clone()),
            message,
        )
    }

    pub fn too_short(field: &str, bound: usize, actual: &Value) -> Self {
        let message = format!(
            "length of value for field '{}' must be at least {}",
            field, bound
        );
        Self::length(field, "minLength", bound, actual, message)
    }

    pub fn too_long(field: &str, bound: usize, actual: &Value) -> Self {
        let message = format!(
            "length of value for field '{}' must be at most {}",
            field, bound
        );
        Self::length(field, "maxLength", bound, actual, message)
    }

    fn length(field: &str, keyword: &str, bound: usize, actual: &Value, message: String) -> Self {
        Self::new(
            ErrorKind::LengthViolation,
            field,
            keyword,
            serde_json::json!(bound),
            Some(actual.clone()),
            message,
        )
    }

    pub fn pattern_mismatch(field: &str, pattern: &str, actual: &Value) -> Self {
        let message = format!(
            "value for field '{}' does not match pattern '{}'",
            field, pattern
        );
        Self::new(
            ErrorKind::PatternMismatch,
            field,
            "pattern",
            Value::String(pattern.to_owned()),
            Some(actual.clone()),
            message,
        )
    }

    pub fn invalid_pattern(field: &str, pattern: &str, detail: impl std::fmt::Display) -> Self {
        let message = format!("invalid pattern '{}': {}", pattern, detail);
        Self::new(
            ErrorKind::InvalidPattern,
            field,
            "pattern",
            Value::String(pattern.to_owned()),
            None,
            message,
        )
    }

    pub fn enum_violation(field: &str, options: &[Value], actual: &Value) -> Self {
        let message = format!(
            "value for field '{}' is not one of the permitted options",
            field
        );
        Self::new(
            ErrorKind::EnumViolation,
            field,
            "enum",
            Value::Array(options.to_vec()),
            Some(actual.clone()),
            message,
        )
    }

    pub fn additional_property(field: &str) -> Self {
        let message = format!(
            "field '{}' is not declared by the schema, and additional properties are not allowed",
            field
        );
        Self::new(
            ErrorKind::AdditionalPropertyViolation,
            field,
            "additionalProperties",
            Value::Bool(false),
            None,
            message,
        )
    }

    pub fn unsupported_keyword(field: &str, keyword: &str) -> Self {
        let message = format!("unsupported schema keyword '{}'", keyword);
        Self::new(
            ErrorKind::UnsupportedSchemaKeyword,
            field,
            keyword,
            Value::Null,
            None,
            message,
        )
    }

    pub fn unsupported_type(name: &str) -> Self {
        let message = format!("unsupported type declaration '{}'", name);
        Self::new(
            ErrorKind::UnsupportedType,
            "",
            "type",
            Value::String(name.to_owned()),
            None,
            message,
        )
    }

    pub fn metadata_type(field: &str, keyword: &str, actual: &Value) -> Self {
        let message = format!(
            "schema keyword '{}' for field '{}' must be a string",
            keyword, field
        );
        Self::new(
            ErrorKind::MetadataTypeError,
            field,
            keyword,
            Value::String("string".to_owned()),
            Some(actual.clone()),
            message,
        )
    }

    /// Attaches the instance path at which the failure occurred.
    pub(crate) fn at(mut self, path: InstancePath) -> Self {
        self.path = path;
        self
    }

    /// The category of the failure.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The name of the field that was being validated.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The schema keyword that rejected the value.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The keyword's argument, i.e. the constraint the value was held to.
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// The offending value, if the field was present.
    pub fn actual(&self) -> Option<&Value> {
        self.actual.as_ref()
    }

    /// A pointer to the part of the instance which was rejected.
    pub fn path(&self) -> &InstancePath {
        &self.path
    }

    /// The human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_name_the_parts() {
        let err = ValidationError::type_mismatch("age", json!("integer"), &json!("x"));
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.field(), "age");
        assert_eq!(err.keyword(), "type");
        assert_eq!(err.actual(), Some(&json!("x")));
        assert!(err.message().contains("age"));
        assert!(err.message().contains("integer"));
    }

    #[test]
    fn missing_field_has_no_actual() {
        let err = ValidationError::missing_required("name");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
        assert_eq!(err.actual(), None);
        assert_eq!(err.path().to_string(), "");
    }

    #[test]
    fn display_matches_message() {
        let err = ValidationError::dependency("a", "b");
        assert_eq!(format!("{}", err), err.message());
    }
}
