//! The primitive type vocabulary.
//!
//! This module is the predicate behind the `type` and `disallow`
//! keywords. Custom [`Semantics`](../validator/trait.Semantics.html)
//! implementations that add their own type names delegate every other
//! name back to [`matches`](fn.matches.html).

use crate::errors::ValidationError;
use serde_json::Value;

/// The type names understood by the base validator.
pub const VOCABULARY: &[&str] = &[
    "string", "number", "integer", "boolean", "object", "array", "null", "any",
];

/// Decides whether `value` is of the primitive type `name`.
///
/// `any` matches every value. `integer` matches only values represented
/// as whole numbers, while `number` also matches fractional ones.
/// Booleans are their own type and never satisfy `number` or `integer`.
///
/// Returns `UnsupportedType` for a name outside the vocabulary.
pub fn matches(name: &str, value: &Value) -> Result<bool, ValidationError> {
    match name {
        "string" => Ok(value.is_string()),
        "number" => Ok(value.is_number()),
        "integer" => Ok(value.is_i64() || value.is_u64()),
        "boolean" => Ok(value.is_boolean()),
        "object" => Ok(value.is_object()),
        "array" => Ok(value.is_array()),
        "null" => Ok(value.is_null()),
        "any" => Ok(true),
        _ => Err(ValidationError::unsupported_type(name)),
    }
}
