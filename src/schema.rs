//! Schema representation.
//!
//! A [`Schema`](struct.Schema.html) is a mapping from keyword name to
//! keyword argument, with one typed field per recognized keyword. It is
//! meant for use with the `serde` crate: deserialize one from any data
//! format, then hand it to a
//! [`Validator`](../validator/struct.Validator.html).
//!
//! Keywords outside the recognized vocabulary are collected into
//! [`extra`](struct.Schema.html#structfield.extra) rather than dropped;
//! the engine rejects them at validation time unless a custom
//! [`Semantics`](../validator/trait.Semantics.html) claims them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A schema node: the set of constraints for one field.
///
/// Every keyword is optional in the serialized form. Keywords with a
/// documented default (`optional`, `unique`, `additionalProperties`) are
/// read through the accessor methods, which substitute the default when
/// the keyword is absent — evaluators never see the difference between an
/// absent keyword and one explicitly set to its default.
#[derive(Debug, PartialEq, Deserialize, Serialize, Default, Clone)]
pub struct Schema {
    /// Registers this node in the per-call schema registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub typ: Option<TypeDecl>,

    /// Sub-schemas for declared object keys, validated recursively.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    /// A single sub-schema applied to every array element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    /// Whether the field may be absent from its containing object.
    /// Defaults to `false`: fields are required unless declared optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,

    /// Policy for object keys not declared under `properties`. Defaults
    /// to permissive.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,

    /// If this field is present, the named sibling field must be too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires: Option<String>,

    /// Reserved for tree-wide uniqueness. Accepted but not enforced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,

    /// Lower bound on a number, or on an array's element count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Upper bound on a number, or on an array's element count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "minItems")]
    pub min_items: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxItems")]
    pub max_items: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "minLength")]
    pub min_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxLength")]
    pub max_length: Option<usize>,

    /// Regular expression a string value must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// The value must equal one of these options.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "enum")]
    pub enumeration: Option<Vec<Value>>,

    /// Must be a string if present; carries no other constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    /// Must be a string if present; carries no other constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,

    // The remaining metadata keywords are accepted and carried, but the
    // engine enforces nothing about them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxDecimal")]
    pub max_decimal: Option<Value>,

    /// The value must NOT satisfy this type declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disallow: Option<TypeDecl>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<Value>,

    /// Keywords outside the recognized vocabulary, in sorted order.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Schema {
    /// Whether the field this schema constrains may be absent.
    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    /// Whether the field is declared `unique`. Informational only; the
    /// engine does not enforce uniqueness.
    pub fn is_unique(&self) -> bool {
        self.unique.unwrap_or(false)
    }

    /// The policy for object keys not declared under `properties`.
    pub fn additional_policy(&self) -> &AdditionalProperties {
        const PERMIT: &AdditionalProperties = &AdditionalProperties::Allowed(true);
        self.additional_properties.as_ref().unwrap_or(PERMIT)
    }

    /// Whether `name` is declared under `properties`.
    pub fn declares_property(&self, name: &str) -> bool {
        self.properties
            .as_ref()
            .map_or(false, |properties| properties.contains_key(name))
    }
}

/// The argument of the `type` and `disallow` keywords: one type name, or
/// an ordered list of names with union semantics (the value is valid if
/// it matches any member).
#[derive(Debug, PartialEq, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Union(Vec<String>),
}

impl TypeDecl {
    /// The declared type names, in order.
    pub fn names(&self) -> &[String] {
        match self {
            TypeDecl::Single(name) => std::slice::from_ref(name),
            TypeDecl::Union(names) => names,
        }
    }

    /// The declaration as a JSON value, for error reporting.
    pub fn to_value(&self) -> Value {
        match self {
            TypeDecl::Single(name) => Value::String(name.clone()),
            TypeDecl::Union(names) => {
                Value::Array(names.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// The argument of the `additionalProperties` keyword.
#[derive(Debug, PartialEq, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` permits undeclared keys, `false` rejects them.
    Allowed(bool),

    /// Undeclared keys are validated against this schema.
    Schema(Box<Schema>),
}
