use crate::errors::{InstancePath, ValidationError};
use crate::registry::SchemaRegistry;
use crate::schema::{AdditionalProperties, Schema, TypeDecl};
use crate::validator::{Field, Semantics};
use json_pointer::JsonPointer;
use regex::Regex;
use serde_json::{Map, Value};
use std::borrow::Cow;

pub(crate) fn validate<'a, S: Semantics>(
    semantics: &'a S,
    schema: &'a Schema,
    instance: &'a Value,
) -> Result<(), ValidationError> {
    let mut vm = Vm {
        semantics,
        registry: SchemaRegistry::new(),
        instance_tokens: vec![],
    };

    vm.eval_field(&Field::root(instance), schema)
}

struct Vm<'a, S> {
    semantics: &'a S,
    registry: SchemaRegistry,
    instance_tokens: Vec<Cow<'a, str>>,
}

impl<'a, S: Semantics> Vm<'a, S> {
    fn eval_field(&mut self, field: &Field<'a>, schema: &'a Schema) -> Result<(), ValidationError> {
        if let Some(id) = &schema.id {
            self.registry.insert(id, schema);
        }

        let value = match field.value() {
            Some(value) => value,
            None => {
                if !schema.is_optional() {
                    return self.fail(ValidationError::missing_required(field.name()));
                }
                // An absent optional field satisfies every other keyword.
                return Ok(());
            }
        };

        // `type` goes first so a value of the wrong kind entirely reports
        // a type mismatch rather than some secondary shape failure.
        if let Some(decl) = &schema.typ {
            if !self.decl_matches(decl, value)? {
                return self.fail(ValidationError::type_mismatch(
                    field.name(),
                    decl.to_value(),
                    value,
                ));
            }
        }

        if let Some(decl) = &schema.disallow {
            if self.decl_matches(decl, value)? {
                return self.fail(ValidationError::disallowed(
                    field.name(),
                    decl.to_value(),
                    value,
                ));
            }
        }

        if let Some(title) = &schema.title {
            if !title.is_string() {
                return self.fail(ValidationError::metadata_type(field.name(), "title", title));
            }
        }

        if let Some(description) = &schema.description {
            if !description.is_string() {
                return self.fail(ValidationError::metadata_type(
                    field.name(),
                    "description",
                    description,
                ));
            }
        }

        // `minimum`/`maximum` bound numbers, and element counts of arrays.
        if let Some(minimum) = schema.minimum {
            if let Some(n) = value.as_f64() {
                if n < minimum {
                    return self.fail(ValidationError::below_minimum(
                        field.name(),
                        minimum,
                        value,
                    ));
                }
            } else if let Some(elements) = value.as_array() {
                if (elements.len() as f64) < minimum {
                    return self.fail(ValidationError::below_minimum(
                        field.name(),
                        minimum,
                        value,
                    ));
                }
            }
        }

        if let Some(maximum) = schema.maximum {
            if let Some(n) = value.as_f64() {
                if n > maximum {
                    return self.fail(ValidationError::above_maximum(
                        field.name(),
                        maximum,
                        value,
                    ));
                }
            } else if let Some(elements) = value.as_array() {
                if (elements.len() as f64) > maximum {
                    return self.fail(ValidationError::above_maximum(
                        field.name(),
                        maximum,
                        value,
                    ));
                }
            }
        }

        if let Some(elements) = value.as_array() {
            if let Some(bound) = schema.min_items {
                if elements.len() < bound {
                    return self.fail(ValidationError::too_few_items(field.name(), bound, value));
                }
            }

            if let Some(bound) = schema.max_items {
                if elements.len() > bound {
                    return self.fail(ValidationError::too_many_items(field.name(), bound, value));
                }
            }
        }

        if let Some(s) = value.as_str() {
            if let Some(bound) = schema.min_length {
                if s.chars().count() < bound {
                    return self.fail(ValidationError::too_short(field.name(), bound, value));
                }
            }

            if let Some(bound) = schema.max_length {
                if s.chars().count() > bound {
                    return self.fail(ValidationError::too_long(field.name(), bound, value));
                }
            }

            if let Some(pattern) = &schema.pattern {
                let regex = match Regex::new(pattern) {
                    Ok(regex) => regex,
                    Err(err) => {
                        return self.fail(ValidationError::invalid_pattern(
                            field.name(),
                            pattern,
                            err,
                        ));
                    }
                };

                if !regex.is_match(s) {
                    return self.fail(ValidationError::pattern_mismatch(
                        field.name(),
                        pattern,
                        value,
                    ));
                }
            }
        }

        if let Some(options) = &schema.enumeration {
            if !options.iter().any(|option| option == value) {
                return self.fail(ValidationError::enum_violation(field.name(), options, value));
            }
        }

        if let Some(required_sibling) = &schema.requires {
            if !field.has_sibling(required_sibling) {
                return self.fail(ValidationError::dependency(field.name(), required_sibling));
            }
        }

        if let Some(object) = value.as_object() {
            self.eval_object(schema, object)?;
        }

        if let (Some(items), Some(elements)) = (&schema.items, value.as_array()) {
            for (index, element) in elements.iter().enumerate() {
                self.instance_tokens.push(Cow::Owned(index.to_string()));
                self.eval_field(&field.child_element(element), items)?;
                self.instance_tokens.pop();
            }
        }

        // Keywords outside the built-in vocabulary go to the semantics,
        // which may implement or reject them.
        for (keyword, argument) in &schema.extra {
            self.semantics
                .check_keyword(keyword, field, schema, argument)
                .map_err(|err| err.at(self.pointer()))?;
        }

        Ok(())
    }

    fn eval_object(
        &mut self,
        schema: &'a Schema,
        object: &'a Map<String, Value>,
    ) -> Result<(), ValidationError> {
        if let Some(properties) = &schema.properties {
            for (name, sub_schema) in properties {
                let sub_field = Field::property(name, object);
                if sub_field.is_present() {
                    self.instance_tokens.push(Cow::Borrowed(name.as_str()));
                    self.eval_field(&sub_field, sub_schema)?;
                    self.instance_tokens.pop();
                } else {
                    // Absent fields are reported at the containing object.
                    self.eval_field(&sub_field, sub_schema)?;
                }
            }
        }

        // Keys outside `properties` answer to the additionalProperties
        // policy, not to the per-property schemas.
        match schema.additional_policy() {
            AdditionalProperties::Allowed(true) => {}
            AdditionalProperties::Allowed(false) => {
                for key in object.keys() {
                    if !schema.declares_property(key) {
                        self.instance_tokens.push(Cow::Borrowed(key.as_str()));
                        return self.fail(ValidationError::additional_property(key));
                    }
                }
            }
            AdditionalProperties::Schema(extra_schema) => {
                for key in object.keys() {
                    if !schema.declares_property(key) {
                        self.instance_tokens.push(Cow::Borrowed(key.as_str()));
                        self.eval_field(&Field::property(key, object), extra_schema)?;
                        self.instance_tokens.pop();
                    }
                }
            }
        }

        Ok(())
    }

    // Union semantics: the declaration matches if any listed name does.
    // An unsupported name is a schema error and propagates immediately.
    fn decl_matches(&self, decl: &TypeDecl, value: &Value) -> Result<bool, ValidationError> {
        for name in decl.names() {
            let matched = self
                .semantics
                .type_matches(name, value)
                .map_err(|err| err.at(self.pointer()))?;
            if matched {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn fail(&self, error: ValidationError) -> Result<(), ValidationError> {
        Err(error.at(self.pointer()))
    }

    fn pointer(&self) -> InstancePath {
        JsonPointer::new(
            self.instance_tokens
                .iter()
                .map(|token| token.to_string())
                .collect(),
        )
    }
}
