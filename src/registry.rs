use crate::schema::Schema;
use std::collections::HashMap;

/// Collects the schema nodes carrying an `id`, as the engine visits them.
///
/// A registry lives for exactly one top-level validation call: the engine
/// allocates a fresh one on entry and drops it on return, so unrelated
/// validations can never observe each other's ids.
#[derive(Debug, Default)]
pub(crate) struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
}

impl SchemaRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `id`. A later registration under the same
    /// id replaces the earlier one.
    pub(crate) fn insert(&mut self, id: &str, schema: &Schema) {
        self.schemas.insert(id.to_owned(), schema.clone());
    }

    // Nothing in the engine resolves ids; the registry is a collection
    // point for callers layered on top (and for the tests below).
    #[allow(dead_code)]
    pub(crate) fn get(&self, id: &str) -> Option<&Schema> {
        self.schemas.get(id)
    }

    #[allow(dead_code)]
    pub(crate) fn len(&self) -> usize {
        self.schemas.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeDecl;

    #[test]
    fn registers_and_looks_up() {
        let mut registry = SchemaRegistry::new();
        let schema = Schema {
            id: Some("person".to_owned()),
            typ: Some(TypeDecl::Single("object".to_owned())),
            ..Schema::default()
        };

        registry.insert("person", &schema);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("person"), Some(&schema));
        assert_eq!(registry.get("missing"), None);
    }

    #[test]
    fn later_registration_wins() {
        let mut registry = SchemaRegistry::new();
        let first = Schema {
            typ: Some(TypeDecl::Single("string".to_owned())),
            ..Schema::default()
        };
        let second = Schema {
            typ: Some(TypeDecl::Single("integer".to_owned())),
            ..Schema::default()
        };

        registry.insert("dup", &first);
        registry.insert("dup", &second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup"), Some(&second));
    }
}
