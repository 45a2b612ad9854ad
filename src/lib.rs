//! `jsv` validates parsed JSON values against declarative schemas: given a
//! value tree and a schema describing its expected shape, it decides
//! whether the value conforms, and if not, reports which constraint
//! failed and why.
//!
//! The crate works on already-decoded [`serde_json::Value`] trees. It does
//! not parse JSON text, resolve references between schema documents, or
//! generate schemas — callers decode their two documents with serde and
//! hand them over.
//!
//! # Validating data
//!
//! Schemas are ordinary serde-deserializable data, so the usual path is to
//! read one with `serde_json` and call [`validate`](validator/fn.validate.html):
//!
//! ```
//! use jsv::{validate, ErrorKind, Schema};
//! use serde_json::json;
//!
//! fn main() -> Result<(), failure::Error> {
//!     let schema: Schema = serde_json::from_value(json!({
//!         "type": "object",
//!         "properties": {
//!             "name": { "type": "string" },
//!             "age": { "type": "integer", "minimum": 0, "optional": true },
//!             "phones": {
//!                 "type": "array",
//!                 "items": { "type": "string" },
//!                 "optional": true
//!             }
//!         }
//!     }))?;
//!
//!     let input_ok = json!({
//!         "name": "John Doe",
//!         "age": 43,
//!         "phones": ["+44 1234567", "+44 2345678"]
//!     });
//!     assert!(validate(&input_ok, &schema).is_ok());
//!
//!     // The failure names the field, the keyword that rejected it, and
//!     // the path to the offending value.
//!     let input_bad = json!({
//!         "name": "John Doe",
//!         "phones": ["+44 1234567", 442345678]
//!     });
//!     let error = validate(&input_bad, &schema).unwrap_err();
//!
//!     assert_eq!(error.kind(), ErrorKind::TypeMismatch);
//!     assert_eq!(error.field(), "phones");
//!     assert_eq!(error.keyword(), "type");
//!     assert_eq!(error.path().to_string(), "/phones/1");
//!
//!     Ok(())
//! }
//! ```
//!
//! Validation is fail-fast: the first violated constraint is the result,
//! and nothing after it is evaluated.
//!
//! # Extending the engine
//!
//! The engine is polymorphic over a [`Semantics`](validator/trait.Semantics.html):
//! the pair of "which type names exist" and "what do unrecognized
//! keywords mean". Supplying your own implementation adds type names or
//! keyword evaluators without touching the engine — see the
//! [`Semantics`](validator/trait.Semantics.html) docs for a worked
//! example.

mod registry;
mod vm;

pub mod errors;
pub mod schema;
pub mod types;
pub mod validator;

pub use crate::errors::{ErrorKind, InstancePath, ValidationError};
pub use crate::schema::{AdditionalProperties, Schema, TypeDecl};
pub use crate::validator::{validate, CoreSemantics, Field, Semantics, Validator, ROOT_FIELD};
