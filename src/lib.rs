//! OCPP message code generator
//!
//! Compiles a protocol's JSON-Schema message definitions (one
//! `<Operation>Request.json` / `<Operation>Response.json` pair per protocol
//! operation) into a fully-resolved type model, then emits source text
//! through user-supplied templates.
//!
//! The pipeline per operation:
//!
//! 1. every entry of each document's `definitions` map is resolved into a
//!    named [`Type`] (object-with-fields or enum-with-values),
//! 2. the documents themselves are resolved as unnamed object types,
//! 3. both sides are merged into one [`Message`] with deduplicated
//!    dependency edges and a name-keyed local-type set,
//! 4. the message and its local types are handed to the template
//!    [`Renderer`].
//!
//! # Example
//!
//! ```
//! use ocpp_codegen::assemble_message;
//! use serde_json::json;
//!
//! let request = json!({
//!     "$id": "urn:Reset.req",
//!     "comment": "Reset the charge point",
//!     "type": "object",
//!     "properties": {
//!         "type": { "$ref": "#/definitions/ResetEnumType" }
//!     },
//!     "required": ["type"],
//!     "definitions": {
//!         "ResetEnumType": { "type": "string", "enum": ["Immediate", "OnIdle"] }
//!     }
//! });
//! let response = json!({
//!     "$id": "urn:Reset.conf",
//!     "comment": "Reset response",
//!     "type": "object"
//! });
//!
//! let message = assemble_message("Reset", &request, &response).unwrap();
//!
//! assert_eq!(message.id, "urn:Reset.req");
//! assert!(message.request.field("type").unwrap().required);
//! assert_eq!(message.dependencies, ["ResetEnumType"]);
//! assert!(message.local_type("ResetEnumType").unwrap().is_enum());
//! ```
//!
//! # Field classification
//!
//! | Schema property | Field kind |
//! |-----------------|------------|
//! | `$ref` | `reference` (name = last `/` segment) |
//! | `type: string` | `string` |
//! | `type: string` + `maxLength` | `bounded-string` |
//! | `type: string` + `format: date-time` | `date-time` (wins over `maxLength`) |
//! | `type: array` | `array` of the recursively classified `items` |
//! | `type: integer` / `boolean` / `number` | the matching scalar |
//! | anything else | `UnsupportedSchemaType` error |
//!
//! A field absent from the enclosing `required` list is optional; generated
//! representations use an optional wrapper for it, except arrays, where
//! absence is an empty sequence.

mod assembler;
mod classifier;
mod error;
mod generator;
mod loader;
mod render;
mod resolver;
mod types;

pub use assembler::assemble_message;
pub use error::{GenerateError, SchemaError};
pub use generator::{check, generate, GenerateOptions, OperationResult, RunReport};
pub use loader::{discover_operations, load_document, load_role_groups, Operation};
pub use render::Renderer;
pub use resolver::resolve_type;
pub use types::{Field, FieldKind, Message, Type, TypeBody};
