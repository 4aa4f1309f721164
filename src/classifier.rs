//! Field classification - interprets one schema property definition.
//!
//! Turns a property node (`$ref`, `type`, `format`, `maxLength`, `items`,
//! `description`) into a typed [`Field`]. The `required` flag comes from the
//! enclosing object's `required` list and is applied as a second pass, since
//! that list is independent of property order.

use serde_json::Value;

use crate::error::SchemaError;
use crate::types::{Field, FieldKind};

/// Classify one `properties` entry into a field.
pub(crate) fn classify_field(name: &str, node: &Value, path: &str) -> Result<Field, SchemaError> {
    let description = node
        .get("description")
        .and_then(|v| v.as_str())
        .map(String::from);

    Ok(Field {
        name: name.to_string(),
        kind: classify_property(node, path)?,
        required: false,
        description,
    })
}

/// Classify a property node into a [`FieldKind`].
///
/// Precedence: `$ref` wins over everything; an absent `type` defaults to
/// `"string"`; for strings, `format: "date-time"` wins over `maxLength`.
///
/// # Errors
///
/// Returns `SchemaError::UnsupportedSchemaType` for any `type` value outside
/// the schema dialect (no silent drop).
pub(crate) fn classify_property(node: &Value, path: &str) -> Result<FieldKind, SchemaError> {
    if let Some(reference) = node.get("$ref").and_then(|v| v.as_str()) {
        return Ok(FieldKind::Reference {
            type_name: referenced_name(reference).to_string(),
        });
    }

    let type_name = node.get("type").and_then(|v| v.as_str()).unwrap_or("string");

    match type_name {
        "string" => {
            if node.get("format").and_then(|v| v.as_str()) == Some("date-time") {
                Ok(FieldKind::DateTime)
            } else if let Some(max_length) = node.get("maxLength").and_then(|v| v.as_u64()) {
                Ok(FieldKind::BoundedString { max_length })
            } else {
                Ok(FieldKind::String)
            }
        }
        "array" => {
            // A missing items node classifies like an empty one: the
            // absent-type default applies and the element is a string.
            let element = match node.get("items") {
                Some(items) => classify_property(items, &format!("{path}/items"))?,
                None => FieldKind::String,
            };
            Ok(FieldKind::Array {
                element: Box::new(element),
            })
        }
        "integer" => Ok(FieldKind::Integer),
        "boolean" => Ok(FieldKind::Boolean),
        "number" => Ok(FieldKind::Number),
        other => Err(SchemaError::UnsupportedSchemaType {
            path: path.to_string(),
            type_name: other.to_string(),
        }),
    }
}

/// Mark fields named in the enclosing node's `required` list.
///
/// Names without a matching field are ignored; the list is declared
/// independently of `properties`.
pub(crate) fn apply_required(fields: &mut [Field], node: &Value) {
    let Some(required) = node.get("required").and_then(|v| v.as_array()) else {
        return;
    };

    for name in required.iter().filter_map(|v| v.as_str()) {
        if let Some(field) = fields.iter_mut().find(|f| f.name == name) {
            field.required = true;
        }
    }
}

/// Final path segment of a `$ref` string (after the last `/`).
fn referenced_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
