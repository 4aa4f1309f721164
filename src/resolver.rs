//! Type resolution - interprets one full schema node into a [`Type`].
//!
//! A node is either an object (fields classified one by one, dependency
//! edges collected) or a string carrying an `enum` array (recategorized as
//! an enum type). Anything else is rejected.

use serde_json::Value;

use crate::classifier::{apply_required, classify_field};
use crate::error::SchemaError;
use crate::types::{Type, TypeBody};

/// Resolve a schema node into a [`Type`].
///
/// `name` may be empty, denoting the unnamed top-level schema of a request
/// or response document.
///
/// # Errors
///
/// Returns `SchemaError::MissingTypeDiscriminator` if the node has no
/// `type`, `SchemaError::UnsupportedSchemaType` for unknown discriminators
/// or property types, and `SchemaError::InvalidEnumValue` for enum literals
/// that cannot become generated identifiers.
pub fn resolve_type(name: &str, node: &Value) -> Result<Type, SchemaError> {
    let path = node_path(name);

    let Some(discriminator) = node.get("type").and_then(|v| v.as_str()) else {
        return Err(SchemaError::MissingTypeDiscriminator { path });
    };

    let description = node
        .get("description")
        .and_then(|v| v.as_str())
        .map(String::from);

    let body = match discriminator {
        "object" => resolve_object(node, &path)?,
        "string" if node.get("enum").is_some() => resolve_enum(name, node)?,
        other => {
            return Err(SchemaError::UnsupportedSchemaType {
                path,
                type_name: other.to_string(),
            });
        }
    };

    let dependencies = collect_dependencies(&body);

    Ok(Type {
        name: name.to_string(),
        description,
        dependencies,
        body,
    })
}

fn node_path(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("/definitions/{name}")
    }
}

fn resolve_object(node: &Value, path: &str) -> Result<TypeBody, SchemaError> {
    let mut fields = Vec::new();

    if let Some(properties) = node.get("properties").and_then(|v| v.as_object()) {
        for (property, definition) in properties {
            let field_path = format!("{path}/properties/{property}");
            fields.push(classify_field(property, definition, &field_path)?);
        }
    }

    apply_required(&mut fields, node);

    Ok(TypeBody::Object { fields })
}

fn resolve_enum(name: &str, node: &Value) -> Result<TypeBody, SchemaError> {
    let literals = node
        .get("enum")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();

    let mut values = Vec::with_capacity(literals.len());
    for literal in &literals {
        let value = literal.as_str().ok_or_else(|| SchemaError::InvalidEnumValue {
            type_name: name.to_string(),
            value: literal.to_string(),
        })?;
        if !is_identifier(value) {
            return Err(SchemaError::InvalidEnumValue {
                type_name: name.to_string(),
                value: value.to_string(),
            });
        }
        values.push(value.to_string());
    }

    Ok(TypeBody::Enum { values })
}

/// Dependency edges of a body: referenced type names, deduplicated, in
/// first-seen order.
fn collect_dependencies(body: &TypeBody) -> Vec<String> {
    let mut dependencies: Vec<String> = Vec::new();

    for field in match body {
        TypeBody::Object { fields } => fields.as_slice(),
        TypeBody::Enum { .. } => &[],
    } {
        if let Some(referenced) = field.kind.referenced_type() {
            if !dependencies.iter().any(|d| d == referenced) {
                dependencies.push(referenced.to_string());
            }
        }
    }

    dependencies
}

/// Whether a literal is usable as a generated symbol name.
fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
