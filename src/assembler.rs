//! Message assembly - merges a request/response schema pair into one
//! [`Message`].
//!
//! Both documents' `definitions` maps are resolved into local types before
//! anything is cross-referenced, so mutually-referential and cyclic schema
//! graphs need no special handling: references stay name-based and resolve
//! by lookup.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::SchemaError;
use crate::resolver::resolve_type;
use crate::types::{Message, Type};

/// Assemble one protocol operation from its request and response documents.
///
/// `id` and `description` are copied verbatim from the request document's
/// `$id` and `comment` fields.
///
/// # Errors
///
/// Returns `SchemaError::MissingMessageMetadata` if `$id` or `comment` is
/// absent from the request document, or any resolution error from either
/// document.
pub fn assemble_message(
    name: &str,
    request_doc: &Value,
    response_doc: &Value,
) -> Result<Message, SchemaError> {
    let request_types = resolve_definitions(request_doc)?;
    let request = resolve_type("", request_doc)?;

    let response_types = resolve_definitions(response_doc)?;
    let response = resolve_type("", response_doc)?;

    let id = metadata_field(request_doc, name, "$id")?;
    let description = metadata_field(request_doc, name, "comment")?;

    let local_types = merge_local_types(request_types, response_types);

    // Request's first-seen order first, then unseen response entries.
    let mut dependencies = request.dependencies.clone();
    for dependency in &response.dependencies {
        if !dependencies.iter().any(|d| d == dependency) {
            dependencies.push(dependency.clone());
        }
    }

    Ok(Message {
        name: name.to_string(),
        id,
        description,
        request,
        response,
        local_types,
        dependencies,
    })
}

impl Message {
    /// Check that every dependency edge resolves in the merged local-type
    /// set or in `known` (type names already generated earlier in the run).
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnresolvedReference` naming the first dangling
    /// edge and its owning type.
    pub fn verify_references(&self, known: &HashSet<String>) -> Result<(), SchemaError> {
        let request_owner = format!("{}Req", self.name);
        let response_owner = format!("{}Conf", self.name);

        let mut owners: Vec<(&str, &[String])> = vec![
            (&request_owner, &self.request.dependencies),
            (&response_owner, &self.response.dependencies),
        ];
        for ty in &self.local_types {
            owners.push((&ty.name, &ty.dependencies));
        }

        for (owner, dependencies) in owners {
            for dependency in dependencies {
                if self.local_type(dependency).is_none() && !known.contains(dependency) {
                    return Err(SchemaError::UnresolvedReference {
                        type_name: owner.to_string(),
                        reference: dependency.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn resolve_definitions(doc: &Value) -> Result<Vec<Type>, SchemaError> {
    let mut types = Vec::new();

    if let Some(definitions) = doc.get("definitions").and_then(|v| v.as_object()) {
        for (name, node) in definitions {
            types.push(resolve_type(name, node)?);
        }
    }

    Ok(types)
}

fn metadata_field(doc: &Value, operation: &str, field: &'static str) -> Result<String, SchemaError> {
    doc.get(field)
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or(SchemaError::MissingMessageMetadata {
            operation: operation.to_string(),
            field,
        })
}

/// Merge both sides' local types into one name-keyed mapping.
///
/// On a name collision the response's definition replaces the request's,
/// keeping the request's position in discovery order.
fn merge_local_types(request_types: Vec<Type>, response_types: Vec<Type>) -> Vec<Type> {
    let mut merged = request_types;

    for ty in response_types {
        match merged.iter_mut().find(|existing| existing.name == ty.name) {
            Some(existing) => *existing = ty,
            None => merged.push(ty),
        }
    }

    merged
}
