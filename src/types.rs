//! Core type model built from schema documents.
//!
//! The model is constructed by the classifier, resolver and assembler and is
//! immutable afterwards. Everything is `Serialize` because the rendering
//! adapter hands these objects to templates as-is.

use serde::Serialize;

/// Classified kind of a field, one case per schema shape.
///
/// Serializes with an inline `kind` tag so templates can dispatch on it
/// (`"string"`, `"bounded-string"`, `"date-time"`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FieldKind {
    String,
    BoundedString { max_length: u64 },
    Integer,
    Boolean,
    Number,
    DateTime,
    /// Array of another kind; arrays of arrays are representable.
    Array { element: Box<FieldKind> },
    /// Reference to a named type, resolved by name lookup.
    Reference { type_name: String },
}

impl FieldKind {
    /// Name of the type this kind references, looking through arrays.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            FieldKind::Reference { type_name } => Some(type_name),
            FieldKind::Array { element } => element.referenced_type(),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, FieldKind::Array { .. })
    }
}

/// One field of an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Field {
    /// True when the generated representation needs an optional wrapper.
    ///
    /// Absent arrays are represented by an empty sequence, not a null.
    pub fn is_optional(&self) -> bool {
        !self.required && !self.kind.is_array()
    }
}

/// Category-specific contents of a type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum TypeBody {
    /// Fields in discovery order (document order of `properties`).
    Object { fields: Vec<Field> },
    /// Allowed literal values, each usable as a generated symbol name.
    Enum { values: Vec<String> },
}

/// A resolved named type: object-with-fields or enum-with-values.
///
/// The name is empty for the unnamed top-level schema of a request or
/// response document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Type {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of types referenced directly by this type's fields,
    /// deduplicated, in first-seen order.
    pub dependencies: Vec<String>,
    #[serde(flatten)]
    pub body: TypeBody,
}

impl Type {
    pub fn is_enum(&self) -> bool {
        matches!(self.body, TypeBody::Enum { .. })
    }

    /// Fields of an object type; empty for enums.
    pub fn fields(&self) -> &[Field] {
        match &self.body {
            TypeBody::Object { fields } => fields,
            TypeBody::Enum { .. } => &[],
        }
    }

    /// Allowed values of an enum type; empty for objects.
    pub fn enum_values(&self) -> &[String] {
        match &self.body {
            TypeBody::Enum { values } => values,
            TypeBody::Object { .. } => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }
}

/// One protocol operation: a request/response pair merged into a single
/// logical message description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    /// Protocol operation name (e.g. "Reset").
    pub name: String,
    /// Schema identifier copied from the request document's `$id`.
    pub id: String,
    /// Documentation copied from the request document's `comment`.
    pub description: String,
    pub request: Type,
    pub response: Type,
    /// Types defined in either document's `definitions` map, keyed by name,
    /// in discovery order. On a name collision the response's definition
    /// replaces the request's.
    pub local_types: Vec<Type>,
    /// Union of request and response dependencies, deduplicated, request's
    /// first-seen order first.
    pub dependencies: Vec<String>,
}

impl Message {
    pub fn local_type(&self, name: &str) -> Option<&Type> {
        self.local_types.iter().find(|t| t.name == name)
    }
}
