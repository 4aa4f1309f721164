//! Error types for schema parsing and code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while building the type model from schema documents.
#[derive(Debug, Error)]
pub enum SchemaError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // Schema shape errors (exit code 2)
    #[error("missing \"type\" discriminator at {path}")]
    MissingTypeDiscriminator { path: String },

    #[error("unsupported schema type \"{type_name}\" at {path}")]
    UnsupportedSchemaType { path: String, type_name: String },

    #[error("enum value \"{value}\" in type \"{type_name}\" is not usable as an identifier")]
    InvalidEnumValue { type_name: String, value: String },

    #[error("operation \"{operation}\": request document missing \"{field}\"")]
    MissingMessageMetadata {
        operation: String,
        field: &'static str,
    },

    #[error("unresolved reference \"{reference}\" in type \"{type_name}\"")]
    UnresolvedReference {
        type_name: String,
        reference: String,
    },
}

impl SchemaError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SchemaError::FileNotFound { .. }
            | SchemaError::ReadError { .. }
            | SchemaError::InvalidJson { .. } => 3,
            _ => 2,
        }
    }
}

/// Fatal run-level failures: shared resources that abort the whole run,
/// plus per-operation causes propagated out of the generation loop.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("input directory not found: {path}")]
    InputDirNotFound { path: PathBuf },

    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing template \"{name}\" in {dir}")]
    MissingTemplate { name: &'static str, dir: PathBuf },

    #[error("cannot read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid template \"{name}\": {source}")]
    TemplateSyntax {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    #[error("rendering \"{template}\" for \"{target}\" failed: {source}")]
    RenderFailure {
        template: &'static str,
        target: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("cannot write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl GenerateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            GenerateError::InputDirNotFound { .. }
            | GenerateError::ReadDir { .. }
            | GenerateError::TemplateRead { .. }
            | GenerateError::WriteError { .. } => 3,
            GenerateError::MissingTemplate { .. }
            | GenerateError::TemplateSyntax { .. }
            | GenerateError::RenderFailure { .. } => 2,
            GenerateError::Schema(e) => e.exit_code(),
        }
    }
}
