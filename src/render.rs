//! Rendering adapter - bridges the resolved model to text templates.
//!
//! The engine is a black box behind this module: given a named template and
//! a model, it produces deterministic text for identical input. Templates
//! are Handlebars sources named `enum.hbs`, `type.hbs` and `message.hbs` in
//! the template directory. The `...Req`/`...Conf` suffix convention is
//! applied here and nowhere else.

use std::path::Path;

use handlebars::Handlebars;
use serde_json::json;

use crate::error::GenerateError;
use crate::types::{Message, Type};

pub const ENUM_TEMPLATE: &str = "enum";
pub const TYPE_TEMPLATE: &str = "type";
pub const MESSAGE_TEMPLATE: &str = "message";

const TEMPLATE_NAMES: [&str; 3] = [ENUM_TEMPLATE, TYPE_TEMPLATE, MESSAGE_TEMPLATE];

/// Template registry for one generation run.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    /// Load the three templates from a directory.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::MissingTemplate` for an absent template file,
    /// `GenerateError::TemplateRead` if one can't be read, or
    /// `GenerateError::TemplateSyntax` if one doesn't compile. All are fatal
    /// for the run.
    pub fn from_dir(dir: &Path) -> Result<Self, GenerateError> {
        let mut renderer = Self::empty();

        for name in TEMPLATE_NAMES {
            let path = dir.join(format!("{name}.hbs"));
            if !path.exists() {
                return Err(GenerateError::MissingTemplate {
                    name,
                    dir: dir.to_path_buf(),
                });
            }
            let source = std::fs::read_to_string(&path)
                .map_err(|source| GenerateError::TemplateRead { path, source })?;
            renderer.register(name, &source)?;
        }

        Ok(renderer)
    }

    /// Build a renderer from in-memory template sources.
    pub fn from_strings(
        enum_source: &str,
        type_source: &str,
        message_source: &str,
    ) -> Result<Self, GenerateError> {
        let mut renderer = Self::empty();
        renderer.register(ENUM_TEMPLATE, enum_source)?;
        renderer.register(TYPE_TEMPLATE, type_source)?;
        renderer.register(MESSAGE_TEMPLATE, message_source)?;
        Ok(renderer)
    }

    fn empty() -> Self {
        let mut registry = Handlebars::new();
        // Generated text is source code, not HTML.
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }

    fn register(&mut self, name: &'static str, source: &str) -> Result<(), GenerateError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|source| GenerateError::TemplateSyntax {
                name,
                source: Box::new(source),
            })
    }

    /// Render a local type through the `enum` or `type` template, depending
    /// on its category.
    pub fn render_local_type(
        &self,
        ty: &Type,
        message: &Message,
        namespace: &str,
    ) -> Result<String, GenerateError> {
        let template = if ty.is_enum() {
            ENUM_TEMPLATE
        } else {
            TYPE_TEMPLATE
        };
        let context = json!({
            "namespace": namespace,
            "message": message,
            "type": ty,
        });

        self.registry
            .render(template, &context)
            .map_err(|source| GenerateError::RenderFailure {
                template,
                target: ty.name.clone(),
                source: Box::new(source),
            })
    }

    /// Render a message through the `message` template.
    ///
    /// The context exposes the conventional generated type names for the
    /// request and response (`<Operation>Req` / `<Operation>Conf`).
    pub fn render_message(
        &self,
        message: &Message,
        namespace: &str,
    ) -> Result<String, GenerateError> {
        let context = json!({
            "namespace": namespace,
            "message": message,
            "request_type_name": format!("{}Req", message.name),
            "response_type_name": format!("{}Conf", message.name),
        });

        self.registry
            .render(MESSAGE_TEMPLATE, &context)
            .map_err(|source| GenerateError::RenderFailure {
                template: MESSAGE_TEMPLATE,
                target: message.name.clone(),
                source: Box::new(source),
            })
    }
}
