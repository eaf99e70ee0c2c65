//! Handlebars-backed engine adapters.
//!
//! Both adapters share `handlebars::Handlebars` as their registry and
//! differ only in escaping. Units can reference each other as partials
//! (`{{> some/other/unit}}`) since they live in one registry.

use handlebars::{no_escape, Handlebars, RenderError, TemplateError};
use serde::Serialize;

use super::{Engine, Namespace};

/// Escaping back-end: interpolated values are HTML-escaped.
pub struct HtmlEngine;

impl Engine for HtmlEngine {
    type Registry = Handlebars<'static>;
    type Error = TemplateError;

    fn registry() -> Self::Registry {
        Handlebars::new()
    }

    fn parse_into(
        registry: &mut Self::Registry,
        name: &str,
        source: &str,
    ) -> Result<(), TemplateError> {
        registry.register_template_string(name, source)
    }
}

/// Literal back-end: interpolated values are substituted verbatim.
///
/// Use this for plain text, code generation, or configuration, where
/// HTML escaping would corrupt the output.
pub struct TextEngine;

impl Engine for TextEngine {
    type Registry = Handlebars<'static>;
    type Error = TemplateError;

    fn registry() -> Self::Registry {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(no_escape);
        registry
    }

    fn parse_into(
        registry: &mut Self::Registry,
        name: &str,
        source: &str,
    ) -> Result<(), TemplateError> {
        registry.register_template_string(name, source)
    }
}

impl<E> Namespace<E>
where
    E: Engine<Registry = Handlebars<'static>>,
{
    /// Render the unit `name` with `data`.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry().render(name, data)
    }

    /// Render the root unit with `data`.
    pub fn render_root<T: Serialize>(&self, data: &T) -> Result<String, RenderError> {
        self.registry().render(self.root_name(), data)
    }

    /// Names of every unit in the namespace, sorted.
    pub fn unit_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .registry()
            .get_templates()
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether a unit with this name has been parsed.
    pub fn contains(&self, name: &str) -> bool {
        self.registry().get_template(name).is_some()
    }
}
