//! Template engine adapters.
//!
//! The walker and builder are written once, generic over [`Engine`]; a
//! back-end plugs in by saying how to construct its unit registry and how
//! to parse text into a named unit. Two handlebars-backed adapters ship
//! with the crate:
//!
//! - [`HtmlEngine`]: interpolated values are HTML-escaped
//! - [`TextEngine`]: interpolated values are substituted verbatim

mod handlebars;

pub use self::handlebars::{HtmlEngine, TextEngine};

use std::fmt;

/// A template back-end, as seen by the builder.
pub trait Engine {
    /// Registry of parsed units, keyed by unit name.
    type Registry;

    /// Parse failure reported by the back-end.
    type Error: std::error::Error + Send + Sync + 'static;

    /// A fresh, empty registry configured for this back-end.
    fn registry() -> Self::Registry;

    /// Parse `source` into the unit `name`, replacing any previous unit
    /// with that name.
    fn parse_into(
        registry: &mut Self::Registry,
        name: &str,
        source: &str,
    ) -> Result<(), Self::Error>;
}

/// A named collection of template units: one root unit plus any number of
/// associated units, all sharing one registry.
///
/// The root name is fixed when the namespace is anchored and never
/// changes. "No namespace yet" is expressed as `Option<Namespace<E>>`;
/// there is no sentinel value of the type itself.
pub struct Namespace<E: Engine> {
    registry: E::Registry,
    root: String,
}

impl<E: Engine> Namespace<E> {
    /// Create an empty namespace whose root unit is `root`.
    pub fn anchored(root: impl Into<String>) -> Self {
        Self {
            registry: E::registry(),
            root: root.into(),
        }
    }

    /// The root unit's name.
    pub fn root_name(&self) -> &str {
        &self.root
    }

    /// Parse `source` into the unit `name`.
    ///
    /// When `name` equals the root name the root unit itself is the parse
    /// target; otherwise the text becomes an associated unit. Either way
    /// the namespace never holds two units with the same name.
    pub fn parse_into(&mut self, name: &str, source: &str) -> Result<(), E::Error> {
        E::parse_into(&mut self.registry, name, source)
    }

    /// The underlying unit registry.
    pub fn registry(&self) -> &E::Registry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. to register helpers before a
    /// build.
    pub fn registry_mut(&mut self) -> &mut E::Registry {
        &mut self.registry
    }
}

impl<E: Engine> fmt::Debug for Namespace<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace").field("root", &self.root).finish_non_exhaustive()
    }
}
