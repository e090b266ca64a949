use super::morph::text_node;
use super::{MorphContext, MorphRegistry, empty_node};
use crate::classify::Classifier;
use crate::compare::{RenderHints, isolate};
use crate::config::Config;
use crate::values::{RawValue, SemanticType};
use crate::visual::safe::sanitize;
use crate::visual::{Element, Node};
use std::sync::Arc;

/// A single-value rendering before it is wrapped for output.
struct Rendered {
    semantic_type: SemanticType,
    morph_name: String,
    node: Node,
}

/// Classifies and renders values using one configuration.
#[derive(Debug, Clone)]
pub struct MorphEngine {
    config: Arc<Config>,
    classifier: Classifier,
    registry: MorphRegistry,
}

impl MorphEngine {
    /// An engine with the built-in morphs and the configured field renderers.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        let registry = MorphRegistry::with_defaults(&config.field_renderers);
        Self::with_registry(config, registry)
    }

    #[must_use]
    pub fn with_registry(config: Arc<Config>, registry: MorphRegistry) -> Self {
        Self {
            classifier: Classifier::new(Arc::clone(&config.classification)),
            config,
            registry,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    #[must_use]
    pub const fn registry(&self) -> &MorphRegistry {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut MorphRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn classify(&self, value: &RawValue, field: Option<&str>) -> SemanticType {
        self.classifier.classify(value, field)
    }

    /// Render one value, wrapped in a `div.morph` naming its type and morph.
    ///
    /// Without explicit hints, the configured hints for `field` apply. Strategy
    /// failures are replaced by a fallback node; the result is always safe to emit.
    #[must_use]
    pub fn render_value(&self, value: &RawValue, field: Option<&str>, hints: Option<&RenderHints>) -> Node {
        let hints = self.effective_hints(field, hints);
        let rendered = self.render_at(value, field, &hints, 0);

        sanitize(
            Element::new("div")
                .class("morph")
                .attr("data-type", rendered.semantic_type.name())
                .attr("data-morph", rendered.morph_name)
                .child(rendered.node)
                .into(),
        )
    }

    /// Render a value found inside another value.
    ///
    /// Values nested deeper than the configured depth are rendered as plain text.
    pub(crate) fn render_nested(&self, value: &RawValue, field: Option<&str>, depth: usize) -> Node {
        if depth > self.config.max_depth {
            return text_node(value);
        }

        let hints = self.effective_hints(field, None);
        self.render_at(value, field, &hints, depth).node
    }

    pub(crate) fn effective_hints(&self, field: Option<&str>, hints: Option<&RenderHints>) -> RenderHints {
        let configured = field.and_then(|f| self.config.hints_for(f));
        match (hints, configured) {
            (Some(hints), Some(configured)) => hints.or(configured),
            (Some(hints), None) => hints.clone(),
            (None, Some(configured)) => configured.clone(),
            (None, None) => RenderHints::default(),
        }
    }

    fn render_at(&self, value: &RawValue, field: Option<&str>, hints: &RenderHints, depth: usize) -> Rendered {
        let semantic_type = hints.semantic_type.unwrap_or_else(|| self.classify(value, field));
        let resolution = self.registry.resolve(semantic_type, field, hints.renderer.as_deref());
        let morph = resolution.morph();
        let ctx = MorphContext::new(self, field, hints, semantic_type, depth);

        let node = isolate(morph.name(), value, || morph.render(value, &ctx)).into_node(empty_node);

        Rendered {
            semantic_type,
            morph_name: morph.name().to_string(),
            node,
        }
    }
}

impl Default for MorphEngine {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}
