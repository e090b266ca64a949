use super::RenderTarget;
use crate::compare::RenderHints;
use crate::config::Config;
use crate::morphs::{MorphEngine, MorphRegistry};
use crate::values::{RawValue, Record};
use crate::visual::Node;
use std::sync::Arc;

/// Produces visual node trees.
#[derive(Debug, Clone)]
pub struct TreeTarget {
    engine: MorphEngine,
}

impl TreeTarget {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            engine: MorphEngine::new(config),
        }
    }

    #[must_use]
    pub fn with_registry(config: Arc<Config>, registry: MorphRegistry) -> Self {
        Self {
            engine: MorphEngine::with_registry(config, registry),
        }
    }
}

impl RenderTarget for TreeTarget {
    type Output = Node;

    fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    fn render_value(&self, value: &RawValue, field: Option<&str>, hints: Option<&RenderHints>) -> Node {
        self.engine.render_value(value, field, hints)
    }

    fn render_comparison(&self, attribute: &str, records: &[Record], hints: Option<&RenderHints>) -> Option<Node> {
        self.engine.build_comparison(attribute, records, hints)
    }
}
