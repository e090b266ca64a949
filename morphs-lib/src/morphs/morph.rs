use super::MorphEngine;
use crate::Result;
use crate::compare::RenderHints;
use crate::config::Config;
use crate::rules::RuleTable;
use crate::values::{RawValue, SemanticType, format_number};
use crate::visual::{Element, Node};
use core::fmt;

/// A rendering strategy for values of some semantic type.
pub trait Morph: Send + Sync + fmt::Debug {
    /// The name this morph is registered and referenced under.
    fn name(&self) -> &str;

    /// Render a single value. `Ok(None)` means there is nothing to show.
    fn render(&self, value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>>;

    /// Measure a comparison group, producing the scale its rows share.
    fn measure(&self, _values: &[&RawValue], _ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
        Ok(None)
    }

    /// Render one row of a comparison group.
    fn render_row(&self, value: &RawValue, _scale: Option<&Scale>, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
        self.render(value, ctx)
    }
}

/// A linear numeric scale shared by the rows of a comparison group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
}

impl Scale {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` on the scale, clamped to `0.0..=1.0`.
    ///
    /// Degenerate scales and non-finite values map to zero.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !(span > 0.0 && span.is_finite()) || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn percent(&self, value: f64) -> f64 {
        self.fraction(value) * 100.0
    }
}

/// Everything a morph may consult while rendering.
#[derive(Debug, Clone, Copy)]
pub struct MorphContext<'a> {
    engine: &'a MorphEngine,
    field: Option<&'a str>,
    hints: &'a RenderHints,
    semantic_type: SemanticType,
    depth: usize,
}

impl<'a> MorphContext<'a> {
    #[must_use]
    pub const fn new(
        engine: &'a MorphEngine,
        field: Option<&'a str>,
        hints: &'a RenderHints,
        semantic_type: SemanticType,
        depth: usize,
    ) -> Self {
        Self {
            engine,
            field,
            hints,
            semantic_type,
            depth,
        }
    }

    #[must_use]
    pub const fn field(&self) -> Option<&'a str> {
        self.field
    }

    #[must_use]
    pub const fn hints(&self) -> &'a RenderHints {
        self.hints
    }

    #[must_use]
    pub const fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn config(&self) -> &'a Config {
        self.engine.config()
    }

    #[must_use]
    pub fn rules(&self) -> &'a RuleTable {
        &self.engine.config().classification
    }

    /// Unit hint, if any.
    #[must_use]
    pub fn unit(&self) -> Option<&'a str> {
        self.hints.unit.as_deref()
    }

    /// Render a nested value through the classifier and registry.
    ///
    /// Values beyond the configured depth are rendered as plain text.
    #[must_use]
    pub fn render_child(&self, value: &RawValue, field: Option<&str>) -> Node {
        self.engine.render_nested(value, field, self.depth + 1)
    }
}

/// Placeholder shown for values with nothing to render.
#[must_use]
pub fn empty_node() -> Node {
    Element::new("span").class("morph-empty").text("n/a").into()
}

/// Plain-text rendering of any value.
pub(super) fn text_node(value: &RawValue) -> Node {
    Element::new("p").class("text").text(value.to_display_string()).into()
}

/// A number followed by an optional unit.
pub(super) fn with_unit(n: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) if !unit.is_empty() => format!("{} {unit}", format_number(n)),
        _ => format_number(n),
    }
}

/// CSS percentage for a value already in `0.0..=100.0`.
pub(super) fn css_percent(percent: f64) -> String {
    format!("{}%", format_number(percent))
}

/// Finite numeric views of the given values.
pub(super) fn finite_numbers<'v>(values: &'v [&'v RawValue]) -> impl Iterator<Item = f64> + 'v {
    values.iter().filter_map(|v| v.to_f64_lenient()).filter(|n| n.is_finite())
}
