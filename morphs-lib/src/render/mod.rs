//! Rendering targets and whole-page output
//!
//! Two targets render through the same engine design. [`TreeTarget`] returns
//! [`Node`](crate::visual::Node) trees for interactive use, and [`MarkupTarget`]
//! returns HTML strings for server-side use. Each target owns its own engine and
//! classifier, but both are built over one shared configuration, so they read the
//! same rule table. For any input the markup target's output equals the markup
//! serialization of the tree target's output.
//!
//! [`document`] wraps comparison sections in a self-contained HTML page, and
//! [`outline`] prints them as indented text for terminals.

pub mod document;
mod markup;
pub mod outline;
mod tree;

pub use markup::{MarkupTarget, to_markup, write_node};
pub use tree::TreeTarget;

use crate::compare::RenderHints;
use crate::morphs::MorphEngine;
use crate::rules::RuleTable;
use crate::values::{RawValue, Record, SemanticType};
use std::sync::Arc;

/// A rendering surface.
pub trait RenderTarget {
    /// What this target produces for a value or a comparison section.
    type Output;

    fn engine(&self) -> &MorphEngine;

    fn render_value(&self, value: &RawValue, field: Option<&str>, hints: Option<&RenderHints>) -> Self::Output;

    /// Render one attribute across records, or `None` when no record has a usable value.
    fn render_comparison(&self, attribute: &str, records: &[Record], hints: Option<&RenderHints>) -> Option<Self::Output>;

    fn classify(&self, value: &RawValue, field: Option<&str>) -> SemanticType {
        self.engine().classify(value, field)
    }

    /// The rule table this target classifies with.
    fn rules(&self) -> &Arc<RuleTable> {
        self.engine().classifier().rules()
    }
}
