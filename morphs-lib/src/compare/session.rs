use super::{ColorAssigner, ColorToken, RenderHints};
use crate::morphs::MorphEngine;
use crate::values::{Record, attribute_names};
use crate::visual::Node;
use compact_str::CompactString;

/// A set of records compared attribute by attribute.
///
/// Record colors are assigned once, from record positions, and reused by every section.
#[derive(Debug)]
pub struct ComparisonSession<'a> {
    engine: &'a MorphEngine,
    records: &'a [Record],
    colors: ColorAssigner,
}

impl<'a> ComparisonSession<'a> {
    #[must_use]
    pub fn new(engine: &'a MorphEngine, records: &'a [Record]) -> Self {
        Self {
            engine,
            records,
            colors: ColorAssigner::new(&engine.config().palette),
        }
    }

    #[must_use]
    pub const fn records(&self) -> &'a [Record] {
        self.records
    }

    /// The color token of every record, in record order.
    #[must_use]
    pub fn colors(&self) -> Vec<ColorToken> {
        self.colors.tokens(self.records.len())
    }

    /// Attributes found across the records, in first-seen order.
    #[must_use]
    pub fn attributes(&self) -> Vec<CompactString> {
        attribute_names(self.records, &self.engine.config().records)
    }

    /// Render one attribute, or `None` when no record has a usable value for it.
    #[must_use]
    pub fn build(&self, attribute: &str, hints: Option<&RenderHints>) -> Option<Node> {
        self.engine.compose(attribute, self.records, &self.colors, hints)
    }

    /// Render every attribute found across the records, skipping empty sections.
    ///
    /// Configured hints apply to each attribute.
    #[must_use]
    pub fn build_all(&self) -> Vec<(CompactString, Node)> {
        self.attributes()
            .into_iter()
            .filter_map(|attribute| {
                let node = self.build(&attribute, None)?;
                Some((attribute, node))
            })
            .collect()
    }
}
