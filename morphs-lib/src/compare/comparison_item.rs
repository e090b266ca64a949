use super::{ColorToken, RenderHints};
use crate::values::{RawValue, SemanticType};
use compact_str::CompactString;

/// One record's contribution to a comparison group.
#[derive(Debug, Clone)]
pub struct ComparisonItem<'a> {
    /// Position of the record in the full record list
    pub position: usize,
    pub id: &'a str,
    pub display_name: &'a str,
    pub value: &'a RawValue,
    pub color: ColorToken,
}

/// The records sharing one attribute, rendered as one section.
#[derive(Debug, Clone)]
pub struct ComparisonGroup<'a> {
    pub attribute: CompactString,
    pub semantic_type: SemanticType,
    pub hints: RenderHints,
    items: Vec<ComparisonItem<'a>>,
}

impl<'a> ComparisonGroup<'a> {
    /// A group over the given items, or `None` when there are none.
    #[must_use]
    pub fn new(
        attribute: impl Into<CompactString>,
        semantic_type: SemanticType,
        hints: RenderHints,
        items: Vec<ComparisonItem<'a>>,
    ) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        Some(Self {
            attribute: attribute.into(),
            semantic_type,
            hints,
            items,
        })
    }

    #[must_use]
    pub fn items(&self) -> &[ComparisonItem<'a>] {
        &self.items
    }

    /// The values of every item, in record order.
    #[must_use]
    pub fn values(&self) -> Vec<&'a RawValue> {
        self.items.iter().map(|item| item.value).collect()
    }

    /// Heading for the group: the hint label, else the attribute name.
    #[must_use]
    pub fn title(&self) -> &str {
        self.hints.label.as_deref().unwrap_or(&self.attribute)
    }
}
