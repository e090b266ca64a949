use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

/// Visual variant of a badge, in decreasing order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, IntoStaticStr, Deserialize, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Danger,
    Warning,
    Success,
    Info,
}

impl BadgeVariant {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Keyword lists that identify badge-like strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct BadgeKeywords {
    keywords: IndexMap<BadgeVariant, Vec<CompactString>>,
}

impl BadgeKeywords {
    #[must_use]
    pub fn new(keywords: IndexMap<BadgeVariant, Vec<CompactString>>) -> Self {
        Self { keywords }
    }

    /// The most severe variant with a keyword contained in `text`, ignoring case.
    ///
    /// Keywords match anywhere, so compounds such as `Hochgiftig` count.
    #[must_use]
    pub fn variant_for(&self, text: &str) -> Option<BadgeVariant> {
        let lowered = text.to_lowercase();
        BadgeVariant::iter().find(|variant| {
            self.keywords
                .get(variant)
                .is_some_and(|keywords| keywords.iter().any(|keyword| lowered.contains(keyword.to_lowercase().as_str())))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.values().all(Vec::is_empty)
    }

    /// The first variant listing a blank keyword, which would match every string.
    #[must_use]
    pub fn blank_keyword(&self) -> Option<BadgeVariant> {
        self.keywords
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| keyword.trim().is_empty()))
            .map(|(variant, _)| *variant)
    }
}
