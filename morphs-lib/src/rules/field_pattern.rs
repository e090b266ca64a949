use super::Pattern;
use crate::Result;
use crate::values::{SemanticType, ValueKind};
use compact_str::CompactString;
use ohno::app_err;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

/// A single way of matching an attribute name.
///
/// Literal matchers hold lowercase text and are compared against the lowercased name.
#[derive(Debug, Clone)]
pub enum NameMatcher {
    Exact(CompactString),
    Prefix(CompactString),
    Suffix(CompactString),
    Contains(CompactString),
    Regex(Pattern),
}

impl NameMatcher {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::Exact(s) => lowered == s.as_str(),
            Self::Prefix(s) => lowered.starts_with(s.as_str()),
            Self::Suffix(s) => lowered.ends_with(s.as_str()),
            Self::Contains(s) => lowered.contains(s.as_str()),
            Self::Regex(p) => p.is_match(lowered),
        }
    }
}

/// A named group of attribute-name matchers forcing a semantic type.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    name: CompactString,
    semantic_type: SemanticType,
    applies_to: Vec<ValueKind>,
    matchers: Vec<NameMatcher>,
}

impl FieldPattern {
    /// Create a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern has no matchers or applies to no value kinds.
    pub fn new(
        name: impl Into<CompactString>,
        semantic_type: SemanticType,
        applies_to: Vec<ValueKind>,
        matchers: Vec<NameMatcher>,
    ) -> Result<Self> {
        let name = name.into();
        if matchers.is_empty() {
            return Err(app_err!("field pattern '{name}' has no matchers"));
        }

        if applies_to.is_empty() {
            return Err(app_err!("field pattern '{name}' does not apply to any value kind"));
        }

        Ok(Self {
            name,
            semantic_type,
            applies_to,
            matchers,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn semantic_type(&self) -> SemanticType {
        self.semantic_type
    }

    #[must_use]
    pub fn applies_to(&self) -> &[ValueKind] {
        &self.applies_to
    }

    /// Whether this pattern claims the given attribute for a value of the given kind.
    #[must_use]
    pub fn matches(&self, field: &str, kind: ValueKind) -> bool {
        if !self.applies_to.contains(&kind) {
            return false;
        }

        let lowered = field.trim().to_lowercase();
        !lowered.is_empty() && self.matchers.iter().any(|m| m.matches(&lowered))
    }
}

impl<'de> Deserialize<'de> for FieldPattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct FieldPatternData {
            name: CompactString,
            #[serde(rename = "type")]
            semantic_type: SemanticType,
            applies_to: Vec<ValueKind>,
            #[serde(default)]
            exact: Vec<CompactString>,
            #[serde(default)]
            prefix: Vec<CompactString>,
            #[serde(default)]
            suffix: Vec<CompactString>,
            #[serde(default)]
            contains: Vec<CompactString>,
            #[serde(default)]
            regex: Vec<Pattern>,
        }

        let data = FieldPatternData::deserialize(deserializer)?;
        let lower = |s: CompactString| CompactString::from(s.to_lowercase());

        let matchers = data
            .exact
            .into_iter()
            .map(|s| NameMatcher::Exact(lower(s)))
            .chain(data.prefix.into_iter().map(|s| NameMatcher::Prefix(lower(s))))
            .chain(data.suffix.into_iter().map(|s| NameMatcher::Suffix(lower(s))))
            .chain(data.contains.into_iter().map(|s| NameMatcher::Contains(lower(s))))
            .chain(data.regex.into_iter().map(NameMatcher::Regex))
            .collect();

        Self::new(data.name, data.semantic_type, data.applies_to, matchers).map_err(D::Error::custom)
    }
}
