use crate::values::SemanticType;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Optional per-attribute rendering instructions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenderHints {
    /// Heading shown instead of the attribute name
    #[serde(default)]
    pub label: Option<CompactString>,

    /// Unit appended to numbers, or the currency symbol for currency values
    #[serde(default)]
    pub unit: Option<CompactString>,

    /// Upper bound for ratings, progress bars and scaled rows
    #[serde(default)]
    pub max: Option<f64>,

    /// Semantic type to use instead of classifying the value
    #[serde(default, rename = "type")]
    pub semantic_type: Option<SemanticType>,

    /// Morph to use regardless of type or configured field renderer
    #[serde(default)]
    pub renderer: Option<CompactString>,
}

impl RenderHints {
    /// These hints, with unset entries taken from `fallback`.
    #[must_use]
    pub fn or(&self, fallback: &Self) -> Self {
        Self {
            label: self.label.clone().or_else(|| fallback.label.clone()),
            unit: self.unit.clone().or_else(|| fallback.unit.clone()),
            max: self.max.or(fallback.max),
            semantic_type: self.semantic_type.or(fallback.semantic_type),
            renderer: self.renderer.clone().or_else(|| fallback.renderer.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_prefers_own_values() {
        let own = RenderHints {
            label: Some("Score".into()),
            max: Some(5.0),
            ..RenderHints::default()
        };
        let fallback = RenderHints {
            label: Some("Ignored".into()),
            unit: Some("pts".into()),
            max: Some(10.0),
            semantic_type: Some(SemanticType::Rating),
            renderer: None,
        };

        let merged = own.or(&fallback);
        assert_eq!(merged.label.as_deref(), Some("Score"));
        assert_eq!(merged.unit.as_deref(), Some("pts"));
        assert_eq!(merged.max, Some(5.0));
        assert_eq!(merged.semantic_type, Some(SemanticType::Rating));
        assert!(merged.renderer.is_none());
    }

    #[test]
    fn test_deserialize_type_key() {
        let hints: RenderHints = toml::from_str("type = \"progress\"\nmax = 200.0\n").unwrap();
        assert_eq!(hints.semantic_type, Some(SemanticType::Progress));
        assert_eq!(hints.max, Some(200.0));
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        assert!(toml::from_str::<RenderHints>("colour = \"red\"\n").is_err());
    }
}
