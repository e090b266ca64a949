use super::{BadgeKeywords, FieldPattern, NumericThreshold, Pattern, SequenceSignature};
use crate::Result;
use crate::values::{SemanticType, ValueKind, ValueMap};
use ohno::app_err;
use serde::Deserialize;

const LOG_TARGET: &str = "     rules";

/// Shape checks applied to strings once no field pattern matched.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StringRules {
    /// Strings matching this are links
    pub url: Pattern,

    /// Strings matching this are images
    pub image: Pattern,

    /// Strings matching this are dates
    pub date: Pattern,

    /// Longest string, in characters, that can still be a badge
    pub badge_max_len: usize,

    /// Longest string, in characters, that can still be a tag
    pub tag_max_len: usize,

    /// Longest first list element, in characters, that makes a list of tags
    pub tags_item_max_len: usize,
}

/// Size limits for the map shape checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapRules {
    /// Maps with `min` and `max` and at most this many keys are ranges
    pub range_max_keys: usize,

    /// Fewest keys an all-numeric map needs to be a pie
    pub pie_min_keys: usize,

    /// Most keys an all-numeric map may have to be a pie
    pub pie_max_keys: usize,
}

/// The complete set of classification rules.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTable {
    /// Attribute-name rules, highest priority first
    #[serde(default)]
    pub field_patterns: Vec<FieldPattern>,

    /// Numeric bands, tried in order
    #[serde(default)]
    pub numeric_thresholds: Vec<NumericThreshold>,

    pub strings: StringRules,

    pub maps: MapRules,

    /// Signatures for lists of maps, tried in order
    #[serde(default)]
    pub sequences: Vec<SequenceSignature>,

    #[serde(default)]
    pub badge_keywords: BadgeKeywords,
}

impl RuleTable {
    /// The first field pattern claiming `field` for a value of `kind`.
    #[must_use]
    pub fn field_pattern(&self, field: Option<&str>, kind: ValueKind) -> Option<&FieldPattern> {
        let field = field?;
        self.field_patterns.iter().find(|p| p.matches(field, kind))
    }

    /// The type of the first numeric band containing `n`.
    #[must_use]
    pub fn numeric_type(&self, n: f64) -> Option<SemanticType> {
        self.numeric_thresholds.iter().find(|t| t.matches(n)).map(|t| t.semantic_type)
    }

    /// The type of the first sequence signature matching `map`.
    #[must_use]
    pub fn sequence_type(&self, map: &ValueMap) -> Option<SemanticType> {
        self.sequences.iter().find(|s| s.matches(map)).map(|s| s.semantic_type)
    }

    /// Check the table for inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first inconsistency found.
    pub fn validate(&self) -> Result<()> {
        for (index, threshold) in self.numeric_thresholds.iter().enumerate() {
            if threshold.min.is_nan() || threshold.max.is_nan() {
                return Err(app_err!("numeric threshold #{} ({}) has a NaN bound", index + 1, threshold.semantic_type));
            }

            if threshold.min > threshold.max {
                return Err(app_err!(
                    "numeric threshold #{} ({}) has min {} greater than max {}",
                    index + 1,
                    threshold.semantic_type,
                    threshold.min,
                    threshold.max
                ));
            }
        }

        if self.strings.badge_max_len == 0 || self.strings.tag_max_len == 0 || self.strings.tags_item_max_len == 0 {
            return Err(app_err!("string length limits must be greater than zero"));
        }

        if self.maps.range_max_keys < 2 {
            return Err(app_err!("range_max_keys must be at least 2, got {}", self.maps.range_max_keys));
        }

        if self.maps.pie_min_keys == 0 || self.maps.pie_min_keys > self.maps.pie_max_keys {
            return Err(app_err!(
                "pie key bounds must satisfy 0 < pie_min_keys <= pie_max_keys, got {}..={}",
                self.maps.pie_min_keys,
                self.maps.pie_max_keys
            ));
        }

        if let Some(variant) = self.badge_keywords.blank_keyword() {
            return Err(app_err!("badge keywords for '{variant}' include a blank keyword"));
        }

        if self.badge_keywords.is_empty() {
            log::warn!(target: LOG_TARGET, "No badge keywords configured, strings will never classify as badges");
        }

        for signature in &self.sequences {
            if signature.keys.is_empty() || signature.keys.iter().any(Vec::is_empty) {
                return Err(app_err!("sequence signature for '{}' has an empty key group", signature.semantic_type));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::values::RawValue;

    fn table() -> RuleTable {
        (*Config::default().classification).clone()
    }

    #[test]
    fn test_default_table_is_valid() {
        table().validate().unwrap();
    }

    #[test]
    fn test_field_pattern_priority() {
        let table = table();
        let pattern = table.field_pattern(Some("item_count"), ValueKind::Number).unwrap();
        assert_eq!(pattern.semantic_type(), SemanticType::Number);

        let pattern = table.field_pattern(Some("rating_score"), ValueKind::Number).unwrap();
        assert_eq!(pattern.semantic_type(), SemanticType::Rating);

        assert!(table.field_pattern(None, ValueKind::Number).is_none());
        assert!(table.field_pattern(Some("zzz"), ValueKind::Number).is_none());
    }

    #[test]
    fn test_numeric_type_defaults() {
        let table = table();
        assert_eq!(table.numeric_type(7.5), Some(SemanticType::Rating));
        assert_eq!(table.numeric_type(42.0), Some(SemanticType::Progress));
        assert_eq!(table.numeric_type(10.0), Some(SemanticType::Progress));
        assert_eq!(table.numeric_type(10.5), None);
        assert_eq!(table.numeric_type(42.5), None);
        assert_eq!(table.numeric_type(f64::NAN), None);
    }

    #[test]
    fn test_sequence_type_order() {
        let table = table();
        let radar = RawValue::parse_json(r#"{"axis": "speed", "value": 3}"#).unwrap();
        assert_eq!(table.sequence_type(radar.as_map().unwrap()), Some(SemanticType::Radar));

        let bar = RawValue::parse_json(r#"{"label": "A", "value": 3}"#).unwrap();
        assert_eq!(table.sequence_type(bar.as_map().unwrap()), Some(SemanticType::Bar));

        let other = RawValue::parse_json(r#"{"foo": 1}"#).unwrap();
        assert_eq!(table.sequence_type(other.as_map().unwrap()), None);
    }

    #[test]
    fn test_validate_threshold_bounds() {
        let mut table = table();
        table.numeric_thresholds[0].min = 50.0;
        table.numeric_thresholds[0].max = 5.0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_pie_bounds() {
        let mut table = table();
        table.maps.pie_min_keys = 9;
        table.maps.pie_max_keys = 3;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_zero_lengths() {
        let mut table = table();
        table.strings.tag_max_len = 0;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_range_keys() {
        let mut table = table();
        table.maps.range_max_keys = 1;
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_blank_badge_keyword() {
        let mut table = table();
        table.badge_keywords = toml::from_str("info = [\"new\", \"\"]\n").unwrap();
        let error = table.validate().unwrap_err();
        assert!(error.to_string().contains("blank keyword"), "{error}");

        table.badge_keywords = BadgeKeywords::default();
        table.validate().unwrap();
    }
}
