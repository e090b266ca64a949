use super::{FALLBACK_RULE, Probe, SHAPE_RULES};
use crate::config::Config;
use crate::rules::RuleTable;
use crate::values::{RawValue, SemanticType};
use serde::Serialize;
use std::sync::Arc;

const LOG_TARGET: &str = "  classify";

/// The outcome of classifying a value, with the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    pub rule: &'static str,
}

/// Maps raw values to semantic types using a shared rule table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Arc<RuleTable>,
}

impl Classifier {
    #[must_use]
    pub const fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// The rule table this classifier reads.
    #[must_use]
    pub const fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    /// Classify a value, optionally in the context of the attribute it belongs to.
    #[must_use]
    pub fn classify(&self, value: &RawValue, field: Option<&str>) -> SemanticType {
        self.explain(value, field).semantic_type
    }

    /// Classify a value and report which rule decided it.
    #[must_use]
    pub fn explain(&self, value: &RawValue, field: Option<&str>) -> Classification {
        let probe = Probe {
            value,
            field,
            rules: &self.rules,
        };
        let kind = value.kind();

        let classification = SHAPE_RULES
            .iter()
            .filter(|rule| rule.kinds.contains(&kind))
            .find_map(|rule| (rule.check)(&probe).map(|semantic_type| Classification { semantic_type, rule: rule.name }))
            .unwrap_or(Classification {
                semantic_type: SemanticType::Text,
                rule: FALLBACK_RULE,
            });

        log::trace!(
            target: LOG_TARGET,
            "Classified {kind} value for field '{}' as {} (rule '{}')",
            field.unwrap_or(""),
            classification.semantic_type,
            classification.rule
        );

        classification
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Config::default().classification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(json: &str, field: Option<&str>) -> SemanticType {
        Classifier::default().classify(&RawValue::parse_json(json).unwrap(), field)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(classify("null", None), SemanticType::Empty);
        assert_eq!(classify("true", None), SemanticType::Boolean);
        assert_eq!(classify("false", Some("rating")), SemanticType::Boolean);
        assert_eq!(classify("7.5", None), SemanticType::Rating);
        assert_eq!(classify("42", None), SemanticType::Progress);
        assert_eq!(classify("150", None), SemanticType::Number);
        assert_eq!(classify("-3", None), SemanticType::Number);
        assert_eq!(classify("3", None), SemanticType::Number);
    }

    #[test]
    fn test_field_name_precedence() {
        assert_eq!(classify("42", Some("rating_score")), SemanticType::Rating);
        assert_eq!(classify("42", Some("item_count")), SemanticType::Number);
        assert_eq!(classify("42", None), SemanticType::Progress);
        assert_eq!(classify("7.5", Some("price")), SemanticType::Currency);
        assert_eq!(classify("65", Some("completion")), SemanticType::Progress);
        assert_eq!(classify("1990", Some("founded")), SemanticType::Date);
        assert_eq!(classify("2001", Some("year")), SemanticType::Number);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify("10", None), SemanticType::Progress);
        assert_eq!(classify("10.0", None), SemanticType::Progress);
        assert_eq!(classify("10.5", None), SemanticType::Number);
        assert_ne!(classify("10.0", None), classify("10.5", None));
        assert_eq!(classify("9", None), SemanticType::Number);
        assert_eq!(classify("100", None), SemanticType::Progress);
        assert_eq!(classify("100.5", None), SemanticType::Number);
        assert_eq!(classify("0.0", None), SemanticType::Number);
    }

    #[test]
    fn test_fractions_outside_rating_band_are_numbers() {
        assert_eq!(classify("42.5", None), SemanticType::Number);
        assert_eq!(classify("55.5", None), SemanticType::Number);
        assert_eq!(classify("99.9", None), SemanticType::Number);
        assert_eq!(classify("55", None), SemanticType::Progress);
        assert_eq!(classify("55.5", Some("completion")), SemanticType::Progress);
    }

    #[test]
    fn test_non_finite_numbers() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify(&RawValue::Number(f64::NAN), None), SemanticType::Number);
        assert_eq!(classifier.classify(&RawValue::Number(f64::INFINITY), None), SemanticType::Number);
        assert_eq!(classifier.classify(&RawValue::Number(f64::NEG_INFINITY), Some("x")), SemanticType::Number);
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify(r#""https://example.com""#, None), SemanticType::Link);
        assert_eq!(classify(r#""www.example.com""#, None), SemanticType::Link);
        assert_eq!(classify(r#""cover.JPG""#, None), SemanticType::Image);
        assert_eq!(classify(r#""https://example.com/a.png""#, None), SemanticType::Link);
        assert_eq!(classify(r#""2024-05-01""#, None), SemanticType::Date);
        assert_eq!(classify(r#""2024-05-01T10:00:00Z""#, None), SemanticType::Date);
        assert_eq!(classify(r#""Giftig""#, None), SemanticType::Badge);
        assert_eq!(classify(r#""Hochgiftig""#, None), SemanticType::Badge);
        assert_eq!(classify(r#""Lebensgefahr!""#, None), SemanticType::Badge);
        assert_eq!(classify(r#""rust""#, None), SemanticType::Tag);
        assert_eq!(classify(r#""two words""#, None), SemanticType::Text);
        assert_eq!(classify(r#""""#, None), SemanticType::Text);
        assert_eq!(classify(r#""   ""#, None), SemanticType::Text);
    }

    #[test]
    fn test_string_field_patterns() {
        assert_eq!(classify(r#""me.png""#, Some("avatar")), SemanticType::Image);
        assert_eq!(classify(r#""example.org""#, Some("website")), SemanticType::Link);
        assert_eq!(classify(r#""May 1st""#, Some("release_date")), SemanticType::Date);
        assert_eq!(classify(r#""some/photo""#, Some("Photo")), SemanticType::Image);
    }

    #[test]
    fn test_badge_length_limit() {
        let long = format!("\"{} giftig\"", "x".repeat(40));
        assert_eq!(classify(&long, None), SemanticType::Text);
    }

    #[test]
    fn test_lists() {
        assert_eq!(classify("[]", None), SemanticType::List);
        assert_eq!(classify(r#"["a", "b"]"#, None), SemanticType::Tags);
        assert_eq!(classify(r#"[1, 2]"#, None), SemanticType::List);
        assert_eq!(classify(r#"[{"date": "1990", "event": "Found"}]"#, None), SemanticType::Timeline);
        assert_eq!(classify(r#"[{"axis": "speed", "value": 4}]"#, None), SemanticType::Radar);
        assert_eq!(classify(r#"[{"step": 1, "text": "mix"}]"#, None), SemanticType::Steps);
        assert_eq!(classify(r#"[{"label": "A", "value": 4}]"#, None), SemanticType::Bar);
        assert_eq!(classify(r#"[{"foo": 1}]"#, None), SemanticType::List);
        let long_first = format!("[\"{}\"]", "y".repeat(31));
        assert_eq!(classify(&long_first, None), SemanticType::List);
    }

    #[test]
    fn test_maps() {
        assert_eq!(classify(r#"{"min": 1, "max": 5, "avg": 3}"#, None), SemanticType::Stats);
        assert_eq!(classify(r#"{"min": 2, "max": 8}"#, None), SemanticType::Range);
        assert_eq!(classify(r#"{"min": 2, "max": 8, "unit": "cm"}"#, None), SemanticType::Range);
        assert_eq!(classify(r#"{"min": 2, "max": 8, "unit": "cm", "note": "x"}"#, None), SemanticType::Object);
        assert_eq!(classify(r#"{"lat": 52.5, "lng": 13.4}"#, None), SemanticType::Map);
        assert_eq!(classify(r#"{"protein": 20, "fat": 10, "carbs": 70}"#, None), SemanticType::Pie);
        assert_eq!(classify(r#"{"only": 1}"#, None), SemanticType::Object);
        assert_eq!(classify(r#"{"name": "root", "children": []}"#, None), SemanticType::Hierarchy);
        assert_eq!(classify(r#"{"a": "b"}"#, None), SemanticType::Object);
        assert_eq!(classify("{}", None), SemanticType::Object);
    }

    #[test]
    fn test_deep_nesting_is_total() {
        let mut value = RawValue::from(1);
        for _ in 0..500 {
            value = RawValue::List(vec![value]);
        }
        assert_eq!(Classifier::default().classify(&value, None), SemanticType::List);
    }

    #[test]
    fn test_explain_reports_rule() {
        let classifier = Classifier::default();
        let explained = classifier.explain(&RawValue::from(42), Some("rating_score"));
        assert_eq!(explained.semantic_type, SemanticType::Rating);
        assert_eq!(explained.rule, "field-pattern");

        let explained = classifier.explain(&RawValue::from(42), None);
        assert_eq!(explained.rule, "numeric-threshold");

        let explained = classifier.explain(&RawValue::from("Giftig"), None);
        assert_eq!(explained.rule, "badge-keyword");
    }

    #[test]
    fn test_classifiers_share_rules() {
        let rules = Config::default().classification;
        let a = Classifier::new(Arc::clone(&rules));
        let b = Classifier::new(Arc::clone(&rules));
        assert!(Arc::ptr_eq(a.rules(), b.rules()));
    }
}
