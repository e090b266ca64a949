use crate::rules::RuleTable;
use crate::values::{RawValue, SemanticType, ValueKind};

/// What a shape rule gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
    pub value: &'a RawValue,
    pub field: Option<&'a str>,
    pub rules: &'a RuleTable,
}

/// One row of the classification table.
#[derive(Debug)]
pub struct ShapeRule {
    pub name: &'static str,
    pub kinds: &'static [ValueKind],
    pub check: fn(&Probe<'_>) -> Option<SemanticType>,
}

/// Name reported when no rule claims a value.
pub const FALLBACK_RULE: &str = "fallback";

macro_rules! shape_rule {
    ($name:expr, [$($kind:ident),+], $check:expr) => {
        ShapeRule {
            name: $name,
            kinds: &[$(ValueKind::$kind),+],
            check: $check,
        }
    };
}

const fn when(condition: bool, semantic_type: SemanticType) -> Option<SemanticType> {
    if condition { Some(semantic_type) } else { None }
}

fn has_key(value: &RawValue, key: &str) -> bool {
    value.get_ignore_case(key).is_some()
}

fn string_len(value: &RawValue) -> usize {
    value.as_str().map_or(0, |s| s.trim().chars().count())
}

/// The classification decision table, in priority order.
pub const SHAPE_RULES: &[ShapeRule] = &[
    shape_rule!("null", [Null], |_| Some(SemanticType::Empty)),
    shape_rule!("boolean", [Bool], |_| Some(SemanticType::Boolean)),
    shape_rule!("field-pattern", [Number, String, List, Map], |probe| {
        probe
            .rules
            .field_pattern(probe.field, probe.value.kind())
            .map(crate::rules::FieldPattern::semantic_type)
    }),
    shape_rule!("numeric-threshold", [Number], |probe| {
        probe.value.as_f64().and_then(|n| probe.rules.numeric_type(n))
    }),
    shape_rule!("number", [Number], |_| Some(SemanticType::Number)),
    shape_rule!("url", [String], |probe| {
        when(probe.value.as_str().is_some_and(|s| probe.rules.strings.url.is_match(s.trim())), SemanticType::Link)
    }),
    shape_rule!("image-extension", [String], |probe| {
        when(probe.value.as_str().is_some_and(|s| probe.rules.strings.image.is_match(s.trim())), SemanticType::Image)
    }),
    shape_rule!("iso-date", [String], |probe| {
        when(probe.value.as_str().is_some_and(|s| probe.rules.strings.date.is_match(s.trim())), SemanticType::Date)
    }),
    shape_rule!("badge-keyword", [String], |probe| {
        let text = probe.value.as_str().unwrap_or_default();
        let len = string_len(probe.value);
        when(
            len > 0 && len <= probe.rules.strings.badge_max_len && probe.rules.badge_keywords.variant_for(text).is_some(),
            SemanticType::Badge,
        )
    }),
    shape_rule!("short-token", [String], |probe| {
        let text = probe.value.as_str().unwrap_or_default().trim();
        let len = string_len(probe.value);
        when(
            len > 0 && len <= probe.rules.strings.tag_max_len && !text.contains(char::is_whitespace),
            SemanticType::Tag,
        )
    }),
    shape_rule!("text", [String], |_| Some(SemanticType::Text)),
    shape_rule!("empty-list", [List], |probe| {
        when(probe.value.as_list().is_some_and(<[RawValue]>::is_empty), SemanticType::List)
    }),
    shape_rule!("short-string-list", [List], |probe| {
        let first = probe.value.as_list().and_then(<[RawValue]>::first);
        when(
            first.is_some_and(|item| item.as_str().is_some() && string_len(item) <= probe.rules.strings.tags_item_max_len),
            SemanticType::Tags,
        )
    }),
    shape_rule!("sequence-signature", [List], |probe| {
        probe
            .value
            .as_list()
            .and_then(<[RawValue]>::first)
            .and_then(RawValue::as_map)
            .and_then(|map| probe.rules.sequence_type(map))
    }),
    shape_rule!("list", [List], |_| Some(SemanticType::List)),
    shape_rule!("stats", [Map], |probe| {
        let v = probe.value;
        when(
            has_key(v, "min") && has_key(v, "max") && (has_key(v, "avg") || has_key(v, "mean")),
            SemanticType::Stats,
        )
    }),
    shape_rule!("range", [Map], |probe| {
        let v = probe.value;
        let len = v.as_map().map_or(0, indexmap::IndexMap::len);
        when(
            has_key(v, "min") && has_key(v, "max") && len <= probe.rules.maps.range_max_keys,
            SemanticType::Range,
        )
    }),
    shape_rule!("coordinates", [Map], |probe| {
        let v = probe.value;
        when(
            (has_key(v, "lat") || has_key(v, "latitude")) && (has_key(v, "lon") || has_key(v, "lng") || has_key(v, "longitude")),
            SemanticType::Map,
        )
    }),
    shape_rule!("numeric-parts", [Map], |probe| {
        let maps = &probe.rules.maps;
        when(
            probe.value.as_map().is_some_and(|map| {
                (maps.pie_min_keys..=maps.pie_max_keys).contains(&map.len())
                    && map.values().all(|v| v.as_f64().is_some_and(f64::is_finite))
            }),
            SemanticType::Pie,
        )
    }),
    shape_rule!("hierarchy", [Map], |probe| {
        let v = probe.value;
        when(has_key(v, "children") || has_key(v, "parent"), SemanticType::Hierarchy)
    }),
    shape_rule!("object", [Map], |_| Some(SemanticType::Object)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rule_names_are_unique() {
        let names: HashSet<&str> = SHAPE_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), SHAPE_RULES.len());
        assert!(!names.contains(FALLBACK_RULE));
    }

    #[test]
    fn test_every_kind_has_a_terminal_rule() {
        let config = crate::config::Config::default();
        let samples = [
            RawValue::Null,
            RawValue::from(true),
            RawValue::from(123_456.0),
            RawValue::from("some longer free text here"),
            RawValue::List(vec![RawValue::from(1)]),
            RawValue::parse_json(r#"{"a": "b"}"#).unwrap(),
        ];

        for value in &samples {
            let probe = Probe {
                value,
                field: None,
                rules: &config.classification,
            };
            let claimed = SHAPE_RULES
                .iter()
                .filter(|r| r.kinds.contains(&value.kind()))
                .find_map(|r| (r.check)(&probe));
            assert!(claimed.is_some(), "no rule claimed {value:?}");
        }
    }
}
