use crate::values::{SemanticType, ValueMap};
use compact_str::CompactString;
use serde::Deserialize;

/// Identifies a list of maps by the keys its first element carries.
///
/// Every key group must be satisfied by at least one key of the map, compared
/// without regard to case.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceSignature {
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,

    pub keys: Vec<Vec<CompactString>>,
}

impl SequenceSignature {
    #[must_use]
    pub fn matches(&self, map: &ValueMap) -> bool {
        !self.keys.is_empty()
            && self
                .keys
                .iter()
                .all(|group| group.iter().any(|wanted| map.keys().any(|k| k.eq_ignore_ascii_case(wanted))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::RawValue;

    fn timeline() -> SequenceSignature {
        SequenceSignature {
            semantic_type: SemanticType::Timeline,
            keys: vec![vec!["date".into(), "year".into()], vec!["event".into(), "title".into()]],
        }
    }

    fn map(text: &str) -> ValueMap {
        RawValue::parse_json(text).unwrap().as_map().unwrap().clone()
    }

    #[test]
    fn test_all_groups_required() {
        let signature = timeline();
        assert!(signature.matches(&map(r#"{"date": "1990", "event": "Found"}"#)));
        assert!(signature.matches(&map(r#"{"Year": 2001, "Title": "x"}"#)));
        assert!(!signature.matches(&map(r#"{"date": "1990"}"#)));
    }

    #[test]
    fn test_empty_signature_never_matches() {
        let signature = SequenceSignature {
            semantic_type: SemanticType::Bar,
            keys: vec![],
        };
        assert!(!signature.matches(&map(r#"{"a": 1}"#)));
    }
}
