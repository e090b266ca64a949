use super::{RawValue, ValueMap};
use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};

/// Keys used to pull a record's identity out of a raw map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RecordKeys {
    /// Candidate keys for the record id, tried in order
    pub id_keys: Vec<CompactString>,

    /// Candidate keys for the record display name, tried in order
    pub name_keys: Vec<CompactString>,
}

impl RecordKeys {
    fn is_identity_key(&self, key: &str) -> bool {
        self.id_keys.iter().chain(&self.name_keys).any(|k| k.eq_ignore_ascii_case(key))
    }
}

impl Default for RecordKeys {
    fn default() -> Self {
        Self {
            id_keys: vec!["id".into(), "key".into(), "slug".into()],
            name_keys: vec!["name".into(), "title".into(), "label".into()],
        }
    }
}

/// One entity being compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: CompactString,
    pub name: CompactString,
    pub attributes: ValueMap,
}

impl Record {
    #[must_use]
    pub fn new(id: impl Into<CompactString>, name: impl Into<CompactString>, attributes: ValueMap) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes,
        }
    }

    /// Build a record from a raw value.
    ///
    /// Maps are split into identity and attributes using `keys`. When no id key is present
    /// the record's position is used, and when no name key is present the id doubles as the
    /// name. Any other value becomes a record with a single `value` attribute.
    #[must_use]
    pub fn from_raw(position: usize, raw: RawValue, keys: &RecordKeys) -> Self {
        let RawValue::Map(mut map) = raw else {
            let mut attributes = ValueMap::new();
            let _ = attributes.insert("value".into(), raw);
            let id = position.to_compact_string();
            return Self::new(id.clone(), id, attributes);
        };

        let id = take_identity(&mut map, &keys.id_keys).unwrap_or_else(|| position.to_compact_string());
        let name = take_identity(&mut map, &keys.name_keys).unwrap_or_else(|| id.clone());

        Self::new(id, name, map)
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&RawValue> {
        self.attributes.get(attribute)
    }
}

fn take_identity(map: &mut ValueMap, keys: &[CompactString]) -> Option<CompactString> {
    for key in keys {
        let found = map.keys().position(|k| k.eq_ignore_ascii_case(key));
        if let Some(index) = found
            && let Some((_, value)) = map.shift_remove_index(index)
        {
            match value {
                RawValue::String(s) if !s.trim().is_empty() => return Some(s),
                RawValue::Number(_) | RawValue::Bool(_) => return Some(value.to_display_string().into()),
                _ => {}
            }
        }
    }
    None
}

/// Collect attribute names across records, in first-seen order.
///
/// Identity keys are skipped, so pre-split records and raw maps yield the same set.
#[must_use]
pub fn attribute_names(records: &[Record], keys: &RecordKeys) -> Vec<CompactString> {
    let mut names: Vec<CompactString> = Vec::new();
    for record in records {
        for key in record.attributes.keys() {
            if !keys.is_identity_key(key) && !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    names
}
