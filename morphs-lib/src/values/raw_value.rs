use crate::Result;
use compact_str::CompactString;
use core::fmt;
use indexmap::IndexMap;
use ohno::IntoAppError;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter};

/// Keyed map of raw values, in insertion order.
pub type ValueMap = IndexMap<CompactString, RawValue>;

/// An untyped input value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(CompactString),
    List(Vec<Self>),
    Map(ValueMap),
}

/// The structural shape of a raw value, independent of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, Deserialize, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl RawValue {
    /// Parse a JSON document, preserving map key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON.
    pub fn parse_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).into_app_err("parsing JSON value")
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Whether the value carries data worth rendering.
    ///
    /// Null, zero-length lists and zero-key maps are not usable. Every other value is,
    /// including empty strings, `false` and zero.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Null => false,
            Self::List(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
            Self::Bool(_) | Self::Number(_) | Self::String(_) => true,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view of the value, accepting numeric strings such as `"7.5"`.
    #[must_use]
    pub fn to_f64_lenient(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Look up a map key ignoring ASCII case.
    #[must_use]
    pub fn get_ignore_case(&self, key: &str) -> Option<&Self> {
        self.as_map()
            .and_then(|map| map.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v))
    }

    /// Return the first key from `keys` present in this map (ignoring case), with its value.
    #[must_use]
    pub fn find_any<'a, S: AsRef<str>>(&'a self, keys: &[S]) -> Option<(&'a str, &'a Self)> {
        let map = self.as_map()?;
        keys.iter().find_map(|wanted| {
            map.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(wanted.as_ref()))
                .map(|(k, v)| (k.as_str(), v))
        })
    }

    /// Human-readable text for the value.
    ///
    /// Strings are returned as-is, numbers are formatted without superfluous decimals,
    /// lists are comma-separated and maps are rendered as compact JSON.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.to_string(),
            Self::List(items) => {
                let mut result = String::new();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        result.push_str(", ");
                    }
                    result.push_str(&item.to_display_string());
                }
                result
            }
            Self::Map(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// Format a number with at most two decimals, dropping trailing zeros.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }

    if n.is_infinite() {
        return if n > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let mut s = format!("{n:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            let _ = s.pop();
        }
        if s.ends_with('.') {
            let _ = s.pop();
        }
    }

    if s == "-0" { "0".to_string() } else { s }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<Vec<Self>> for RawValue {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<ValueMap> for RawValue {
    fn from(value: ValueMap) -> Self {
        Self::Map(value)
    }
}

impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::String(s.into()),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => Self::Map(map.into_iter().map(|(k, v)| (k.into(), Self::from(v))).collect()),
        }
    }
}

impl<K: Into<CompactString>, V: Into<Self>> FromIterator<(K, V)> for RawValue {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for RawValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(map) => {
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    state.serialize_entry(k.as_str(), v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RawValueVisitor)
    }
}

struct RawValueVisitor;

impl<'de> Visitor<'de> for RawValueVisitor {
    type Value = RawValue;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<RawValue, E> {
        Ok(RawValue::Bool(v))
    }

    #[expect(clippy::cast_precision_loss, reason = "all numbers are represented as f64")]
    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RawValue, E> {
        Ok(RawValue::Number(v as f64))
    }

    #[expect(clippy::cast_precision_loss, reason = "all numbers are represented as f64")]
    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RawValue, E> {
        Ok(RawValue::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RawValue, E> {
        Ok(RawValue::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RawValue, E> {
        Ok(RawValue::String(v.into()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RawValue, E> {
        Ok(RawValue::String(v.into()))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawValue, E> {
        Ok(RawValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<RawValue, D::Error> {
        RawValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(RawValue::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RawValue, A::Error> {
        let mut map = ValueMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<CompactString, RawValue>()? {
            let _ = map.insert(key, value);
        }
        Ok(RawValue::Map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_preserves_key_order() {
        let value = RawValue::parse_json(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        let keys: Vec<&str> = value.as_map().unwrap().keys().map(CompactString::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_numbers_are_f64() {
        let value = RawValue::parse_json("[1, -2, 3.5]").unwrap();
        assert_eq!(
            value,
            RawValue::List(vec![RawValue::Number(1.0), RawValue::Number(-2.0), RawValue::Number(3.5)])
        );
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(RawValue::parse_json("{not json").is_err());
    }

    #[test]
    fn test_is_usable() {
        assert!(!RawValue::Null.is_usable());
        assert!(!RawValue::List(vec![]).is_usable());
        assert!(!RawValue::Map(ValueMap::new()).is_usable());
        assert!(RawValue::from("").is_usable());
        assert!(RawValue::from(0.0).is_usable());
        assert!(RawValue::from(false).is_usable());
        assert!(RawValue::List(vec![RawValue::Null]).is_usable());
    }

    #[test]
    fn test_kind() {
        assert_eq!(RawValue::Null.kind(), ValueKind::Null);
        assert_eq!(RawValue::from(true).kind(), ValueKind::Bool);
        assert_eq!(RawValue::from(1.5).kind(), ValueKind::Number);
        assert_eq!(RawValue::from("x").kind(), ValueKind::String);
        assert_eq!(RawValue::List(vec![]).kind(), ValueKind::List);
        assert_eq!(RawValue::Map(ValueMap::new()).kind(), ValueKind::Map);
    }

    #[test]
    fn test_get_ignore_case_and_find_any() {
        let value: RawValue = [("Date", RawValue::from("1990")), ("Event", RawValue::from("Found"))].into_iter().collect();
        assert_eq!(value.get_ignore_case("date"), Some(&RawValue::from("1990")));
        assert_eq!(value.get("date"), None);

        let (key, found) = value.find_any(&["year", "event"]).unwrap();
        assert_eq!(key, "Event");
        assert_eq!(found, &RawValue::from("Found"));
        assert!(value.find_any(&["missing"]).is_none());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7.0), "7");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(1.2345), "1.23");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_to_display_string() {
        assert_eq!(RawValue::Null.to_display_string(), "");
        assert_eq!(RawValue::from("hello").to_display_string(), "hello");
        assert_eq!(
            RawValue::List(vec![RawValue::from("a"), RawValue::from(2)]).to_display_string(),
            "a, 2"
        );
        let map: RawValue = [("min", 2), ("max", 8)].into_iter().collect();
        assert_eq!(map.to_display_string(), r#"{"min":2.0,"max":8.0}"#);
    }

    #[test]
    fn test_to_f64_lenient() {
        assert_eq!(RawValue::from(" 7.5 ").to_f64_lenient(), Some(7.5));
        assert_eq!(RawValue::from(3).to_f64_lenient(), Some(3.0));
        assert_eq!(RawValue::from("abc").to_f64_lenient(), None);
        assert_eq!(RawValue::from(true).to_f64_lenient(), None);
    }

    #[test]
    fn test_from_serde_json() {
        let value = RawValue::from(serde_json::json!({"a": [1, "x", null, true]}));
        let list = value.get("a").and_then(RawValue::as_list).unwrap();
        assert_eq!(list.len(), 4);
        assert_eq!(list[1], RawValue::from("x"));
        assert_eq!(list[2], RawValue::Null);
    }

    #[test]
    fn test_serialize_round_trip_through_json() {
        let value = RawValue::parse_json(r#"{"b":[1.5,"s",null],"a":{"x":true}}"#).unwrap();
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(text, r#"{"b":[1.5,"s",null],"a":{"x":true}}"#);
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let value: RawValue = serde_yaml::from_str("name: widget\nsizes: [1, 2]\n").unwrap();
        assert_eq!(value.get("name"), Some(&RawValue::from("widget")));
        assert_eq!(value.get("sizes").and_then(RawValue::as_list).map(<[RawValue]>::len), Some(2));
    }
}
