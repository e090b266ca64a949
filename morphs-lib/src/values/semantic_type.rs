use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The inferred category of a value, driving the choice of renderer.
///
/// The set is closed and every classification produces exactly one member.
/// A semantic type is advisory: renderers must cope with values that only
/// loosely fit it, such as a range without an upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Empty,
    Boolean,
    Number,
    Rating,
    Progress,
    Text,
    Badge,
    Tag,
    Link,
    Image,
    Date,
    Currency,
    List,
    Tags,
    Range,
    Stats,
    Object,
    Hierarchy,
    Timeline,
    Steps,
    Map,
    Pie,
    Bar,
    Radar,
}

impl SemanticType {
    /// The canonical lowercase name, also used as the default morph name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for semantic_type in SemanticType::iter() {
            assert_eq!(SemanticType::from_str(semantic_type.name()).unwrap(), semantic_type);
        }
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(SemanticType::Hierarchy.to_string(), "hierarchy");
        assert_eq!(SemanticType::Radar.name(), "radar");
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&SemanticType::Timeline).unwrap();
        assert_eq!(json, "\"timeline\"");
        let parsed: SemanticType = serde_json::from_str("\"progress\"").unwrap();
        assert_eq!(parsed, SemanticType::Progress);
    }

    #[test]
    fn test_enumeration_is_complete() {
        assert_eq!(SemanticType::iter().count(), 24);
    }
}
