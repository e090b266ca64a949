use crate::values::SemanticType;
use serde::Deserialize;

/// How a numeric band treats whole numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerRule {
    /// Any finite number qualifies
    #[default]
    Any,

    /// Only whole numbers qualify
    Only,

    /// Whole numbers never qualify
    Never,
}

/// A numeric band mapping numbers inside it to a semantic type.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericThreshold {
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,

    pub min: f64,

    pub max: f64,

    #[serde(default)]
    pub min_exclusive: bool,

    #[serde(default)]
    pub max_exclusive: bool,

    #[serde(default)]
    pub integers: IntegerRule,
}

impl NumericThreshold {
    /// Whether `n` falls into this band. Non-finite numbers never do.
    #[must_use]
    pub fn matches(&self, n: f64) -> bool {
        if !n.is_finite() {
            return false;
        }

        let above = if self.min_exclusive { n > self.min } else { n >= self.min };
        let below = if self.max_exclusive { n < self.max } else { n <= self.max };
        if !above || !below {
            return false;
        }

        let whole = n.fract() == 0.0;
        match self.integers {
            IntegerRule::Any => true,
            IntegerRule::Only => whole,
            IntegerRule::Never => !whole,
        }
    }
}
