use crate::Result;
use ohno::app_err;
use regex::{Regex, RegexBuilder};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};

/// A case-insensitive regular expression, compiled when it is loaded.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression is not a valid regular expression.
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| app_err!("invalid regular expression '{source}': {e}"))?;

        Ok(Self { regex })
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(D::Error::custom)
    }
}
