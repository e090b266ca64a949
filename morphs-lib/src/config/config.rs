use super::Color;
use crate::Result;
use crate::compare::RenderHints;
use crate::rules::RuleTable;
use crate::values::RecordKeys;
use camino::{Utf8Path, Utf8PathBuf};
use compact_str::CompactString;
use indexmap::IndexMap;
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;
use std::sync::Arc;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File looked up in the base directory when no configuration path is given
pub const DEFAULT_CONFIG_FILE_NAME: &str = "morphs.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Record colors, assigned by record position
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,

    /// Symbol used by the currency renderer when no unit hint is given
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: CompactString,

    /// Maximum nesting depth for renderers that render child values
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Keys identifying records in raw input
    #[serde(default)]
    pub records: RecordKeys,

    /// Classification rules, shared by every rendering target
    #[serde(default = "default_classification")]
    pub classification: Arc<RuleTable>,

    /// Attribute name to renderer name
    #[serde(default)]
    pub field_renderers: IndexMap<CompactString, CompactString>,

    /// Attribute name to rendering hints
    #[serde(default)]
    pub hints: IndexMap<CompactString, RenderHints>,
}

fn default_palette() -> Vec<Color> {
    Config::default().palette
}

fn default_currency_symbol() -> CompactString {
    CompactString::from("€")
}

const fn default_max_depth() -> usize {
    6
}

fn default_classification() -> Arc<RuleTable> {
    Config::default().classification
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `morphs.toml` in `base_dir` is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config = Self::parse(&final_path, &text)?;
        config
            .validate()
            .map_err(|e| app_err!("invalid configuration file '{final_path}': {e}"))?;

        Ok(config)
    }

    /// Parse configuration text, choosing the format from the file extension
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unknown or the text does not parse
    pub fn parse(path: &Utf8Path, text: &str) -> Result<Self> {
        let extension = path.extension().map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") | None => toml::from_str(text).into_app_err_with(|| format!("parsing configuration file '{path}'")),
            Some("yml" | "yaml") => serde_yaml::from_str(text).into_app_err_with(|| format!("parsing configuration file '{path}'")),
            Some("json") => serde_json::from_str(text).into_app_err_with(|| format!("parsing configuration file '{path}'")),
            Some(other) => Err(app_err!("unsupported configuration format '{other}' for '{path}'")),
        }
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or inconsistent
    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(app_err!("palette must contain at least one color"));
        }

        if self.max_depth == 0 {
            return Err(app_err!("max_depth must be greater than zero"));
        }

        if self.records.id_keys.is_empty() {
            return Err(app_err!("records.id_keys must name at least one key"));
        }

        for (field, renderer) in &self.field_renderers {
            if renderer.trim().is_empty() {
                return Err(app_err!("field_renderers entry for '{field}' is empty"));
            }
        }

        for (attribute, hints) in &self.hints {
            if let Some(max) = hints.max
                && !(max.is_finite() && max > 0.0)
            {
                return Err(app_err!("hints for '{attribute}' have max {max}, which must be a positive number"));
            }
        }

        self.classification.validate()
    }

    /// Rendering hints configured for an attribute, matched without regard to case.
    #[must_use]
    pub fn hints_for(&self, attribute: &str) -> Option<&RenderHints> {
        self.hints
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(attribute))
            .map(|(_, hints)| hints)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
