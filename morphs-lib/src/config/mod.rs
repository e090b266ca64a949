//! Configuration loading and defaults
//!
//! A [`Config`] carries the record palette, the classification [`RuleTable`](crate::rules::RuleTable),
//! per-field renderer overrides and per-attribute rendering hints. The defaults are
//! embedded from `default_config.toml`; user files may be TOML, YAML or JSON and only
//! need to mention the settings they change.
//!
//! Nothing in the library reads configuration implicitly. Engines and targets are
//! built from an explicit `Arc<Config>`.

mod color;
#[expect(clippy::module_inception, reason = "config::Config mirrors the file it is loaded from")]
mod config;

pub use color::Color;
pub use config::{Config, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML};
