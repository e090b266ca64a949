//! Command-line interface for morphs
//!
//! # Commands
//!
//! - **compare**: Load a JSON array of records and render every attribute, or the
//!   selected ones, side by side as an HTML page, as JSON or as a terminal outline
//! - **classify**: Classify a single JSON value, optionally explaining which rule
//!   decided and showing its rendering
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! All commands write through a [`Host`], so tests can capture output without
//! touching the real process streams.

mod classify;
mod common;
mod compare;
mod host;
mod init;
mod run;
mod validate;

pub use classify::{ClassifyArgs, classify_value};
pub use common::{ColorMode, CommonArgs, LogLevel};
pub use compare::{CompareArgs, OutputFormat, compare_records};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
