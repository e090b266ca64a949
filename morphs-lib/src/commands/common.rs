//! Shared argument types and helpers for the commands.

use crate::Result;
use crate::config::Config;
use crate::values::{RawValue, Record, RecordKeys};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use ohno::{IntoAppError, app_err, bail};
use std::fs;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether colors should be written to an output that is or isn't a terminal.
    #[must_use]
    pub const fn use_colors(self, output_is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => output_is_terminal,
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the commands that render
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to configuration file (default is `morphs.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl Default for CommonArgs {
    fn default() -> Self {
        Self {
            config: None,
            color: ColorMode::Never,
            log_level: LogLevel::None,
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Load the configuration named by the arguments, or `morphs.toml` in the current directory.
pub fn load_config(args: &CommonArgs) -> Result<Config> {
    Config::load(Utf8Path::new("."), args.config.as_ref())
}

/// Read a JSON array of records.
pub fn load_records(path: &Utf8Path, keys: &RecordKeys) -> Result<Vec<Record>> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading records file '{path}'"))?;
    parse_records(path, &text, keys)
}

fn parse_records(path: &Utf8Path, text: &str, keys: &RecordKeys) -> Result<Vec<Record>> {
    let RawValue::List(items) = RawValue::parse_json(text).map_err(|e| app_err!("parsing records file '{path}': {e}"))? else {
        bail!("records file '{path}' must hold a JSON array");
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(position, item)| Record::from_raw(position, item, keys))
        .collect())
}
