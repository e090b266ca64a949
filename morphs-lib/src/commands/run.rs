//! Command dispatch logic for morphs

use super::{ClassifyArgs, CompareArgs, InitArgs, ValidateArgs, classify_value, compare_records, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "morphs", author, version, long_about = None)]
#[command(about = "Render side-by-side comparisons of loosely-structured records")]
#[command(styles = CLAP_STYLES)]
struct Args {
    #[command(subcommand)]
    command: MorphsSubcommand,
}

#[derive(Subcommand, Debug)]
enum MorphsSubcommand {
    /// Compare records attribute by attribute
    Compare(Box<CompareArgs>),
    /// Classify a single value
    Classify(Box<ClassifyArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Args::parse_from(args).command {
        MorphsSubcommand::Compare(compare_args) => compare_records(host, compare_args),
        MorphsSubcommand::Classify(classify_args) => classify_value(host, classify_args),
        MorphsSubcommand::Init(init_args) => init_config(host, init_args),
        MorphsSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
