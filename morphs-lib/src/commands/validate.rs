use super::Host;
use crate::Result;
use crate::config::Config;
use crate::morphs::MorphEngine;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::app_err;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is `morphs.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Loads a configuration file and checks that every field renderer names a known morph
fn validate_config_inner(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<()> {
    let config = Config::load(base_dir, config_path)?;
    let engine = MorphEngine::new(Arc::new(config));

    for (field, renderer) in &engine.config().field_renderers {
        if engine.registry().get(renderer).is_none() {
            return Err(app_err!("field '{field}' names unknown renderer '{renderer}'"));
        }
    }

    for (field, hints) in &engine.config().hints {
        if let Some(renderer) = &hints.renderer
            && engine.registry().get(renderer).is_none()
        {
            return Err(app_err!("hints for '{field}' name unknown renderer '{renderer}'"));
        }
    }

    Ok(())
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let base_dir = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match validate_config_inner(&base_dir, config_path) {
        Ok(()) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file given)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};
    use std::fs;

    fn temp_path(dir: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_path(&temp_dir, "morphs.toml");

        let mut init_host = TestHost::new();
        let init_args = InitArgs {
            output: Some(config_path.clone()),
        };
        init_config(&mut init_host, &init_args).unwrap();
        assert!(init_host.output_text().contains("Generated default configuration file"));

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_ok(), "Default configuration should validate successfully: {result:?}");
        assert!(host.output_text().contains("Configuration file is valid"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_path(&temp_dir, "invalid_syntax.toml");
        fs::write(&config_path, "[records\nid_keys = []\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        assert!(result.is_err(), "Invalid TOML syntax should fail validation");
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_text().contains("Configuration validation failed"));
    }

    #[test]
    fn test_unknown_field() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_path(&temp_dir, "unknown_field.toml");
        fs::write(&config_path, "unknown_field = \"value\"\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let result = validate_config(&mut host, &args);

        let message = result.unwrap_err().to_string();
        assert!(message.contains("unknown_field"), "unexpected error: {message}");
    }

    #[test]
    fn test_unknown_renderer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_path(&temp_dir, "renderer.toml");
        fs::write(&config_path, "[field_renderers]\nmotto = \"sparkles\"\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        let message = validate_config(&mut host, &args).unwrap_err().to_string();
        assert!(message.contains("unknown renderer 'sparkles'"));
    }

    #[test]
    fn test_yaml_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_path(&temp_dir, "morphs.yaml");
        fs::write(&config_path, "currency_symbol: \"$\"\nmax_depth: 3\n").unwrap();

        let mut host = TestHost::new();
        let args = ValidateArgs { config: Some(config_path) };
        validate_config(&mut host, &args).unwrap();
    }
}
