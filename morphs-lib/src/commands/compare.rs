use super::Host;
use super::common::{CommonArgs, init_logging, load_config, load_records};
use crate::Result;
use crate::compare::ComparisonSession;
use crate::morphs::MorphEngine;
use crate::render::{document, outline, to_markup};
use crate::visual::Node;
use camino::Utf8PathBuf;
use chrono::Local;
use clap::{Parser, ValueEnum};
use compact_str::CompactString;
use ohno::IntoAppError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::sync::Arc;

const LOG_TARGET: &str = "   compare";

/// Output format for comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A self-contained HTML page
    Html,

    /// A JSON array of sections, each with its HTML markup and node tree
    Json,

    /// Indented text for the terminal
    Outline,
}

#[derive(Parser, Debug)]
pub struct CompareArgs {
    /// JSON file holding an array of records
    #[arg(value_name = "PATH")]
    pub records: Utf8PathBuf,

    /// Attribute to compare; repeat to compare several (default is every attribute found)
    #[arg(long, short = 'a', value_name = "NAME")]
    pub attribute: Vec<CompactString>,

    /// Output format
    #[arg(long, short = 'f', value_name = "FORMAT", default_value = "outline")]
    pub format: OutputFormat,

    /// Write the output to a file instead of the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    attribute: &'a str,
    html: String,
    tree: &'a Node,
}

fn render_sections(session: &ComparisonSession<'_>, attributes: &[CompactString]) -> Vec<(CompactString, Node)> {
    if attributes.is_empty() {
        return session.build_all();
    }

    attributes
        .iter()
        .filter_map(|attribute| {
            let node = session.build(attribute, None);
            if node.is_none() {
                log::info!(target: LOG_TARGET, "No record has a value for '{attribute}'");
            }
            Some((attribute.clone(), node?))
        })
        .collect()
}

pub fn compare_records<H: Host>(host: &mut H, args: &CompareArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = Arc::new(load_config(&args.common)?);
    let records = load_records(&args.records, &config.records)?;
    log::info!(target: LOG_TARGET, "Loaded {} records from '{}'", records.len(), args.records);

    let engine = MorphEngine::new(config);
    let session = ComparisonSession::new(&engine, &records);
    let sections = render_sections(&session, &args.attribute);

    let rendered = match args.format {
        OutputFormat::Html => {
            let mut html = String::new();
            document::generate(&session, &sections, Local::now(), &mut html)?;
            html.into_bytes()
        }

        OutputFormat::Json => {
            let json_sections: Vec<JsonSection<'_>> = sections
                .iter()
                .map(|(attribute, node)| JsonSection {
                    attribute,
                    html: to_markup(node),
                    tree: node,
                })
                .collect();
            let mut json = serde_json::to_vec_pretty(&json_sections).into_app_err("serializing comparison sections")?;
            json.push(b'\n');
            json
        }

        OutputFormat::Outline => {
            let use_colors = args.output.is_none() && args.common.color.use_colors(host.output_is_terminal());
            let mut text = Vec::new();
            outline::generate(&sections, use_colors, &mut text)?;
            text
        }
    };

    if let Some(path) = &args.output {
        fs::write(path, &rendered).into_app_err_with(|| format!("writing output to '{path}'"))?;
        let _ = writeln!(host.output(), "Wrote {} sections to {path}", sections.len());
    } else {
        host.output().write_all(&rendered).into_app_err("writing output")?;
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::ColorMode;
    use crate::commands::host::TestHost;
    use camino::Utf8Path;

    const RECORDS: &str = r#"[
        {"id": "tea", "name": "Green tea", "rating": 7.5, "status": "Giftig"},
        {"id": "coffee", "name": "Coffee", "rating": 9, "status": "ok"}
    ]"#;

    fn write_records(dir: &Utf8Path) -> Utf8PathBuf {
        let path = dir.join("records.json");
        fs::write(&path, RECORDS).unwrap();
        path
    }

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    fn args(records: Utf8PathBuf, format: OutputFormat) -> CompareArgs {
        CompareArgs {
            records,
            attribute: Vec::new(),
            format,
            output: None,
            common: CommonArgs::default(),
        }
    }

    #[test]
    fn test_outline_output() {
        let (_guard, dir) = temp_dir();
        let mut host = TestHost::new();
        compare_records(&mut host, &args(write_records(&dir), OutputFormat::Outline)).unwrap();

        let text = host.output_text();
        assert!(text.contains("Green tea"));
        assert!(text.contains("Giftig"));
        assert!(!text.contains("\x1b["));
    }

    #[test]
    fn test_auto_colors_follow_host_terminal() {
        let (_guard, dir) = temp_dir();
        let mut compare_args = args(write_records(&dir), OutputFormat::Outline);
        compare_args.common.color = ColorMode::Auto;

        let mut host = TestHost::terminal();
        compare_records(&mut host, &compare_args).unwrap();
        assert!(host.output_text().contains("\x1b["));

        let mut host = TestHost::new();
        compare_records(&mut host, &compare_args).unwrap();
        assert!(!host.output_text().contains("\x1b["));
    }

    #[test]
    fn test_json_output_selects_attributes() {
        let (_guard, dir) = temp_dir();
        let mut host = TestHost::new();
        let mut compare_args = args(write_records(&dir), OutputFormat::Json);
        compare_args.attribute = vec!["rating".into(), "missing".into()];
        compare_records(&mut host, &compare_args).unwrap();

        let value: serde_json::Value = serde_json::from_str(&host.output_text()).unwrap();
        let sections = value.as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["attribute"], "rating");
        assert!(sections[0]["html"].as_str().unwrap().starts_with("<section"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTimeZoneInformationForYear")]
    fn test_html_output_to_file() {
        let (_guard, dir) = temp_dir();
        let mut host = TestHost::new();
        let mut compare_args = args(write_records(&dir), OutputFormat::Html);
        let output = dir.join("out.html");
        compare_args.output = Some(output.clone());
        compare_records(&mut host, &compare_args).unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<section").count(), 2);
        assert!(host.output_text().contains("Wrote 2 sections"));
    }

    #[test]
    fn test_missing_records_file() {
        let (_guard, dir) = temp_dir();
        let mut host = TestHost::new();
        let result = compare_records(&mut host, &args(dir.join("nope.json"), OutputFormat::Outline));
        assert!(result.unwrap_err().to_string().contains("reading records file"));
    }
}
