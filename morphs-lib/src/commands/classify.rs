use super::Host;
use super::common::{CommonArgs, init_logging, load_config};
use crate::Result;
use crate::morphs::MorphEngine;
use crate::render::outline::plain_text;
use crate::render::to_markup;
use crate::values::RawValue;
use clap::Parser;
use std::io::Write;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Value to classify, as JSON; anything that is not valid JSON is taken as a string
    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Name of the attribute the value belongs to
    #[arg(long, value_name = "NAME")]
    pub field: Option<String>,

    /// Show which rule decided the type
    #[arg(long)]
    pub explain: bool,

    /// Show the rendered value as HTML
    #[arg(long)]
    pub render: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn parse_value(text: &str) -> RawValue {
    RawValue::parse_json(text).unwrap_or_else(|_| RawValue::from(text))
}

pub fn classify_value<H: Host>(host: &mut H, args: &ClassifyArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let engine = MorphEngine::new(Arc::new(load_config(&args.common)?));
    let value = parse_value(&args.value);
    let field = args.field.as_deref();
    let classification = engine.classifier().explain(&value, field);

    if args.explain {
        let _ = writeln!(host.output(), "{} (rule: {})", classification.semantic_type, classification.rule);
    } else {
        let _ = writeln!(host.output(), "{}", classification.semantic_type);
    }

    if args.render {
        let node = engine.render_value(&value, field, None);
        let _ = writeln!(host.output(), "{}", to_markup(&node));
        let _ = writeln!(host.output(), "{}", plain_text(&node));
    }

    Ok(())
}
