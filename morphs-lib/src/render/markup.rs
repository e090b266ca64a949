use super::RenderTarget;
use crate::Result;
use crate::compare::RenderHints;
use crate::config::Config;
use crate::morphs::{MorphEngine, MorphRegistry};
use crate::values::{RawValue, Record};
use crate::visual::safe::escape;
use crate::visual::{Element, Node};
use compact_str::CompactString;
use core::fmt::Write;
use std::sync::Arc;

/// Elements written without children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

fn is_valid_style_property(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn push_element(element: &Element, out: &mut String) {
    if !is_valid_name(&element.tag) {
        for child in &element.children {
            push_node(child, out);
        }
        return;
    }

    out.push('<');
    out.push_str(&element.tag);

    if !element.classes.is_empty() {
        out.push_str(" class=\"");
        let classes: Vec<&str> = element.classes.iter().map(CompactString::as_str).collect();
        out.push_str(&escape(&classes.join(" ")));
        out.push('"');
    }

    for (name, value) in element.attrs.iter().filter(|(name, _)| is_valid_name(name)) {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    let declarations: Vec<String> = element
        .style
        .iter()
        .filter(|(property, _)| is_valid_style_property(property))
        .map(|(property, value)| format!("{property}: {}", value.replace(';', "")))
        .collect();
    if !declarations.is_empty() {
        out.push_str(" style=\"");
        out.push_str(&escape(&declarations.join("; ")));
        out.push('"');
    }

    out.push('>');

    if VOID_ELEMENTS.contains(&element.tag.as_str()) {
        return;
    }

    for child in &element.children {
        push_node(child, out);
    }

    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn push_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Element(element) => push_element(element, out),
    }
}

/// Serialize a node tree as HTML.
///
/// Text and attribute values are escaped. Elements and attributes with malformed names
/// are left out, keeping their children.
#[must_use]
pub fn to_markup(node: &Node) -> String {
    let mut out = String::new();
    push_node(node, &mut out);
    out
}

/// Write a node tree as HTML.
pub fn write_node<W: Write>(node: &Node, writer: &mut W) -> Result<()> {
    writer.write_str(&to_markup(node))?;
    Ok(())
}

/// Produces HTML strings.
#[derive(Debug, Clone)]
pub struct MarkupTarget {
    engine: MorphEngine,
}

impl MarkupTarget {
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            engine: MorphEngine::new(config),
        }
    }

    #[must_use]
    pub fn with_registry(config: Arc<Config>, registry: MorphRegistry) -> Self {
        Self {
            engine: MorphEngine::with_registry(config, registry),
        }
    }
}

impl RenderTarget for MarkupTarget {
    type Output = String;

    fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    fn render_value(&self, value: &RawValue, field: Option<&str>, hints: Option<&RenderHints>) -> String {
        to_markup(&self.engine.render_value(value, field, hints))
    }

    fn render_comparison(&self, attribute: &str, records: &[Record], hints: Option<&RenderHints>) -> Option<String> {
        self.engine
            .build_comparison(attribute, records, hints)
            .map(|node| to_markup(&node))
    }
}
