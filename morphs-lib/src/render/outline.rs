use crate::Result;
use crate::config::Color;
use crate::visual::{Element, Node};
use compact_str::CompactString;
use core::str::FromStr;
use owo_colors::OwoColorize;
use std::io::Write;
use terminal_size::{Width, terminal_size};

const NAME_WIDTH: usize = 20;

/// Print comparison sections as indented text.
///
/// Each section prints its title followed by one line per record. Record names are shown
/// in their record color when `use_colors` is set.
pub fn generate<W: Write>(sections: &[(CompactString, Node)], use_colors: bool, writer: &mut W) -> Result<()> {
    let width = get_terminal_width();
    let value_width = width.saturating_sub(NAME_WIDTH + 4).max(20);

    for (index, (attribute, node)) in sections.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }

        let title = node
            .find_by_class("morph-compare-title")
            .first()
            .map_or_else(|| attribute.to_string(), |title| element_text(title));

        if use_colors {
            writeln!(writer, "{}", title.bold())?;
        } else {
            writeln!(writer, "{title}")?;
        }

        for row in node.find_by_class("compare-row") {
            let name = child_text(row, "compare-name");
            let value = child_text(row, "compare-value");

            let lines = wrap_text(&value, value_width, NAME_WIDTH + 4);
            let padded = format!("{name:<NAME_WIDTH$}");

            match record_color(row) {
                Some(color) if use_colors => {
                    let rgb = color.0;
                    write!(writer, "  {}", padded.truecolor(rgb.red, rgb.green, rgb.blue))?;
                }
                _ => write!(writer, "  {padded}")?,
            }

            if lines.is_empty() {
                writeln!(writer)?;
            }
            for (line_index, line) in lines.iter().enumerate() {
                if line_index == 0 {
                    writeln!(writer, "  {}", line.trim_start())?;
                } else {
                    writeln!(writer, "{line}")?;
                }
            }
        }
    }

    Ok(())
}

fn record_color(row: &Element) -> Option<Color> {
    row.get_style("--record-color").and_then(|value| Color::from_str(value).ok())
}

fn child_text(row: &Element, class: &str) -> String {
    row.children
        .iter()
        .filter_map(Node::as_element)
        .find(|child| child.has_class(class))
        .map(element_text)
        .unwrap_or_default()
}

fn collect_text<'a>(node: &'a Node, pieces: &mut Vec<&'a str>) {
    match node {
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                pieces.push(trimmed);
            }
        }
        Node::Element(element) => {
            for child in &element.children {
                collect_text(child, pieces);
            }
        }
    }
}

fn element_text(element: &Element) -> String {
    let mut pieces = Vec::new();
    for child in &element.children {
        collect_text(child, &mut pieces);
    }
    pieces.join(" ")
}

/// The visible text of a tree, with separate pieces joined by single spaces.
#[must_use]
pub fn plain_text(node: &Node) -> String {
    let mut pieces = Vec::new();
    collect_text(node, &mut pieces);
    pieces.join(" ")
}

fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

/// Wrap text at word boundaries, indenting every line by `indent` spaces.
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    let prefix = " ".repeat(indent);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(format!("{prefix}{current}"));
            current.clear();
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(format!("{prefix}{current}"));
    }

    lines
}
