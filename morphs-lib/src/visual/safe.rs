//! Safe-output helpers
//!
//! Text and attribute values are escaped when markup is written. URLs are only
//! emitted when they use `http`, `https` or `mailto`, or are relative references
//! without a scheme. Finished trees are passed through [`sanitize`], which removes
//! event-handler attributes and elements that could execute code or pull in
//! foreign content.

use super::{Element, Node};
use url::{ParseError, Url};

const LOG_TARGET: &str = "      safe";

/// Elements that are never emitted.
pub const FORBIDDEN_TAGS: &[&str] = &["script", "style", "iframe", "object", "embed", "frame", "frameset", "applet", "base", "link", "meta"];

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

const URL_ATTRIBUTES: &[&str] = &["href", "src", "xlink:href", "action", "formaction", "poster"];

/// Escape text for use in element content or a quoted attribute value.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Vet a URL for output.
///
/// Returns the normalized URL when it is safe to emit, or `None` when it is not.
/// A leading `www.` is promoted to `https://`.
#[must_use]
pub fn safe_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_control) {
        return None;
    }

    let candidate = if trimmed.len() > 4 && trimmed.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
        format!("https://{trimmed}")
    } else {
        trimmed.to_string()
    };

    match Url::parse(&candidate) {
        Ok(url) if ALLOWED_SCHEMES.contains(&url.scheme()) => Some(url.to_string()),
        Ok(url) => {
            log::warn!(target: LOG_TARGET, "Dropping URL with disallowed scheme '{}'", url.scheme());
            None
        }
        Err(ParseError::RelativeUrlWithoutBase) if !candidate.contains(':') && !candidate.contains(char::is_whitespace) => Some(candidate),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Dropping unparseable URL: {e}");
            None
        }
    }
}

fn is_forbidden(tag: &str) -> bool {
    FORBIDDEN_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn is_unsafe_style(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    lowered.contains("url(") || lowered.contains("expression(") || lowered.contains("javascript:")
}

/// Remove anything from a finished tree that must never be emitted.
///
/// A forbidden root element is replaced by its text content.
#[must_use]
pub fn sanitize(node: Node) -> Node {
    match node {
        Node::Text(_) => node,
        Node::Element(element) if is_forbidden(&element.tag) => {
            log::warn!(target: LOG_TARGET, "Dropping forbidden <{}> element", element.tag);
            Node::Text(Node::Element(element).text_content())
        }
        Node::Element(element) => Node::Element(sanitize_element(element)),
    }
}

fn sanitize_element(mut element: Element) -> Element {
    element.attrs.retain(|name, value| {
        let lowered = name.to_ascii_lowercase();
        if lowered.starts_with("on") {
            log::warn!(target: LOG_TARGET, "Dropping event handler attribute '{name}'");
            return false;
        }

        if URL_ATTRIBUTES.contains(&lowered.as_str()) {
            return match safe_url(value) {
                Some(url) => {
                    *value = url;
                    true
                }
                None => false,
            };
        }

        true
    });

    element.style.retain(|property, value| {
        let keep = !is_unsafe_style(value);
        if !keep {
            log::warn!(target: LOG_TARGET, "Dropping style property '{property}'");
        }
        keep
    });

    element.children = core::mem::take(&mut element.children)
        .into_iter()
        .filter_map(|child| match child {
            Node::Element(e) if is_forbidden(&e.tag) => {
                log::warn!(target: LOG_TARGET, "Dropping forbidden <{}> element", e.tag);
                None
            }
            Node::Element(e) => Some(Node::Element(sanitize_element(e))),
            Node::Text(_) => Some(child),
        })
        .collect();

    element
}
