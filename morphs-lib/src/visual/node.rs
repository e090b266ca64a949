use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Serialize;

/// A node in a visual tree: an element or a run of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with classes, attributes, inline style properties and children.
///
/// Attributes and style properties keep insertion order, so a tree always serializes
/// the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: CompactString,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<CompactString>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<CompactString, String>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<CompactString, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attrs: IndexMap::new(),
            style: IndexMap::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<CompactString>) -> Self {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn style(mut self, property: impl Into<CompactString>, value: impl Into<String>) -> Self {
        let _ = self.style.insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn children<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Node {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(e),
            Self::Text(_) => None,
        }
    }

    /// All text in this subtree, concatenated in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(t) => out.push_str(t),
            Self::Element(e) => {
                for child in &e.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Elements in this subtree carrying `class`, in document order.
    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.has_class(class) {
                found.push(e);
            }
        });
        found
    }

    /// Elements in this subtree with the given tag, in document order.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Element)) {
        if let Self::Element(e) = self {
            visit(e);
            for child in &e.children {
                child.walk(visit);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Element::new("div")
            .class("rating")
            .attr("data-fill", "75")
            .style("width", "75%")
            .child(Element::new("span").class("rating-level").text("a"))
            .child(Element::new("span").class("rating-level").text("b"))
            .text("!")
            .into()
    }

    #[test]
    fn test_builder() {
        let node = sample();
        let element = node.as_element().unwrap();
        assert_eq!(element.tag, "div");
        assert!(element.has_class("rating"));
        assert_eq!(element.get_attr("data-fill"), Some("75"));
        assert_eq!(element.get_style("width"), Some("75%"));
        assert_eq!(element.children.len(), 3);
    }

    #[test]
    fn test_duplicate_and_empty_classes_ignored() {
        let element = Element::new("p").class("a").class("a").class("");
        assert_eq!(element.classes, vec!["a"]);
    }

    #[test]
    fn test_text_content() {
        assert_eq!(sample().text_content(), "ab!");
        assert_eq!(Node::text("x").text_content(), "x");
    }

    #[test]
    fn test_find_by_class_and_tag() {
        let node = sample();
        assert_eq!(node.find_by_class("rating-level").len(), 2);
        assert_eq!(node.find_by_tag("span").len(), 2);
        assert_eq!(node.find_by_tag("div").len(), 1);
        assert!(node.find_by_class("missing").is_empty());
    }

    #[test]
    fn test_serialize_to_json() {
        let node: Node = Element::new("span").class("tag").text("rust").into();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"tag":"span","classes":["tag"],"children":["rust"]}"#);
    }
}
