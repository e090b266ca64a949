use super::MorphContext;
use super::morph::text_node;
use crate::Result;
use crate::values::{RawValue, format_number};
use crate::visual::{Element, Node};

const HIERARCHY_LABEL_KEYS: &[&str] = &["name", "label", "title", "id"];
const TIMELINE_DATE_KEYS: &[&str] = &["date", "year", "time", "when", "period"];
const TIMELINE_EVENT_KEYS: &[&str] = &["event", "title", "label", "description"];
const STEP_KEYS: &[&str] = &["step", "phase", "stage"];
const STEP_TEXT_KEYS: &[&str] = &["text", "description", "instruction", "detail", "title"];

pub fn render_list(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(items) = value.as_list() else {
        return Ok(Some(text_node(value)));
    };

    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        Element::new("ul")
            .class("list")
            .children(items.iter().map(|item| Element::new("li").child(ctx.render_child(item, None))))
            .into(),
    ))
}

pub fn render_tags(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let labels: Vec<String> = match value {
        RawValue::List(items) => items.iter().map(RawValue::to_display_string).collect(),
        RawValue::String(s) => s.split(',').map(str::to_string).collect(),
        _ => vec![value.to_display_string()],
    };

    let mut tags = labels.iter().map(|label| label.trim()).filter(|label| !label.is_empty()).peekable();
    if tags.peek().is_none() {
        return Ok(None);
    }

    Ok(Some(
        Element::new("div")
            .class("tags")
            .children(tags.map(|label| Element::new("span").class("tag").text(label)))
            .into(),
    ))
}

pub fn render_object(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(map) = value.as_map() else {
        return Ok(Some(text_node(value)));
    };

    if map.is_empty() {
        return Ok(None);
    }

    let mut list = Element::new("dl").class("object");
    for (key, item) in map {
        list.push(Element::new("dt").text(key.as_str()));
        list.push(Element::new("dd").child(ctx.render_child(item, Some(key.as_str()))));
    }

    Ok(Some(list.into()))
}

pub fn render_hierarchy(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    if value.as_map().is_none() {
        return Ok(Some(text_node(value)));
    }

    let label = value
        .find_any(HIERARCHY_LABEL_KEYS)
        .map_or_else(|| "(unnamed)".to_string(), |(_, v)| v.to_display_string());

    let mut element = Element::new("div")
        .class("hierarchy")
        .child(Element::new("span").class("hierarchy-label").text(label));

    if let Some(parent) = value.get_ignore_case("parent").filter(|p| p.is_usable()) {
        element.push(
            Element::new("span")
                .class("hierarchy-parent")
                .child(ctx.render_child(parent, Some("parent"))),
        );
    }

    if let Some(children) = value.get_ignore_case("children").and_then(RawValue::as_list)
        && !children.is_empty()
    {
        element.push(
            Element::new("ul")
                .class("hierarchy-children")
                .children(children.iter().map(|child| Element::new("li").child(ctx.render_child(child, None)))),
        );
    }

    Ok(Some(element.into()))
}

pub fn render_timeline(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(entries) = value.as_list() else {
        return Ok(Some(text_node(value)));
    };

    if entries.is_empty() {
        return Ok(None);
    }

    let mut timeline = Element::new("ol").class("timeline");
    for entry in entries {
        let date = entry.find_any(TIMELINE_DATE_KEYS).map(|(_, v)| v);
        let event = entry.find_any(TIMELINE_EVENT_KEYS).map(|(_, v)| v);

        let mut item = Element::new("li").class("timeline-entry");
        match (date, event) {
            (None, None) => item.push(ctx.render_child(entry, None)),
            (date, event) => {
                if let Some(date) = date {
                    item.push(Element::new("time").class("timeline-date").text(date.to_display_string()));
                }
                if let Some(event) = event {
                    item.push(Element::new("span").class("timeline-event").text(event.to_display_string()));
                }
            }
        }
        timeline.push(item);
    }

    Ok(Some(timeline.into()))
}

/// The number and description of one step.
fn step_parts(position: usize, entry: &RawValue) -> (String, String) {
    let fallback_number = (position + 1).to_string();
    if entry.as_map().is_none() {
        return (fallback_number, entry.to_display_string());
    }

    let step = entry.find_any(STEP_KEYS).map(|(_, v)| v);
    let text = entry.find_any(STEP_TEXT_KEYS).map(|(_, v)| v.to_display_string());

    match (step, text) {
        (Some(RawValue::Number(n)), Some(text)) => (format_number(*n), text),
        (Some(step), None) => (fallback_number, step.to_display_string()),
        (_, Some(text)) => (fallback_number, text),
        (None, None) => (fallback_number, entry.to_display_string()),
    }
}

pub fn render_steps(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(entries) = value.as_list() else {
        return Ok(Some(text_node(value)));
    };

    if entries.is_empty() {
        return Ok(None);
    }

    Ok(Some(
        Element::new("ol")
            .class("steps")
            .children(entries.iter().enumerate().map(|(position, entry)| {
                let (number, text) = step_parts(position, entry);
                Element::new("li")
                    .class("step")
                    .attr("data-step", number.clone())
                    .child(Element::new("span").class("step-number").text(number))
                    .child(Element::new("span").class("step-text").text(text))
            }))
            .into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::RenderHints;
    use crate::morphs::MorphEngine;
    use crate::values::SemanticType;

    fn render(f: fn(&RawValue, &MorphContext<'_>) -> Result<Option<Node>>, json: &str) -> Option<Node> {
        let engine = MorphEngine::default();
        let hints = RenderHints::default();
        let ctx = MorphContext::new(&engine, None, &hints, SemanticType::List, 0);
        f(&RawValue::parse_json(json).unwrap(), &ctx).unwrap()
    }

    #[test]
    fn test_list_renders_children() {
        let node = render(render_list, r#"[7.5, "https://example.com"]"#).unwrap();
        assert_eq!(node.find_by_tag("li").len(), 2);
        assert_eq!(node.find_by_class("rating").len(), 1);
        assert_eq!(node.find_by_tag("a").len(), 1);
    }

    #[test]
    fn test_empty_list_is_empty() {
        assert!(render(render_list, "[]").is_none());
    }

    #[test]
    fn test_tags() {
        let node = render(render_tags, r#"["rust", " web ", ""]"#).unwrap();
        assert_eq!(node.find_by_class("tag").len(), 2);
        assert_eq!(node.text_content(), "rustweb");

        let node = render(render_tags, r#""a, b,c""#).unwrap();
        assert_eq!(node.find_by_class("tag").len(), 3);

        assert!(render(render_tags, r#"" , ""#).is_none());
    }

    #[test]
    fn test_object() {
        let node = render(render_object, r#"{"price": 4, "site": "www.example.com"}"#).unwrap();
        assert_eq!(node.find_by_tag("dt").len(), 2);
        assert_eq!(node.find_by_class("currency").len(), 1);
        assert_eq!(node.find_by_tag("a").len(), 1);
    }

    #[test]
    fn test_hierarchy() {
        let node = render(
            render_hierarchy,
            r#"{"name": "root", "children": [{"name": "leaf", "children": []}, "loose"]}"#,
        )
        .unwrap();
        assert_eq!(node.find_by_class("hierarchy").len(), 2);
        assert_eq!(node.find_by_class("hierarchy-label")[0].children.len(), 1);
        assert!(node.text_content().starts_with("root"));
        assert!(node.text_content().contains("leaf"));
    }

    #[test]
    fn test_timeline() {
        let node = render(render_timeline, r#"[{"date": "1990", "event": "Found"}, {"year": 2001, "title": "Grew"}]"#).unwrap();
        assert_eq!(node.as_element().unwrap().tag, "ol");
        assert_eq!(node.find_by_class("timeline-entry").len(), 2);
        assert_eq!(node.find_by_class("timeline-date").len(), 2);
        assert!(node.text_content().contains("1990Found"));
    }

    #[test]
    fn test_steps() {
        let node = render(render_steps, r#"[{"step": 1, "text": "mix"}, {"step": "bake"}, "serve"]"#).unwrap();
        let steps = node.find_by_class("step");
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].get_attr("data-step"), Some("1"));
        assert_eq!(steps[1].get_attr("data-step"), Some("2"));
        assert!(node.text_content().contains("bake"));
        assert!(node.text_content().contains("serve"));
    }

    #[test]
    fn test_depth_limit_renders_text() {
        let engine = MorphEngine::default();
        let hints = RenderHints::default();
        let max_depth = engine.config().max_depth;
        let ctx = MorphContext::new(&engine, None, &hints, SemanticType::List, max_depth);
        let node = render_list(&RawValue::parse_json("[[1, 2]]").unwrap(), &ctx).unwrap().unwrap();
        assert_eq!(node.find_by_class("list").len(), 1);
        assert_eq!(node.find_by_class("text").len(), 1);
    }
}
