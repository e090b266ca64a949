//! End-to-end comparisons across several records.

use morphs_lib::Result;
use morphs_lib::compare::{ComparisonSession, RenderHints};
use morphs_lib::config::Config;
use morphs_lib::morphs::{Morph, MorphContext, MorphEngine};
use morphs_lib::render::to_markup;
use morphs_lib::values::{RawValue, Record, RecordKeys, SemanticType};
use morphs_lib::visual::Node;
use ohno::app_err;
use std::sync::Arc;

fn records(json: &str) -> Vec<Record> {
    let keys = RecordKeys::default();
    RawValue::parse_json(json)
        .unwrap()
        .as_list()
        .unwrap()
        .iter()
        .enumerate()
        .map(|(position, item)| Record::from_raw(position, item.clone(), &keys))
        .collect()
}

#[derive(Debug)]
struct Fragile;

impl Morph for Fragile {
    fn name(&self) -> &str {
        "fragile"
    }

    #[expect(clippy::panic, reason = "exercises panic isolation")]
    fn render(&self, value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
        match value.as_str() {
            Some("boom") => panic!("fragile morph cannot handle boom"),
            Some("bad") => Err(app_err!("fragile morph rejects bad")),
            _ => Ok(Some(Node::text(value.to_display_string()))),
        }
    }
}

#[test]
fn test_fractional_rating() {
    let engine = MorphEngine::default();
    let node = engine.render_value(&RawValue::from(7.5), None, None);

    let element = node.as_element().unwrap();
    assert_eq!(element.get_attr("data-type"), Some("rating"));

    let rating = node.find_by_class("rating");
    assert_eq!(rating[0].get_attr("data-fill"), Some("75"));

    let fills: Vec<&str> = node
        .find_by_class("rating-level")
        .iter()
        .filter_map(|level| level.get_attr("data-fill"))
        .collect();
    assert_eq!(fills, vec!["100", "100", "100", "75", "0"]);
}

#[test]
fn test_danger_keyword_badge() {
    let engine = MorphEngine::default();
    let records = records(r#"[{"name": "Fly agaric", "edibility": "Giftig"}, {"name": "Porcini", "edibility": "essbar"}]"#);
    let node = engine.build_comparison("edibility", &records, None).unwrap();

    let badges = node.find_by_class("badge");
    assert_eq!(badges.len(), 2);
    assert_eq!(badges[0].get_attr("data-variant"), Some("danger"));
    assert_eq!(badges[1].get_attr("data-variant"), Some("success"));
}

#[test]
fn test_timeline_comparison() {
    let engine = MorphEngine::default();
    let records = records(
        r#"[
            {"name": "Acme", "history": [{"date": "1990", "event": "Founded"}, {"date": "2001", "event": "Listed"}]},
            {"name": "Globex", "history": [{"date": "1995", "event": "Founded"}]}
        ]"#,
    );
    let node = engine.build_comparison("history", &records, None).unwrap();

    let section = node.as_element().unwrap();
    assert_eq!(section.get_attr("data-type"), Some("timeline"));
    assert_eq!(node.find_by_class("timeline").len(), 2);
    assert_eq!(node.find_by_class("timeline-entry").len(), 3);
}

#[test]
fn test_ranges_share_one_scale() {
    let engine = MorphEngine::default();
    let records = records(
        r#"[
            {"name": "A", "temperature": {"min": 2, "max": 8}},
            {"name": "B", "temperature": {"min": 0, "max": 4}},
            {"name": "C", "temperature": {"min": 5, "max": 10}}
        ]"#,
    );
    let node = engine.build_comparison("temperature", &records, None).unwrap();

    let bands: Vec<(&str, &str)> = node
        .find_by_class("range-band")
        .iter()
        .map(|band| (band.get_style("left").unwrap(), band.get_style("width").unwrap()))
        .collect();
    assert_eq!(bands, vec![("20%", "60%"), ("0%", "40%"), ("50%", "50%")]);
}

#[test]
fn test_vacuous_attribute_has_no_section() {
    let engine = MorphEngine::default();
    let records = records(r#"[{"name": "A", "notes": null}, {"name": "B"}, {"name": "C", "notes": []}]"#);
    assert!(engine.build_comparison("notes", &records, None).is_none());
    assert!(engine.build_comparison("absent", &records, None).is_none());
}

#[test]
fn test_record_colors_are_stable_across_sections() {
    let engine = MorphEngine::default();
    let records = records(r#"[{"name": "A", "size": 3}, {"name": "B", "size": 4, "color": "red"}, {"name": "C", "color": "blue"}]"#);
    let session = ComparisonSession::new(&engine, &records);
    let colors = session.colors();

    let size = session.build("size", None).unwrap();
    let color = session.build("color", None).unwrap();

    let color_of = |node: &Node, record: &str| {
        node.find_by_class("compare-row")
            .iter()
            .find(|row| row.get_attr("data-record") == Some(record))
            .and_then(|row| row.get_style("--record-color").map(str::to_string))
    };

    let expected = colors[1].base.hex();
    assert_eq!(color_of(&size, "1"), Some(expected.clone()));
    assert_eq!(color_of(&color, "1"), Some(expected));
    assert_eq!(color_of(&color, "2"), Some(colors[2].base.hex()));
    assert_ne!(colors[0].base, colors[1].base);
}

#[test]
fn test_failing_record_is_isolated() {
    let mut engine = MorphEngine::default();
    let _ = engine.registry_mut().register(Arc::new(Fragile));
    engine.registry_mut().set_field_renderer("motto", "fragile");

    let records = records(r#"[{"name": "A", "motto": "calm"}, {"name": "B", "motto": "boom"}, {"name": "C", "motto": "bad"}, {"name": "D", "motto": "steady"}]"#);
    let node = engine.build_comparison("motto", &records, None).unwrap();

    let rows = node.find_by_class("compare-row");
    assert_eq!(rows.len(), 4);

    let failed: Vec<bool> = rows
        .iter()
        .map(|row| Node::Element((*row).clone()).find_by_class("morph-fallback").len() == 1)
        .collect();
    assert_eq!(failed, vec![false, true, true, false]);

    let html = to_markup(&node);
    assert!(html.contains("calm"));
    assert!(html.contains("boom"));
    assert!(html.contains("steady"));
}

#[test]
fn test_hints_override_classification() {
    let engine = MorphEngine::default();
    let records = records(r#"[{"name": "A", "score": 40}, {"name": "B", "score": 80}]"#);
    let hints = RenderHints {
        label: Some("Completion".into()),
        semantic_type: Some(SemanticType::Progress),
        ..RenderHints::default()
    };
    let node = engine.build_comparison("score", &records, Some(&hints)).unwrap();

    assert_eq!(node.as_element().unwrap().get_attr("data-type"), Some("progress"));
    assert_eq!(node.find_by_class("morph-compare-title")[0].children, vec![Node::text("Completion")]);
    let widths: Vec<&str> = node
        .find_by_class("progress-fill")
        .iter()
        .filter_map(|fill| fill.get_style("width"))
        .collect();
    assert_eq!(widths, vec!["40%", "80%"]);
}

#[test]
fn test_configured_hints_apply() {
    let mut config = Config::default();
    let _ = config.hints.insert(
        "budget".into(),
        RenderHints {
            unit: Some("$".into()),
            semantic_type: Some(SemanticType::Currency),
            ..RenderHints::default()
        },
    );
    let engine = MorphEngine::new(Arc::new(config));
    let records = records(r#"[{"name": "A", "budget": 1200}, {"name": "B", "budget": 800.5}]"#);
    let node = engine.build_comparison("budget", &records, None).unwrap();

    let html = to_markup(&node);
    assert!(html.contains("1200.00 $"), "{html}");
    assert!(html.contains("800.50 $"), "{html}");
}
