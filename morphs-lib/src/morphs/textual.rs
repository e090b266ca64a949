use super::MorphContext;
use super::morph::text_node;
use crate::Result;
use crate::rules::BadgeVariant;
use crate::values::RawValue;
use crate::visual::safe::safe_url;
use crate::visual::{Element, Node};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%-d %B %Y";
const DATE_TIME_FORMAT: &str = "%-d %B %Y, %H:%M";

/// Largest whole number still read as a calendar year rather than a timestamp.
const MAX_YEAR: f64 = 9999.0;

/// Unix seconds at the end of year 9999.
const MAX_TIMESTAMP: f64 = 253_402_300_799.0;

pub fn render_text(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(text_node(value)))
}

pub fn render_badge(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let text = value.to_display_string();
    let variant = ctx.rules().badge_keywords.variant_for(&text).unwrap_or(BadgeVariant::Info);

    Ok(Some(
        Element::new("span")
            .class("badge")
            .class(format!("badge-{}", variant.name()))
            .attr("data-variant", variant.name())
            .text(text.trim())
            .into(),
    ))
}

pub fn render_tag(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(Element::new("span").class("tag").text(value.to_display_string().trim()).into()))
}

pub fn render_link(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(raw) = value.as_str() else {
        return Ok(Some(text_node(value)));
    };

    let label = raw.trim();
    Ok(Some(match safe_url(raw) {
        Some(href) => Element::new("a")
            .class("link")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text(label)
            .into(),
        None => Element::new("span").class("link-text").text(label).into(),
    }))
}

pub fn render_image(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(raw) = value.as_str() else {
        return Ok(Some(text_node(value)));
    };

    let alt = ctx.hints().label.as_deref().or_else(|| ctx.field()).unwrap_or("image");
    Ok(Some(match safe_url(raw) {
        Some(src) => Element::new("img")
            .class("image")
            .attr("src", src)
            .attr("alt", alt)
            .attr("loading", "lazy")
            .into(),
        None => Element::new("span").class("image-text").text(raw.trim()).into(),
    }))
}

/// A parsed date: the machine-readable `datetime` value and its human form.
fn parse_date(value: &RawValue) -> Option<(String, String)> {
    match value {
        RawValue::Number(n) => date_from_number(*n),
        RawValue::String(s) => date_from_str(s.trim()),
        _ => None,
    }
}

fn date_from_number(n: f64) -> Option<(String, String)> {
    if !n.is_finite() {
        return None;
    }

    if n.fract() == 0.0 && (0.0..=MAX_YEAR).contains(&n) {
        let year = format!("{n:04}");
        return Some((year.clone(), year));
    }

    if n.abs() > MAX_TIMESTAMP {
        return None;
    }

    #[expect(clippy::cast_possible_truncation, reason = "bounded by MAX_TIMESTAMP")]
    let seconds = n.trunc() as i64;

    DateTime::from_timestamp(seconds, 0).map(|dt| (dt.to_rfc3339(), dt.format(DATE_TIME_FORMAT).to_string()))
}

fn date_from_str(s: &str) -> Option<(String, String)> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.to_rfc3339(), dt.format(DATE_TIME_FORMAT).to_string()));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some((dt.format("%Y-%m-%dT%H:%M:%S").to_string(), dt.format(DATE_TIME_FORMAT).to_string()));
    }

    let date_part = s.get(..10).unwrap_or(s);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return Some((date.format("%Y-%m-%d").to_string(), date.format(DATE_FORMAT).to_string()));
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return Some((s.to_string(), s.to_string()));
    }

    None
}

pub fn render_date(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let element = Element::new("time").class("date");
    Ok(Some(match parse_date(value) {
        Some((machine, human)) => element.attr("datetime", machine).text(human).into(),
        None => element.text(value.to_display_string()).into(),
    }))
}
