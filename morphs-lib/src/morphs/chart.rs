use super::collection::render_object;
use super::morph::{css_percent, text_node, with_unit};
use super::{MorphContext, Scale};
use crate::Result;
use crate::config::Color;
use crate::values::{RawValue, format_number};
use crate::visual::{Element, Node};
use core::f64::consts::{FRAC_PI_2, TAU};

const MIN_KEYS: &[&str] = &["min", "low", "from"];
const MAX_KEYS: &[&str] = &["max", "high", "to"];
const AVG_KEYS: &[&str] = &["avg", "mean", "average"];
const LAT_KEYS: &[&str] = &["lat", "latitude"];
const LON_KEYS: &[&str] = &["lon", "lng", "longitude"];
const GEO_LABEL_KEYS: &[&str] = &["label", "name", "place"];
const BAR_LABEL_KEYS: &[&str] = &["label", "name", "category"];
const BAR_VALUE_KEYS: &[&str] = &["value", "count", "amount"];
const RADAR_AXIS_KEYS: &[&str] = &["axis", "subject", "dimension"];
const RADAR_VALUE_KEYS: &[&str] = &["value", "score"];

const RADAR_SIZE: f64 = 200.0;
const RADAR_RADIUS: f64 = 80.0;
const RADAR_MIN_AXES: usize = 3;
const RADAR_SMALL_MAX: f64 = 10.0;

const FALLBACK_SLICE_COLOR: Color = Color::new(0x99, 0x99, 0x99);

fn number_at(value: &RawValue, keys: &[&str]) -> Option<f64> {
    value
        .find_any(keys)
        .and_then(|(_, v)| v.to_f64_lenient())
        .filter(|n| n.is_finite())
}

/// Lower and upper bound of a range-like value.
///
/// Accepts a map with min/max style keys or a list of two numbers. A missing side
/// takes the value of the present one, and reversed bounds are swapped.
fn bounds(value: &RawValue) -> Option<(f64, f64)> {
    let (lo, hi) = match value {
        RawValue::Map(_) => (number_at(value, MIN_KEYS), number_at(value, MAX_KEYS)),
        RawValue::List(items) if items.len() == 2 => (
            items.first().and_then(RawValue::to_f64_lenient).filter(|n| n.is_finite()),
            items.last().and_then(RawValue::to_f64_lenient).filter(|n| n.is_finite()),
        ),
        _ => return None,
    };

    let (lo, hi) = match (lo, hi) {
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(only), None) | (None, Some(only)) => (only, only),
        (None, None) => return None,
    };

    Some(if lo <= hi { (lo, hi) } else { (hi, lo) })
}

fn hinted_max(ctx: &MorphContext<'_>) -> Option<f64> {
    ctx.hints().max.filter(|m| m.is_finite() && *m > 0.0)
}

/// Unit from the hints, else from a `unit` key on the value itself.
fn unit_of<'a>(value: &'a RawValue, ctx: &MorphContext<'a>) -> Option<&'a str> {
    ctx.unit().or_else(|| value.get_ignore_case("unit").and_then(RawValue::as_str))
}

fn single_scale(lo: f64, hi: f64, ctx: &MorphContext<'_>) -> Scale {
    Scale::new(lo.min(0.0), hinted_max(ctx).unwrap_or(hi))
}

/// The scale shared by a group of ranges: from zero (or the lowest bound) to the
/// hinted or highest upper bound.
pub fn measure_bounds(values: &[&RawValue], ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
    let mut all = values.iter().filter_map(|v| bounds(v)).peekable();
    if all.peek().is_none() {
        return Ok(None);
    }

    let (lo, hi) = all.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (l, h)| (lo.min(l), hi.max(h)));
    Ok(Some(single_scale(lo, hi, ctx)))
}

fn range_element(lo: f64, hi: f64, scale: &Scale, unit: Option<&str>) -> Element {
    let left = scale.percent(lo);
    let width = (scale.percent(hi) - left).max(0.0);

    Element::new("div")
        .class("range")
        .attr("data-min", format_number(lo))
        .attr("data-max", format_number(hi))
        .child(
            Element::new("div").class("range-track").child(
                Element::new("div")
                    .class("range-band")
                    .style("left", css_percent(left))
                    .style("width", css_percent(width)),
            ),
        )
        .child(
            Element::new("span")
                .class("range-label")
                .text(format!("{} - {}", format_number(lo), with_unit(hi, unit))),
        )
}

fn range_on(value: &RawValue, scale: Option<&Scale>, ctx: &MorphContext<'_>) -> Node {
    let Some((lo, hi)) = bounds(value) else {
        return text_node(value);
    };

    let scale = scale.copied().unwrap_or_else(|| single_scale(lo, hi, ctx));
    range_element(lo, hi, &scale, unit_of(value, ctx)).into()
}

pub fn render_range(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(range_on(value, None, ctx)))
}

pub fn row_range(value: &RawValue, scale: &Scale, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(range_on(value, Some(scale), ctx)))
}

fn stats_on(value: &RawValue, scale: Option<&Scale>, ctx: &MorphContext<'_>) -> Node {
    let Some((lo, hi)) = bounds(value) else {
        return text_node(value);
    };

    let scale = scale.copied().unwrap_or_else(|| single_scale(lo, hi, ctx));
    let unit = unit_of(value, ctx);
    let mut element = range_element(lo, hi, &scale, unit).class("stats");

    if let Some(avg) = number_at(value, AVG_KEYS) {
        element.push(
            Element::new("span")
                .class("stats-avg")
                .attr("data-value", format_number(avg))
                .style("left", css_percent(scale.percent(avg)))
                .text(format!("avg {}", with_unit(avg, unit))),
        );
    }

    element.into()
}

pub fn render_stats(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(stats_on(value, None, ctx)))
}

pub fn row_stats(value: &RawValue, scale: &Scale, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(stats_on(value, Some(scale), ctx)))
}

pub fn render_geo(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let (Some(lat), Some(lon)) = (number_at(value, LAT_KEYS), number_at(value, LON_KEYS)) else {
        return Ok(Some(text_node(value)));
    };

    // Coordinates off the globe are shown as the plain key/value pairs.
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return render_object(value, ctx);
    }

    let href = format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map=12/{lat}/{lon}");
    let mut element = Element::new("div")
        .class("geo")
        .attr("data-lat", lat.to_string())
        .attr("data-lon", lon.to_string());

    if let Some((_, label)) = value.find_any(GEO_LABEL_KEYS) {
        element.push(Element::new("span").class("geo-label").text(label.to_display_string()));
    }

    element.push(Element::new("span").class("geo-coords").text(format!("{lat:.4}, {lon:.4}")));
    element.push(
        Element::new("a")
            .class("geo-link")
            .attr("href", href)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text("View on map"),
    );

    Ok(Some(element.into()))
}

fn slice_color(ctx: &MorphContext<'_>, index: usize) -> Color {
    let palette = &ctx.config().palette;
    if palette.is_empty() {
        return FALLBACK_SLICE_COLOR;
    }
    palette.get(index % palette.len()).copied().unwrap_or(FALLBACK_SLICE_COLOR)
}

pub fn render_pie(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let Some(map) = value.as_map() else {
        return Ok(Some(text_node(value)));
    };

    let mut slices = Vec::with_capacity(map.len());
    for (label, part) in map {
        let Some(n) = part.to_f64_lenient() else {
            continue;
        };
        if !n.is_finite() || n < 0.0 {
            return render_object(value, ctx);
        }
        slices.push((label.as_str(), n));
    }

    if slices.is_empty() {
        return Ok(Some(text_node(value)));
    }

    let total: f64 = slices.iter().map(|(_, n)| n).sum();
    if total <= 0.0 {
        return render_object(value, ctx);
    }

    let mut stops = Vec::with_capacity(slices.len());
    let mut legend = Element::new("ul").class("pie-legend");
    let mut start = 0.0;
    for (index, (label, n)) in slices.iter().enumerate() {
        let share = n / total * 100.0;
        let end = start + share;
        let color = slice_color(ctx, index).hex();
        stops.push(format!("{color} {} {}", css_percent(start), css_percent(end)));
        legend.push(
            Element::new("li")
                .class("pie-entry")
                .child(Element::new("span").class("pie-swatch").style("background", color))
                .child(Element::new("span").class("pie-label").text(*label))
                .child(
                    Element::new("span")
                        .class("pie-value")
                        .text(format!("{} ({}%)", format_number(*n), format_number(share))),
                ),
        );
        start = end;
    }

    Ok(Some(
        Element::new("div")
            .class("pie")
            .child(
                Element::new("div")
                    .class("pie-chart")
                    .attr("role", "img")
                    .style("background", format!("conic-gradient({})", stops.join(", "))),
            )
            .child(legend)
            .into(),
    ))
}

/// Label/value pairs from a list of maps, or from a map of numbers.
fn labeled_values(value: &RawValue, label_keys: &[&str], value_keys: &[&str]) -> Vec<(String, f64)> {
    match value {
        RawValue::List(items) => items
            .iter()
            .filter_map(|item| {
                let (_, label) = item.find_any(label_keys)?;
                let n = number_at(item, value_keys)?;
                Some((label.to_display_string(), n))
            })
            .collect(),
        RawValue::Map(map) => map
            .iter()
            .filter_map(|(k, v)| v.to_f64_lenient().filter(|n| n.is_finite()).map(|n| (k.to_string(), n)))
            .collect(),
        _ => Vec::new(),
    }
}

fn bar_chart(entries: &[(String, f64)], ctx: &MorphContext<'_>) -> Node {
    let max = hinted_max(ctx).unwrap_or_else(|| entries.iter().map(|(_, n)| *n).fold(0.0, f64::max));
    let scale = Scale::new(0.0, max);
    let unit = ctx.unit();

    Element::new("div")
        .class("bars")
        .children(entries.iter().map(|(label, n)| {
            Element::new("div")
                .class("bar-row")
                .child(Element::new("span").class("bar-label").text(label.as_str()))
                .child(
                    Element::new("div")
                        .class("bar-track")
                        .child(Element::new("div").class("bar-fill").style("width", css_percent(scale.percent(*n)))),
                )
                .child(Element::new("span").class("bar-value").text(with_unit(*n, unit)))
        }))
        .into()
}

pub fn render_bar(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let entries = labeled_values(value, BAR_LABEL_KEYS, BAR_VALUE_KEYS);
    if entries.is_empty() {
        return Ok(Some(text_node(value)));
    }

    Ok(Some(bar_chart(&entries, ctx)))
}

fn radar_points(fractions: &[f64]) -> String {
    let center = RADAR_SIZE / 2.0;
    #[expect(clippy::cast_precision_loss, reason = "axis counts are small")]
    let axes = fractions.len() as f64;

    fractions
        .iter()
        .enumerate()
        .map(|(i, fraction)| {
            #[expect(clippy::cast_precision_loss, reason = "axis counts are small")]
            let angle = TAU * (i as f64) / axes - FRAC_PI_2;
            let r = RADAR_RADIUS * fraction;
            format!("{:.2},{:.2}", center + r * angle.cos(), center + r * angle.sin())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_radar(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let axes = labeled_values(value, RADAR_AXIS_KEYS, RADAR_VALUE_KEYS);
    if axes.is_empty() {
        return Ok(Some(text_node(value)));
    }

    if axes.len() < RADAR_MIN_AXES {
        return Ok(Some(bar_chart(&axes, ctx)));
    }

    let max = hinted_max(ctx).unwrap_or_else(|| {
        let observed = axes.iter().map(|(_, n)| *n).fold(0.0, f64::max);
        if observed <= RADAR_SMALL_MAX { RADAR_SMALL_MAX } else { observed }
    });
    let scale = Scale::new(0.0, max);
    let fractions: Vec<f64> = axes.iter().map(|(_, n)| scale.fraction(*n)).collect();
    let full = vec![1.0; axes.len()];

    let size = format_number(RADAR_SIZE);
    let plot = Element::new("svg")
        .class("radar-plot")
        .attr("viewBox", format!("0 0 {size} {size}"))
        .attr("role", "img")
        .child(Element::new("polygon").class("radar-grid").attr("points", radar_points(&full)))
        .child(Element::new("polygon").class("radar-shape").attr("points", radar_points(&fractions)));

    let legend = Element::new("ul").class("radar-legend").children(axes.iter().map(|(axis, n)| {
        Element::new("li")
            .class("radar-axis")
            .text(format!("{axis}: {} / {}", format_number(*n), format_number(max)))
    }));

    Ok(Some(
        Element::new("div")
            .class("radar")
            .attr("data-max", format_number(max))
            .child(plot)
            .child(legend)
            .into(),
    ))
}
