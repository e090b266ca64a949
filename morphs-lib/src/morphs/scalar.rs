use super::morph::{css_percent, finite_numbers, text_node, with_unit};
use super::{MorphContext, Scale, empty_node};
use crate::Result;
use crate::values::{RawValue, format_number};
use crate::visual::{Element, Node};

/// Number of segments in a rating indicator.
const RATING_LEVELS: u32 = 5;

const RATING_SMALL_MAX: f64 = 10.0;
const RATING_LARGE_MAX: f64 = 100.0;
const PROGRESS_MAX: f64 = 100.0;

fn number_of(value: &RawValue) -> Option<f64> {
    value.to_f64_lenient().filter(|n| n.is_finite())
}

fn hinted_max(ctx: &MorphContext<'_>) -> Option<f64> {
    ctx.hints().max.filter(|m| m.is_finite() && *m > 0.0)
}

pub fn render_empty(_value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(empty_node()))
}

pub fn render_boolean(value: &RawValue, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    let flag = match value {
        RawValue::Bool(b) => *b,
        RawValue::String(s) if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes") => true,
        RawValue::String(s) if s.eq_ignore_ascii_case("false") || s.eq_ignore_ascii_case("no") => false,
        _ => return Ok(Some(text_node(value))),
    };

    let (class, label) = if flag { ("yes", "Yes") } else { ("no", "No") };
    Ok(Some(
        Element::new("span")
            .class("bool")
            .class(class)
            .attr("data-value", flag.to_string())
            .text(label)
            .into(),
    ))
}

fn number_element(n: f64, ctx: &MorphContext<'_>) -> Element {
    Element::new("span")
        .class("number")
        .attr("data-value", format_number(n))
        .text(with_unit(n, ctx.unit()))
}

pub fn render_number(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(|| text_node(value), |n| number_element(n, ctx).into())))
}

/// Shared scale for numeric bars: from zero (or the group minimum when negative) to the
/// hinted or observed maximum.
pub fn measure_number(values: &[&RawValue], ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
    let mut numbers = finite_numbers(values).peekable();
    if numbers.peek().is_none() {
        return Ok(None);
    }

    let (lo, hi) = numbers.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), n| (lo.min(n), hi.max(n)));
    Ok(Some(Scale::new(lo.min(0.0), hinted_max(ctx).unwrap_or(hi))))
}

fn compare_bar(n: f64, scale: &Scale, label: Element) -> Node {
    Element::new("div")
        .class("compare-bar")
        .child(
            Element::new("div")
                .class("compare-bar-fill")
                .style("width", css_percent(scale.percent(n))),
        )
        .child(label)
        .into()
}

pub fn row_number(value: &RawValue, scale: &Scale, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(
        number_of(value).map_or_else(|| text_node(value), |n| compare_bar(n, scale, number_element(n, ctx))),
    ))
}

fn rating_max(n: f64, ctx: &MorphContext<'_>) -> f64 {
    hinted_max(ctx).unwrap_or(if n <= RATING_SMALL_MAX { RATING_SMALL_MAX } else { RATING_LARGE_MAX })
}

fn rating_element(n: f64, max: f64) -> Element {
    let fill = Scale::new(0.0, max).fraction(n);
    let filled_levels = fill * f64::from(RATING_LEVELS);

    let mut element = Element::new("div")
        .class("rating")
        .attr("data-fill", format_number(fill * 100.0))
        .attr("data-max", format_number(max))
        .attr("role", "img")
        .attr("aria-label", format!("{} out of {}", format_number(n), format_number(max)));

    for level in 0..RATING_LEVELS {
        let level_fill = (filled_levels - f64::from(level)).clamp(0.0, 1.0) * 100.0;
        element.push(
            Element::new("span")
                .class("rating-level")
                .attr("data-fill", format_number(level_fill))
                .style("--fill", css_percent(level_fill)),
        );
    }

    element.push(Element::new("span").class("rating-value").text(format_number(n)));
    element
}

pub fn render_rating(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(|| text_node(value), |n| rating_element(n, rating_max(n, ctx)).into())))
}

/// A rating group shares one maximum: the hint, else 10 when every value fits, else 100.
pub fn measure_rating(values: &[&RawValue], ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
    let max = hinted_max(ctx).unwrap_or_else(|| {
        if finite_numbers(values).all(|n| n <= RATING_SMALL_MAX) {
            RATING_SMALL_MAX
        } else {
            RATING_LARGE_MAX
        }
    });
    Ok(Some(Scale::new(0.0, max)))
}

pub fn row_rating(value: &RawValue, scale: &Scale, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(|| text_node(value), |n| rating_element(n, scale.max).into())))
}

fn progress_element(n: f64, max: f64) -> Element {
    let percent = Scale::new(0.0, max).percent(n);
    let label = if (max - PROGRESS_MAX).abs() < f64::EPSILON {
        format!("{}%", format_number(n))
    } else {
        format!("{} / {}", format_number(n), format_number(max))
    };

    Element::new("div")
        .class("progress")
        .attr("data-value", format_number(n))
        .attr("data-max", format_number(max))
        .attr("role", "progressbar")
        .child(Element::new("div").class("progress-fill").style("width", css_percent(percent)))
        .child(Element::new("span").class("progress-label").text(label))
}

pub fn render_progress(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(
        || text_node(value),
        |n| progress_element(n, hinted_max(ctx).unwrap_or(PROGRESS_MAX)).into(),
    )))
}

/// Progress rows share the hinted maximum, else 100 or the group maximum when larger.
pub fn measure_progress(values: &[&RawValue], ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
    let max = hinted_max(ctx).unwrap_or_else(|| finite_numbers(values).fold(PROGRESS_MAX, f64::max));
    Ok(Some(Scale::new(0.0, max)))
}

pub fn row_progress(value: &RawValue, scale: &Scale, _ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(|| text_node(value), |n| progress_element(n, scale.max).into())))
}

fn currency_element(n: f64, ctx: &MorphContext<'_>) -> Element {
    let symbol = ctx.unit().unwrap_or_else(|| ctx.config().currency_symbol.as_str());
    Element::new("span")
        .class("currency")
        .attr("data-value", format_number(n))
        .text(format!("{n:.2} {symbol}"))
}

pub fn render_currency(value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(number_of(value).map_or_else(|| text_node(value), |n| currency_element(n, ctx).into())))
}

pub fn row_currency(value: &RawValue, scale: &Scale, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
    Ok(Some(
        number_of(value).map_or_else(|| text_node(value), |n| compare_bar(n, scale, currency_element(n, ctx))),
    ))
}
