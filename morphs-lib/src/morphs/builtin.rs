use super::{Morph, MorphContext, Scale, chart, collection, scalar, textual};
use crate::Result;
use crate::values::RawValue;
use crate::visual::Node;

pub type RenderFn = fn(&RawValue, &MorphContext<'_>) -> Result<Option<Node>>;
pub type MeasureFn = fn(&[&RawValue], &MorphContext<'_>) -> Result<Option<Scale>>;
pub type RowFn = fn(&RawValue, &Scale, &MorphContext<'_>) -> Result<Option<Node>>;

/// A morph implemented by plain functions.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinMorph {
    pub name: &'static str,
    pub render: RenderFn,
    pub measure: Option<MeasureFn>,
    pub render_row: Option<RowFn>,
}

impl Morph for BuiltinMorph {
    fn name(&self) -> &str {
        self.name
    }

    fn render(&self, value: &RawValue, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
        (self.render)(value, ctx)
    }

    fn measure(&self, values: &[&RawValue], ctx: &MorphContext<'_>) -> Result<Option<Scale>> {
        self.measure.map_or(Ok(None), |measure| measure(values, ctx))
    }

    fn render_row(&self, value: &RawValue, scale: Option<&Scale>, ctx: &MorphContext<'_>) -> Result<Option<Node>> {
        match (self.render_row, scale) {
            (Some(row), Some(scale)) => row(value, scale, ctx),
            _ => (self.render)(value, ctx),
        }
    }
}

macro_rules! builtin_morph {
    ($name:expr, $render:expr) => {
        BuiltinMorph {
            name: $name,
            render: $render,
            measure: None,
            render_row: None,
        }
    };
    ($name:expr, $render:expr, $measure:expr, $row:expr) => {
        BuiltinMorph {
            name: $name,
            render: $render,
            measure: Some($measure),
            render_row: Some($row),
        }
    };
}

/// The morph used when nothing else applies.
pub const TEXT_MORPH: BuiltinMorph = builtin_morph!("text", textual::render_text);

/// The default morph of every semantic type, registered under the type's name.
pub const BUILTIN_MORPHS: &[BuiltinMorph] = &[
    builtin_morph!("empty", scalar::render_empty),
    builtin_morph!("boolean", scalar::render_boolean),
    builtin_morph!("number", scalar::render_number, scalar::measure_number, scalar::row_number),
    builtin_morph!("rating", scalar::render_rating, scalar::measure_rating, scalar::row_rating),
    builtin_morph!("progress", scalar::render_progress, scalar::measure_progress, scalar::row_progress),
    builtin_morph!("currency", scalar::render_currency, scalar::measure_number, scalar::row_currency),
    TEXT_MORPH,
    builtin_morph!("badge", textual::render_badge),
    builtin_morph!("tag", textual::render_tag),
    builtin_morph!("link", textual::render_link),
    builtin_morph!("image", textual::render_image),
    builtin_morph!("date", textual::render_date),
    builtin_morph!("list", collection::render_list),
    builtin_morph!("tags", collection::render_tags),
    builtin_morph!("range", chart::render_range, chart::measure_bounds, chart::row_range),
    builtin_morph!("stats", chart::render_stats, chart::measure_bounds, chart::row_stats),
    builtin_morph!("object", collection::render_object),
    builtin_morph!("hierarchy", collection::render_hierarchy),
    builtin_morph!("timeline", collection::render_timeline),
    builtin_morph!("steps", collection::render_steps),
    builtin_morph!("map", chart::render_geo),
    builtin_morph!("pie", chart::render_pie),
    builtin_morph!("bar", chart::render_bar),
    builtin_morph!("radar", chart::render_radar),
];
