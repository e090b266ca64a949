//! Side-by-side comparison of one attribute across many records
//!
//! # Implementation Model
//!
//! - [`MorphEngine::build_comparison`](crate::morphs::MorphEngine::build_comparison) gathers
//!   the records that carry a usable value for the attribute, picks one semantic type for
//!   the whole group (a hint, else the classification of the first usable value) and renders
//!   one row per record with the resolved morph.
//! - Morphs that measure a group share one [`Scale`](crate::morphs::Scale) across rows, so
//!   bars, bands and fills are proportional to each other.
//! - Every record carries a [`ColorToken`] derived from its position in the full record list,
//!   so colors stay stable across sections and repeated calls.
//! - Each strategy call runs through [`isolate`]. Errors and panics become a visibly marked
//!   fallback row holding the raw value, and the other rows are unaffected.
//! - A group with no usable values produces no section at all.
//! - [`ComparisonSession`] binds records and colors once and renders any number of
//!   attributes.

mod aggregator;
mod color_assigner;
mod comparison_item;
mod isolate;
mod render_hints;
mod session;

pub use color_assigner::{ColorAssigner, ColorToken};
pub use comparison_item::{ComparisonGroup, ComparisonItem};
pub use isolate::{MorphOutcome, fallback_node, isolate};
pub use render_hints::RenderHints;
pub use session::ComparisonSession;
