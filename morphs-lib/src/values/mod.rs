//! Raw input values and their inferred semantic types
//!
//! Records arrive as loosely-typed data: numbers, strings, nested maps and lists
//! of maps, usually straight out of a JSON document. This module provides the
//! owned representation of that data and the closed set of semantic types the
//! classifier maps it onto.
//!
//! # Implementation Model
//!
//! [`RawValue`] mirrors the JSON data model with two deliberate differences:
//! numbers are always `f64` (so `NaN` and infinities survive), and maps keep
//! insertion order so that renderers present keys the way the author wrote them.
//!
//! [`Record`] pairs a caller-supplied identity (id and display name) with an
//! attribute map. Records are only ever borrowed by the renderers.

mod raw_value;
mod record;
mod semantic_type;

pub use raw_value::{RawValue, ValueKind, ValueMap, format_number};
pub use record::{Record, RecordKeys, attribute_names};
pub use semantic_type::SemanticType;
