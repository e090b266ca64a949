//! Heuristic value classification
//!
//! The [`Classifier`] maps a raw value, optionally together with the name of the
//! attribute it came from, onto exactly one [`SemanticType`](crate::values::SemanticType).
//! Classification is total and pure: every input yields a type, and the same input
//! always yields the same type.
//!
//! # Implementation Model
//!
//! The decision procedure is the ordered [`SHAPE_RULES`] table. Each row names a
//! rule, lists the value kinds it looks at and carries a predicate over a
//! [`Probe`]. Rows are tried top to bottom and the first one returning a type
//! wins; a value nobody claims falls back to text.
//!
//! Everything tunable (field-name patterns, numeric bands, keywords, regular
//! expressions, size limits) comes from the shared [`RuleTable`](crate::rules::RuleTable),
//! so two classifiers built over the same table can never disagree.

mod classifier;
mod shape_rules;

pub use classifier::{Classification, Classifier};
pub use shape_rules::{FALLBACK_RULE, Probe, SHAPE_RULES, ShapeRule};
