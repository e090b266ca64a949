//! The shared classification rule table
//!
//! Everything the classifier knows about field names, numeric bands, keywords and
//! key signatures lives in a [`RuleTable`]. The table is plain data, loaded from
//! configuration and shared behind an `Arc` by every rendering target, so the same
//! input always classifies the same way no matter who asks.
//!
//! # Implementation Model
//!
//! - [`FieldPattern`]: case-insensitive attribute-name matchers that force a type.
//!   Patterns are tried in table order and the first one that applies wins.
//! - [`NumericThreshold`]: bounded numeric bands with an integer rule, consulted
//!   only when no field pattern matched a number.
//! - [`BadgeKeywords`]: keyword lists per [`BadgeVariant`] used to spot short status labels.
//! - [`SequenceSignature`]: key groups identifying lists of maps (radar, timeline, steps, bar).
//! - [`StringRules`] and [`MapRules`]: regular expressions and size limits for the
//!   remaining shape checks.
//!
//! Regular expressions are compiled while the table is deserialized, so an invalid
//! pattern is reported at configuration load time rather than during rendering.

mod badge_keywords;
mod field_pattern;
mod numeric_threshold;
mod pattern;
mod rule_table;
mod sequence_signature;

pub use badge_keywords::{BadgeKeywords, BadgeVariant};
pub use field_pattern::{FieldPattern, NameMatcher};
pub use numeric_threshold::{IntegerRule, NumericThreshold};
pub use pattern::Pattern;
pub use rule_table::{MapRules, RuleTable, StringRules};
pub use sequence_signature::SequenceSignature;
