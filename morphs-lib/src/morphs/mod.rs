//! Render strategies and their dispatch
//!
//! A morph turns one raw value into a visual [`Node`](crate::visual::Node). Every
//! semantic type has a default morph of the same name; callers can register more
//! and can redirect attributes to other morphs by name.
//!
//! # Implementation Model
//!
//! - [`Morph`] is the strategy trait. Besides single-value rendering it can measure
//!   a whole comparison group to produce a shared [`Scale`], which its compare rows
//!   are then drawn against.
//! - The built-in morphs are rows of the static [`BUILTIN_MORPHS`] table, each row
//!   holding plain function pointers.
//! - [`MorphRegistry`] resolves the morph for a value. An explicit per-call override
//!   beats a configured per-field renderer, which beats the type's default, which
//!   beats the text morph. Unknown names are logged and skipped, so resolution
//!   never fails.
//! - [`MorphEngine`] ties the classifier, the registry and the configuration
//!   together. It renders single values, and nested values for morphs that render
//!   children through [`MorphContext::render_child`], bounded by the configured depth.

mod builtin;
mod chart;
mod collection;
mod engine;
mod morph;
mod registry;
mod scalar;
mod textual;

pub use builtin::{BUILTIN_MORPHS, BuiltinMorph};
pub use engine::MorphEngine;
pub use morph::{Morph, MorphContext, Scale, empty_node};
pub use registry::{MorphRegistry, Resolution, ResolutionSource};
