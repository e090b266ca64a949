#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for morphs
//!
//! This library classifies loosely-typed record values into semantic types and
//! renders them, alone or side by side across many records, as visual node trees
//! or as HTML markup.
//!
//! # Module Organization
//!
//! - [`values`]: Raw input values, records and the semantic type enumeration
//! - [`rules`]: The shared rule table (field patterns, thresholds, keywords, key signatures)
//! - [`classify`]: The heuristic classifier driven by the rule table
//! - [`visual`]: Visual node trees and safe-output helpers
//! - [`morphs`]: Render strategies and the registry that dispatches to them
//! - [`compare`]: Multi-record aggregation, color tokens and failure isolation
//! - [`render`]: The interactive (tree) and server (markup) targets, plus document and outline output
//! - [`config`]: Configuration loading and defaults
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod classify;
pub mod commands;
pub mod compare;
pub mod config;
pub mod morphs;
pub mod render;
pub mod rules;
pub mod values;
pub mod visual;

pub use crate::commands::{Host, run};
