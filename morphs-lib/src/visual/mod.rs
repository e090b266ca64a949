//! Visual node trees and safe-output helpers
//!
//! Renderers never produce markup directly. They build [`Node`] trees, which the
//! interactive target hands out as-is and the server target serializes to HTML.
//! Because both targets start from the same tree, they cannot disagree about what
//! a value looks like.
//!
//! The [`safe`] module is the one place that decides what may leave the library:
//! it escapes text, vets URLs and strips event-handler attributes and active
//! elements from finished trees.

mod node;
pub mod safe;

pub use node::{Element, Node};
