use crate::Result;
use crate::values::RawValue;
use crate::visual::{Element, Node};
use core::any::Any;
use std::panic::{self, AssertUnwindSafe};

const LOG_TARGET: &str = "   compare";

/// What came of running one morph on one value.
#[derive(Debug, Clone, PartialEq)]
pub enum MorphOutcome {
    /// The morph produced a node
    Rendered(Node),

    /// The morph had nothing to show
    Empty,

    /// The morph returned an error or panicked
    Failed { fallback: Node, error: String },
}

impl MorphOutcome {
    /// The node to show for this outcome, with `empty` used when there is nothing to show.
    #[must_use]
    pub fn into_node(self, empty: impl FnOnce() -> Node) -> Node {
        match self {
            Self::Rendered(node) => node,
            Self::Empty => empty(),
            Self::Failed { fallback, .. } => fallback,
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A visibly marked stand-in for a value whose morph failed, showing the raw value as text.
#[must_use]
pub fn fallback_node(value: &RawValue) -> Node {
    Element::new("div")
        .class("morph-fallback")
        .attr("data-state", "error")
        .text(value.to_display_string())
        .into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "morph panicked".to_string()
    }
}

/// Run one step of a morph, reducing errors and panics to a logged message.
pub(crate) fn guarded<T, F>(morph_name: &str, f: F) -> core::result::Result<T, String>
where
    F: FnOnce() -> Result<T>,
{
    let error = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panic: {}", panic_message(payload.as_ref())),
    };

    log::warn!(target: LOG_TARGET, "Morph '{morph_name}' failed: {error}");
    Err(error)
}

/// Run a morph, turning errors and panics into a fallback outcome.
///
/// Failures are logged and never propagate to the caller.
pub fn isolate<F>(morph_name: &str, value: &RawValue, f: F) -> MorphOutcome
where
    F: FnOnce() -> Result<Option<Node>>,
{
    match guarded(morph_name, f) {
        Ok(Some(node)) => MorphOutcome::Rendered(node),
        Ok(None) => MorphOutcome::Empty,
        Err(error) => MorphOutcome::Failed {
            fallback: fallback_node(value),
            error,
        },
    }
}
