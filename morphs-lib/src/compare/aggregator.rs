use super::isolate::guarded;
use super::{ColorAssigner, ComparisonGroup, ComparisonItem, MorphOutcome, RenderHints, fallback_node, isolate};
use crate::morphs::{MorphContext, MorphEngine};
use crate::values::Record;
use crate::visual::safe::sanitize;
use crate::visual::{Element, Node};

const LOG_TARGET: &str = "   compare";

impl MorphEngine {
    /// Render one attribute across many records as a comparison section.
    ///
    /// Records without a usable value for the attribute are left out; when none remain
    /// the result is `None` and the caller should omit the section. The group's type is
    /// taken from `hints`, else from the classification of the first usable value.
    #[must_use]
    pub fn build_comparison(&self, attribute: &str, records: &[Record], hints: Option<&RenderHints>) -> Option<Node> {
        let colors = ColorAssigner::new(&self.config().palette);
        self.compose(attribute, records, &colors, hints)
    }

    pub(crate) fn compose(
        &self,
        attribute: &str,
        records: &[Record],
        colors: &ColorAssigner,
        hints: Option<&RenderHints>,
    ) -> Option<Node> {
        let group = self.comparison_group(attribute, records, colors, hints)?;
        self.render_group(&group)
    }

    /// Collect the records carrying a usable value for `attribute` and settle the group's type.
    #[must_use]
    pub fn comparison_group<'a>(
        &self,
        attribute: &str,
        records: &'a [Record],
        colors: &ColorAssigner,
        hints: Option<&RenderHints>,
    ) -> Option<ComparisonGroup<'a>> {
        let items: Vec<ComparisonItem<'a>> = records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                let value = record.get(attribute).filter(|v| v.is_usable())?;
                Some(ComparisonItem {
                    position,
                    id: &record.id,
                    display_name: &record.name,
                    value,
                    color: colors.token_for(position),
                })
            })
            .collect();

        let Some(first) = items.first() else {
            log::debug!(target: LOG_TARGET, "No usable values for '{attribute}', omitting section");
            return None;
        };

        let hints = self.effective_hints(Some(attribute), hints);
        let semantic_type = hints
            .semantic_type
            .unwrap_or_else(|| self.classify(first.value, Some(attribute)));

        log::debug!(
            target: LOG_TARGET,
            "Comparing '{attribute}' across {} of {} records as {semantic_type}",
            items.len(),
            records.len()
        );

        ComparisonGroup::new(attribute, semantic_type, hints, items)
    }

    /// Render a collected group as a `section.morph-compare`.
    ///
    /// Returns `None` when no row has anything to show.
    #[must_use]
    pub fn render_group(&self, group: &ComparisonGroup<'_>) -> Option<Node> {
        let attribute = group.attribute.as_str();
        let resolution = self
            .registry()
            .resolve(group.semantic_type, Some(attribute), group.hints.renderer.as_deref());
        let morph = resolution.morph();
        let ctx = MorphContext::new(self, Some(attribute), &group.hints, group.semantic_type, 0);

        let values = group.values();
        let scale = guarded(morph.name(), || morph.measure(&values, &ctx));

        let rows: Vec<Element> = group
            .items()
            .iter()
            .filter_map(|item| {
                let outcome = match &scale {
                    Ok(scale) => isolate(morph.name(), item.value, || morph.render_row(item.value, scale.as_ref(), &ctx)),
                    Err(error) => MorphOutcome::Failed {
                        fallback: fallback_node(item.value),
                        error: error.clone(),
                    },
                };

                let node = match outcome {
                    MorphOutcome::Rendered(node) | MorphOutcome::Failed { fallback: node, .. } => node,
                    MorphOutcome::Empty => return None,
                };

                Some(
                    Element::new("div")
                        .class("compare-row")
                        .attr("data-record", item.id)
                        .style("--record-color", item.color.base.hex())
                        .style("--record-tint", item.color.tint.hex())
                        .child(Element::new("span").class("compare-name").text(item.display_name))
                        .child(Element::new("div").class("compare-value").child(node)),
                )
            })
            .collect();

        if rows.is_empty() {
            log::debug!(target: LOG_TARGET, "Every row of '{attribute}' was empty, omitting section");
            return None;
        }

        let section = Element::new("section")
            .class("morph-compare")
            .attr("data-attribute", attribute)
            .attr("data-type", group.semantic_type.name())
            .attr("data-morph", morph.name())
            .child(Element::new("h3").class("morph-compare-title").text(group.title()))
            .children(rows);

        Some(sanitize(section.into()))
    }
}
