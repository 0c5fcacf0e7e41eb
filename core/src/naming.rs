//! Matching and naming engine
//!
//! Finds the first rule whose required effect set equals a created item's
//! effect set and builds the item's new display name from the rule's
//! template and the item's potency.

use brewname_types::formatting::roman_numeral;

use crate::host::{CreatedItem, FormId};
use crate::potency::estimate_potency;
use crate::rules::{NamingRule, RuleTable};

/// Whether the item's set of effects equals the rule's required effects.
///
/// A rule's effects are distinct, so once the item's distinct effects are
/// as many as the rule's, containment in one direction is set equality.
/// Repeated item effects count once.
pub fn rule_matches(rule: &NamingRule, item: &CreatedItem) -> bool {
    let mut effects: Vec<FormId> = item.effects.iter().map(|effect| effect.effect_id).collect();
    effects.sort_unstable();
    effects.dedup();

    if rule.required_effects().len() != effects.len() {
        tracing::trace!(
            template = %rule.template(),
            expected = rule.required_effects().len(),
            found = effects.len(),
            "Effect count differs"
        );
        return false;
    }

    match effects.iter().find(|&&id| !rule.requires(id)) {
        Some(missing) => {
            tracing::trace!(
                template = %rule.template(),
                effect = %missing,
                "Effect not required by rule"
            );
            false
        }
        None => true,
    }
}

/// Read-only naming engine over a loaded [`RuleTable`]
#[derive(Debug, Clone, Copy)]
pub struct NamingEngine<'a> {
    table: &'a RuleTable,
}

impl<'a> NamingEngine<'a> {
    pub fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// First rule, in declaration order, matching the item
    pub fn find_rule(&self, item: &CreatedItem) -> Option<&'a NamingRule> {
        self.table.rules().iter().find(|rule| rule_matches(rule, item))
    }

    /// New display name for an item, or `None` to leave it untouched
    pub fn try_rename(&self, item: &CreatedItem) -> Option<String> {
        // Single-effect items keep their host name
        if item.effects.len() <= 1 {
            return None;
        }

        tracing::trace!(rules = self.table.rules().len(), "Checking rules");
        let rule = self.find_rule(item)?;
        tracing::trace!(template = %rule.template(), "Found matching rule");

        let scoring_effect = item.costliest_effect()?;
        let potency = estimate_potency(scoring_effect, self.table.calibrations());
        Some(self.format_name(rule, potency))
    }

    /// Build a display name from a rule and a potency in `[0, 1]`
    pub fn format_name(&self, rule: &NamingRule, potency: f32) -> String {
        let template = rule.template();

        if self.table.settings().use_roman_numerals {
            let base = template.without_placeholder();
            let numeral = roman_numeral(potency);
            return if base.is_empty() {
                numeral.to_string()
            } else {
                format!("{base} {numeral}")
            };
        }

        let word = rule
            .category()
            .and_then(|index| self.table.category(index))
            .and_then(|category| category.word_for(potency));
        template.with_descriptor(word)
    }
}
