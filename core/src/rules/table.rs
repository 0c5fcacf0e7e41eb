//! Rule table
//!
//! The loaded, read-only set of naming rules, descriptor categories and
//! potency calibrations. A table is assembled with [`RuleTableBuilder`]
//! and never changes once [`RuleTableBuilder::finish`] hands it out.

use hashbrown::HashMap;
use thiserror::Error;

use brewname_types::formatting::potency_band;

use super::template::NameTemplate;
use crate::host::FormId;

pub const MAX_RULES: usize = 15;
pub const MAX_CATEGORIES: usize = 31;
pub const MAX_CALIBRATIONS: usize = 31;
pub const MIN_RULE_EFFECTS: usize = 2;
pub const MAX_RULE_EFFECTS: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════
// Descriptor Categories
// ═══════════════════════════════════════════════════════════════════════════

/// Stable position of a category in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryIndex(usize);

impl CategoryIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Named, ordered list of potency-band words (weakest first)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorCategory {
    name: String,
    words: Vec<String>,
}

impl DescriptorCategory {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word for a potency, or `None` when the band has no visible word
    pub fn word_for(&self, potency: f32) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        let word = &self.words[potency_band(potency, self.words.len())];
        (!word.is_empty()).then_some(word.as_str())
    }
}

/// Outcome of declaring a category by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeclaration {
    /// First time the name was seen
    Created(CategoryIndex),
    /// Name was created empty by a rule reference and now has words
    Filled(CategoryIndex),
    /// Name already has words; the declaration was dropped
    Ignored(CategoryIndex),
}

// ═══════════════════════════════════════════════════════════════════════════
// Calibrations
// ═══════════════════════════════════════════════════════════════════════════

/// Range used to normalize an effect's magnitude or duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub min: f32,
    pub max: f32,
}

/// Effect name -> calibration range
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calibrations {
    entries: HashMap<String, Calibration>,
}

impl Calibrations {
    pub fn get(&self, effect_name: &str) -> Option<Calibration> {
        self.entries.get(effect_name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Calibration)> {
        self.entries.iter().map(|(name, cal)| (name.as_str(), *cal))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Naming Rules
// ═══════════════════════════════════════════════════════════════════════════

/// One authored renaming rule
#[derive(Debug, Clone, PartialEq)]
pub struct NamingRule {
    template: NameTemplate,
    required_effects: Vec<FormId>,
    category: Option<CategoryIndex>,
}

impl NamingRule {
    /// Build a rule with no descriptor category.
    ///
    /// The required effects form a set of 2 to 4 distinct effects.
    pub fn new(template: NameTemplate, required_effects: Vec<FormId>) -> Result<Self, RuleError> {
        let count = required_effects.len();
        if !(MIN_RULE_EFFECTS..=MAX_RULE_EFFECTS).contains(&count) {
            return Err(RuleError::EffectCount(count));
        }
        for (i, effect) in required_effects.iter().enumerate() {
            if required_effects[..i].contains(effect) {
                return Err(RuleError::DuplicateEffect(*effect));
            }
        }
        Ok(Self {
            template,
            required_effects,
            category: None,
        })
    }

    pub fn with_category(mut self, category: Option<CategoryIndex>) -> Self {
        self.category = category;
        self
    }

    pub fn template(&self) -> &NameTemplate {
        &self.template
    }

    pub fn required_effects(&self) -> &[FormId] {
        &self.required_effects
    }

    pub fn requires(&self, effect: FormId) -> bool {
        self.required_effects.contains(&effect)
    }

    pub fn category(&self) -> Option<CategoryIndex> {
        self.category
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Table
// ═══════════════════════════════════════════════════════════════════════════

/// Global naming settings, read from the primary file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NamingSettings {
    /// Append roman numerals instead of splicing descriptor words
    pub use_roman_numerals: bool,
}

/// Read-only rule table consumed by the naming engine
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    settings: NamingSettings,
    rules: Vec<NamingRule>,
    categories: Vec<DescriptorCategory>,
    calibrations: Calibrations,
}

impl RuleTable {
    pub fn settings(&self) -> NamingSettings {
        self.settings
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[NamingRule] {
        &self.rules
    }

    pub fn categories(&self) -> &[DescriptorCategory] {
        &self.categories
    }

    pub fn category(&self, index: CategoryIndex) -> Option<&DescriptorCategory> {
        self.categories.get(index.0)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&DescriptorCategory> {
        self.categories.iter().find(|category| category.name == name)
    }

    pub fn calibrations(&self) -> &Calibrations {
        &self.calibrations
    }
}

/// Mutable assembly of a [`RuleTable`].
///
/// Categories follow create-on-first-reference, fill-on-first-declaration:
/// a rule naming an unknown category creates it empty, the first
/// declaration with words fills it, and any later declaration is ignored.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    table: RuleTable,
    category_names: HashMap<String, CategoryIndex>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_use_roman_numerals(&mut self, enabled: bool) {
        self.table.settings.use_roman_numerals = enabled;
    }

    pub fn rule_count(&self) -> usize {
        self.table.rules.len()
    }

    /// Set an effect's calibration; later calls for the same name overwrite
    pub fn set_calibration(
        &mut self,
        effect_name: &str,
        calibration: Calibration,
    ) -> Result<(), RuleError> {
        let entries = &mut self.table.calibrations.entries;
        if let Some(existing) = entries.get_mut(effect_name) {
            *existing = calibration;
            return Ok(());
        }
        if entries.len() >= MAX_CALIBRATIONS {
            return Err(RuleError::TooManyCalibrations);
        }
        entries.insert(effect_name.to_string(), calibration);
        Ok(())
    }

    /// Declare a category with its words
    pub fn declare_category(
        &mut self,
        name: &str,
        words: Vec<String>,
    ) -> Result<CategoryDeclaration, RuleError> {
        if let Some(&index) = self.category_names.get(name) {
            let category = &mut self.table.categories[index.0];
            if category.is_empty() {
                category.words = words;
                return Ok(CategoryDeclaration::Filled(index));
            }
            return Ok(CategoryDeclaration::Ignored(index));
        }
        self.create_category(name, words).map(CategoryDeclaration::Created)
    }

    /// Index of a category referenced by a rule, creating it empty if unknown
    pub fn reference_category(&mut self, name: &str) -> Result<CategoryIndex, RuleError> {
        match self.category_names.get(name) {
            Some(&index) => Ok(index),
            None => self.create_category(name, Vec::new()),
        }
    }

    fn create_category(&mut self, name: &str, words: Vec<String>) -> Result<CategoryIndex, RuleError> {
        if self.table.categories.len() >= MAX_CATEGORIES {
            return Err(RuleError::TooManyCategories);
        }
        let index = CategoryIndex(self.table.categories.len());
        self.table.categories.push(DescriptorCategory {
            name: name.to_string(),
            words,
        });
        self.category_names.insert(name.to_string(), index);
        Ok(index)
    }

    /// Append a rule after any already added
    pub fn push_rule(&mut self, rule: NamingRule) -> Result<(), RuleError> {
        if self.table.rules.len() >= MAX_RULES {
            return Err(RuleError::TooManyRules);
        }
        self.table.rules.push(rule);
        Ok(())
    }

    pub fn finish(self) -> RuleTable {
        self.table
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("each rule must have between {min} and {max} effects, found {0}", min = MIN_RULE_EFFECTS, max = MAX_RULE_EFFECTS)]
    EffectCount(usize),

    #[error("effect {0} is listed more than once")]
    DuplicateEffect(FormId),

    #[error("exceeded maximum of {limit} rules", limit = MAX_RULES)]
    TooManyRules,

    #[error("exceeded maximum of {limit} descriptor categories", limit = MAX_CATEGORIES)]
    TooManyCategories,

    #[error("exceeded maximum of {limit} effect potencies", limit = MAX_CALIBRATIONS)]
    TooManyCalibrations,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    fn rule(ids: &[u32]) -> Result<NamingRule, RuleError> {
        NamingRule::new(
            NameTemplate::parse("Test{}").unwrap(),
            ids.iter().copied().map(FormId).collect(),
        )
    }

    #[test]
    fn test_rule_effect_count_limits() {
        assert_eq!(rule(&[1]).unwrap_err(), RuleError::EffectCount(1));
        assert_eq!(rule(&[1, 2, 3, 4, 5]).unwrap_err(), RuleError::EffectCount(5));
        assert!(rule(&[1, 2]).is_ok());
        assert!(rule(&[1, 2, 3, 4]).is_ok());
    }

    #[test]
    fn test_rule_rejects_duplicate_effects() {
        assert_eq!(rule(&[7, 8, 7]).unwrap_err(), RuleError::DuplicateEffect(FormId(7)));
    }

    #[test]
    fn test_category_first_definition_wins() {
        let mut builder = RuleTableBuilder::new();
        let first = builder.declare_category("Foo", words(&["Weak", "Strong"])).unwrap();
        let second = builder.declare_category("Foo", words(&["X", "Y"])).unwrap();

        let CategoryDeclaration::Created(index) = first else {
            panic!("expected a new category, got {first:?}");
        };
        assert_eq!(second, CategoryDeclaration::Ignored(index));

        let table = builder.finish();
        assert_eq!(table.category_by_name("Foo").unwrap().words(), words(&["Weak", "Strong"]));
    }

    #[test]
    fn test_referenced_category_is_filled_once() {
        let mut builder = RuleTableBuilder::new();
        builder.declare_category("Other", words(&["A"])).unwrap();

        let bar = builder.reference_category("Bar").unwrap();
        assert_eq!(bar.get(), 1);
        assert_eq!(builder.reference_category("Bar").unwrap(), bar);

        assert_eq!(
            builder.declare_category("Bar", words(&["A", "B"])).unwrap(),
            CategoryDeclaration::Filled(bar)
        );
        assert_eq!(
            builder.declare_category("Bar", words(&["C"])).unwrap(),
            CategoryDeclaration::Ignored(bar)
        );

        let table = builder.finish();
        assert_eq!(table.category(bar).unwrap().words(), words(&["A", "B"]));
    }

    #[test]
    fn test_category_limit() {
        let mut builder = RuleTableBuilder::new();
        for i in 0..MAX_CATEGORIES {
            builder.reference_category(&format!("cat{i}")).unwrap();
        }
        assert_eq!(
            builder.reference_category("one_more").unwrap_err(),
            RuleError::TooManyCategories
        );
        // Existing names still resolve
        assert!(builder.declare_category("cat0", words(&["Weak"])).is_ok());
    }

    #[test]
    fn test_calibration_last_write_wins() {
        let mut builder = RuleTableBuilder::new();
        builder.set_calibration("AlchCurePoison", Calibration { min: 1.0, max: 10.0 }).unwrap();
        builder.set_calibration("AlchCurePoison", Calibration { min: 2.0, max: 20.0 }).unwrap();
        let table = builder.finish();
        assert_eq!(
            table.calibrations().get("AlchCurePoison"),
            Some(Calibration { min: 2.0, max: 20.0 })
        );
        assert_eq!(table.calibrations().len(), 1);
    }

    #[test]
    fn test_calibration_limit_allows_overwrite() {
        let mut builder = RuleTableBuilder::new();
        for i in 0..MAX_CALIBRATIONS {
            builder.set_calibration(&format!("effect{i}"), Calibration { min: 0.0, max: 1.0 }).unwrap();
        }
        assert_eq!(
            builder.set_calibration("extra", Calibration { min: 0.0, max: 1.0 }),
            Err(RuleError::TooManyCalibrations)
        );
        assert!(builder.set_calibration("effect3", Calibration { min: 5.0, max: 6.0 }).is_ok());
    }

    #[test]
    fn test_rule_limit() {
        let mut builder = RuleTableBuilder::new();
        for _ in 0..MAX_RULES {
            builder.push_rule(rule(&[1, 2]).unwrap()).unwrap();
        }
        assert_eq!(builder.push_rule(rule(&[1, 2]).unwrap()), Err(RuleError::TooManyRules));
        assert_eq!(builder.finish().rules().len(), MAX_RULES);
    }

    #[test]
    fn test_word_for_potency() {
        let category = DescriptorCategory {
            name: "Cure".to_string(),
            words: words(&["Weak", "", "Potent"]),
        };
        assert_eq!(category.word_for(0.0), Some("Weak"));
        assert_eq!(category.word_for(0.5), None);
        assert_eq!(category.word_for(1.0), Some("Potent"));

        let empty = DescriptorCategory { name: "Empty".to_string(), words: vec![] };
        assert_eq!(empty.word_for(0.7), None);
    }
}
