//! Tests for the naming engine
//!
//! Covers rule matching (set equality, first match, single-effect items)
//! and name formatting in both descriptor-word and roman-numeral modes.

use proptest::prelude::*;

use crate::host::{CreatedItem, FormId, ItemEffect, PowerScaling};
use crate::naming::{NamingEngine, rule_matches};
use crate::rules::{Calibration, NameTemplate, NamingRule, RuleTable, RuleTableBuilder};

/// Effect `id` with magnitude scaling and its calibration name `Effect{id}`
fn effect(id: u32, magnitude: f32, cost: f32) -> ItemEffect {
    ItemEffect {
        effect_id: FormId(id),
        editor_id: Some(format!("Effect{id}")),
        name: format!("Effect {id}"),
        scaling: PowerScaling::Magnitude,
        magnitude,
        duration: 0.0,
        cost,
    }
}

fn item(ids: &[u32]) -> CreatedItem {
    CreatedItem {
        name: "Potion".to_string(),
        effects: ids.iter().map(|&id| effect(id, 50.0, id as f32)).collect(),
    }
}

fn rule(template: &str, ids: &[u32]) -> NamingRule {
    NamingRule::new(
        NameTemplate::parse(template).unwrap(),
        ids.iter().copied().map(FormId).collect(),
    )
    .unwrap()
}

/// Table where every effect is calibrated to `[0, 100]`
struct TableLayout<'a> {
    roman: bool,
    categories: &'a [(&'a str, &'a [&'a str])],
    rules: Vec<(NamingRule, Option<&'a str>)>,
}

fn build(layout: TableLayout<'_>) -> RuleTable {
    let mut builder = RuleTableBuilder::new();
    builder.set_use_roman_numerals(layout.roman);
    for id in 0..10 {
        builder
            .set_calibration(&format!("Effect{id}"), Calibration { min: 0.0, max: 100.0 })
            .unwrap();
    }
    for (name, words) in layout.categories {
        builder
            .declare_category(name, words.iter().map(|w| w.to_string()).collect())
            .unwrap();
    }
    for (rule, category) in layout.rules {
        let index = category.map(|name| builder.reference_category(name).unwrap());
        builder.push_rule(rule.with_category(index)).unwrap();
    }
    builder.finish()
}

fn simple_table(rules: Vec<NamingRule>) -> RuleTable {
    build(TableLayout {
        roman: false,
        categories: &[],
        rules: rules.into_iter().map(|r| (r, None)).collect(),
    })
}

// ─── Matching ───────────────────────────────────────────────────────────────

#[test]
fn test_single_effect_items_never_renamed() {
    let table = build(TableLayout {
        roman: true,
        categories: &[("Cure", &["Weak", "Strong"])],
        rules: vec![
            (rule("Pair{}", &[1, 2]), Some("Cure")),
            (rule("Trio{}", &[1, 2, 3]), None),
        ],
    });
    let engine = NamingEngine::new(&table);

    for id in 0..5 {
        assert_eq!(engine.try_rename(&item(&[id])), None);
    }
    assert_eq!(engine.try_rename(&item(&[])), None);
}

#[test]
fn test_match_ignores_effect_order() {
    let table = simple_table(vec![rule("Trio{}", &[3, 1, 2])]);
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.try_rename(&item(&[1, 2, 3])).as_deref(), Some("Trio"));
    assert_eq!(engine.try_rename(&item(&[2, 3, 1])).as_deref(), Some("Trio"));
}

#[test]
fn test_subset_and_superset_do_not_match() {
    let table = simple_table(vec![rule("Trio{}", &[1, 2, 3])]);
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.try_rename(&item(&[1, 2])), None);
    assert_eq!(engine.try_rename(&item(&[1, 2, 3, 4])), None);
    assert_eq!(engine.try_rename(&item(&[1, 2, 4])), None);
}

#[test]
fn test_repeated_item_effect_counts_once() {
    let table = simple_table(vec![rule("Pair{}", &[1, 2])]);
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.try_rename(&item(&[1, 1])), None);
    assert_eq!(engine.try_rename(&item(&[2, 2, 2])), None);
    assert_eq!(engine.try_rename(&item(&[1, 2, 2])).as_deref(), Some("Pair"));
}

#[test]
fn test_first_matching_rule_wins() {
    let table = simple_table(vec![
        rule("Other{}", &[5, 6]),
        rule("First{}", &[1, 2]),
        rule("Second{}", &[2, 1]),
    ]);
    let engine = NamingEngine::new(&table);

    let matched = engine.find_rule(&item(&[1, 2])).unwrap();
    assert_eq!(matched.template().as_str(), "First{}");
    assert_eq!(engine.try_rename(&item(&[2, 1])).as_deref(), Some("First"));
}

#[test]
fn test_no_rules_leaves_name_alone() {
    let table = RuleTable::default();
    assert_eq!(NamingEngine::new(&table).try_rename(&item(&[1, 2])), None);
}

// ─── Descriptor words ──────────────────────────────────────────────────────

fn potency_item(ids: &[u32], scoring: u32, magnitude: f32) -> CreatedItem {
    CreatedItem {
        name: "Potion".to_string(),
        effects: ids
            .iter()
            .map(|&id| {
                if id == scoring {
                    effect(id, magnitude, 100.0)
                } else {
                    effect(id, 0.0, 1.0)
                }
            })
            .collect(),
    }
}

#[test]
fn test_descriptor_word_by_potency() {
    let table = build(TableLayout {
        roman: false,
        categories: &[("Cure", &["Weak", "", "Potent"])],
        rules: vec![(rule("{}Cure Draught", &[1, 2]), Some("Cure"))],
    });
    let engine = NamingEngine::new(&table);

    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 2, 10.0)).as_deref(),
        Some("Weak Cure Draught")
    );
    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 2, 100.0)).as_deref(),
        Some("Potent Cure Draught")
    );
}

#[test]
fn test_empty_word_treated_as_no_descriptor() {
    let table = build(TableLayout {
        roman: false,
        categories: &[("Cure", &["Weak", "", "Potent"])],
        rules: vec![
            (rule("Cure{}Poison", &[1, 2]), Some("Cure")),
            (rule("Cure Poison{}", &[3, 4]), Some("Cure")),
        ],
    });
    let engine = NamingEngine::new(&table);

    // p = 0.5 -> floor(0.5 * 2) = 1 -> ""
    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 1, 50.0)).as_deref(),
        Some("Cure Poison")
    );
    assert_eq!(
        engine.try_rename(&potency_item(&[3, 4], 3, 50.0)).as_deref(),
        Some("Cure Poison")
    );
}

#[test]
fn test_descriptor_spacing_by_position() {
    let table = build(TableLayout {
        roman: false,
        categories: &[("Grade", &["Minor", "Major"])],
        rules: vec![
            (rule("{}Elixir", &[1, 2]), Some("Grade")),
            (rule("Elixir{}", &[3, 4]), Some("Grade")),
            (rule("Elixir of{}Vigor", &[5, 6]), Some("Grade")),
        ],
    });
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.try_rename(&potency_item(&[1, 2], 1, 0.0)).as_deref(), Some("Minor Elixir"));
    assert_eq!(engine.try_rename(&potency_item(&[3, 4], 3, 0.0)).as_deref(), Some("Elixir Minor"));
    assert_eq!(
        engine.try_rename(&potency_item(&[5, 6], 6, 100.0)).as_deref(),
        Some("Elixir of Major Vigor")
    );
}

#[test]
fn test_missing_or_empty_category_strips_placeholder() {
    let table = build(TableLayout {
        roman: false,
        categories: &[],
        rules: vec![
            (rule("Cure{}Poison", &[1, 2]), None),
            (rule("{}Remedy", &[3, 4]), Some("NeverDeclared")),
        ],
    });
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.try_rename(&item(&[1, 2])).as_deref(), Some("Cure Poison"));
    assert_eq!(engine.try_rename(&item(&[3, 4])).as_deref(), Some("Remedy"));
}

#[test]
fn test_costliest_effect_drives_potency() {
    let table = build(TableLayout {
        roman: false,
        categories: &[("Grade", &["Minor", "Major"])],
        rules: vec![(rule("{}Elixir", &[1, 2]), Some("Grade"))],
    });
    let engine = NamingEngine::new(&table);

    // Effect 2 is costlier and maxed out; effect 1 is at zero
    let strong = potency_item(&[1, 2], 2, 100.0);
    assert_eq!(engine.try_rename(&strong).as_deref(), Some("Major Elixir"));

    // Costlier effect 1 now at zero
    let weak = potency_item(&[2, 1], 1, 0.0);
    assert_eq!(engine.try_rename(&weak).as_deref(), Some("Minor Elixir"));
}

// ─── Roman numerals ────────────────────────────────────────────────────────

#[test]
fn test_roman_numeral_removes_placeholder() {
    let table = build(TableLayout {
        roman: true,
        categories: &[("Cure", &["Weak", "Strong"])],
        rules: vec![(rule("Cure {} Poison", &[1, 2]), Some("Cure"))],
    });
    let engine = NamingEngine::new(&table);

    // p = 0.5 -> floor(0.5 * 19) = 9 -> "X"
    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 1, 50.0)).as_deref(),
        Some("Cure Poison X")
    );
    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 1, 100.0)).as_deref(),
        Some("Cure Poison XX")
    );
    assert_eq!(
        engine.try_rename(&potency_item(&[1, 2], 1, 0.0)).as_deref(),
        Some("Cure Poison I")
    );
}

#[test]
fn test_format_name_roman_edge_positions() {
    let table = build(TableLayout {
        roman: true,
        categories: &[],
        rules: vec![],
    });
    let engine = NamingEngine::new(&table);

    assert_eq!(engine.format_name(&rule("{}Elixir", &[1, 2]), 0.25), "Elixir V");
    assert_eq!(engine.format_name(&rule("Elixir{}", &[1, 2]), 0.25), "Elixir V");
    assert_eq!(engine.format_name(&rule("{}", &[1, 2]), 1.0), "XX");
}

// ─── Properties ────────────────────────────────────────────────────────────

fn id_pool() -> Vec<u32> {
    (1..=8).collect()
}

proptest! {
    #[test]
    fn prop_match_is_set_equality(
        rule_ids in proptest::sample::subsequence(id_pool(), 2..=4).prop_shuffle(),
        item_ids in proptest::collection::vec(1..=8u32, 0..=5),
    ) {
        let r = rule("Any{}", &rule_ids);
        let mut expected_rule = rule_ids.clone();
        let mut expected_item = item_ids.clone();
        expected_rule.sort_unstable();
        expected_item.sort_unstable();
        expected_item.dedup();

        prop_assert_eq!(rule_matches(&r, &item(&item_ids)), expected_rule == expected_item);
    }

    #[test]
    fn prop_permuted_item_always_matches(
        (rule_ids, item_ids) in proptest::sample::subsequence(id_pool(), 2..=4)
            .prop_flat_map(|ids| (Just(ids.clone()), Just(ids).prop_shuffle())),
    ) {
        let table = simple_table(vec![rule("Match{}", &rule_ids)]);
        let renamed = NamingEngine::new(&table).try_rename(&item(&item_ids));
        prop_assert_eq!(renamed.as_deref(), Some("Match"));
    }
}
