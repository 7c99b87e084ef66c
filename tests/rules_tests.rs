//! Rule extraction and matching integration tests.
//!
//! These tests load levels from text and check which rules are read off
//! the board and which properties they give each item.

use proptest::prelude::*;

use rust_wordgrid::{
    create_initial_state, extract_rules, parse_level, Condition, GameState, Item, ItemId, Property,
    Relation, Rule,
};

fn load(text: &str) -> GameState {
    create_initial_state(&parse_level(text).unwrap(), 0)
}

fn object<'a>(state: &'a GameState, name: &'a str) -> &'a Item {
    state.objects_named(name).next().unwrap()
}

// =============================================================================
// Extraction Tests
// =============================================================================

/// Test that AND on both sides yields the full cross product.
#[test]
fn test_and_cross_product() {
    let state = load(
        "Size 7x3; Baba 0,0; And 1,0; Keke 2,0; Is 3,0; Push 4,0; And 5,0; Stop 6,0; baba 0,2; \
         keke 1,2",
    );

    assert_eq!(state.rules.len(), 4);
    for subject in ["baba", "keke"] {
        for prop in [Property::Push, Property::Stop] {
            assert!(state.rules.contains(&Rule::property(subject, prop)));
            assert!(object(&state, subject).has(prop));
        }
    }
}

/// Test that sentences read down as well as across.
#[test]
fn test_horizontal_and_vertical() {
    let state = load("Size 4x4; Baba 0,0; Is 1,0; You 2,0; Is 0,1; Win 0,2; baba 3,3");

    assert_eq!(state.rules.len(), 2);
    assert!(state.rules.contains(&Rule::property("baba", Property::You)));
    assert!(state.rules.contains(&Rule::property("baba", Property::Win)));
}

/// Test that a conditional rule keeps its condition.
#[test]
fn test_condition_is_extracted() {
    let state = load(
        "Size 5x3; Baba 0,0; On 1,0; Rock 2,0; Is 3,0; Win 4,0; baba 0,2; rock 0,2; baba 3,2",
    );

    let expected = Rule::property("baba", Property::Win)
        .when(Condition::relation(Relation::On, "rock", false));
    assert_eq!(state.rules.iter().collect::<Vec<_>>(), vec![&expected]);

    let winners: Vec<_> = state.items_with(Property::Win).map(|item| item.pos()).collect();
    assert_eq!(winners, vec![(0, 2)]);
}

/// Test that object tiles sharing a name with words are never read.
#[test]
fn test_objects_are_not_words() {
    let state = load("Size 3x1; baba 0,0; is 1,0; you 2,0");
    assert!(state.rules.is_empty());
}

// =============================================================================
// Negation Tests
// =============================================================================

/// Test that IS NOT removes a property instead of granting the others.
#[test]
fn test_not_excludes_without_complement() {
    let state = load(
        "Size 4x3; Baba 0,0; Is 1,0; You 2,0; Baba 0,1; Is 1,1; Not 2,1; You 3,1; baba 0,2",
    );

    let baba = object(&state, "baba");
    assert!(!baba.has(Property::You));
    assert!(baba.props.is_empty());
}

/// Test that NOT before the operator only takes YOU away from its subject.
#[test]
fn test_not_before_operator() {
    let state = load(
        "Size 5x4; Baba 0,0; Not 1,0; Is 2,0; You 3,0; Rock 0,1; Is 1,1; You 2,1; baba 0,3; \
         rock 2,3",
    );

    assert!(state.rules.contains(&Rule::property("baba", Property::You).not_object()));
    assert!(!object(&state, "baba").has(Property::You));
    assert!(object(&state, "rock").has(Property::You));
}

/// Test that a negated subject covers every other object.
#[test]
fn test_negated_subject() {
    let state = load("Size 4x3; Not 0,0; Baba 1,0; Is 2,0; Push 3,0; baba 0,2; keke 1,2; rock 2,2");

    assert!(!object(&state, "baba").has(Property::Push));
    assert!(object(&state, "keke").has(Property::Push));
    assert!(object(&state, "rock").has(Property::Push));
}

/// Test that word tiles are pushable by default and TEXT rules reach them.
#[test]
fn test_text_rules() {
    let state = load("Size 4x3; Text 0,0; Is 1,0; Win 2,0; rock 0,2");

    assert!(state
        .items
        .iter()
        .filter(|item| item.is_text)
        .all(|item| item.has(Property::Push) && item.has(Property::Win)));
    assert!(object(&state, "rock").props.is_empty());
}

// =============================================================================
// Property Tests
// =============================================================================

const VOCABULARY: &[&str] = &[
    "baba", "keke", "rock", "text", "all", "is", "is", "and", "not", "has", "make", "you", "push",
    "win", "on", "near", "lonely", "facing", "up",
];

fn word_tiles() -> impl Strategy<Value = Vec<(usize, i32, i32)>> {
    prop::collection::vec((0..VOCABULARY.len(), 0..6i32, 0..6i32), 0..40)
}

fn to_items(tiles: &[(usize, i32, i32)]) -> Vec<Item> {
    tiles
        .iter()
        .enumerate()
        .map(|(i, &(word, x, y))| Item::text(ItemId(i as u32 + 1), VOCABULARY[word], (x, y)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Extraction depends only on the board, never on iteration order.
    #[test]
    fn extraction_is_idempotent(tiles in word_tiles()) {
        let items = to_items(&tiles);
        let first = extract_rules(&items, 6, 6);
        let second = extract_rules(&items, 6, 6);
        let reversed = extract_rules(items.iter().rev(), 6, 6);

        prop_assert_eq!(first.as_slice(), second.as_slice());
        prop_assert_eq!(first.as_slice(), reversed.as_slice());
    }

    /// Every extracted rule names a subject and an object.
    #[test]
    fn extracted_rules_are_complete(tiles in word_tiles()) {
        let items = to_items(&tiles);
        for rule in &extract_rules(&items, 6, 6) {
            prop_assert!(!rule.subject.is_empty());
            prop_assert!(!rule.object.is_empty());
        }
    }
}
