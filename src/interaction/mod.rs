//! Interactions between items sharing a cell.
//!
//! Each cell is checked once per float layer. Everything that dies is
//! collected first and destroyed together, so one effect never hides
//! another (a `sink` and a `defeat` in the same cell both apply).
//!
//! | rule | removed |
//! |---|---|
//! | sink | every item, if more than one item shares the layer |
//! | defeat | `you` items |
//! | hot | `melt` items |
//! | open / shut | `min(open, shut)` of each, in ID order |
//! | eat | items matched by the eater's `EAT` rules |
//! | weak | weak items that are not alone |

pub mod teleport;

pub use teleport::apply_teleport;

use tracing::trace;

use crate::board::Board;
use crate::core::{Item, ItemId, Property};
use crate::matching::RuleContext;
use crate::resolve::destroy_items;
use crate::rules::{RuleKind, RuleSet};

/// Resolve every same-cell interaction on the board.
pub fn apply_interactions(board: &mut Board, rules: &RuleSet) -> bool {
    let doomed: Vec<ItemId> = {
        let ctx = RuleContext::new(board, rules);
        let mut doomed = Vec::new();
        for pos in board.occupied_cells() {
            for floating in [false, true] {
                let layer: Vec<&Item> = board.layer_at(pos, floating).collect();
                if !layer.is_empty() {
                    interact(&ctx, &layer, &mut doomed);
                }
            }
        }
        doomed
    };

    if !doomed.is_empty() {
        trace!(doomed = doomed.len(), "interactions");
    }
    destroy_items(board, rules, &doomed)
}

/// Collect the items one layer of one cell destroys.
fn interact(ctx: &RuleContext<'_>, layer: &[&Item], doomed: &mut Vec<ItemId>) {
    let crowded = layer.len() > 1;
    let any = move |prop: Property| layer.iter().any(|item| item.has(prop));
    let with = move |prop: Property| {
        layer
            .iter()
            .filter(move |item| item.has(prop))
            .map(|item| item.id)
    };

    if crowded && any(Property::Sink) {
        doomed.extend(layer.iter().map(|item| item.id));
    }
    if any(Property::Defeat) {
        doomed.extend(with(Property::You));
    }
    if any(Property::Hot) {
        doomed.extend(with(Property::Melt));
    }

    // Open/shut: an item with both removes itself; the rest pair up.
    let (both, rest): (Vec<&Item>, Vec<&Item>) = layer
        .iter()
        .copied()
        .partition(|item| item.has(Property::Open) && item.has(Property::Shut));
    doomed.extend(both.iter().map(|item| item.id));
    let open: Vec<ItemId> = rest
        .iter()
        .filter(|item| item.has(Property::Open))
        .map(|item| item.id)
        .collect();
    let shut: Vec<ItemId> = rest
        .iter()
        .filter(|item| item.has(Property::Shut))
        .map(|item| item.id)
        .collect();
    let pairs = open.len().min(shut.len());
    doomed.extend(open[..pairs].iter().chain(&shut[..pairs]));

    for eater in layer {
        for other in layer.iter().filter(|other| other.id != eater.id) {
            if is_eaten(ctx, eater, other) {
                doomed.push(other.id);
            }
        }
    }

    if crowded {
        doomed.extend(with(Property::Weak));
    }
}

/// Whether `eater`'s `EAT` rules take `other`.
fn is_eaten(ctx: &RuleContext<'_>, eater: &Item, other: &Item) -> bool {
    let mut eaten = false;
    for rule in ctx.rules_for(eater, RuleKind::Eat) {
        if ctx.matches_noun(other, &rule.object) {
            if rule.object_negated {
                return false;
            }
            eaten = true;
        }
    }
    eaten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pos;
    use crate::resolve::apply_properties;
    use crate::rules::Rule;

    fn setup(items: &[(&str, Pos)], rules: &[Rule]) -> (Board, RuleSet) {
        let mut board = Board::new(3, 3);
        for (i, (name, pos)) in items.iter().enumerate() {
            board.insert(Item::object(ItemId(i as u32 + 1), *name, *pos));
        }
        let rules: RuleSet = rules.iter().cloned().collect();
        apply_properties(&mut board, &rules);
        (board, rules)
    }

    fn survivors(board: &Board) -> Vec<u32> {
        board.items().map(|item| item.id.raw()).collect()
    }

    #[test]
    fn test_sink_takes_everything() {
        let (mut board, rules) = setup(
            &[("water", (1, 1)), ("rock", (1, 1)), ("water", (0, 0))],
            &[Rule::property("water", Property::Sink)],
        );

        assert!(apply_interactions(&mut board, &rules));
        assert_eq!(survivors(&board), vec![3]);
    }

    #[test]
    fn test_defeat_and_melt() {
        let (mut board, rules) = setup(
            &[("baba", (1, 1)), ("skull", (1, 1)), ("keke", (0, 0)), ("lava", (0, 0))],
            &[
                Rule::property("baba", Property::You),
                Rule::property("skull", Property::Defeat),
                Rule::property("keke", Property::Melt),
                Rule::property("lava", Property::Hot),
            ],
        );

        apply_interactions(&mut board, &rules);
        assert_eq!(survivors(&board), vec![2, 4]);
    }

    #[test]
    fn test_open_shut_pairs_by_id() {
        let (mut board, rules) = setup(
            &[("key", (1, 1)), ("door", (1, 1)), ("key", (1, 1))],
            &[Rule::property("key", Property::Open), Rule::property("door", Property::Shut)],
        );

        apply_interactions(&mut board, &rules);
        assert_eq!(survivors(&board), vec![3]);
    }

    #[test]
    fn test_open_and_shut_item_removes_itself() {
        let (mut board, rules) = setup(
            &[("door", (1, 1))],
            &[Rule::property("door", Property::Open), Rule::property("door", Property::Shut)],
        );

        assert!(apply_interactions(&mut board, &rules));
        assert!(board.is_empty());
    }

    #[test]
    fn test_eat_with_negation() {
        let (mut board, rules) = setup(
            &[("keke", (1, 1)), ("rock", (1, 1)), ("flag", (1, 1))],
            &[
                Rule::new("keke", RuleKind::Eat, crate::rules::ALL),
                Rule::new("keke", RuleKind::Eat, "flag").not_object(),
            ],
        );

        apply_interactions(&mut board, &rules);
        assert_eq!(survivors(&board), vec![1, 3]);
    }

    #[test]
    fn test_weak_dies_in_company() {
        let (mut board, rules) = setup(
            &[("egg", (1, 1)), ("egg", (0, 0)), ("rock", (0, 0))],
            &[Rule::property("egg", Property::Weak)],
        );

        apply_interactions(&mut board, &rules);
        assert_eq!(survivors(&board), vec![1, 3]);
    }

    #[test]
    fn test_layers_do_not_interact() {
        let (mut board, rules) = setup(
            &[("baba", (1, 1)), ("ghost", (1, 1))],
            &[
                Rule::property("baba", Property::You),
                Rule::property("ghost", Property::Defeat),
                Rule::property("ghost", Property::Float),
            ],
        );

        assert!(!apply_interactions(&mut board, &rules));
        assert_eq!(survivors(&board), vec![1, 2]);
    }

    #[test]
    fn test_destroyed_items_drop_has() {
        let (mut board, rules) = setup(
            &[("baba", (1, 1)), ("skull", (1, 1))],
            &[
                Rule::property("baba", Property::You),
                Rule::property("skull", Property::Defeat),
                Rule::new("baba", RuleKind::Has, "flag"),
            ],
        );

        apply_interactions(&mut board, &rules);
        let names: Vec<_> = board.items().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["skull", "flag"]);
    }
}
