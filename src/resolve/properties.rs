//! Property and facing resolution.

use crate::board::Board;
use crate::core::{Direction, ItemId, Property, PropertySet};
use crate::matching::RuleContext;
use crate::rules::RuleSet;

/// Recompute every item's properties from `rules`.
///
/// Returns true if any item's set changed.
pub fn apply_properties(board: &mut Board, rules: &RuleSet) -> bool {
    let updates: Vec<(ItemId, PropertySet)> = {
        let ctx = RuleContext::new(board, rules);
        board
            .items()
            .map(|item| (item.id, ctx.properties_of(item)))
            .collect()
    };

    let mut changed = false;
    for (id, props) in updates {
        changed |= board.set_props(id, props);
    }
    changed
}

/// Turn items with a direction property to face it.
///
/// When several apply, `up` beats `right` beats `down` beats `left`.
pub fn apply_facing(board: &mut Board) -> bool {
    let updates: Vec<(ItemId, Direction)> = board
        .items()
        .filter_map(|item| forced_facing(item.props).map(|dir| (item.id, dir)))
        .collect();

    let mut changed = false;
    for (id, dir) in updates {
        changed |= board.set_dir(id, dir);
    }
    changed
}

fn forced_facing(props: PropertySet) -> Option<Direction> {
    [Property::Up, Property::Right, Property::Down, Property::Left]
        .into_iter()
        .find(|prop| props.has(*prop))
        .and_then(Property::facing)
}
