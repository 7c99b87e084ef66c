//! `X IS FALL`.

use std::cmp::Reverse;

use crate::board::Board;
use crate::core::{Direction, ItemId, Property};

/// Drop every `fall` item until it lands.
///
/// An item lands above the bottom edge or above a solid item in its own
/// float layer. The lowest items fall first so stacks land in order.
pub fn apply_fall(board: &mut Board) -> bool {
    let mut fallers: Vec<(Reverse<i32>, i32, ItemId)> = board
        .items()
        .filter(|item| item.has(Property::Fall))
        .map(|item| (Reverse(item.y), item.x, item.id))
        .collect();
    fallers.sort_unstable();

    let mut changed = false;
    for (_, _, id) in fallers {
        while let Some(item) = board.item(id) {
            let below = Direction::Down.step(item.pos());
            let floating = item.is_floating();
            let landed = !board.in_bounds(below)
                || board
                    .layer_at(below, floating)
                    .any(|other| other.props.is_solid());
            if landed {
                break;
            }
            board.move_item(id, below);
            changed = true;
        }
    }
    changed
}
