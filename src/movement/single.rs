//! Player movement.
//!
//! Every `you` item that is not asleep tries to step in the input
//! direction. Movers closest to the leading edge go first, so a line of
//! `you` items walks together instead of blocking itself.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::{empty_blocks, is_open_shut_pair, swaps_with};
use crate::board::Board;
use crate::core::{Direction, ItemId, Pos, Property};
use crate::matching::{EmptyTraits, RuleContext};
use crate::resolve::destroy_items;
use crate::rules::RuleSet;

/// `can_move` results: `None` while an item is being checked.
type Visiting = FxHashMap<ItemId, Option<bool>>;

/// Move every player-controlled item one cell.
///
/// Returns true if anything moved or was destroyed.
pub fn move_players(board: &mut Board, rules: &RuleSet, dir: Direction) -> bool {
    let empty = RuleContext::new(board, rules).empty_traits();

    let mut movers: Vec<(ItemId, Pos)> = board
        .items()
        .filter(|item| item.has(Property::You) && !item.has(Property::Sleep))
        .map(|item| (item.id, item.pos()))
        .collect();
    movers.sort_by_key(|&(id, pos)| mover_order(dir, id, pos));
    trace!(movers = movers.len(), %dir, "moving players");

    let mut changed = false;
    for (id, _) in movers {
        if board.item(id).is_none() {
            continue;
        }
        if !can_move(board, empty, id, dir, &mut Visiting::default()) {
            continue;
        }
        let mut moved = FxHashSet::default();
        let mut doomed = Vec::new();
        changed |= do_move(board, empty, id, dir, &mut moved, &mut doomed);
        changed |= destroy_items(board, rules, &doomed);
    }
    changed
}

/// Sort key putting the leading edge first, then the cross axis, then ID.
fn mover_order(dir: Direction, id: ItemId, (x, y): Pos) -> (i32, i32, ItemId) {
    match dir {
        Direction::Right => (-x, y, id),
        Direction::Left => (x, y, id),
        Direction::Down => (-y, x, id),
        Direction::Up => (y, x, id),
    }
}

/// Check whether `id` can step one cell in `dir`.
///
/// Pushed items are checked recursively. An item reached again while it
/// is still being checked cannot move.
pub fn can_move(
    board: &Board,
    empty: EmptyTraits,
    id: ItemId,
    dir: Direction,
    visiting: &mut Visiting,
) -> bool {
    match visiting.get(&id) {
        Some(Some(result)) => return *result,
        Some(None) => return false,
        None => {}
    }
    visiting.insert(id, None);
    let result = check_move(board, empty, id, dir, visiting);
    visiting.insert(id, Some(result));
    result
}

fn check_move(
    board: &Board,
    empty: EmptyTraits,
    id: ItemId,
    dir: Direction,
    visiting: &mut Visiting,
) -> bool {
    let Some(item) = board.item(id) else {
        return false;
    };
    let target = dir.step(item.pos());
    if !board.in_bounds(target) {
        return false;
    }

    let occupants = board.ids_at(target);
    if occupants.is_empty() {
        return !empty_blocks(board, empty, target, dir);
    }

    for &other_id in occupants {
        let Some(other) = board.item(other_id) else {
            continue;
        };
        if is_open_shut_pair(item, other) || swaps_with(item, other) {
            continue;
        }
        if other.has(Property::Push) {
            if can_move(board, empty, other_id, dir, visiting) || other.has(Property::Weak) {
                continue;
            }
            return false;
        }
        if other.has(Property::Stop) || other.has(Property::Pull) {
            return false;
        }
    }
    true
}

/// Move `id` and everything it pushes, swaps with, or pulls.
///
/// Weak items that cannot be pushed, and open/shut pairs that meet, are
/// collected into `doomed` for the caller to destroy.
fn do_move(
    board: &mut Board,
    empty: EmptyTraits,
    id: ItemId,
    dir: Direction,
    moved: &mut FxHashSet<ItemId>,
    doomed: &mut Vec<ItemId>,
) -> bool {
    if !moved.insert(id) {
        return false;
    }
    let Some(item) = board.item(id).cloned() else {
        return false;
    };
    let from = item.pos();
    let target = dir.step(from);
    let occupants: Vec<ItemId> = board.ids_at(target).to_vec();

    let pair = occupants
        .iter()
        .copied()
        .find(|other| board.item(*other).is_some_and(|other| is_open_shut_pair(&item, other)));
    if let Some(other) = pair {
        doomed.extend([id, other]);
        return true;
    }

    // Decide every pushable in the cell before any of them moves.
    let mut swapped = Vec::new();
    let mut pushed = Vec::new();
    let mut visiting = Visiting::default();
    for other_id in occupants {
        if moved.contains(&other_id) {
            continue;
        }
        let Some(other) = board.item(other_id) else {
            continue;
        };
        if swaps_with(&item, other) {
            swapped.push(other_id);
        } else if other.has(Property::Push) {
            if can_move(board, empty, other_id, dir, &mut visiting) {
                pushed.push(other_id);
            } else if other.has(Property::Weak) {
                doomed.push(other_id);
            }
        }
    }
    for other_id in pushed {
        do_move(board, empty, other_id, dir, moved, doomed);
    }

    board.move_item(id, target);
    board.set_dir(id, dir);
    for other_id in swapped {
        board.move_item(other_id, from);
    }

    let behind = dir.reverse().step(from);
    let pulled: Vec<ItemId> = board
        .items_at(behind)
        .filter(|other| other.has(Property::Pull))
        .map(|other| other.id)
        .collect();
    for other_id in pulled {
        if can_move(board, empty, other_id, dir, &mut Visiting::default()) {
            do_move(board, empty, other_id, dir, moved, doomed);
        }
    }
    true
}
