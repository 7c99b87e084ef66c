//! Spawning and destruction.
//!
//! Every way an item leaves the board (sink, defeat, melt, open/shut, eat,
//! weak, `X IS EMPTY`) goes through [`destroy_items`], which drops the
//! item's `HAS` objects in its place. `MAKE`, `WRITE` and `MORE` add items
//! every turn their rules hold.

use tracing::trace;

use crate::board::Board;
use crate::core::{Direction, ItemId, Pos, Property, Signature};
use crate::matching::RuleContext;
use crate::rules::{RuleKind, RuleSet};

/// A pending spawn.
type Spawn = (Signature, Pos, Option<Direction>);

/// Destroy items, spawning their `HAS` objects where they stood.
///
/// IDs are deduplicated and processed in ascending order; IDs no longer on
/// the board are ignored. The `HAS` targets are evaluated against the
/// board as it was before any removal. Returns true if anything was
/// removed.
pub fn destroy_items(board: &mut Board, rules: &RuleSet, ids: &[ItemId]) -> bool {
    let mut doomed: Vec<ItemId> = ids
        .iter()
        .copied()
        .filter(|id| board.item(*id).is_some())
        .collect();
    doomed.sort_unstable();
    doomed.dedup();
    if doomed.is_empty() {
        return false;
    }

    let spawns: Vec<Spawn> = {
        let ctx = RuleContext::new(board, rules);
        doomed
            .iter()
            .filter_map(|id| board.item(*id))
            .flat_map(|item| {
                ctx.spawn_targets(item, RuleKind::Has)
                    .into_iter()
                    .map(move |target| (target, item.pos(), item.dir))
            })
            .collect()
    };

    for id in &doomed {
        board.remove(*id);
    }
    trace!(destroyed = doomed.len(), spawned = spawns.len(), "destroyed items");
    for (signature, pos, dir) in &spawns {
        board.spawn(signature, *pos, *dir);
    }
    true
}

/// `X MAKE Y`: every matching item spawns `Y` in its cell unless the cell
/// already holds one.
pub fn apply_make(board: &mut Board, rules: &RuleSet) -> bool {
    spawn_in_place(board, rules, RuleKind::Make)
}

/// `X WRITE W`: every matching item spawns the word tile `W` in its cell
/// unless the cell already holds one.
pub fn apply_write(board: &mut Board, rules: &RuleSet) -> bool {
    spawn_in_place(board, rules, RuleKind::Write)
}

fn spawn_in_place(board: &mut Board, rules: &RuleSet, kind: RuleKind) -> bool {
    let spawns: Vec<Spawn> = {
        let ctx = RuleContext::new(board, rules);
        board
            .items()
            .flat_map(|item| {
                ctx.spawn_targets(item, kind)
                    .into_iter()
                    .map(move |target| (target, item.pos(), item.dir))
            })
            .collect()
    };

    let mut changed = false;
    for (signature, pos, dir) in &spawns {
        if !board.contains_at(*pos, signature) {
            board.spawn(signature, *pos, *dir);
            changed = true;
        }
    }
    changed
}

/// `X IS MORE`: copy into every orthogonal neighbour that holds neither
/// a copy nor a solid item.
///
/// Neighbours are tried up, right, down, left. Copies made this turn do
/// not grow again until the next turn.
pub fn apply_more(board: &mut Board) -> bool {
    let growers: Vec<(Signature, Pos, Option<Direction>)> = board
        .items()
        .filter(|item| item.has(Property::More))
        .map(|item| (item.signature(), item.pos(), item.dir))
        .collect();

    let mut changed = false;
    for (signature, pos, dir) in &growers {
        for step in Direction::ALL {
            let next = step.step(*pos);
            if !board.in_bounds(next) || board.contains_at(next, signature) {
                continue;
            }
            if board.items_at(next).any(|item| item.props.is_solid()) {
                continue;
            }
            board.spawn(signature, next, *dir);
            changed = true;
        }
    }
    changed
}
