//! Simultaneous movement for `move` items and `shift` belts.
//!
//! Every item that wants to move gets an arrow. Arrows are added for the
//! items those movers push (in front) and pull (behind), breadth-first,
//! so the whole batch is known before anything moves. Resolution then
//! works on that fixed snapshot: arrows that cannot go are removed until
//! nothing changes, which makes the outcome independent of item order.
//!
//! An arrow is removed when:
//! - its target cell is off the board
//! - its item has another live arrow in a different direction
//! - a solid item blocks the target cell and has no live arrow leaving
//!   in the same direction (weak pushables never block)
//! - the target cell is empty and `EMPTY IS STOP` / `EMPTY IS PUSH` refuses it
//! - it was induced by an arrow that has been removed
//!
//! A `move` item whose arrow is removed turns around once and the batch
//! is rebuilt from scratch. If it is blocked again it stays put, facing
//! the new way.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::{empty_blocks, is_open_shut_pair, swaps_with};
use crate::board::Board;
use crate::core::{Direction, ItemId, Pos, Property};
use crate::matching::{EmptyTraits, RuleContext};
use crate::resolve::destroy_items;
use crate::rules::RuleSet;

/// Resolution state of one arrow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArrowState {
    /// Not yet ruled out.
    #[default]
    Pending,
    /// Survived elimination; will move.
    Moving,
    /// Ruled out.
    Stopped,
}

/// Why an arrow exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Source {
    Move,
    Shift,
    Push,
    Pull,
}

#[derive(Clone, Debug)]
struct Arrow {
    item: ItemId,
    dir: Direction,
    from: Pos,
    to: Pos,
    source: Source,
    parent: Option<usize>,
    state: ArrowState,
    /// Stopped by its own target cell rather than by its parent.
    blocked_by_path: bool,
}

/// A mover the batch starts from.
#[derive(Clone, Copy, Debug)]
struct Origin {
    item: ItemId,
    dir: Direction,
    source: Source,
    flipped: bool,
}

/// Board changes decided by a resolved batch.
#[derive(Debug, Default)]
struct Commit {
    moves: Vec<(ItemId, Pos, Direction)>,
    swaps: Vec<(ItemId, Pos)>,
    turns: Vec<(ItemId, Direction)>,
    doomed: Vec<ItemId>,
}

/// Move every awake `move` item one cell along its facing.
pub fn apply_move(board: &mut Board, rules: &RuleSet) -> bool {
    let origins: Vec<Origin> = board
        .items()
        .filter(|item| item.has(Property::Move) && !item.has(Property::Sleep))
        .map(|item| Origin {
            item: item.id,
            dir: item.facing(),
            source: Source::Move,
            flipped: false,
        })
        .collect();
    resolve_batch(board, rules, origins)
}

/// Move everything riding a `shift` belt one cell along the belt's facing.
///
/// Riders are the other items in the belt's cell and float layer.
pub fn apply_shift(board: &mut Board, rules: &RuleSet) -> bool {
    let mut origins = Vec::new();
    for belt in board.items().filter(|item| item.has(Property::Shift)) {
        let riders = board
            .layer_at(belt.pos(), belt.is_floating())
            .filter(|rider| rider.id != belt.id);
        for rider in riders {
            origins.push(Origin {
                item: rider.id,
                dir: belt.facing(),
                source: Source::Shift,
                flipped: false,
            });
        }
    }
    resolve_batch(board, rules, origins)
}

fn resolve_batch(board: &mut Board, rules: &RuleSet, mut origins: Vec<Origin>) -> bool {
    if origins.is_empty() {
        return false;
    }
    let empty = RuleContext::new(board, rules).empty_traits();

    let commit = loop {
        let mut batch = Batch::build(board, empty, &origins);
        batch.eliminate();

        let mut flipped = false;
        for origin in origins.iter_mut().filter(|o| o.source == Source::Move && !o.flipped) {
            if batch.state_of(origin.item, origin.dir) == Some(ArrowState::Stopped) {
                origin.dir = origin.dir.reverse();
                origin.flipped = true;
                flipped = true;
            }
        }
        if !flipped {
            break batch.commit(&origins);
        }
    };

    trace!(
        moves = commit.moves.len(),
        swaps = commit.swaps.len(),
        doomed = commit.doomed.len(),
        "resolved movement batch"
    );

    let mut changed = false;
    for (id, to, dir) in commit.moves {
        changed |= board.move_item(id, to);
        board.set_dir(id, dir);
    }
    for (id, to) in commit.swaps {
        changed |= board.move_item(id, to);
    }
    for (id, dir) in commit.turns {
        changed |= board.set_dir(id, dir);
    }
    changed |= destroy_items(board, rules, &commit.doomed);
    changed
}

/// The arrows of one resolution round, over a fixed board.
struct Batch<'b> {
    board: &'b Board,
    empty: EmptyTraits,
    arrows: Vec<Arrow>,
    index: FxHashMap<(ItemId, Direction), usize>,
}

impl<'b> Batch<'b> {
    /// Add the origins and, breadth-first, every arrow they induce.
    fn build(board: &'b Board, empty: EmptyTraits, origins: &[Origin]) -> Self {
        let mut batch = Self {
            board,
            empty,
            arrows: Vec::new(),
            index: FxHashMap::default(),
        };
        for origin in origins {
            batch.add(origin.item, origin.dir, origin.source, None);
        }

        let mut next = 0;
        while next < batch.arrows.len() {
            let Arrow { item, dir, from, to, .. } = batch.arrows[next];

            let pushed: Vec<ItemId> = if board.in_bounds(to) {
                board
                    .items_at(to)
                    .filter(|other| other.id != item && other.has(Property::Push))
                    .map(|other| other.id)
                    .collect()
            } else {
                Vec::new()
            };
            for other in pushed {
                batch.add(other, dir, Source::Push, Some(next));
            }

            let pulled: Vec<ItemId> = board
                .items_at(dir.reverse().step(from))
                .filter(|other| other.id != item && other.has(Property::Pull))
                .map(|other| other.id)
                .collect();
            for other in pulled {
                batch.add(other, dir, Source::Pull, Some(next));
            }

            next += 1;
        }
        batch
    }

    fn add(&mut self, item: ItemId, dir: Direction, source: Source, parent: Option<usize>) {
        if self.index.contains_key(&(item, dir)) {
            return;
        }
        let Some(from) = self.board.item(item).map(|it| it.pos()) else {
            return;
        };
        self.index.insert((item, dir), self.arrows.len());
        self.arrows.push(Arrow {
            item,
            dir,
            from,
            to: dir.step(from),
            source,
            parent,
            state: ArrowState::Pending,
            blocked_by_path: false,
        });
    }

    fn state_of(&self, item: ItemId, dir: Direction) -> Option<ArrowState> {
        self.index.get(&(item, dir)).map(|&i| self.arrows[i].state)
    }

    /// Whether `item` has a live arrow in `dir`.
    fn is_leaving(&self, item: ItemId, dir: Direction) -> bool {
        self.state_of(item, dir).is_some_and(|state| state != ArrowState::Stopped)
    }

    /// Remove blocked arrows until a fixpoint, then mark the rest moving.
    ///
    /// Each sweep judges every arrow against the same state, so removals
    /// within a sweep never influence each other.
    fn eliminate(&mut self) {
        loop {
            let blocked: Vec<(usize, bool)> = (0..self.arrows.len())
                .filter(|&i| self.arrows[i].state == ArrowState::Pending)
                .filter_map(|i| self.blocked(i).map(|by_path| (i, by_path)))
                .collect();
            if blocked.is_empty() {
                break;
            }
            for (i, by_path) in blocked {
                self.arrows[i].state = ArrowState::Stopped;
                self.arrows[i].blocked_by_path = by_path;
            }
        }
        for arrow in &mut self.arrows {
            if arrow.state == ArrowState::Pending {
                arrow.state = ArrowState::Moving;
            }
        }
    }

    /// `Some(by_path)` if arrow `i` cannot go.
    fn blocked(&self, i: usize) -> Option<bool> {
        let arrow = &self.arrows[i];

        if let Some(parent) = arrow.parent {
            if self.arrows[parent].state == ArrowState::Stopped {
                return Some(false);
            }
        }
        let conflict = self.arrows.iter().any(|other| {
            other.item == arrow.item && other.dir != arrow.dir && other.state != ArrowState::Stopped
        });
        if conflict || !self.board.in_bounds(arrow.to) {
            return Some(true);
        }
        let Some(mover) = self.board.item(arrow.item) else {
            return Some(true);
        };

        let mut occupants = self
            .board
            .items_at(arrow.to)
            .filter(|other| other.id != arrow.item)
            .peekable();
        if occupants.peek().is_none() {
            return empty_blocks(self.board, self.empty, arrow.to, arrow.dir).then_some(true);
        }
        for other in occupants {
            if is_open_shut_pair(mover, other) || swaps_with(mover, other) {
                continue;
            }
            if !other.props.is_solid() || (other.has(Property::Push) && other.has(Property::Weak)) {
                continue;
            }
            if !self.is_leaving(other.id, arrow.dir) {
                return Some(true);
            }
        }
        None
    }

    /// Turn the resolved arrows into board changes.
    fn commit(&self, origins: &[Origin]) -> Commit {
        let mut commit = Commit::default();
        let moving: FxHashSet<ItemId> = self
            .arrows
            .iter()
            .filter(|arrow| arrow.state == ArrowState::Moving)
            .map(|arrow| arrow.item)
            .collect();
        let mut swapped = FxHashSet::default();
        let mut paired = FxHashSet::default();

        for arrow in self.arrows.iter().filter(|arrow| arrow.state == ArrowState::Moving) {
            commit.moves.push((arrow.item, arrow.to, arrow.dir));
            let Some(mover) = self.board.item(arrow.item) else {
                continue;
            };

            for other in self.board.items_at(arrow.to).filter(|other| other.id != arrow.item) {
                if is_open_shut_pair(mover, other) {
                    if !paired.contains(&mover.id) && !paired.contains(&other.id) {
                        paired.extend([mover.id, other.id]);
                        commit.doomed.extend([mover.id, other.id]);
                    }
                } else if swaps_with(mover, other) {
                    if !moving.contains(&other.id) && swapped.insert(other.id) {
                        commit.swaps.push((other.id, arrow.from));
                    }
                } else if other.has(Property::Push)
                    && other.has(Property::Weak)
                    && !self.is_leaving(other.id, arrow.dir)
                {
                    commit.doomed.push(other.id);
                }
            }
        }

        for arrow in self.arrows.iter().filter(|arrow| {
            arrow.state == ArrowState::Stopped
                && arrow.blocked_by_path
                && arrow.source != Source::Move
        }) {
            let weak = self.board.item(arrow.item).is_some_and(|item| item.has(Property::Weak));
            if weak && !moving.contains(&arrow.item) {
                commit.doomed.push(arrow.item);
            }
        }

        for origin in origins.iter().filter(|origin| origin.flipped) {
            if !moving.contains(&origin.item) {
                commit.turns.push((origin.item, origin.dir));
            }
        }
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Item;
    use crate::resolve::apply_properties;
    use crate::rules::Rule;

    fn setup(width: i32, items: Vec<Item>, rules: &[Rule]) -> (Board, RuleSet) {
        let mut board = Board::new(width, 3);
        for item in items {
            board.insert(item);
        }
        let rules: RuleSet = rules.iter().cloned().collect();
        apply_properties(&mut board, &rules);
        (board, rules)
    }

    fn obj(id: u32, name: &str, pos: Pos, dir: Direction) -> Item {
        Item::object(ItemId(id), name, pos).facing_toward(dir)
    }

    fn at(board: &Board, id: u32) -> Option<(Pos, Direction)> {
        board.item(ItemId(id)).map(|item| (item.pos(), item.facing()))
    }

    #[test]
    fn test_move_forward() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "bug", (0, 0), Direction::Right)],
            &[Rule::property("bug", Property::Move)],
        );

        assert!(apply_move(&mut board, &rules));
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Right)));
    }

    #[test]
    fn test_bounce_off_edge() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "bug", (2, 0), Direction::Right)],
            &[Rule::property("bug", Property::Move)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Left)));
    }

    #[test]
    fn test_trapped_mover_turns_around() {
        let (mut board, rules) = setup(
            3,
            vec![
                obj(1, "wall", (0, 0), Direction::Right),
                obj(2, "bug", (1, 0), Direction::Right),
                obj(3, "wall", (2, 0), Direction::Right),
            ],
            &[Rule::property("bug", Property::Move), Rule::property("wall", Property::Stop)],
        );

        assert!(apply_move(&mut board, &rules));
        assert_eq!(at(&board, 2), Some(((1, 0), Direction::Left)));
    }

    #[test]
    fn test_sleeping_mover_stays() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "bug", (0, 0), Direction::Right)],
            &[Rule::property("bug", Property::Move), Rule::property("bug", Property::Sleep)],
        );

        assert!(!apply_move(&mut board, &rules));
    }

    #[test]
    fn test_mover_pushes() {
        let (mut board, rules) = setup(
            4,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "rock", (1, 0), Direction::Up)],
            &[Rule::property("bug", Property::Move), Rule::property("rock", Property::Push)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Right)));
        assert_eq!(at(&board, 2), Some(((2, 0), Direction::Right)));
    }

    #[test]
    fn test_mover_pulls() {
        let (mut board, rules) = setup(
            4,
            vec![obj(1, "cart", (0, 0), Direction::Right), obj(2, "bug", (1, 0), Direction::Right)],
            &[Rule::property("bug", Property::Move), Rule::property("cart", Property::Pull)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Right)));
        assert_eq!(at(&board, 2), Some(((2, 0), Direction::Right)));
    }

    #[test]
    fn test_head_on_is_order_independent() {
        let rules = [
            Rule::property("bug", Property::Move),
            Rule::property("rock", Property::Move),
            Rule::property("rock", Property::Push),
        ];

        let (mut board, rules_a) = setup(
            3,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "rock", (1, 0), Direction::Left)],
            &rules,
        );
        apply_move(&mut board, &rules_a);
        assert_eq!(at(&board, 1), Some(((0, 0), Direction::Left)));
        assert_eq!(at(&board, 2), Some(((2, 0), Direction::Right)));

        // Same layout with the IDs swapped.
        let (mut board, rules_b) = setup(
            3,
            vec![obj(2, "bug", (0, 0), Direction::Right), obj(1, "rock", (1, 0), Direction::Left)],
            &rules,
        );
        apply_move(&mut board, &rules_b);
        assert_eq!(at(&board, 2), Some(((0, 0), Direction::Left)));
        assert_eq!(at(&board, 1), Some(((2, 0), Direction::Right)));
    }

    #[test]
    fn test_movers_may_meet_in_a_cell() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "bug", (2, 0), Direction::Left)],
            &[Rule::property("bug", Property::Move)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(board.ids_at((1, 0)), &[ItemId(1), ItemId(2)]);
    }

    #[test]
    fn test_follow_the_leader_through_solids() {
        let (mut board, rules) = setup(
            4,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "bug", (1, 0), Direction::Right)],
            &[Rule::property("bug", Property::Move), Rule::property("bug", Property::Stop)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Right)));
        assert_eq!(at(&board, 2), Some(((2, 0), Direction::Right)));
    }

    #[test]
    fn test_shift_moves_riders_only() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "belt", (1, 0), Direction::Down), obj(2, "baba", (1, 0), Direction::Left)],
            &[Rule::property("belt", Property::Shift)],
        );

        assert!(apply_shift(&mut board, &rules));
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Down)));
        assert_eq!(at(&board, 2), Some(((1, 1), Direction::Down)));
    }

    #[test]
    fn test_shift_ignores_other_layer() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "belt", (1, 0), Direction::Down), obj(2, "bird", (1, 0), Direction::Left)],
            &[Rule::property("belt", Property::Shift), Rule::property("bird", Property::Float)],
        );

        assert!(!apply_shift(&mut board, &rules));
    }

    #[test]
    fn test_conflicting_belts_hold_rider() {
        let (mut board, rules) = setup(
            3,
            vec![
                obj(1, "belt", (1, 1), Direction::Down),
                obj(2, "belt", (1, 1), Direction::Up),
                obj(3, "baba", (1, 1), Direction::Right),
            ],
            &[Rule::property("belt", Property::Shift)],
        );

        apply_shift(&mut board, &rules);
        assert_eq!(at(&board, 3).map(|(pos, _)| pos), Some((1, 1)));
    }

    #[test]
    fn test_blocked_weak_rider_is_destroyed() {
        let (mut board, rules) = setup(
            3,
            vec![
                obj(1, "belt", (1, 0), Direction::Right),
                obj(2, "egg", (1, 0), Direction::Right),
                obj(3, "wall", (2, 0), Direction::Right),
            ],
            &[
                Rule::property("belt", Property::Shift),
                Rule::property("egg", Property::Weak),
                Rule::property("wall", Property::Stop),
            ],
        );

        assert!(apply_shift(&mut board, &rules));
        assert!(board.item(ItemId(2)).is_none());
        assert!(board.item(ItemId(3)).is_some());
    }

    #[test]
    fn test_swap_partner_takes_old_cell() {
        let (mut board, rules) = setup(
            3,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "ghost", (1, 0), Direction::Up)],
            &[Rule::property("bug", Property::Move), Rule::property("bug", Property::Swap)],
        );

        apply_move(&mut board, &rules);
        assert_eq!(at(&board, 1).map(|(pos, _)| pos), Some((1, 0)));
        assert_eq!(at(&board, 2).map(|(pos, _)| pos), Some((0, 0)));
    }

    #[test]
    fn test_open_mover_and_shut_target_destroy_each_other() {
        let (mut board, rules) = setup(
            4,
            vec![obj(1, "key", (0, 0), Direction::Right), obj(2, "door", (1, 0), Direction::Right)],
            &[
                Rule::property("key", Property::Move),
                Rule::property("key", Property::Open),
                Rule::property("door", Property::Shut),
                Rule::property("door", Property::Stop),
            ],
        );

        assert!(apply_move(&mut board, &rules));
        assert!(board.is_empty());
    }

    #[test]
    fn test_stop_and_push_target_is_pushed() {
        let (mut board, rules) = setup(
            4,
            vec![obj(1, "bug", (0, 0), Direction::Right), obj(2, "rock", (1, 0), Direction::Right)],
            &[
                Rule::property("bug", Property::Move),
                Rule::property("rock", Property::Push),
                Rule::property("rock", Property::Stop),
            ],
        );

        assert!(apply_move(&mut board, &rules));
        assert_eq!(at(&board, 1), Some(((1, 0), Direction::Right)));
        assert_eq!(at(&board, 2), Some(((2, 0), Direction::Right)));
    }
}
