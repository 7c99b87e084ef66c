//! Condition evaluation.
//!
//! Conditions narrow which items a rule's subject selects:
//! - `LONELY`: nothing else shares the item's cell
//! - `ON X`: an `X` shares the cell
//! - `NEAR X`: an `X` is in the 3x3 neighbourhood (own cell included)
//! - `FACING X`: an `X` is in the cell ahead, or the item faces direction `X`
//!
//! The item itself never satisfies its own condition. A negated condition
//! object flips presence into absence.

use smallvec::SmallVec;

use super::context::RuleContext;
use crate::core::{Direction, Item, Pos};
use crate::rules::{Condition, Relation, EMPTY};

impl RuleContext<'_> {
    /// Check whether `condition` holds for `item`.
    #[must_use]
    pub fn condition_holds(&self, item: &Item, condition: &Condition) -> bool {
        match condition {
            Condition::Lonely { negated } => self.is_lonely(item) != *negated,
            Condition::Relation {
                relation,
                object,
                object_negated,
            } => self.relation_present(item, *relation, object) != *object_negated,
        }
    }

    /// No other item shares the cell.
    fn is_lonely(&self, item: &Item) -> bool {
        self.board.ids_at(item.pos()).iter().all(|id| *id == item.id)
    }

    fn relation_present(&self, item: &Item, relation: Relation, object: &str) -> bool {
        if relation == Relation::Facing {
            if let Some(dir) = Direction::from_word(object) {
                return item.facing() == dir;
            }
        }

        relation_cells(item, relation)
            .into_iter()
            .filter(|&pos| self.board.in_bounds(pos))
            .any(|pos| self.cell_has(pos, item, object))
    }

    /// Whether `pos` holds something other than `item` matching `object`.
    fn cell_has(&self, pos: Pos, item: &Item, object: &str) -> bool {
        let mut others = self.board.items_at(pos).filter(|other| other.id != item.id);
        if object == EMPTY {
            others.next().is_none()
        } else {
            others.any(|other| self.matches_noun(other, object))
        }
    }
}

/// Cells a relation inspects.
fn relation_cells(item: &Item, relation: Relation) -> SmallVec<[Pos; 9]> {
    let (x, y) = item.pos();
    match relation {
        Relation::On => smallvec::smallvec![(x, y)],
        Relation::Near => (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (x + dx, y + dy)))
            .collect(),
        Relation::Facing => smallvec::smallvec![item.facing().step((x, y))],
    }
}
