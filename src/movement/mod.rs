//! Movement.
//!
//! - `single`: player input moves every `you` item one cell
//! - `batch`: `move` items and `shift` belts, resolved simultaneously
//! - `fall`: `fall` items drop as far as they can
//!
//! Movement ignores float layers: a floating item still pushes and is
//! blocked by grounded ones. Falling is the exception, since it lands on
//! whatever is solid in its own layer.

pub mod single;
pub mod batch;
pub mod fall;

pub use batch::{apply_move, apply_shift, ArrowState};
pub use fall::apply_fall;
pub use single::move_players;

use crate::board::Board;
use crate::core::{Direction, Item, Pos, Property};
use crate::matching::EmptyTraits;

/// An `open` item meeting a `shut` item (either way round).
#[must_use]
pub fn is_open_shut_pair(a: &Item, b: &Item) -> bool {
    (a.has(Property::Open) && b.has(Property::Shut))
        || (a.has(Property::Shut) && b.has(Property::Open))
}

/// Whether `mover` trades places with `other` instead of being blocked.
///
/// Either side having `swap` is enough, unless `other` is pushable.
#[must_use]
pub fn swaps_with(mover: &Item, other: &Item) -> bool {
    (mover.has(Property::Swap) || other.has(Property::Swap)) && !other.has(Property::Push)
}

/// Whether entering the empty cell `cell` while moving `dir` is refused.
///
/// `EMPTY IS PUSH` needs room beyond the cell and overrides `EMPTY IS STOP`.
#[must_use]
pub fn empty_blocks(board: &Board, empty: EmptyTraits, cell: Pos, dir: Direction) -> bool {
    if empty.push {
        !board.in_bounds(dir.step(cell))
    } else {
        empty.stop
    }
}
