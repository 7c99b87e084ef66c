//! Item identification.
//!
//! Every tile on the board (word or object) has a unique `ItemId`.
//!
//! ## Allocation
//!
//! IDs are handed out by a monotonically increasing counter carried in
//! the game state. An ID is never reused: a transformed item is a *new*
//! item with a fresh ID, and the old ID simply disappears from the board.
//!
//! ```
//! use rust_wordgrid::core::{IdAllocator, ItemId};
//!
//! let mut ids = IdAllocator::new();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_eq!(first, ItemId(1));
//! assert!(second > first);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a board item.
///
/// Ordering follows allocation order, which the engine relies on for
/// stable tie-breaking (mover sort, open/shut pairing, removal order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Monotonic ID source.
///
/// Lives inside `GameState` so that replaying from any snapshot allocates
/// the same IDs again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Start allocating at `ItemId(1)`.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 1 }
    }

    /// Resume allocation after the given ID.
    #[must_use]
    pub const fn after(last: ItemId) -> Self {
        Self { next: last.0 + 1 }
    }

    /// Allocate a new ID.
    pub fn alloc(&mut self) -> ItemId {
        let id = ItemId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the next ID without allocating it.
    #[must_use]
    pub const fn peek(&self) -> ItemId {
        ItemId(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
