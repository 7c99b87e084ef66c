//! Cell index for item locations and movement.
//!
//! The `CellIndex` tracks which cell every item occupies and which items
//! each cell holds. It supports:
//! - Item lookup by ID
//! - Cell contents in ID order (stable regardless of movement history)
//! - Moving items between cells

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{ItemId, Pos};

/// Items in one cell, sorted by ID.
pub type CellContents = SmallVec<[ItemId; 4]>;

/// Tracks item locations by cell.
///
/// ## Usage
///
/// ```
/// use rust_wordgrid::board::CellIndex;
/// use rust_wordgrid::core::ItemId;
///
/// let mut cells = CellIndex::new();
///
/// cells.insert(ItemId(2), (1, 1));
/// cells.insert(ItemId(1), (1, 1));
/// cells.move_to(ItemId(2), (2, 1));
///
/// assert_eq!(cells.at((1, 1)), &[ItemId(1)]);
/// assert_eq!(cells.at((2, 1)), &[ItemId(2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CellIndex {
    /// Item locations: item -> cell
    locations: FxHashMap<ItemId, Pos>,

    /// Cell contents, kept sorted by ID.
    cells: FxHashMap<Pos, CellContents>,
}

impl CellIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to a cell.
    ///
    /// Panics if the item is already indexed.
    pub fn insert(&mut self, item: ItemId, pos: Pos) {
        if self.locations.insert(item, pos).is_some() {
            panic!("{item} already exists in cell index");
        }
        Self::add_sorted(self.cells.entry(pos).or_default(), item);
    }

    /// Move an item to another cell.
    ///
    /// Returns the old cell, or `None` if the item wasn't found.
    pub fn move_to(&mut self, item: ItemId, pos: Pos) -> Option<Pos> {
        let old = self.locations.get(&item).copied()?;
        if old == pos {
            return Some(old);
        }

        self.detach(item, old);
        self.locations.insert(item, pos);
        Self::add_sorted(self.cells.entry(pos).or_default(), item);

        Some(old)
    }

    /// Remove an item from the index entirely.
    ///
    /// Returns the cell it was in, or `None` if not found.
    pub fn remove(&mut self, item: ItemId) -> Option<Pos> {
        let pos = self.locations.remove(&item)?;
        self.detach(item, pos);
        Some(pos)
    }

    /// Get the cell an item is in.
    #[must_use]
    pub fn location(&self, item: ItemId) -> Option<Pos> {
        self.locations.get(&item).copied()
    }

    /// Items in a cell, in ID order.
    #[must_use]
    pub fn at(&self, pos: Pos) -> &[ItemId] {
        match self.cells.get(&pos) {
            Some(contents) => contents.as_slice(),
            None => &[],
        }
    }

    /// Check whether a cell holds no items.
    #[must_use]
    pub fn is_vacant(&self, pos: Pos) -> bool {
        self.at(pos).is_empty()
    }

    /// Occupied cells, sorted by `(y, x)`.
    #[must_use]
    pub fn occupied(&self) -> Vec<Pos> {
        let mut cells: Vec<Pos> = self.cells.keys().copied().collect();
        cells.sort_by_key(|&(x, y)| (y, x));
        cells
    }

    /// Get total number of items tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    fn detach(&mut self, item: ItemId, pos: Pos) {
        if let Some(contents) = self.cells.get_mut(&pos) {
            contents.retain(|id| *id != item);
            if contents.is_empty() {
                self.cells.remove(&pos);
            }
        }
    }

    fn add_sorted(contents: &mut CellContents, item: ItemId) {
        let idx = contents.partition_point(|id| *id < item);
        contents.insert(idx, item);
    }
}
