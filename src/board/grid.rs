//! The mutable board a turn is resolved on.
//!
//! `step` copies the items of the incoming `GameState` into a `Board`,
//! runs every phase against it, and freezes the result back into a new
//! state. Item storage is keyed by ID so every iteration is in allocation
//! order, and all position changes go through `move_item` so the cell
//! index never drifts from the items.

use std::collections::BTreeMap;

use im::Vector;

use super::cells::CellIndex;
use crate::core::{Direction, GameState, IdAllocator, Item, ItemId, Pos, PropertySet, Signature};
use crate::rules::{extract_rules, RuleSet};

/// Working copy of a level's items.
#[derive(Clone, Debug)]
pub struct Board {
    width: i32,
    height: i32,
    items: BTreeMap<ItemId, Item>,
    cells: CellIndex,
    ids: IdAllocator,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            items: BTreeMap::new(),
            cells: CellIndex::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Load the items of a state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let mut board = Self {
            ids: state.ids,
            ..Self::new(state.width, state.height)
        };
        for item in &state.items {
            board.insert(item.clone());
        }
        board
    }

    /// Add an existing item.
    ///
    /// The allocator is advanced past the item's ID so later spawns never
    /// collide with it.
    pub fn insert(&mut self, item: Item) {
        if item.id >= self.ids.peek() {
            self.ids = IdAllocator::after(item.id);
        }
        self.cells.insert(item.id, item.pos());
        self.items.insert(item.id, item);
    }

    /// Create a new item with a fresh ID.
    pub fn spawn(&mut self, signature: &Signature, pos: Pos, dir: Option<Direction>) -> ItemId {
        let id = self.ids.alloc();
        self.insert(Item::from_signature(id, signature, pos, dir));
        id
    }

    /// Take an item off the board.
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.cells.remove(id);
        self.items.remove(&id)
    }

    /// Move an item to another cell. Returns false if the item is gone.
    pub fn move_item(&mut self, id: ItemId, pos: Pos) -> bool {
        match self.items.get_mut(&id) {
            Some(item) => {
                item.set_pos(pos);
                self.cells.move_to(id, pos);
                true
            }
            None => false,
        }
    }

    /// Set an item's facing. Returns true if it changed.
    pub fn set_dir(&mut self, id: ItemId, dir: Direction) -> bool {
        match self.items.get_mut(&id) {
            Some(item) if item.dir != Some(dir) => {
                item.dir = Some(dir);
                true
            }
            _ => false,
        }
    }

    /// Replace an item's derived properties. Returns true if they changed.
    pub fn set_props(&mut self, id: ItemId, props: PropertySet) -> bool {
        match self.items.get_mut(&id) {
            Some(item) if item.props != props => {
                item.props = props;
                true
            }
            _ => false,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// All items in ID order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Item IDs in a cell, ascending.
    #[must_use]
    pub fn ids_at(&self, pos: Pos) -> &[ItemId] {
        self.cells.at(pos)
    }

    /// Items in a cell, in ID order.
    pub fn items_at(&self, pos: Pos) -> impl Iterator<Item = &Item> {
        self.cells.at(pos).iter().filter_map(|id| self.items.get(id))
    }

    /// Items in a cell on the same float layer as `floating`.
    pub fn layer_at(&self, pos: Pos, floating: bool) -> impl Iterator<Item = &Item> {
        self.items_at(pos).filter(move |item| item.is_floating() == floating)
    }

    /// Whether a cell holds an item with this signature.
    #[must_use]
    pub fn contains_at(&self, pos: Pos, signature: &Signature) -> bool {
        self.items_at(pos).any(|item| item.is(signature))
    }

    /// Check whether a cell lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width && pos.1 < self.height
    }

    /// Whether a cell holds no item at all.
    #[must_use]
    pub fn is_vacant(&self, pos: Pos) -> bool {
        self.cells.is_vacant(pos)
    }

    /// Every in-bounds cell without items, row-major.
    #[must_use]
    pub fn vacant_cells(&self) -> Vec<Pos> {
        (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| (x, y)))
            .filter(|&pos| self.is_vacant(pos))
            .collect()
    }

    /// Occupied cells, sorted by `(y, x)`.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<Pos> {
        self.cells.occupied()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the board holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The allocator state to carry into the next snapshot.
    #[must_use]
    pub fn id_allocator(&self) -> IdAllocator {
        self.ids
    }

    /// Rebuild the rule set from the words on the board.
    #[must_use]
    pub fn extract_rules(&self) -> RuleSet {
        extract_rules(self.items.values(), self.width, self.height)
    }

    /// Freeze the items into a persistent vector, in ID order.
    #[must_use]
    pub fn to_items(&self) -> Vector<Item> {
        self.items.values().cloned().collect()
    }
}
