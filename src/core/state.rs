//! Game state: one immutable snapshot per turn.
//!
//! ## GameState
//!
//! Everything observable about a level at the end of a turn:
//! - Level identity (index, title, size)
//! - Items with their derived properties
//! - The rule set those properties were derived from
//! - Status and turn counter
//!
//! States are values. `step` returns a new state and never edits the one
//! it was given, so callers keep an undo history simply by holding on to
//! previous snapshots. Items and rules live in `im` persistent vectors,
//! which makes those snapshots cheap to clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::direction::Pos;
use super::entity::{IdAllocator, ItemId};
use super::item::Item;
use super::property::Property;
use crate::rules::Rule;

/// Where the level stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Win,
    Lose,
    /// Set by the surrounding campaign, never derived by the engine.
    Complete,
}

impl GameStatus {
    /// Terminal until the caller resets the level.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Complete level state after a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Position of this level in its pack.
    pub level_index: usize,

    pub title: String,

    pub width: i32,
    pub height: i32,

    /// Items in allocation order.
    pub items: Vector<Item>,

    /// Rules extracted from the final board of the last turn.
    pub rules: Vector<Rule>,

    pub status: GameStatus,

    /// Completed turns. Seeds the teleport RNG.
    pub turn: u32,

    /// Next item ID to hand out.
    pub ids: IdAllocator,
}

impl GameState {
    /// Check whether the level is still being played.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Look up an item by ID.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items occupying a cell, in allocation order.
    pub fn items_at(&self, pos: Pos) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.pos() == pos)
    }

    /// Items carrying a property.
    pub fn items_with(&self, prop: Property) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |item| item.has(prop))
    }

    /// Object tiles (not words) with the given name.
    pub fn objects_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items.iter().filter(move |item| !item.is_text && item.name == name)
    }

    /// Check whether a cell lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.width && pos.1 < self.height
    }
}

/// Outcome of one `step`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// The state after the turn.
    pub state: GameState,

    /// Whether any phase changed the board or the status changed.
    pub changed: bool,
}
