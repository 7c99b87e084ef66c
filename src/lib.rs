//! # rust-wordgrid
//!
//! A grid puzzle engine where the rules are written on the board. Word
//! tiles form sentences (`BABA IS YOU`, `ROCK IS PUSH`, `WALL HAS KEY`)
//! that are read off the grid every turn and decide what moves, what
//! transforms, what wins, and what is destroyed.
//!
//! ## Design Principles
//!
//! 1. **States Are Values**: `step` takes a `GameState` and returns a new
//!    one. Undo is just keeping old states; `im` makes them cheap to keep.
//!
//! 2. **No Rule State Across Turns**: rules are rebuilt from the words on
//!    the board after every phase that can move or replace a word. Only
//!    items (with their facing) and the turn counter persist.
//!
//! 3. **Deterministic**: every ordering is fixed (axis order for movers,
//!    row-major for sentences, ID order for pairing), and teleport draws
//!    come from a PCG32 seeded by the turn number.
//!
//! ## Modules
//!
//! - `core`: IDs, directions, properties, items, state, RNG, configuration
//! - `level`: level text parser and level packs
//! - `rules`: word classes, rules, and sentence extraction
//! - `matching`: which rules apply to which items
//! - `board`: the working copy a turn is resolved on
//! - `resolve`: properties, facing, transforms, and spawning
//! - `movement`: player moves, `MOVE`/`SHIFT` batches, falling
//! - `interaction`: same-cell effects and teleport
//! - `turn`: the phase pipeline and entry points
//!
//! ## Example
//!
//! ```
//! use rust_wordgrid::{create_initial_state, parse_level, step, Direction, GameStatus};
//!
//! let level = parse_level(
//!     "Size 5x3; Baba 0,0; Is 1,0; You 2,0; Flag 0,1; Is 1,1; Win 2,1; baba 0,2; flag 1,2",
//! )
//! .unwrap();
//! let state = create_initial_state(&level, 0);
//! let result = step(&state, Some(Direction::Right));
//!
//! assert!(result.changed);
//! assert_eq!(result.state.status, GameStatus::Win);
//! ```

pub mod core;
pub mod level;
pub mod rules;
pub mod matching;
pub mod board;
pub mod resolve;
pub mod movement;
pub mod interaction;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Direction, Pos,
    Property, PropertySet,
    IdAllocator, ItemId, Item, Signature,
    TeleportRng, EngineConfig,
    GameState, GameStatus, StepResult,
};

pub use crate::level::{parse_level, LevelData, LevelError, LevelItem, LevelPack};

pub use crate::rules::{extract_rules, Condition, Relation, Rule, RuleKind, RuleSet};

pub use crate::matching::RuleContext;

pub use crate::board::Board;

pub use crate::turn::{create_initial_state, mark_campaign_complete, step, Engine, Phase};
