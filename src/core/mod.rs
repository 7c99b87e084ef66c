//! Core engine types: item IDs, directions, properties, items, state, RNG,
//! configuration.
//!
//! Everything here is plain data. The rule and turn machinery in the other
//! modules reads and produces these types.

pub mod entity;
pub mod direction;
pub mod property;
pub mod item;
pub mod rng;
pub mod config;
pub mod state;

pub use entity::{IdAllocator, ItemId};
pub use direction::{Direction, Pos};
pub use property::{Property, PropertySet};
pub use item::{Item, Signature};
pub use rng::TeleportRng;
pub use config::EngineConfig;
pub use state::{GameState, GameStatus, StepResult};
