//! Level text, parsed levels, and level packs.

pub mod error;
pub mod parser;
pub mod pack;

pub use error::LevelError;
pub use parser::{parse_level, LevelData, LevelItem};
pub use pack::LevelPack;
