//! Ordered collections of levels.

use serde::{Deserialize, Serialize};

use super::error::LevelError;
use super::parser::{parse_level, LevelData};
use crate::core::GameState;
use crate::turn::create_initial_state;

/// An ordered campaign of levels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    levels: Vec<LevelData>,
}

impl LevelPack {
    /// Create a pack from parsed levels.
    #[must_use]
    pub fn new(levels: Vec<LevelData>) -> Self {
        Self { levels }
    }

    /// Parse every level text in order, stopping at the first error.
    pub fn parse<'a>(texts: impl IntoIterator<Item = &'a str>) -> Result<Self, LevelError> {
        let levels = texts.into_iter().map(parse_level).collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(levels))
    }

    /// Append a level.
    pub fn push(&mut self, level: LevelData) {
        self.levels.push(level);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels in campaign order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LevelData> {
        self.levels.iter()
    }

    /// Look up a level.
    pub fn get(&self, index: usize) -> Result<&LevelData, LevelError> {
        self.levels.get(index).ok_or(LevelError::InvalidIndex {
            index,
            len: self.levels.len(),
        })
    }

    /// Build the opening state of a level.
    pub fn initial_state(&self, index: usize) -> Result<GameState, LevelError> {
        self.get(index).map(|level| create_initial_state(level, index))
    }
}

impl FromIterator<LevelData> for LevelPack {
    fn from_iter<I: IntoIterator<Item = LevelData>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
