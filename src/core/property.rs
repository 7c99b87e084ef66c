//! Property tags derived from `NOUN IS PROPERTY` rules.
//!
//! Properties are never stored as standing facts. Every rule pass
//! computes a fresh `PropertySet` per item and replaces the old one.
//!
//! ## Storage
//!
//! There are fewer than 32 properties, so a set is a single `u32` bitmask.
//! Iteration yields properties in declaration order, which doubles as the
//! sorted display order.

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A property word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    You,
    Win,
    Stop,
    Push,
    Pull,
    Swap,
    Move,
    Shift,
    Sink,
    Defeat,
    Hot,
    Melt,
    Open,
    Shut,
    Weak,
    Float,
    Tele,
    Sleep,
    Fall,
    More,
    Up,
    Right,
    Down,
    Left,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 24] = [
        Property::You,
        Property::Win,
        Property::Stop,
        Property::Push,
        Property::Pull,
        Property::Swap,
        Property::Move,
        Property::Shift,
        Property::Sink,
        Property::Defeat,
        Property::Hot,
        Property::Melt,
        Property::Open,
        Property::Shut,
        Property::Weak,
        Property::Float,
        Property::Tele,
        Property::Sleep,
        Property::Fall,
        Property::More,
        Property::Up,
        Property::Right,
        Property::Down,
        Property::Left,
    ];

    /// The word naming this property.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Property::You => "you",
            Property::Win => "win",
            Property::Stop => "stop",
            Property::Push => "push",
            Property::Pull => "pull",
            Property::Swap => "swap",
            Property::Move => "move",
            Property::Shift => "shift",
            Property::Sink => "sink",
            Property::Defeat => "defeat",
            Property::Hot => "hot",
            Property::Melt => "melt",
            Property::Open => "open",
            Property::Shut => "shut",
            Property::Weak => "weak",
            Property::Float => "float",
            Property::Tele => "tele",
            Property::Sleep => "sleep",
            Property::Fall => "fall",
            Property::More => "more",
            Property::Up => "up",
            Property::Right => "right",
            Property::Down => "down",
            Property::Left => "left",
        }
    }

    /// Look up a property by word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == word)
    }

    /// The facing this property forces, for the four direction properties.
    #[must_use]
    pub const fn facing(self) -> Option<Direction> {
        match self {
            Property::Up => Some(Direction::Up),
            Property::Right => Some(Direction::Right),
            Property::Down => Some(Direction::Down),
            Property::Left => Some(Direction::Left),
            _ => None,
        }
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of properties.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertySet(u32);

impl PropertySet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Check membership.
    #[must_use]
    pub const fn has(self, prop: Property) -> bool {
        self.0 & prop.bit() != 0
    }

    /// Add a property.
    pub fn insert(&mut self, prop: Property) {
        self.0 |= prop.bit();
    }

    /// Remove a property.
    pub fn remove(&mut self, prop: Property) {
        self.0 &= !prop.bit();
    }

    /// Set difference.
    #[must_use]
    pub const fn without(self, other: PropertySet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether no property is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of properties in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Property> {
        Property::ALL.into_iter().filter(move |p| self.has(*p))
    }

    /// Solid items (`stop`, `push`, `pull`) occupy their cell for movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        self.has(Property::Stop) || self.has(Property::Push) || self.has(Property::Pull)
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = Self::empty();
        for prop in iter {
            set.insert(prop);
        }
        set
    }
}
