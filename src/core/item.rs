//! Board items - word tiles and object tiles.
//!
//! An `Item` is one tile at one cell. Word tiles (`is_text`) and object
//! tiles share a name space: the text `rock` and the object `rock` are
//! different items with the same name.
//!
//! ## Derived properties
//!
//! `props` is recomputed from the rule set on every pass and replaced
//! wholesale. Nothing in the engine edits it incrementally.

use serde::{Deserialize, Serialize};

use super::direction::{Direction, Pos};
use super::entity::ItemId;
use super::property::{Property, PropertySet};

/// The identity an item would have after a transform: name plus tile kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub is_text: bool,
}

impl Signature {
    /// An object signature.
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_text: false,
        }
    }

    /// A word-tile signature.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_text: true,
        }
    }
}

/// A tile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, never reused.
    pub id: ItemId,

    /// Noun (objects) or word (text tiles). Always lowercase.
    pub name: String,

    pub x: i32,
    pub y: i32,

    /// Word tile rather than object tile.
    pub is_text: bool,

    /// Facing. `None` reads as `Right`.
    #[serde(default)]
    pub dir: Option<Direction>,

    /// Active properties from the latest rule pass.
    #[serde(default)]
    pub props: PropertySet,
}

impl Item {
    /// Create an object tile.
    #[must_use]
    pub fn object(id: ItemId, name: impl Into<String>, pos: Pos) -> Self {
        Self {
            id,
            name: name.into(),
            x: pos.0,
            y: pos.1,
            is_text: false,
            dir: None,
            props: PropertySet::empty(),
        }
    }

    /// Create a word tile.
    #[must_use]
    pub fn text(id: ItemId, name: impl Into<String>, pos: Pos) -> Self {
        Self {
            is_text: true,
            ..Self::object(id, name, pos)
        }
    }

    /// Create an item from a signature.
    #[must_use]
    pub fn from_signature(
        id: ItemId,
        signature: &Signature,
        pos: Pos,
        dir: Option<Direction>,
    ) -> Self {
        Self {
            id,
            name: signature.name.clone(),
            x: pos.0,
            y: pos.1,
            is_text: signature.is_text,
            dir,
            props: PropertySet::empty(),
        }
    }

    /// Set the initial facing.
    #[must_use]
    pub fn facing_toward(mut self, dir: Direction) -> Self {
        self.dir = Some(dir);
        self
    }

    /// Current cell.
    #[must_use]
    pub fn pos(&self) -> Pos {
        (self.x, self.y)
    }

    /// Move to a cell.
    pub fn set_pos(&mut self, pos: Pos) {
        self.x = pos.0;
        self.y = pos.1;
    }

    /// Facing, defaulting to `Right`.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.dir.unwrap_or_default()
    }

    /// Shorthand for `props.has`.
    #[must_use]
    pub fn has(&self, prop: Property) -> bool {
        self.props.has(prop)
    }

    /// Floating items live on their own layer.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        self.has(Property::Float)
    }

    /// Name plus tile kind.
    #[must_use]
    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name.clone(),
            is_text: self.is_text,
        }
    }

    /// Whether this item has the given name and tile kind.
    #[must_use]
    pub fn is(&self, signature: &Signature) -> bool {
        self.is_text == signature.is_text && self.name == signature.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_and_text() {
        let rock = Item::object(ItemId(1), "rock", (2, 3));
        let word = Item::text(ItemId(2), "rock", (0, 0));

        assert!(!rock.is_text);
        assert!(word.is_text);
        assert_eq!(rock.pos(), (2, 3));
        assert_ne!(rock.signature(), word.signature());
        assert!(word.is(&Signature::text("rock")));
    }

    #[test]
    fn test_default_facing() {
        let baba = Item::object(ItemId(1), "baba", (0, 0));
        assert_eq!(baba.facing(), Direction::Right);

        let baba = baba.facing_toward(Direction::Up);
        assert_eq!(baba.facing(), Direction::Up);
    }

    #[test]
    fn test_floating() {
        let mut bird = Item::object(ItemId(1), "bird", (0, 0));
        assert!(!bird.is_floating());
        bird.props.insert(Property::Float);
        assert!(bird.is_floating());
    }

    #[test]
    fn test_serialization() {
        let item = Item::object(ItemId(7), "flag", (1, 1)).facing_toward(Direction::Left);
        let json = serde_json::to_string(&item).unwrap();
        let deserialized: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, deserialized);
    }
}
