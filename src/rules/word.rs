//! Word classes.
//!
//! Every text tile carries one word. The grammar only cares which class a
//! word belongs to:
//! - operators: `is`, `has`, `make`, `eat`, `write`
//! - connectives: `and`, `not`
//! - conditions: `on`, `near`, `facing` (infix) and `lonely` (prefix)
//! - properties (see [`Property`])
//! - nouns: everything else, including the reserved nouns below

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Property};

/// Reserved noun: every word tile.
pub const TEXT: &str = "text";
/// Reserved noun: cells without items.
pub const EMPTY: &str = "empty";
/// Reserved noun: every object tile.
pub const ALL: &str = "all";
/// Reserved noun: the nouns declared `X IS GROUP`.
pub const GROUP: &str = "group";
/// Reserved noun: the level itself.
pub const LEVEL: &str = "level";

/// A sentence operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Is,
    Has,
    Make,
    Eat,
    Write,
}

impl Operator {
    /// Parse an operator word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "is" => Some(Operator::Is),
            "has" => Some(Operator::Has),
            "make" => Some(Operator::Make),
            "eat" => Some(Operator::Eat),
            "write" => Some(Operator::Write),
            _ => None,
        }
    }

    /// Whether `word` may appear in this operator's object chain.
    ///
    /// `is` and `write` take nouns and properties; the others only nouns.
    #[must_use]
    pub fn accepts_object(self, word: Word<'_>) -> bool {
        match (self, word) {
            (_, Word::Noun(_)) => true,
            (Operator::Is | Operator::Write, Word::Property(_)) => true,
            _ => false,
        }
    }
}

/// A spatial relation between a subject and a condition object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    On,
    Near,
    Facing,
}

impl Relation {
    /// The word naming this relation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Relation::On => "on",
            Relation::Near => "near",
            Relation::Facing => "facing",
        }
    }
}

/// The grammatical class of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Word<'a> {
    Operator(Operator),
    And,
    Not,
    Lonely,
    Relation(Relation),
    Property(Property),
    Noun(&'a str),
}

impl<'a> Word<'a> {
    /// Classify a word.
    #[must_use]
    pub fn classify(word: &'a str) -> Self {
        if let Some(op) = Operator::from_word(word) {
            return Word::Operator(op);
        }
        match word {
            "and" => Word::And,
            "not" => Word::Not,
            "lonely" => Word::Lonely,
            "on" => Word::Relation(Relation::On),
            "near" => Word::Relation(Relation::Near),
            "facing" => Word::Relation(Relation::Facing),
            _ => match Property::from_word(word) {
                Some(prop) => Word::Property(prop),
                None => Word::Noun(word),
            },
        }
    }

    /// The direction this word names, if it is one of `up/right/down/left`.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        match self {
            Word::Property(prop) => prop.facing(),
            _ => None,
        }
    }
}

/// Check whether a noun is one of the reserved nouns.
#[must_use]
pub fn is_reserved(noun: &str) -> bool {
    matches!(noun, TEXT | EMPTY | ALL | GROUP | LEVEL)
}
