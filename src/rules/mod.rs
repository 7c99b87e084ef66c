//! Rule grammar: word classes, normalized rules, and extraction.
//!
//! Sentences are read off the word tiles of the current board every time
//! the board may have changed. Nothing here carries state across passes.

pub mod word;
pub mod rule;
pub mod extract;

pub use word::{Operator, Relation, Word, ALL, EMPTY, GROUP, LEVEL, TEXT};
pub use rule::{Condition, Rule, RuleKind, RuleSet};
pub use extract::extract_rules;
