//! Normalized rules and rule sets.
//!
//! A `Rule` is one (subject, kind, object) triple with its negations and
//! an optional condition. Rules only exist for the duration of one rule
//! pass: they are rebuilt from the board every time it may have changed.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::word::{Relation, GROUP};
use crate::core::Property;

/// What a rule does with its object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// `X IS <property>`
    Property,
    /// `X IS <noun>`
    Transform,
    /// `X HAS Y`: spawn Y when X is destroyed.
    Has,
    /// `X MAKE Y`: spawn Y on X every turn.
    Make,
    /// `X EAT Y`: destroy Y sharing a cell with X.
    Eat,
    /// `X WRITE W`: spawn word tile W on X every turn.
    Write,
}

impl RuleKind {
    /// The operator word that produces this kind.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            RuleKind::Property | RuleKind::Transform => "is",
            RuleKind::Has => "has",
            RuleKind::Make => "make",
            RuleKind::Eat => "eat",
            RuleKind::Write => "write",
        }
    }
}

/// A condition restricting which items a rule's subject matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Condition {
    /// No other item shares the cell.
    Lonely { negated: bool },
    /// An item matching `object` is on / near / faced by the subject.
    Relation {
        relation: Relation,
        object: String,
        object_negated: bool,
    },
}

impl Condition {
    /// Build a relation condition.
    pub fn relation(relation: Relation, object: impl Into<String>, object_negated: bool) -> Self {
        Condition::Relation {
            relation,
            object: object.into(),
            object_negated,
        }
    }
}

/// A normalized rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub subject: String,
    #[serde(default)]
    pub subject_negated: bool,
    pub object: String,
    #[serde(default)]
    pub object_negated: bool,
    pub kind: RuleKind,
    #[serde(default)]
    pub condition: Option<Condition>,
}

impl Rule {
    /// Create an unconditioned, non-negated rule.
    pub fn new(subject: impl Into<String>, kind: RuleKind, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            subject_negated: false,
            object: object.into(),
            object_negated: false,
            kind,
            condition: None,
        }
    }

    /// `subject IS property`.
    pub fn property(subject: impl Into<String>, prop: Property) -> Self {
        Self::new(subject, RuleKind::Property, prop.as_str())
    }

    /// Negate the subject.
    #[must_use]
    pub fn not_subject(mut self) -> Self {
        self.subject_negated = true;
        self
    }

    /// Negate the object.
    #[must_use]
    pub fn not_object(mut self) -> Self {
        self.object_negated = true;
        self
    }

    /// Attach a condition.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// The object as a property, for `Property` rules.
    #[must_use]
    pub fn object_property(&self) -> Option<Property> {
        match self.kind {
            RuleKind::Property => Property::from_word(&self.object),
            _ => None,
        }
    }

    /// Whether this rule has no condition.
    #[must_use]
    pub fn is_unconditioned(&self) -> bool {
        self.condition.is_none()
    }

    /// Whether this is a plain `subject IS prop` with no negation or condition.
    #[must_use]
    pub fn is_plain_property(&self, subject: &str, prop: Property) -> bool {
        self.kind == RuleKind::Property
            && self.subject == subject
            && !self.subject_negated
            && !self.object_negated
            && self.is_unconditioned()
            && self.object == prop.as_str()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let not = |negated: bool| if negated { "not " } else { "" };

        if let Some(Condition::Lonely { negated }) = &self.condition {
            write!(f, "{}lonely ", not(*negated))?;
        }
        write!(f, "{}{}", not(self.subject_negated), self.subject)?;
        if let Some(Condition::Relation {
            relation,
            object,
            object_negated,
        }) = &self.condition
        {
            write!(f, " {} {}{}", relation.as_str(), not(*object_negated), object)?;
        }
        write!(
            f,
            " {} {}{}",
            self.kind.verb(),
            not(self.object_negated),
            self.object
        )
    }
}

/// An ordered, duplicate-free collection of rules.
///
/// Insertion order is preserved; inserting a rule that is already present
/// is a silent no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    seen: FxHashSet<Rule>,
    group: Vec<String>,
}

impl RuleSet {
    /// Create an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule. Returns false if it was already present.
    pub fn insert(&mut self, rule: Rule) -> bool {
        if self.seen.contains(&rule) {
            return false;
        }
        if is_group_declaration(&rule) && !self.group.contains(&rule.subject) {
            self.group.push(rule.subject.clone());
        }
        self.seen.insert(rule.clone());
        self.rules.push(rule);
        true
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, rule: &Rule) -> bool {
        self.seen.contains(rule)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Rules of one kind, in insertion order.
    pub fn of_kind(&self, kind: RuleKind) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.kind == kind)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Nouns declared `X IS GROUP`, in declaration order.
    #[must_use]
    pub fn group_members(&self) -> &[String] {
        &self.group
    }

    /// The rules as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = Self::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// `N IS GROUP` for a concrete noun, non-negated and unconditioned.
fn is_group_declaration(rule: &Rule) -> bool {
    rule.kind == RuleKind::Transform
        && rule.object == GROUP
        && !rule.object_negated
        && !rule.subject_negated
        && rule.is_unconditioned()
        && !super::word::is_reserved(&rule.subject)
}
