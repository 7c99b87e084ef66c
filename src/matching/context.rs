//! Rule matching context.
//!
//! A `RuleContext` answers "does this rule apply to this item?" for one
//! rule pass. It borrows the board and rule set, and precomputes the
//! group set and the object names present on the board. It is rebuilt
//! after every phase that may have changed either.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Item, Property, PropertySet, Signature};
use crate::rules::{Rule, RuleKind, RuleSet, ALL, EMPTY, GROUP, LEVEL, TEXT};

/// Traits of empty cells, from `EMPTY IS PUSH` / `EMPTY IS STOP`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyTraits {
    pub push: bool,
    pub stop: bool,
}

/// Matching context for one rule pass.
pub struct RuleContext<'a> {
    /// The board being matched against.
    pub board: &'a Board,
    /// The rules extracted from it.
    pub rules: &'a RuleSet,
    group: FxHashSet<&'a str>,
    present: Vec<&'a str>,
}

impl<'a> RuleContext<'a> {
    /// Build a context.
    pub fn new(board: &'a Board, rules: &'a RuleSet) -> Self {
        let group = rules.group_members().iter().map(String::as_str).collect();

        let mut seen = FxHashSet::default();
        let mut present = Vec::new();
        for item in board.items().filter(|item| !item.is_text) {
            if seen.insert(item.name.as_str()) {
                present.push(item.name.as_str());
            }
        }

        Self {
            board,
            rules,
            group,
            present,
        }
    }

    /// Object names on the board, in order of first appearance.
    #[must_use]
    pub fn present_objects(&self) -> &[&'a str] {
        &self.present
    }

    /// Whether a noun is a declared group member.
    #[must_use]
    pub fn is_group_member(&self, noun: &str) -> bool {
        self.group.contains(noun)
    }

    // === Subject matching ===

    /// Whether `item` is named by `noun`, ignoring negation and conditions.
    #[must_use]
    pub fn matches_noun(&self, item: &Item, noun: &str) -> bool {
        match noun {
            TEXT => item.is_text,
            EMPTY => false,
            ALL => !item.is_text,
            GROUP => !item.is_text && self.is_group_member(&item.name),
            _ => !item.is_text && item.name == noun,
        }
    }

    /// Whether a rule's subject (with negation and condition) selects `item`.
    #[must_use]
    pub fn matches_subject(&self, item: &Item, rule: &Rule) -> bool {
        let named = if rule.subject_negated {
            !item.is_text && !self.matches_noun(item, &rule.subject)
        } else {
            self.matches_noun(item, &rule.subject)
        };
        named
            && rule
                .condition
                .as_ref()
                .map_or(true, |condition| self.condition_holds(item, condition))
    }

    /// Rules of one kind that apply to `item`, in rule order.
    pub fn rules_for<'s>(
        &'s self,
        item: &'s Item,
        kind: RuleKind,
    ) -> impl Iterator<Item = &'a Rule> + 's {
        self.rules
            .of_kind(kind)
            .filter(move |rule| self.matches_subject(item, rule))
    }

    /// Properties an item gets from the current rules.
    ///
    /// Word tiles start out pushable. Negated rules subtract from the
    /// union of the positive ones.
    #[must_use]
    pub fn properties_of(&self, item: &Item) -> PropertySet {
        let mut granted = PropertySet::empty();
        let mut denied = PropertySet::empty();
        if item.is_text {
            granted.insert(Property::Push);
        }
        for rule in self.rules_for(item, RuleKind::Property) {
            if let Some(prop) = rule.object_property() {
                if rule.object_negated {
                    denied.insert(prop);
                } else {
                    granted.insert(prop);
                }
            }
        }
        granted.without(denied)
    }

    // === Targets ===

    /// Signatures a noun object expands to for `item`.
    ///
    /// `text` means the item's own name as a word tile, `all` every object
    /// name on the board, and `group` every member. `empty` expands to
    /// nothing.
    #[must_use]
    pub fn targets(&self, item: &Item, object: &str) -> SmallVec<[Signature; 2]> {
        match object {
            TEXT => smallvec::smallvec![Signature::text(item.name.clone())],
            EMPTY => SmallVec::new(),
            ALL => self.present.iter().map(|name| Signature::object(*name)).collect(),
            GROUP => self
                .rules
                .group_members()
                .iter()
                .map(|name| Signature::object(name.clone()))
                .collect(),
            noun => smallvec::smallvec![Signature::object(noun)],
        }
    }

    /// Signatures the rules of `kind` produce for `item`: the targets of
    /// the matching rules minus those of the matching negated rules.
    #[must_use]
    pub fn spawn_targets(&self, item: &Item, kind: RuleKind) -> Vec<Signature> {
        let mut wanted: Vec<Signature> = Vec::new();
        let mut denied: Vec<Signature> = Vec::new();
        for rule in self.rules_for(item, kind) {
            let targets = match kind {
                RuleKind::Write => smallvec::smallvec![Signature::text(rule.object.clone())],
                _ => self.targets(item, &rule.object),
            };
            let bucket = if rule.object_negated { &mut denied } else { &mut wanted };
            for target in targets {
                if !bucket.contains(&target) {
                    bucket.push(target);
                }
            }
        }
        wanted.retain(|target| !denied.contains(target));
        wanted
    }

    // === Level-wide rules ===

    /// Traits empty cells have for movement.
    #[must_use]
    pub fn empty_traits(&self) -> EmptyTraits {
        EmptyTraits {
            push: self.holds_plain(EMPTY, Property::Push),
            stop: self.holds_plain(EMPTY, Property::Stop),
        }
    }

    /// Whether an unconditioned `LEVEL IS WIN` holds.
    #[must_use]
    pub fn level_wins(&self) -> bool {
        self.holds_plain(LEVEL, Property::Win)
            && !self.rules.iter().any(|rule| {
                rule.kind == RuleKind::Property
                    && rule.subject == LEVEL
                    && !rule.subject_negated
                    && rule.object_negated
                    && rule.is_unconditioned()
                    && rule.object == Property::Win.as_str()
            })
    }

    fn holds_plain(&self, subject: &str, prop: Property) -> bool {
        self.rules.iter().any(|rule| rule.is_plain_property(subject, prop))
    }
}
