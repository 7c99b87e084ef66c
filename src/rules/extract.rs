//! Rule extraction: reading sentences off the board.
//!
//! ## Algorithm
//!
//! 1. Index every word tile by cell, in `(y, x, id)` order. A cell may hold
//!    several words; the walkers below try each of them.
//! 2. For every operator tile (same order), scan the horizontal and the
//!    vertical axis independently.
//! 3. Walk backward from the operator to collect subject chains, forward to
//!    collect the object chain.
//! 4. Emit one rule per (subject term, object term) pair.
//!
//! Subject grammar, in reading order:
//!
//! ```text
//! [NOT*] [LONELY] [NOT*] NOUN (AND [NOT*] NOUN)* [COND [NOT*] OBJ] [NOT*] OP
//! ```
//!
//! Object grammar: `OP [NOT*] WORD (AND [NOT*] WORD)*`.
//!
//! Anything that does not fit simply ends the chain. A dangling `AND` or
//! condition is dropped and whatever was read before it survives.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use super::rule::{Condition, Rule, RuleKind, RuleSet};
use super::word::{Operator, Relation, Word};
use crate::core::{Direction, Item, Pos};

/// Scan axes, in scan order.
const AXES: [Direction; 2] = [Direction::Right, Direction::Down];

/// Extract the rule set from a board.
///
/// Only word tiles are read; object tiles are ignored. Rules are returned
/// in order of first occurrence.
pub fn extract_rules<'a, I>(items: I, width: i32, height: i32) -> RuleSet
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut words: Vec<&Item> = items.into_iter().filter(|item| item.is_text).collect();
    words.sort_by_key(|item| (item.y, item.x, item.id));

    let grid = WordGrid::new(&words, width, height);
    let mut rules = RuleSet::new();

    for tile in &words {
        let Some(op) = Operator::from_word(&tile.name) else {
            continue;
        };
        for axis in AXES {
            grid.read_sentence(op, tile.pos(), axis, &mut rules);
        }
    }

    trace!(rules = rules.len(), words = words.len(), "extracted rules");
    rules
}

/// Words by cell.
struct WordGrid<'a> {
    cells: FxHashMap<Pos, SmallVec<[&'a str; 2]>>,
    width: i32,
    height: i32,
}

impl<'a> WordGrid<'a> {
    fn new(words: &[&'a Item], width: i32, height: i32) -> Self {
        let mut cells: FxHashMap<Pos, SmallVec<[&'a str; 2]>> = FxHashMap::default();
        for item in words {
            cells.entry(item.pos()).or_default().push(item.name.as_str());
        }
        Self { cells, width, height }
    }

    /// Words at a cell; empty off the board.
    fn at(&self, pos: Pos) -> &[&'a str] {
        if pos.0 < 0 || pos.1 < 0 || pos.0 >= self.width || pos.1 >= self.height {
            return &[];
        }
        match self.cells.get(&pos) {
            Some(words) => words.as_slice(),
            None => &[],
        }
    }

    fn read_sentence(&self, op: Operator, at: Pos, axis: Direction, rules: &mut RuleSet) {
        let mut chains = Vec::new();
        self.walk_subjects(
            axis.reverse().step(at),
            axis.reverse(),
            SubjectWalk::default(),
            &mut chains,
        );
        if chains.is_empty() {
            return;
        }

        let mut objects = Vec::new();
        self.walk_objects(op, axis.step(at), axis, ObjectWalk::default(), &mut objects);
        if objects.is_empty() {
            return;
        }

        for chain in &chains {
            for term in &chain.terms {
                for object in &objects {
                    rules.insert(Rule {
                        subject: term.word.clone(),
                        subject_negated: term.negated,
                        object: object.word.clone(),
                        object_negated: object.negated != chain.predicate_negated,
                        kind: kind_for(op, &object.word),
                        condition: chain.condition.clone(),
                    });
                }
            }
        }
    }

    /// Walk backward (`dir` points away from the operator).
    fn walk_subjects(
        &self,
        pos: Pos,
        dir: Direction,
        walk: SubjectWalk,
        out: &mut Vec<SubjectChain>,
    ) {
        let words = self.at(pos);
        if words.is_empty() {
            walk.finish(out);
            return;
        }
        for &word in words {
            match walk.clone().advance(word) {
                Some(next) => self.walk_subjects(dir.step(pos), dir, next, out),
                None => walk.clone().finish(out),
            }
        }
    }

    /// Walk forward from the operator.
    fn walk_objects(
        &self,
        op: Operator,
        pos: Pos,
        dir: Direction,
        walk: ObjectWalk,
        out: &mut Vec<Term>,
    ) {
        let words = self.at(pos);
        if words.is_empty() {
            walk.finish(out);
            return;
        }
        for &word in words {
            match walk.clone().advance(op, word) {
                Some(next) => self.walk_objects(op, dir.step(pos), dir, next, out),
                None => walk.clone().finish(out),
            }
        }
    }
}

fn kind_for(op: Operator, object: &str) -> RuleKind {
    match op {
        Operator::Is => match Word::classify(object) {
            Word::Property(_) => RuleKind::Property,
            _ => RuleKind::Transform,
        },
        Operator::Has => RuleKind::Has,
        Operator::Make => RuleKind::Make,
        Operator::Eat => RuleKind::Eat,
        Operator::Write => RuleKind::Write,
    }
}

/// A word with its polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Term {
    word: String,
    negated: bool,
}

/// One complete reading of a subject side.
#[derive(Clone, Debug)]
struct SubjectChain {
    /// Subject terms in reading order.
    terms: Vec<Term>,
    condition: Option<Condition>,
    /// `NOT`s between the last subject word and the operator.
    predicate_negated: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum SubjectStage {
    /// Directly before the operator: predicate `NOT`s or the last word.
    #[default]
    Suffix,
    /// A word was read; collecting the `NOT`s in front of it.
    AfterWord,
    /// Read `AND`; a noun must come next.
    AfterAnd,
    /// Read a relation word; the subject noun must come next.
    AfterRelation,
    /// Read `LONELY`; only `NOT`s may precede it.
    AfterLonely,
}

/// A word read backward that has not yet been committed.
#[derive(Clone, Debug)]
struct Pending {
    word: String,
    nots: u32,
    /// Direction words may only serve as a `FACING` object.
    is_direction: bool,
}

/// Backward subject walker state.
#[derive(Clone, Debug, Default)]
struct SubjectWalk {
    /// Committed terms, in backward order.
    terms: Vec<Term>,
    pending: Option<Pending>,
    condition: Option<Condition>,
    predicate_nots: u32,
    stage: SubjectStage,
}

impl SubjectWalk {
    /// Consume one word (reading backward). `None` ends the chain.
    fn advance(mut self, word: &str) -> Option<Self> {
        let class = Word::classify(word);
        match self.stage {
            SubjectStage::Suffix => match class {
                Word::Not => {
                    self.predicate_nots += 1;
                    Some(self)
                }
                Word::Noun(_) => {
                    self.read_word(word, false);
                    Some(self)
                }
                _ if class.direction().is_some() => {
                    self.read_word(word, true);
                    Some(self)
                }
                _ => None,
            },
            SubjectStage::AfterWord => match class {
                Word::Not => {
                    if let Some(pending) = self.pending.as_mut() {
                        pending.nots += 1;
                    }
                    Some(self)
                }
                Word::And => {
                    self.commit()?;
                    self.stage = SubjectStage::AfterAnd;
                    Some(self)
                }
                Word::Relation(relation) if self.condition.is_none() && self.terms.is_empty() => {
                    let pending = self.pending.take()?;
                    if pending.is_direction && relation != Relation::Facing {
                        return None;
                    }
                    let negated = pending.nots % 2 == 1;
                    self.condition = Some(Condition::relation(relation, pending.word, negated));
                    self.stage = SubjectStage::AfterRelation;
                    Some(self)
                }
                Word::Lonely if self.condition.is_none() => {
                    self.commit()?;
                    self.condition = Some(Condition::Lonely { negated: false });
                    self.stage = SubjectStage::AfterLonely;
                    Some(self)
                }
                _ => None,
            },
            SubjectStage::AfterAnd | SubjectStage::AfterRelation => match class {
                Word::Noun(_) => {
                    self.read_word(word, false);
                    Some(self)
                }
                _ => None,
            },
            SubjectStage::AfterLonely => match class {
                Word::Not => {
                    if let Some(Condition::Lonely { negated }) = self.condition.as_mut() {
                        *negated = !*negated;
                    }
                    Some(self)
                }
                _ => None,
            },
        }
    }

    fn read_word(&mut self, word: &str, is_direction: bool) {
        self.pending = Some(Pending {
            word: word.to_string(),
            nots: 0,
            is_direction,
        });
        self.stage = SubjectStage::AfterWord;
    }

    /// Move the pending word into `terms`. Fails for direction words.
    fn commit(&mut self) -> Option<()> {
        let pending = self.pending.take()?;
        if pending.is_direction {
            return None;
        }
        self.terms.push(Term {
            word: pending.word,
            negated: pending.nots % 2 == 1,
        });
        Some(())
    }

    /// End the walk, emitting a chain if any subject was read.
    fn finish(mut self, out: &mut Vec<SubjectChain>) {
        // A lone direction word is not a subject.
        if self.pending.is_some() && self.commit().is_none() {
            return;
        }
        // Also covers a condition with nothing in front of it.
        if self.terms.is_empty() {
            return;
        }
        self.terms.reverse();
        out.push(SubjectChain {
            terms: self.terms,
            condition: self.condition,
            predicate_negated: self.predicate_nots % 2 == 1,
        });
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ObjectStage {
    #[default]
    ExpectWord,
    AfterWord,
}

/// Forward object walker state.
#[derive(Clone, Debug, Default)]
struct ObjectWalk {
    terms: Vec<Term>,
    nots: u32,
    stage: ObjectStage,
}

impl ObjectWalk {
    fn advance(mut self, op: Operator, word: &str) -> Option<Self> {
        let class = Word::classify(word);
        match self.stage {
            ObjectStage::ExpectWord => match class {
                Word::Not => {
                    self.nots += 1;
                    Some(self)
                }
                _ if op.accepts_object(class) => {
                    self.terms.push(Term {
                        word: word.to_string(),
                        negated: self.nots % 2 == 1,
                    });
                    self.nots = 0;
                    self.stage = ObjectStage::AfterWord;
                    Some(self)
                }
                _ => None,
            },
            ObjectStage::AfterWord => match class {
                Word::And => {
                    self.stage = ObjectStage::ExpectWord;
                    Some(self)
                }
                _ => None,
            },
        }
    }

    /// Union this walk's terms into `out`.
    fn finish(self, out: &mut Vec<Term>) {
        for term in self.terms {
            if !out.contains(&term) {
                out.push(term);
            }
        }
    }
}
