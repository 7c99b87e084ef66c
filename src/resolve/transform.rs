//! `X IS Y` transforms.
//!
//! All transforms of a turn are planned against the same board and then
//! applied together, so `BABA IS ROCK` and `ROCK IS BABA` swap the two
//! kinds instead of chaining.
//!
//! ## Outcomes per item
//!
//! | options after negation | result |
//! |---|---|
//! | none, or only the item's own signature | untouched |
//! | own signature plus others | kept, one sibling per other |
//! | others only | replaced, one new item per option |
//! | none, with `X IS EMPTY` | destroyed |
//!
//! `EMPTY IS Y` fills every vacant cell with `Y`.

use crate::board::Board;
use crate::core::{Direction, Item, ItemId, Pos, Signature};
use crate::matching::RuleContext;
use crate::rules::{RuleKind, RuleSet, ALL, EMPTY, GROUP, TEXT};

use super::spawn::destroy_items;

/// What one item becomes.
#[derive(Debug, Default)]
struct Plan {
    options: Vec<Signature>,
    destroy: bool,
}

impl Plan {
    fn add(&mut self, target: Signature) {
        if !self.options.contains(&target) {
            self.options.push(target);
        }
    }
}

/// Apply every transform rule at once.
///
/// Returns true if any item was replaced, spawned, or destroyed.
pub fn apply_transforms(board: &mut Board, rules: &RuleSet) -> bool {
    let mut removals: Vec<ItemId> = Vec::new();
    let mut destroyed: Vec<ItemId> = Vec::new();
    let mut spawns: Vec<(Signature, Pos, Option<Direction>)> = Vec::new();

    {
        let ctx = RuleContext::new(board, rules);

        for item in board.items() {
            let plan = plan_for(&ctx, item);
            let own = item.signature();
            let keep = plan.options.contains(&own);
            let others: Vec<&Signature> = plan.options.iter().filter(|sig| **sig != own).collect();

            if others.is_empty() {
                if plan.destroy && !keep {
                    destroyed.push(item.id);
                }
                continue;
            }
            if !keep {
                removals.push(item.id);
            }
            for sig in others {
                spawns.push((sig.clone(), item.pos(), item.dir));
            }
        }

        for sig in empty_targets(&ctx) {
            for pos in board.vacant_cells() {
                spawns.push((sig.clone(), pos, None));
            }
        }
    }

    let changed = !removals.is_empty() || !destroyed.is_empty() || !spawns.is_empty();

    for id in removals {
        board.remove(id);
    }
    for (signature, pos, dir) in &spawns {
        board.spawn(signature, *pos, *dir);
    }
    destroy_items(board, rules, &destroyed);

    changed
}

fn plan_for(ctx: &RuleContext<'_>, item: &Item) -> Plan {
    let mut wanted = Plan::default();
    let mut denied = Plan::default();

    for rule in ctx.rules_for(item, RuleKind::Transform) {
        let plan = if rule.object_negated { &mut denied } else { &mut wanted };
        match rule.object.as_str() {
            GROUP => {}
            EMPTY => plan.destroy = true,
            object => {
                for target in ctx.targets(item, object) {
                    plan.add(target);
                }
            }
        }
    }

    wanted.options.retain(|sig| !denied.options.contains(sig));
    wanted.destroy &= !denied.destroy;
    wanted
}

/// Signatures `EMPTY IS Y` spawns this turn.
fn empty_targets(ctx: &RuleContext<'_>) -> Vec<Signature> {
    let mut wanted = Plan::default();
    let mut denied = Vec::new();

    let empty_rules = ctx.rules.of_kind(RuleKind::Transform).filter(|rule| {
        rule.subject == EMPTY && !rule.subject_negated && rule.is_unconditioned()
    });
    for rule in empty_rules {
        let targets: Vec<Signature> = match rule.object.as_str() {
            GROUP | EMPTY => Vec::new(),
            TEXT => vec![Signature::text(EMPTY)],
            ALL => ctx
                .present_objects()
                .iter()
                .map(|name| Signature::object(*name))
                .collect(),
            noun => vec![Signature::object(noun)],
        };
        for target in targets {
            if rule.object_negated {
                denied.push(target);
            } else {
                wanted.add(target);
            }
        }
    }

    wanted.options.retain(|sig| !denied.contains(sig));
    wanted.options
}
