//! Merging facts
//!
//! Two facts of one predicate that share an atomic part are folded into a
//! single longer fact. The merged fact records, for each of its parts, the
//! matching part index in either parent so that later matches can be traced
//! back to the parent that actually supplied them.

use super::normalize::{body, equivalent_parts, parts};
use crate::ir::{Circle, Fact, Incidence, Lemma, Line, PartMap, Predicate};

/// Merge operations over the current lines and circles
pub trait Combine {
    /// Fold `goal` into `fact` when they overlap.
    ///
    /// The result lists the parts of `fact` in order, then the parts of
    /// `goal` not already present. Its `cond` is left empty for the caller.
    fn combine_facts(&self, fact: &Fact, goal: &Fact) -> Option<Fact>;
}

impl Combine for Incidence {
    fn combine_facts(&self, fact: &Fact, goal: &Fact) -> Option<Fact> {
        if fact.pred != goal.pred {
            return None;
        }
        let pred = fact.pred;
        let overlapping = match pred {
            Predicate::Perp | Predicate::Midp | Predicate::Simtri | Predicate::Contri => false,
            Predicate::Coll => {
                let l1 = Line::new(fact.args.iter().cloned()).ok()?;
                let l2 = Line::new(goal.args.iter().cloned()).ok()?;
                l1.is_same_line(&l2)
            }
            Predicate::Cyclic => {
                let c1 = Circle::new(fact.args.iter().cloned(), None).ok()?;
                let c2 = Circle::new(goal.args.iter().cloned(), None).ok()?;
                c1.is_same_circle(&c2)
            }
            Predicate::Circle => {
                let center = fact.args.first()?;
                if goal.args.first() != Some(center) {
                    return None;
                }
                let c1 = Circle::new(body(fact).iter().cloned(), None).ok()?;
                let c2 = Circle::new(body(goal).iter().cloned(), None).ok()?;
                c1.is_same_circle(&c2)
            }
            Predicate::Cong | Predicate::Para | Predicate::Eqangle | Predicate::Eqratio => {
                let (have, other) = (parts(fact), parts(goal));
                have.iter()
                    .any(|p| other.iter().any(|q| equivalent_parts(pred, p, q, self)))
            }
        };
        if !overlapping {
            return None;
        }

        let (args, left, right) = self.merge_parts(fact, goal);
        let mut merged = Fact::derived(pred, args, Lemma::Combine, Vec::new());
        merged.left_map = Some(left);
        merged.right_map = Some(right);
        Some(merged)
    }
}

impl Incidence {
    /// Union of atomic parts with index maps into each parent
    fn merge_parts(&self, fact: &Fact, goal: &Fact) -> (Vec<String>, PartMap, PartMap) {
        let pred = fact.pred;
        let have = parts(fact);
        let other = parts(goal);

        let mut args: Vec<String> = match pred {
            Predicate::Circle => fact.args.first().cloned().into_iter().collect(),
            _ => Vec::new(),
        };
        let mut left = PartMap::new();
        let mut right = PartMap::new();

        for (i, p) in have.iter().enumerate() {
            args.extend(p.iter().cloned());
            left.push(Some(i));
            right.push(other.iter().position(|q| equivalent_parts(pred, p, q, self)));
        }
        for (j, q) in other.iter().enumerate() {
            if have.iter().any(|p| equivalent_parts(pred, p, q, self)) {
                continue;
            }
            args.extend(q.iter().cloned());
            left.push(None);
            right.push(Some(j));
        }
        (args, left, right)
    }
}
