//! Rule application
//!
//! Assumptions are matched left to right, each match narrowing the bindings
//! of the previous ones. Every surviving binding yields one conclusion,
//! which is then admitted into the hypothesis collection: dropped when
//! trivial or already implied, otherwise appended, shadowing what it implies
//! and merging with what it overlaps.

use super::fixpoint::Prover;
use crate::geometry::{Combine, Detect};
use crate::ir::{is_line_var, Fact, FactId, Lemma};
use crate::matcher::{Binding, Matcher};
use crate::rules::Rule;
use rustc_hash::FxHashSet;
use tracing::trace;

/// A binding together with the facts that supplied each assumption
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(super) struct Instance {
    pub binding: Binding,
    pub sources: Vec<FactId>,
}

impl Prover {
    /// Extend each partial instance by matching `pat` against fact `id`
    fn extend(&self, pat: &Fact, id: FactId, partial: &[Instance]) -> Vec<Instance> {
        let matcher = Matcher::new(&self.incidence);
        let mut seen = FxHashSet::default();
        let mut out = Vec::new();
        for inst in partial {
            for (binding, source) in matcher.match_fact(&self.hyps, pat, id, &inst.binding) {
                let mut sources = inst.sources.clone();
                sources.push(source);
                let next = Instance { binding, sources };
                if seen.insert(next.clone()) {
                    out.push(next);
                }
            }
        }
        out
    }

    /// Match `assums` against `facts` position by position
    pub(super) fn match_assumptions(&self, assums: &[Fact], facts: &[FactId]) -> Vec<Instance> {
        let mut insts = vec![Instance::default()];
        for (pat, &id) in assums.iter().zip(facts) {
            insts = self.extend(pat, id, &insts);
            if insts.is_empty() {
                break;
            }
        }
        insts
    }

    /// Ordered selections of distinct active facts below `horizon` with at
    /// least one match, in lexicographic id order
    fn selections(&self, assums: &[Fact], horizon: FactId) -> Vec<(Vec<FactId>, Vec<Instance>)> {
        let mut out = Vec::new();
        let mut chosen = Vec::with_capacity(assums.len());
        self.select(assums, horizon, &mut chosen, vec![Instance::default()], &mut out);
        out
    }

    fn select(
        &self,
        assums: &[Fact],
        horizon: FactId,
        chosen: &mut Vec<FactId>,
        partial: Vec<Instance>,
        out: &mut Vec<(Vec<FactId>, Vec<Instance>)>,
    ) {
        let Some((pat, rest)) = assums.split_first() else {
            out.push((chosen.clone(), partial));
            return;
        };
        let candidates = self
            .hyps
            .active_of(pat.pred)
            .map(|(id, _)| id)
            .take_while(|&id| id < horizon);
        for id in candidates {
            if chosen.contains(&id) {
                continue;
            }
            let next = self.extend(pat, id, &partial);
            if next.is_empty() {
                continue;
            }
            chosen.push(id);
            self.select(rest, horizon, chosen, next, out);
            chosen.pop();
        }
    }

    /// Apply `rule` to every selection of facts that were active when the
    /// round started, i.e. below `horizon`
    pub(super) fn apply_to_all(&mut self, name: &str, rule: &Rule, horizon: FactId, only_updated: bool) {
        for (selection, insts) in self.selections(&rule.assums, horizon) {
            if selection.iter().any(|&id| self.hyps[id].is_shadowed()) {
                continue;
            }
            if only_updated && !selection.iter().any(|&id| self.hyps[id].updated) {
                continue;
            }
            let added = self.apply_instances(name, rule, insts);
            if !added.is_empty() {
                trace!(rule = name, ?selection, added = added.len(), "rule fired");
            }
        }
    }

    /// Admit the conclusion of every instance
    pub(super) fn apply_instances(&mut self, name: &str, rule: &Rule, insts: Vec<Instance>) -> Vec<FactId> {
        let mut added = Vec::new();
        for inst in insts {
            for args in self.conclusions(rule, &inst.binding) {
                let fact = Fact::derived(
                    rule.concl.pred,
                    args,
                    Lemma::Rule(name.to_string()),
                    inst.sources.clone(),
                );
                added.extend(self.admit(fact));
            }
        }
        added
    }

    /// Conclusion arguments under `binding`, one set per known line when the
    /// rule extends over lines
    fn conclusions(&self, rule: &Rule, binding: &Binding) -> Vec<Vec<String>> {
        match &rule.line_extension {
            None => instantiate(&rule.concl, binding).into_iter().collect(),
            Some([p, q]) => self
                .incidence
                .lines()
                .iter()
                .filter_map(|line| {
                    let (a, b) = line.endpoints()?;
                    let mut extended = binding.clone();
                    extended.bind_point(p, a);
                    extended.bind_point(q, b);
                    instantiate(&rule.concl, &extended)
                })
                .collect(),
        }
    }

    /// Add `fact` unless it is trivial or implied. Returns every appended id:
    /// the fact itself, then each merge it took part in.
    fn admit(&mut self, fact: Fact) -> Vec<FactId> {
        if self.incidence.check_trivial(&fact) {
            return Vec::new();
        }
        let known = self
            .hyps
            .iter()
            .any(|(_, h)| !h.is_shadowed() && self.incidence.check_imply(h, &fact));
        if known {
            return Vec::new();
        }

        let old_len = self.hyps.len();
        let mut current = self.hyps.push(fact);
        trace!(id = %current, fact = %self.hyps[current], "admitted");
        let mut added = vec![current];

        for i in 0..old_len {
            let target = FactId(i as u32);
            if self.hyps[target].is_shadowed() {
                continue;
            }
            if self.incidence.check_imply(&self.hyps[current], &self.hyps[target]) {
                self.hyps.shadow(target);
                trace!(id = %target, by = %current, "shadowed");
                continue;
            }
            if let Some(mut merged) = self
                .incidence
                .combine_facts(&self.hyps[current], &self.hyps[target])
            {
                merged.cond = vec![current, target];
                self.hyps.shadow(current);
                self.hyps.shadow(target);
                current = self.hyps.push(merged);
                trace!(id = %current, fact = %self.hyps[current], "merged");
                added.push(current);
            }
        }
        added
    }
}

/// Concrete arguments for `concl`; line variables expand to their two points
fn instantiate(concl: &Fact, binding: &Binding) -> Option<Vec<String>> {
    let mut args = Vec::with_capacity(concl.args.len() * 2);
    for var in &concl.args {
        if is_line_var(var) {
            let (a, b) = binding.line(var)?;
            args.push(a.to_string());
            args.push(b.to_string());
        } else {
            args.push(binding.point(var)?.to_string());
        }
    }
    Some(args)
}
