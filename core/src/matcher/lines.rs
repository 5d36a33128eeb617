//! Line-variable and point-on-line shapes (para, perp, eqangle)

use super::{combinations, permutations, Binding, Match};
use crate::ir::{Fact, Incidence, Predicate};
use std::collections::BTreeSet;

fn pairs(fact: &Fact) -> Vec<(&str, &str)> {
    fact.args
        .chunks(2)
        .filter_map(|c| match c {
            [a, b] => Some((a.as_str(), b.as_str())),
            _ => None,
        })
        .collect()
}

/// Pair indices covered by each chosen group of `group` pairs
fn expand(chosen: &[usize], group: usize) -> Vec<usize> {
    chosen
        .iter()
        .flat_map(|&g| (0..group).map(move |k| g * group + k))
        .collect()
}

/// Lowercase patterns: each variable takes a whole ground pair.
///
/// para and perp try every ordering of ground pairs; eqangle keeps angles in
/// order. A variable bound earlier must name the same known line.
pub(super) fn match_lines(incidence: &Incidence, pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    let ground = pairs(fact);
    let selections: Vec<(Vec<usize>, Vec<usize>)> = if pat.pred == Predicate::Eqangle {
        combinations(ground.len() / 2, pat.args.len() / 2)
            .into_iter()
            .map(|c| (expand(&c, 2), c))
            .collect()
    } else {
        permutations(ground.len(), pat.args.len())
            .into_iter()
            .map(|c| (c.clone(), c))
            .collect()
    };

    let mut out = Vec::new();
    for (pair_idx, parts) in selections {
        let mut binding = inst.clone();
        let ok = pat.args.iter().zip(&pair_idx).all(|(var, &pi)| {
            let (a, b) = ground[pi];
            if let Some(bound) = binding.line(var) {
                incidence.same_line(bound, (a, b))
            } else if binding.contains(var) {
                false
            } else {
                binding.bind_line(var, a, b);
                true
            }
        });
        if ok {
            out.push(Match::new(binding, parts));
        }
    }
    out
}

/// Points of `line` that `var` may take
fn candidates<'a>(binding: &'a Binding, committed: &BTreeSet<&str>, line: &'a [String], var: &str) -> Vec<&'a str> {
    match binding.point(var) {
        Some(p) if line.iter().any(|q| q == p) => vec![p],
        Some(_) => Vec::new(),
        None if binding.contains(var) => Vec::new(),
        None => line
            .iter()
            .map(String::as_str)
            .filter(|q| !committed.contains(q))
            .collect(),
    }
}

/// Bind a pattern pair to two distinct points of `line`
fn place_pair(binding: &Binding, pat: &[String], line: &[String]) -> Vec<Binding> {
    let [va, vb] = pat else {
        return Vec::new();
    };
    let committed = binding.committed();
    let xs = candidates(binding, &committed, line, va);
    let ys = candidates(binding, &committed, line, vb);
    let mut out = Vec::new();
    for x in &xs {
        for y in &ys {
            if x == y {
                continue;
            }
            let mut t = binding.clone();
            t.bind_point(va, x);
            t.bind_point(vb, y);
            out.push(t);
        }
    }
    out
}

/// Uppercase patterns: each pattern pair takes two points on the known line
/// through the chosen ground pair. Free variables avoid points already
/// committed to other variables.
pub(super) fn match_points_on_lines(
    incidence: &Incidence,
    pat: &Fact,
    fact: &Fact,
    inst: &Binding,
) -> Vec<Match> {
    let ground = pairs(fact);
    let group = if pat.pred == Predicate::Eqangle { 2 } else { 1 };
    let pat_pairs: Vec<&[String]> = pat.args.chunks(2).collect();

    let mut out = Vec::new();
    for chosen in combinations(ground.len() / group, pat_pairs.len() / group) {
        let mut partial = vec![inst.clone()];
        for (pp, pi) in pat_pairs.iter().zip(expand(&chosen, group)) {
            let (a, b) = ground[pi];
            let line = incidence.line_points(a, b);
            partial = partial
                .iter()
                .flat_map(|t| place_pair(t, pp, &line))
                .collect();
            if partial.is_empty() {
                break;
            }
        }
        out.extend(partial.into_iter().map(|b| Match::new(b, chosen.clone())));
    }
    out
}
