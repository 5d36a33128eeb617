//! Cyclic and circle shapes
//!
//! The ground fact is first resolved to the known circle it lies on, so a
//! pattern may pick up any point of that circle, not just the fact's own
//! arguments.

use super::{permutations, Binding, Match};
use crate::ir::{Circle, Fact, Incidence};

/// cyclic: pattern points range over the known circle through the fact
pub(super) fn match_cyclic(incidence: &Incidence, pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    match incidence.circle_through(&fact.args, None) {
        Ok(circle) => place_on_circle(&circle, &pat.args, &fact.args, inst),
        Err(_) => Vec::new(),
    }
}

/// circle: the center binds first, then the tail matches like cyclic
pub(super) fn match_circle(incidence: &Incidence, pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    let (Some((pat_center, pat_tail)), Some((center, tail))) =
        (pat.args.split_first(), fact.args.split_first())
    else {
        return Vec::new();
    };
    let mut binding = inst.clone();
    if !binding.unify_point(pat_center, center) {
        return Vec::new();
    }
    match incidence.circle_through(tail, Some(center)) {
        Ok(circle) => place_on_circle(&circle, pat_tail, tail, &binding),
        Err(_) => Vec::new(),
    }
}

fn place_on_circle(circle: &Circle, vars: &[String], ground: &[String], inst: &Binding) -> Vec<Match> {
    let mut free: Vec<&str> = Vec::new();
    for var in vars {
        match inst.point(var) {
            Some(p) if circle.contains(p) => {}
            Some(_) => return Vec::new(),
            None if inst.contains(var) => return Vec::new(),
            None => {
                if !free.contains(&var.as_str()) {
                    free.push(var);
                }
            }
        }
    }

    let committed = inst.committed();
    let pool: Vec<&str> = circle
        .points()
        .iter()
        .map(String::as_str)
        .filter(|p| !committed.contains(p))
        .collect();

    permutations(pool.len(), free.len())
        .into_iter()
        .map(|perm| {
            let mut binding = inst.clone();
            for (var, &i) in free.iter().zip(&perm) {
                binding.bind_point(var, pool[i]);
            }
            let parts = source_parts(&binding, vars, ground);
            Match::new(binding, parts)
        })
        .collect()
}

/// Positions of the bound points in the ground fact, or every position when
/// some point only comes from the wider circle
fn source_parts(binding: &Binding, vars: &[String], ground: &[String]) -> Vec<usize> {
    let found: Option<Vec<usize>> = vars
        .iter()
        .map(|var| {
            let p = binding.point(var)?;
            ground.iter().position(|g| g == p)
        })
        .collect();
    found.unwrap_or_else(|| (0..ground.len()).collect())
}
