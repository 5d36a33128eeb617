//! Point, segment and triangle shapes
//!
//! None of these consult the incidence: points are compared by name.

use super::{combinations, Binding, Match};
use crate::ir::{Fact, Predicate};

/// coll, midp: ordered subsequences of the ground arguments
pub(super) fn match_points(pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    combinations(fact.args.len(), pat.args.len())
        .into_iter()
        .filter_map(|chosen| {
            let mut binding = inst.clone();
            let ok = pat
                .args
                .iter()
                .zip(&chosen)
                .all(|(var, &i)| binding.unify_point(var, &fact.args[i]));
            ok.then(|| Match::new(binding, chosen))
        })
        .collect()
}

/// Both ways of binding a pattern pair to a ground pair
fn orient(binding: &Binding, pat: &[String], ground: &[String]) -> Vec<Binding> {
    let mut out = Vec::with_capacity(2);
    if let ([a, b], [x, y]) = (pat, ground) {
        for (p, q) in [(x, y), (y, x)] {
            let mut t = binding.clone();
            if t.unify_point(a, p) && t.unify_point(b, q) {
                out.push(t);
            }
        }
    }
    out
}

/// cong, eqratio: segments bind in either order.
///
/// Ground segments (or ratios, for eqratio) are chosen in order; each
/// pattern pair then binds its chosen pair both ways round.
pub(super) fn match_segments(pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    let width = if pat.pred == Predicate::Eqratio { 4 } else { 2 };
    let groups: Vec<&[String]> = fact.args.chunks(width).collect();
    let pat_groups: Vec<&[String]> = pat.args.chunks(width).collect();

    let mut out = Vec::new();
    for chosen in combinations(groups.len(), pat_groups.len()) {
        let mut partial = vec![inst.clone()];
        for (pg, &gi) in pat_groups.iter().zip(&chosen) {
            for (pp, gp) in pg.chunks(2).zip(groups[gi].chunks(2)) {
                partial = partial.iter().flat_map(|b| orient(b, pp, gp)).collect();
            }
        }
        out.extend(partial.into_iter().map(|b| Match::new(b, chosen.clone())));
    }
    out
}

/// simtri, contri: triangles chosen in order, vertices matched up to one
/// rotation shared by all triangles
pub(super) fn match_triangles(pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
    let groups: Vec<&[String]> = fact.args.chunks(3).collect();
    let pat_groups: Vec<&[String]> = pat.args.chunks(3).collect();

    let mut out = Vec::new();
    for chosen in combinations(groups.len(), pat_groups.len()) {
        for rot in 0..3 {
            let mut binding = inst.clone();
            let ok = pat_groups.iter().zip(&chosen).all(|(pg, &gi)| {
                let tri = groups[gi];
                (0..3).all(|k| binding.unify_point(&pg[k], &tri[(k + rot) % 3]))
            });
            if ok {
                out.push(Match::new(binding, chosen.clone()));
            }
        }
    }
    out
}
