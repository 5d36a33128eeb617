//! Atomic parts and their equivalences
//!
//! Every predicate is read as a list of atomic parts: points for coll,
//! cyclic and midp, the tail for circle, pairs for cong, para and perp,
//! angles or ratios (two pairs) for eqangle and eqratio, triangles for
//! simtri and contri. Subsumption, triviality and merging all compare facts
//! part by part.

use crate::ir::{Fact, Incidence, Predicate};
use std::collections::BTreeSet;

/// Number of arguments in one atomic part
pub fn part_width(pred: Predicate) -> usize {
    match pred {
        Predicate::Coll | Predicate::Cyclic | Predicate::Circle | Predicate::Midp => 1,
        Predicate::Cong | Predicate::Para | Predicate::Perp => 2,
        Predicate::Simtri | Predicate::Contri => 3,
        Predicate::Eqangle | Predicate::Eqratio => 4,
    }
}

/// Arguments that carry atomic parts. The circle center is excluded.
pub fn body(fact: &Fact) -> &[String] {
    match fact.pred {
        Predicate::Circle => fact.args.get(1..).unwrap_or(&[]),
        _ => &fact.args,
    }
}

/// Split a fact into atomic parts
pub fn parts(fact: &Fact) -> Vec<&[String]> {
    body(fact).chunks(part_width(fact.pred)).collect()
}

/// Same two endpoints in either order
pub fn equal_pair(p: &[String], q: &[String]) -> bool {
    match (p, q) {
        ([a, b], [c, d]) => (a == c && b == d) || (a == d && b == c),
        _ => false,
    }
}

/// Same three vertices in any order
pub fn equal_triangle(p: &[String], q: &[String]) -> bool {
    p.len() == 3 && q.len() == 3 && point_set(p) == point_set(q)
}

pub fn point_set(points: &[String]) -> BTreeSet<&str> {
    points.iter().map(String::as_str).collect()
}

/// Whether two atomic parts of `pred` state the same thing
pub fn equivalent_parts(pred: Predicate, p: &[String], q: &[String], incidence: &Incidence) -> bool {
    match (pred, p, q) {
        (Predicate::Coll | Predicate::Cyclic | Predicate::Circle | Predicate::Midp, _, _) => p == q,
        (Predicate::Cong, _, _) => equal_pair(p, q),
        (Predicate::Para | Predicate::Perp, [a, b], [c, d]) => {
            incidence.same_line((a.as_str(), b.as_str()), (c.as_str(), d.as_str()))
        }
        (Predicate::Eqangle, [a, b, c, d], [e, f, g, h]) => {
            incidence.same_line((a.as_str(), b.as_str()), (e.as_str(), f.as_str()))
                && incidence.same_line((c.as_str(), d.as_str()), (g.as_str(), h.as_str()))
        }
        (Predicate::Eqratio, [_, _, _, _], [_, _, _, _]) => {
            equal_pair(&p[..2], &q[..2]) && equal_pair(&p[2..], &q[2..])
        }
        (Predicate::Simtri | Predicate::Contri, _, _) => equal_triangle(p, q),
        _ => false,
    }
}

/// A part naming the same point twice where two distinct points are needed
pub fn degenerate_part(pred: Predicate, p: &[String]) -> bool {
    match pred {
        Predicate::Cong | Predicate::Para | Predicate::Perp | Predicate::Eqangle | Predicate::Eqratio => {
            p.chunks(2).any(|pair| matches!(pair, [a, b] if a == b))
        }
        Predicate::Simtri | Predicate::Contri => point_set(p).len() < p.len(),
        _ => false,
    }
}
