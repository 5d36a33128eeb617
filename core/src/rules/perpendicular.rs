//! Perpendicular line deduction rules

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        // two lines perpendicular to a third are parallel
        ("D9", rule!(para(l, n) :- perp(l, m), perp(m, n))?),
        ("D10", rule!(perp(l, n) :- para(l, m), perp(m, n))?),
        // P and Q both equidistant from A and B: PQ is the perpendicular bisector
        (
            "D56",
            rule!(perp(A, B, P, Q) :- cong(A, P, B, P), cong(A, Q, B, Q))?,
        ),
        // any two right angles are equal
        ("D76", rule!(eqangle(l, m, n, p) :- perp(l, m), perp(n, p))?),
        (
            "eqangle_perp",
            rule!(perp(l, n) :- eqangle(l, m, n, p), perp(m, p))?,
        ),
    ])
}
