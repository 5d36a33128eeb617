//! Circle deduction rules

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        ("D12", rule!(circle(O, A, B, C) :- cong(O, A, O, B, O, C))?),
        ("D13", rule!(cyclic(A, B, C, D) :- circle(O, A, B, C, D))?),
        // inscribed angles on the same chord
        (
            "D41",
            rule!(eqangle(P, A, P, B, Q, A, Q, B) :- cyclic(A, B, P, Q))?,
        ),
        (
            "D42",
            rule!(cyclic(A, B, P, Q) :- eqangle(P, A, P, B, Q, A, Q, B))?,
        ),
        // equal inscribed angles stand on equal chords
        (
            "D43",
            rule!(cong(A, B, P, Q) :- eqangle(C, A, C, B, R, P, R, Q), cyclic(A, B, C, P, Q, R))?,
        ),
    ])
}
