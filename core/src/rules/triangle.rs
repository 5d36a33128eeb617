//! Midpoint and triangle deduction rules

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        // midline of a triangle
        (
            "D44",
            rule!(para(E, F, B, C) :- midp(E, A, B), midp(F, A, C))?,
        ),
        (
            "D45",
            rule!(midp(F, A, C) :- midp(E, A, B), para(E, F, B, C), coll(F, A, C))?,
        ),
        (
            "D68",
            rule!(midp(M, A, B) :- cong(M, A, M, B), coll(M, A, B))?,
        ),
        ("midp_cong", rule!(cong(M, A, M, B) :- midp(M, A, B))?),
        ("midp_coll", rule!(coll(M, A, B) :- midp(M, A, B))?),
        (
            "sss",
            rule!(contri(A, B, C, P, Q, R) :- cong(A, B, P, Q), cong(B, C, Q, R), cong(C, A, R, P))?,
        ),
        // ABM and CDM congruent by angle, side, angle
        (
            "asa",
            rule!(cong(M, A, M, C) :-
                cong(A, B, C, D),
                eqangle(B, A, A, M, D, C, C, M),
                eqangle(A, B, B, M, C, D, D, M))?,
        ),
        (
            "contri_cong",
            rule!(cong(A, B, P, Q) :- contri(A, B, C, P, Q, R))?,
        ),
        (
            "contri_simtri",
            rule!(simtri(A, B, C, P, Q, R) :- contri(A, B, C, P, Q, R))?,
        ),
        (
            "simtri_eqratio",
            rule!(eqratio(A, B, A, C, P, Q, P, R) :- simtri(A, B, C, P, Q, R))?,
        ),
        (
            "simtri_eqangle",
            rule!(eqangle(A, B, B, C, P, Q, Q, R) :- simtri(A, B, C, P, Q, R))?,
        ),
    ])
}
