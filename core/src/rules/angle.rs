//! Angle deduction rules
//!
//! Angles are full angles between two lines, so `eqangle(A,B,C,D,...)` reads
//! "the angle from AB to CD equals ...".

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        // parallels make equal angles with any line; P and Q range over the
        // known lines
        (
            "D40",
            rule!(eqangle(A, B, P, Q, C, D, P, Q) :- para(A, B, C, D))?,
        ),
        (
            "perp_eqangle",
            rule!(eqangle(A, B, C, D, C, D, A, B) :- perp(A, B, C, D))?,
        ),
    ])
}
