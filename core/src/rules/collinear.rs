//! Collinearity deduction rules
//!
//! Most collinearity follows from merging `coll` facts into lines; the rule
//! here covers two facts sharing only a pair of points.

use super::Rule;
use crate::error::EngineResult;

/// Two collinear triples through a common pair
pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![(
        "D3",
        rule!(coll(C, D, A) :- coll(A, B, C), coll(A, B, D))?,
    )])
}
