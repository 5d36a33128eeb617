//! Parallel line deduction rules

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        // l ∥ m, m ∥ n ⇒ l ∥ n
        ("D6", rule!(para(l, n) :- para(l, m), para(m, n))?),
        // equal angles against a pair of parallels
        (
            "D39",
            rule!(para(P, Q, U, V) :- eqangle(A, B, P, Q, C, D, U, V), para(A, B, C, D))?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{derive, fact};

    #[test]
    fn test_parallel_transitivity() {
        let new = derive(
            "D6",
            &[fact("para", &["A", "B", "C", "D"]), fact("para", &["C", "D", "E", "F"])],
        );
        assert!(new.contains(&fact("para", &["A", "B", "E", "F"])), "got {new:?}");
    }

    #[test]
    fn test_parallel_from_equal_angles() {
        let new = derive(
            "D39",
            &[
                fact("eqangle", &["A", "B", "P", "Q", "C", "D", "U", "V"]),
                fact("para", &["A", "B", "C", "D"]),
            ],
        );
        assert!(new.contains(&fact("para", &["P", "Q", "U", "V"])), "got {new:?}");
    }
}
