//! Segment equality rules, including the isosceles triangle pair

use super::Rule;
use crate::error::EngineResult;

pub fn rules() -> EngineResult<Vec<(&'static str, Rule)>> {
    Ok(vec![
        // OA = OB ⇒ base angles of OAB are equal
        (
            "D46",
            rule!(eqangle(O, A, A, B, A, B, O, B) :- cong(O, A, O, B))?,
        ),
        (
            "D47",
            rule!(cong(O, A, O, B) :- eqangle(O, A, A, B, A, B, O, B))?,
        ),
        // AB : CD = EF : EF
        (
            "eqratio_cong",
            rule!(cong(A, B, C, D) :- eqratio(A, B, C, D, E, F, E, F))?,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use crate::rules::testing::{derive, fact};

    #[test]
    fn test_isosceles_base_angles() {
        let new = derive("D46", &[fact("cong", &["O", "P", "O", "Q"])]);
        assert_eq!(new, vec![fact("eqangle", &["O", "P", "P", "Q", "P", "Q", "O", "Q"])]);
    }

    #[test]
    fn test_isosceles_from_base_angles() {
        let new = derive(
            "D47",
            &[fact("eqangle", &["O", "P", "P", "Q", "P", "Q", "O", "Q"])],
        );
        assert_eq!(new, vec![fact("cong", &["O", "P", "O", "Q"])]);
    }

    #[test]
    fn test_unit_ratio() {
        let new = derive(
            "eqratio_cong",
            &[fact("eqratio", &["P", "Q", "R", "S", "U", "V", "U", "V"])],
        );
        assert_eq!(new, vec![fact("cong", &["P", "Q", "R", "S"])]);
    }
}
