//! Triviality and implication checks
//!
//! Both checks read the current incidence so that pairs naming different
//! points on one known line count as the same line.

use super::normalize::{body, degenerate_part, equivalent_parts, parts, point_set};
use crate::ir::{Fact, Incidence, Predicate};

/// Detection operations over the current lines and circles
pub trait Detect {
    /// A fact that says nothing: some part repeats another part or names
    /// the same point twice
    fn check_trivial(&self, fact: &Fact) -> bool;

    /// Whether `fact` already states everything `goal` states
    fn check_imply(&self, fact: &Fact, goal: &Fact) -> bool;
}

impl Detect for Incidence {
    fn check_trivial(&self, fact: &Fact) -> bool {
        match fact.pred {
            Predicate::Coll | Predicate::Cyclic | Predicate::Circle | Predicate::Midp => {
                let points = body(fact);
                point_set(points).len() < points.len()
            }
            pred => {
                let parts = parts(fact);
                parts.iter().any(|p| degenerate_part(pred, p))
                    || parts.iter().enumerate().any(|(i, p)| {
                        parts[i + 1..]
                            .iter()
                            .any(|q| equivalent_parts(pred, p, q, self))
                    })
            }
        }
    }

    fn check_imply(&self, fact: &Fact, goal: &Fact) -> bool {
        if fact.pred != goal.pred {
            return false;
        }
        match fact.pred {
            Predicate::Coll | Predicate::Cyclic => {
                point_set(&goal.args).is_subset(&point_set(&fact.args))
            }
            Predicate::Circle => {
                fact.args.first() == goal.args.first()
                    && point_set(body(goal)).is_subset(&point_set(body(fact)))
            }
            Predicate::Midp => match (fact.args.split_first(), goal.args.split_first()) {
                (Some((m1, ends1)), Some((m2, ends2))) => {
                    m1 == m2 && point_set(ends1) == point_set(ends2)
                }
                _ => false,
            },
            Predicate::Perp => {
                let (have, want) = (parts(fact), parts(goal));
                match (have.as_slice(), want.as_slice()) {
                    (&[l1, l2], &[m1, m2]) => {
                        let eq = |p: &[String], q: &[String]| {
                            equivalent_parts(Predicate::Perp, p, q, self)
                        };
                        (eq(l1, m1) && eq(l2, m2)) || (eq(l1, m2) && eq(l2, m1))
                    }
                    _ => false,
                }
            }
            pred => {
                let have = parts(fact);
                parts(goal)
                    .iter()
                    .all(|q| have.iter().any(|p| equivalent_parts(pred, p, q, self)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Line;

    fn fact(pred: &str, args: &[&str]) -> Fact {
        Fact::from_tokens(pred, args).unwrap()
    }

    fn incidence() -> Incidence {
        Incidence::with_seeds(vec![Line::new(["A", "B", "C"]).unwrap()], vec![])
    }

    #[test]
    fn test_trivial_repeated_part() {
        let inc = incidence();
        assert!(inc.check_trivial(&fact("cong", &["A", "B", "B", "A"])));
        assert!(inc.check_trivial(&fact("para", &["A", "B", "C", "A"])), "both pairs lie on one line");
        assert!(inc.check_trivial(&fact("eqangle", &["A", "B", "D", "E", "B", "C", "E", "D"])));
        assert!(!inc.check_trivial(&fact("cong", &["A", "B", "C", "D"])));
        assert!(!inc.check_trivial(&fact("perp", &["A", "B", "C", "D"])));
    }

    #[test]
    fn test_trivial_degenerate() {
        let inc = Incidence::new();
        assert!(inc.check_trivial(&fact("cong", &["A", "A", "C", "D"])));
        assert!(inc.check_trivial(&fact("coll", &["A", "B", "A"])));
        assert!(inc.check_trivial(&fact("simtri", &["A", "B", "C", "P", "P", "R"])));
        assert!(!inc.check_trivial(&fact("simtri", &["A", "B", "C", "P", "Q", "R"])));
    }

    #[test]
    fn test_imply_cong_sub_arrangement() {
        let inc = Incidence::new();
        let long = fact("cong", &["A", "B", "C", "D", "E", "F"]);
        assert!(inc.check_imply(&long, &fact("cong", &["A", "B", "E", "F"])));
        assert!(inc.check_imply(&long, &fact("cong", &["F", "E", "B", "A"])));
        assert!(!inc.check_imply(&long, &fact("cong", &["A", "B", "E", "G"])));
    }

    #[test]
    fn test_imply_point_sets() {
        let inc = Incidence::new();
        assert!(inc.check_imply(&fact("coll", &["A", "B", "C", "D"]), &fact("coll", &["D", "B", "A"])));
        assert!(!inc.check_imply(&fact("coll", &["A", "B", "C"]), &fact("coll", &["A", "B", "D"])));
        assert!(inc.check_imply(
            &fact("circle", &["O", "A", "B", "C", "D"]),
            &fact("circle", &["O", "D", "A", "B"])
        ));
        assert!(!inc.check_imply(
            &fact("circle", &["O", "A", "B", "C", "D"]),
            &fact("circle", &["P", "A", "B", "C"])
        ));
        assert!(inc.check_imply(&fact("midp", &["M", "A", "B"]), &fact("midp", &["M", "B", "A"])));
    }

    #[test]
    fn test_imply_lines_through_incidence() {
        let inc = incidence();
        assert!(inc.check_imply(
            &fact("para", &["G", "F", "A", "B"]),
            &fact("para", &["A", "C", "G", "F"])
        ));
        assert!(inc.check_imply(
            &fact("perp", &["A", "B", "D", "E"]),
            &fact("perp", &["E", "D", "C", "A"])
        ));
        assert!(!inc.check_imply(
            &fact("eqangle", &["A", "B", "D", "E", "F", "G", "H", "I"]),
            &fact("eqangle", &["D", "E", "A", "B", "F", "G", "H", "I"])
        ));
    }

    #[test]
    fn test_imply_triangles() {
        let inc = Incidence::new();
        let sim = fact("simtri", &["A", "B", "C", "P", "Q", "R"]);
        assert!(inc.check_imply(&sim, &fact("simtri", &["C", "A", "B", "R", "P", "Q"])));
        assert!(!inc.check_imply(&sim, &fact("contri", &["A", "B", "C", "P", "Q", "R"])));
    }

    #[test]
    fn test_imply_is_reflexive() {
        let inc = incidence();
        for f in [
            fact("coll", &["A", "B", "C"]),
            fact("para", &["A", "B", "D", "E"]),
            fact("perp", &["A", "B", "D", "E"]),
            fact("eqangle", &["A", "B", "D", "E", "F", "G", "H", "I"]),
            fact("cong", &["A", "B", "D", "E"]),
            fact("eqratio", &["A", "B", "D", "E", "F", "G", "H", "I"]),
            fact("midp", &["M", "A", "B"]),
            fact("cyclic", &["A", "B", "D", "E"]),
            fact("circle", &["O", "A", "B", "D"]),
            fact("simtri", &["A", "B", "D", "P", "Q", "R"]),
            fact("contri", &["A", "B", "D", "P", "Q", "R"]),
        ] {
            assert!(inc.check_imply(&f, &f), "{} should imply itself", f);
        }
    }
}
