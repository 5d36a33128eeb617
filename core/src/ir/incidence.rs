//! Derived lines and circles
//!
//! Lines and circles are incidence groups keyed by overlap, not by literal
//! equality: two lines sharing two points are the same line, two circles
//! sharing three points (and no conflicting centers) are the same circle.
//! The prover rebuilds them from the active hypotheses every round.

use super::facts::Predicate;
use super::state::FactStore;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A known line, as the set of points on it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    points: BTreeSet<String>,
}

impl Line {
    /// Line through at least two distinct points
    pub fn new<I, S>(points: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let points: BTreeSet<String> = points.into_iter().map(Into::into).collect();
        if points.len() < 2 {
            return Err(EngineError::DegenerateLine(points.into_iter().collect()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &BTreeSet<String> {
        &self.points
    }

    pub fn contains(&self, point: &str) -> bool {
        self.points.contains(point)
    }

    /// Same line iff at least two points are shared
    pub fn is_same_line(&self, other: &Line) -> bool {
        self.points.intersection(&other.points).nth(1).is_some()
    }

    /// Absorb `other` if it is the same line. Returns whether it merged.
    pub fn combine(&mut self, other: &Line) -> bool {
        if !self.is_same_line(other) {
            return false;
        }
        self.points.extend(other.points.iter().cloned());
        true
    }

    /// The two smallest point names, used to name the line in facts
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let mut it = self.points.iter();
        Some((it.next()?, it.next()?))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.points.iter().map(String::as_str).collect();
        write!(f, "Line({})", names.join(","))
    }
}

/// A known circle, as the set of points on it plus an optional center
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Circle {
    points: BTreeSet<String>,
    center: Option<String>,
}

impl Circle {
    /// Circle through at least three distinct points
    pub fn new<I, S>(points: I, center: Option<String>) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let points: BTreeSet<String> = points.into_iter().map(Into::into).collect();
        if points.len() < 3 {
            return Err(EngineError::DegenerateCircle(points.into_iter().collect()));
        }
        Ok(Self { points, center })
    }

    pub fn points(&self) -> &BTreeSet<String> {
        &self.points
    }

    pub fn center(&self) -> Option<&str> {
        self.center.as_deref()
    }

    pub fn contains(&self, point: &str) -> bool {
        self.points.contains(point)
    }

    /// Same circle iff three points are shared and known centers agree
    pub fn is_same_circle(&self, other: &Circle) -> bool {
        if let (Some(a), Some(b)) = (&self.center, &other.center) {
            if a != b {
                return false;
            }
        }
        self.points.intersection(&other.points).nth(2).is_some()
    }

    /// Absorb `other` if it is the same circle. Returns whether it merged.
    pub fn combine(&mut self, other: &Circle) -> bool {
        if !self.is_same_circle(other) {
            return false;
        }
        self.points.extend(other.points.iter().cloned());
        if self.center.is_none() {
            self.center = other.center.clone();
        }
        true
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.points.iter().map(String::as_str).collect();
        match &self.center {
            Some(c) => write!(f, "Circle({}; {})", c, names.join(",")),
            None => write!(f, "Circle({})", names.join(",")),
        }
    }
}

/// Current lines and circles, plus the seeds they are rebuilt from
#[derive(Debug, Clone, Default)]
pub struct Incidence {
    lines: Vec<Line>,
    circles: Vec<Circle>,
    seed_lines: Vec<Line>,
    seed_circles: Vec<Circle>,
}

impl Incidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incidence with lines and circles known up front
    pub fn with_seeds(lines: Vec<Line>, circles: Vec<Circle>) -> Self {
        let mut incidence = Self {
            seed_lines: lines,
            seed_circles: circles,
            ..Self::default()
        };
        incidence.reset();
        incidence
    }

    fn reset(&mut self) {
        self.lines.clear();
        self.circles.clear();
        for line in self.seed_lines.clone() {
            self.add_line(line);
        }
        for circle in self.seed_circles.clone() {
            self.add_circle(circle);
        }
    }

    /// Recompute from the seeds and every active coll, cyclic and circle fact
    pub fn rebuild(&mut self, store: &FactStore) {
        self.reset();
        for (_, fact) in store.iter().filter(|(_, f)| !f.is_shadowed()) {
            match fact.pred {
                Predicate::Coll => {
                    if let Ok(line) = Line::new(fact.args.iter().cloned()) {
                        self.add_line(line);
                    }
                }
                Predicate::Cyclic => {
                    if let Ok(circle) = Circle::new(fact.args.iter().cloned(), None) {
                        self.add_circle(circle);
                    }
                }
                Predicate::Circle => {
                    if let Some((center, rest)) = fact.args.split_first() {
                        if let Ok(circle) = Circle::new(rest.iter().cloned(), Some(center.clone())) {
                            self.add_circle(circle);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Insert a line, folding in every known line it overlaps
    pub fn add_line(&mut self, mut line: Line) {
        while let Some(pos) = self.lines.iter().position(|l| line.is_same_line(l)) {
            let other = self.lines.remove(pos);
            line.combine(&other);
        }
        self.lines.push(line);
    }

    /// Insert a circle, folding in every known circle it overlaps
    pub fn add_circle(&mut self, mut circle: Circle) {
        while let Some(pos) = self.circles.iter().position(|c| circle.is_same_circle(c)) {
            let other = self.circles.remove(pos);
            circle.combine(&other);
        }
        self.circles.push(circle);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Index of the known line through two distinct points
    pub fn line_index(&self, a: &str, b: &str) -> Option<usize> {
        if a == b {
            return None;
        }
        self.lines
            .iter()
            .position(|l| l.contains(a) && l.contains(b))
    }

    pub fn line_of(&self, a: &str, b: &str) -> Option<&Line> {
        self.line_index(a, b).map(|i| &self.lines[i])
    }

    /// Whether two point pairs lie on the same line. Pairs not on any known
    /// line are the same line only if they name the same two points.
    pub fn same_line(&self, p: (&str, &str), q: (&str, &str)) -> bool {
        match (self.line_index(p.0, p.1), self.line_index(q.0, q.1)) {
            (Some(i), Some(j)) => i == j,
            (None, None) => (p.0 == q.0 && p.1 == q.1) || (p.0 == q.1 && p.1 == q.0),
            _ => false,
        }
    }

    /// All points on the line through `a` and `b`, sorted. Just the pair
    /// itself when no known line covers it.
    pub fn line_points(&self, a: &str, b: &str) -> Vec<String> {
        match self.line_of(a, b) {
            Some(line) => line.points().iter().cloned().collect(),
            None => {
                let mut pts = vec![a.to_string(), b.to_string()];
                pts.sort();
                pts.dedup();
                pts
            }
        }
    }

    /// The known circle through the given points, widened by them, or a
    /// fresh one
    pub fn circle_through(&self, points: &[String], center: Option<&str>) -> EngineResult<Circle> {
        let mut probe = Circle::new(points.iter().cloned(), center.map(str::to_string))?;
        if let Some(known) = self.circles.iter().find(|c| probe.is_same_circle(c)) {
            probe.combine(known);
        }
        Ok(probe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Fact;

    fn line(points: &[&str]) -> Line {
        Line::new(points.iter().copied()).unwrap()
    }

    fn circle(points: &[&str], center: Option<&str>) -> Circle {
        Circle::new(points.iter().copied(), center.map(str::to_string)).unwrap()
    }

    #[test]
    fn test_line_identity_needs_two_shared_points() {
        let abc = line(&["A", "B", "C"]);
        assert!(abc.is_same_line(&line(&["B", "C", "D"])));
        assert!(!abc.is_same_line(&line(&["C", "D", "E"])));
    }

    #[test]
    fn test_line_combine() {
        let mut abc = line(&["A", "B", "C"]);
        assert!(abc.combine(&line(&["C", "B", "D"])));
        assert_eq!(abc, line(&["A", "B", "C", "D"]));
        assert!(!abc.combine(&line(&["D", "E"])), "one shared point is not enough");
        assert_eq!(abc.points().len(), 4);
    }

    #[test]
    fn test_degenerate_line_rejected() {
        assert!(Line::new(["A", "A"]).is_err());
        assert!(Circle::new(["A", "B", "B"], None).is_err());
    }

    #[test]
    fn test_circle_centers_must_agree() {
        let a = circle(&["A", "B", "C"], Some("O"));
        assert!(!a.is_same_circle(&circle(&["A", "B", "C", "D"], Some("P"))));
        assert!(a.is_same_circle(&circle(&["A", "B", "C", "D"], None)));

        let mut plain = circle(&["A", "B", "C", "D"], None);
        assert!(plain.combine(&a));
        assert_eq!(plain.center(), Some("O"), "merge adopts the other center");
        assert_eq!(plain.points().len(), 4);
    }

    #[test]
    fn test_rebuild_merges_overlapping_facts() {
        let store: FactStore = [
            Fact::from_tokens("coll", &["A", "B", "C"]).unwrap(),
            Fact::from_tokens("coll", &["C", "D", "E"]).unwrap(),
            Fact::from_tokens("coll", &["B", "C", "E"]).unwrap(),
            Fact::from_tokens("cyclic", &["P", "Q", "R", "S"]).unwrap(),
            Fact::from_tokens("circle", &["O", "P", "Q", "R"]).unwrap(),
        ]
        .into_iter()
        .collect();

        let mut incidence = Incidence::new();
        incidence.rebuild(&store);

        assert_eq!(incidence.lines().len(), 1, "three colls chain into one line");
        assert_eq!(incidence.lines()[0], line(&["A", "B", "C", "D", "E"]));
        assert_eq!(incidence.circles().len(), 1);
        assert_eq!(incidence.circles()[0].center(), Some("O"));
    }

    #[test]
    fn test_rebuild_skips_shadowed() {
        let mut store: FactStore = [Fact::from_tokens("coll", &["A", "B", "C"]).unwrap()]
            .into_iter()
            .collect();
        store.shadow(crate::ir::FactId(0));

        let mut incidence = Incidence::with_seeds(vec![line(&["X", "Y"])], vec![]);
        incidence.rebuild(&store);
        assert_eq!(incidence.lines(), &[line(&["X", "Y"])]);
    }

    #[test]
    fn test_same_line_queries() {
        let incidence = Incidence::with_seeds(vec![line(&["A", "B", "C"])], vec![]);
        assert!(incidence.same_line(("A", "B"), ("C", "A")));
        assert!(!incidence.same_line(("A", "B"), ("A", "D")));
        assert!(incidence.same_line(("D", "E"), ("E", "D")));
        assert!(!incidence.same_line(("D", "E"), ("D", "F")));
        assert_eq!(incidence.line_points("C", "B"), vec!["A", "B", "C"]);
        assert_eq!(incidence.line_points("E", "D"), vec!["D", "E"]);
    }
}
