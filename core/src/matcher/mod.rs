//! Pattern matching of rule assumptions against ground facts
//!
//! Matching is dispatched on the pattern's [`ArgShape`]. Every consistent
//! instantiation is returned, each with the indices of the ground fact's
//! atomic parts it consumed; an empty result means no match. The part
//! indices let [`Matcher::match_fact`] trace a match on a merged fact back
//! to the parent fact that actually holds those parts.

mod circles;
mod lines;
mod points;

use crate::ir::{ArgShape, Fact, FactId, FactStore, Incidence};
use std::collections::{BTreeMap, BTreeSet};

/// What a pattern variable is bound to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Point(String),
    /// Line variable, as the two points that named it
    Line(String, String),
}

/// Variable assignment built up while matching a rule's assumptions
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Binding(BTreeMap<String, Value>);

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binding of point variables only
    pub fn from_points<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(var, p)| (var.to_string(), Value::Point(p.to_string())))
                .collect(),
        )
    }

    pub fn get(&self, var: &str) -> Option<&Value> {
        self.0.get(var)
    }

    pub fn point(&self, var: &str) -> Option<&str> {
        match self.0.get(var) {
            Some(Value::Point(p)) => Some(p.as_str()),
            _ => None,
        }
    }

    pub fn line(&self, var: &str) -> Option<(&str, &str)> {
        match self.0.get(var) {
            Some(Value::Line(a, b)) => Some((a.as_str(), b.as_str())),
            _ => None,
        }
    }

    pub fn contains(&self, var: &str) -> bool {
        self.0.contains_key(var)
    }

    pub fn bind_point(&mut self, var: &str, point: &str) {
        self.0.insert(var.to_string(), Value::Point(point.to_string()));
    }

    pub fn bind_line(&mut self, var: &str, a: &str, b: &str) {
        self.0
            .insert(var.to_string(), Value::Line(a.to_string(), b.to_string()));
    }

    /// Bind `var` to `point`, or check an existing binding agrees
    pub fn unify_point(&mut self, var: &str, point: &str) -> bool {
        match self.0.get(var) {
            Some(Value::Point(p)) => p == point,
            Some(Value::Line(..)) => false,
            None => {
                self.bind_point(var, point);
                true
            }
        }
    }

    /// Points already assigned to some variable
    pub fn committed(&self) -> BTreeSet<&str> {
        self.0
            .values()
            .filter_map(|v| match v {
                Value::Point(p) => Some(p.as_str()),
                Value::Line(..) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// One instantiation and the ground parts it used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub binding: Binding,
    pub parts: Vec<usize>,
}

impl Match {
    fn new(binding: Binding, parts: Vec<usize>) -> Self {
        Self { binding, parts }
    }
}

/// Matches patterns against ground facts under the current incidence
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    incidence: &'a Incidence,
}

impl<'a> Matcher<'a> {
    pub fn new(incidence: &'a Incidence) -> Self {
        Self { incidence }
    }

    /// Every way `fact` instantiates `pat` consistently with `inst`
    pub fn match_parts(&self, pat: &Fact, fact: &Fact, inst: &Binding) -> Vec<Match> {
        if pat.pred != fact.pred {
            return Vec::new();
        }
        match pat.shape() {
            ArgShape::Point => points::match_points(pat, fact, inst),
            ArgShape::Segment => points::match_segments(pat, fact, inst),
            ArgShape::Triangle => points::match_triangles(pat, fact, inst),
            ArgShape::Line => lines::match_lines(self.incidence, pat, fact, inst),
            ArgShape::PointOnLine => lines::match_points_on_lines(self.incidence, pat, fact, inst),
            ArgShape::Cyclic => circles::match_cyclic(self.incidence, pat, fact, inst),
            ArgShape::Circle => circles::match_circle(self.incidence, pat, fact, inst),
        }
    }

    /// Like [`Self::match_parts`], with each match paired with the sub-fact
    /// of `id` that supplied the matched parts
    pub fn match_fact(
        &self,
        store: &FactStore,
        pat: &Fact,
        id: FactId,
        inst: &Binding,
    ) -> Vec<(Binding, FactId)> {
        self.match_parts(pat, &store[id], inst)
            .into_iter()
            .map(|m| {
                let source = store.subfact(id, &m.parts);
                (m.binding, source)
            })
            .collect()
    }
}

/// Increasing index tuples of length `k` out of `0..n`, lexicographic
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn go(start: usize, n: usize, k: usize, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in start..n {
            cur.push(i);
            go(i + 1, n, k, cur, out);
            cur.pop();
        }
    }
    let mut out = Vec::new();
    if k <= n {
        go(0, n, k, &mut Vec::with_capacity(k), &mut out);
    }
    out
}

/// Distinct index tuples of length `k` out of `0..n`, lexicographic
pub(crate) fn permutations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn go(n: usize, k: usize, used: &mut [bool], cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if cur.len() == k {
            out.push(cur.clone());
            return;
        }
        for i in 0..n {
            if used[i] {
                continue;
            }
            used[i] = true;
            cur.push(i);
            go(n, k, used, cur, out);
            cur.pop();
            used[i] = false;
        }
    }
    let mut out = Vec::new();
    if k <= n {
        go(n, k, &mut vec![false; n], &mut Vec::with_capacity(k), &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Combine;

    fn fact(pred: &str, args: &[&str]) -> Fact {
        Fact::from_tokens(pred, args).unwrap()
    }

    #[test]
    fn test_combinatorics() {
        assert_eq!(combinations(4, 2).len(), 6);
        assert_eq!(combinations(6, 3).len(), 20);
        assert_eq!(combinations(2, 3), Vec::<Vec<usize>>::new());
        assert_eq!(combinations(3, 0), vec![Vec::<usize>::new()]);
        assert_eq!(permutations(3, 2).len(), 6);
        assert_eq!(permutations(2, 2), vec![vec![0, 1], vec![1, 0]]);
    }

    #[test]
    fn test_predicate_mismatch_is_empty() {
        let inc = Incidence::new();
        let matcher = Matcher::new(&inc);
        let res = matcher.match_parts(
            &fact("coll", &["A", "B", "C"]),
            &fact("para", &["P", "Q", "R", "S"]),
            &Binding::new(),
        );
        assert!(res.is_empty());
    }

    #[test]
    fn test_unify_point() {
        let mut b = Binding::from_points([("A", "P")]);
        assert!(b.unify_point("A", "P"));
        assert!(!b.unify_point("A", "Q"));
        assert!(b.unify_point("B", "Q"));
        assert_eq!(b.point("B"), Some("Q"));
        assert_eq!(b.committed().len(), 2);
    }

    #[test]
    fn test_match_fact_sources_parent() {
        let inc = Incidence::new();
        let mut store = FactStore::new();
        let left = store.push(fact("cong", &["A", "B", "C", "D"]));
        let right = store.push(fact("cong", &["C", "D", "E", "F"]));
        let mut merged = inc.combine_facts(&store[left], &store[right]).unwrap();
        merged.cond = vec![left, right];
        let merged = store.push(merged);

        let matcher = Matcher::new(&inc);
        let pat = fact("cong", &["X", "Y", "U", "V"]);
        let inst = Binding::from_points([("X", "C"), ("Y", "D"), ("U", "E"), ("V", "F")]);
        let res = matcher.match_fact(&store, &pat, merged, &inst);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].1, right, "CD and EF both come from the right parent");

        let inst = Binding::from_points([("X", "A"), ("Y", "B"), ("U", "C"), ("V", "D")]);
        let res = matcher.match_fact(&store, &pat, merged, &inst);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].1, left);

        let inst = Binding::from_points([("X", "A"), ("Y", "B"), ("U", "E"), ("V", "F")]);
        let res = matcher.match_fact(&store, &pat, merged, &inst);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].1, merged, "AB and EF straddle both parents");
    }
}
