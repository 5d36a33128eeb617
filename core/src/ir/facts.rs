//! Geometric facts
//!
//! A fact is a predicate tag applied to an ordered list of point names. Rule
//! patterns use the same type: uppercase arguments are point variables,
//! lowercase arguments are line variables standing for two points.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a fact in a [`super::FactStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FactId(pub u32);

impl FactId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// Closed set of predicate tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    /// Points on one line
    Coll,
    /// Parallel lines
    Para,
    /// Two perpendicular lines
    Perp,
    /// Equal directed angles between line pairs
    Eqangle,
    /// Congruent segments
    Cong,
    /// Equal segment ratios
    Eqratio,
    /// First point is the midpoint of the other two
    Midp,
    /// Points on one circle
    Cyclic,
    /// Center followed by points on the circle
    Circle,
    /// Similar triangles
    Simtri,
    /// Congruent triangles
    Contri,
}

impl Predicate {
    pub const ALL: [Predicate; 11] = [
        Predicate::Coll,
        Predicate::Para,
        Predicate::Perp,
        Predicate::Eqangle,
        Predicate::Cong,
        Predicate::Eqratio,
        Predicate::Midp,
        Predicate::Cyclic,
        Predicate::Circle,
        Predicate::Simtri,
        Predicate::Contri,
    ];

    /// Lowercase tag used in textual facts
    pub fn name(self) -> &'static str {
        match self {
            Predicate::Coll => "coll",
            Predicate::Para => "para",
            Predicate::Perp => "perp",
            Predicate::Eqangle => "eqangle",
            Predicate::Cong => "cong",
            Predicate::Eqratio => "eqratio",
            Predicate::Midp => "midp",
            Predicate::Cyclic => "cyclic",
            Predicate::Circle => "circle",
            Predicate::Simtri => "simtri",
            Predicate::Contri => "contri",
        }
    }

    /// Whether patterns of this predicate may use line variables
    pub fn accepts_lines(self) -> bool {
        matches!(self, Predicate::Para | Predicate::Perp | Predicate::Eqangle)
    }

    /// Argument shape for a given argument case
    pub fn shape(self, line_args: bool) -> ArgShape {
        match self {
            Predicate::Coll | Predicate::Midp => ArgShape::Point,
            Predicate::Para | Predicate::Perp | Predicate::Eqangle if line_args => ArgShape::Line,
            Predicate::Para | Predicate::Perp | Predicate::Eqangle => ArgShape::PointOnLine,
            Predicate::Cong | Predicate::Eqratio => ArgShape::Segment,
            Predicate::Simtri | Predicate::Contri => ArgShape::Triangle,
            Predicate::Cyclic => ArgShape::Cyclic,
            Predicate::Circle => ArgShape::Circle,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Predicate {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| EngineError::UnknownPredicate(s.to_string()))
    }
}

/// How a predicate's argument list is read by the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgShape {
    /// Plain point positions (coll, midp)
    Point,
    /// Line variables, two points each (lowercase para/perp/eqangle)
    Line,
    /// Point pairs lying on known lines (uppercase para/perp/eqangle)
    PointOnLine,
    /// Unordered point pairs (cong, eqratio)
    Segment,
    /// Point triples up to rotation (simtri, contri)
    Triangle,
    /// Points on a known circle
    Cyclic,
    /// Center, then points on a known circle
    Circle,
}

/// Where a fact came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lemma {
    /// Initial hypothesis
    #[default]
    Given,
    /// Conclusion of the named rule
    Rule(String),
    /// Merge of two facts of the same predicate
    Combine,
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lemma::Given => f.write_str("given"),
            Lemma::Rule(name) => f.write_str(name),
            Lemma::Combine => f.write_str("combine"),
        }
    }
}

/// Logical deletion status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactStatus {
    #[default]
    Active,
    /// Subsumed by or merged into a later fact
    Shadowed,
}

/// Index correspondence from a combined fact's atomic parts into one parent
pub type PartMap = Vec<Option<usize>>;

/// A predicate over point names, plus provenance
///
/// Equality compares the statement only: the argument set for coll and
/// cyclic, center plus argument set for circle, ordered arguments otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub pred: Predicate,

    pub args: Vec<String>,

    /// Produced by the prover rather than given
    #[serde(default, skip_serializing_if = "is_false")]
    pub updated: bool,

    #[serde(default)]
    pub lemma: Lemma,

    /// Parent facts, in assumption order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cond: Vec<FactId>,

    #[serde(default)]
    pub status: FactStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_map: Option<PartMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_map: Option<PartMap>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Lowercase leading character marks a line variable
pub fn is_line_var(arg: &str) -> bool {
    arg.chars().next().map_or(false, |c| c.is_ascii_lowercase())
}

impl Fact {
    /// Create a validated fact with no provenance
    pub fn new(pred: Predicate, args: Vec<String>) -> EngineResult<Self> {
        let fact = Self::unchecked(pred, args);
        fact.validate()?;
        Ok(fact)
    }

    /// Create a fact from a textual tag and argument tokens
    pub fn from_tokens(pred: &str, args: &[&str]) -> EngineResult<Self> {
        let pred = pred.parse()?;
        Self::new(pred, args.iter().map(|a| a.to_string()).collect())
    }

    pub(crate) fn unchecked(pred: Predicate, args: Vec<String>) -> Self {
        Self {
            pred,
            args,
            updated: false,
            lemma: Lemma::Given,
            cond: Vec::new(),
            status: FactStatus::Active,
            left_map: None,
            right_map: None,
        }
    }

    /// Fact produced during saturation
    pub(crate) fn derived(pred: Predicate, args: Vec<String>, lemma: Lemma, cond: Vec<FactId>) -> Self {
        Self {
            updated: true,
            lemma,
            cond,
            ..Self::unchecked(pred, args)
        }
    }

    /// Check arity and argument case for the predicate
    pub fn validate(&self) -> EngineResult<()> {
        let n = self.args.len();
        let line_count = self.args.iter().filter(|a| is_line_var(a)).count();
        if line_count != 0 && line_count != n {
            return Err(EngineError::MixedCase {
                pred: self.pred,
                args: self.args.clone(),
            });
        }
        let line_args = n > 0 && line_count == n;
        if line_args && !self.pred.accepts_lines() {
            return Err(EngineError::UnsupportedArgumentShape {
                pred: self.pred,
                first: self.args[0].clone(),
            });
        }

        let ok = match (self.pred, line_args) {
            (Predicate::Coll, _) | (Predicate::Cyclic, _) => n >= 3,
            (Predicate::Midp, _) => n == 3,
            (Predicate::Para, true) => n >= 2,
            (Predicate::Para, false) => n >= 4 && n % 2 == 0,
            (Predicate::Perp, true) => n == 2,
            (Predicate::Perp, false) => n == 4,
            (Predicate::Eqangle, true) => n >= 4 && n % 2 == 0,
            (Predicate::Eqangle, false) | (Predicate::Eqratio, _) => n >= 8 && n % 4 == 0,
            (Predicate::Cong, _) => n >= 4 && n % 2 == 0,
            (Predicate::Circle, _) => n >= 4,
            (Predicate::Simtri, _) | (Predicate::Contri, _) => n >= 6 && n % 3 == 0,
        };
        if !ok {
            return Err(EngineError::BadArity {
                pred: self.pred,
                count: n,
            });
        }
        Ok(())
    }

    /// Argument shape, from the predicate and the case of the first argument
    pub fn shape(&self) -> ArgShape {
        let line_args = self.args.first().map_or(false, |a| is_line_var(a));
        self.pred.shape(line_args)
    }

    /// True when every argument names a point
    pub fn is_ground(&self) -> bool {
        !self.args.iter().any(|a| is_line_var(a))
    }

    pub fn is_shadowed(&self) -> bool {
        self.status == FactStatus::Shadowed
    }

    pub fn is_combined(&self) -> bool {
        self.lemma == Lemma::Combine
    }

    /// Rule name that produced this fact, if any
    pub fn rule_name(&self) -> Option<&str> {
        match &self.lemma {
            Lemma::Rule(name) => Some(name),
            _ => None,
        }
    }
}

fn point_set(args: &[String]) -> BTreeSet<&str> {
    args.iter().map(String::as_str).collect()
}

impl PartialEq for Fact {
    fn eq(&self, other: &Self) -> bool {
        if self.pred != other.pred {
            return false;
        }
        match self.pred {
            Predicate::Coll | Predicate::Cyclic => point_set(&self.args) == point_set(&other.args),
            Predicate::Circle => match (self.args.split_first(), other.args.split_first()) {
                (Some((c1, t1)), Some((c2, t2))) => c1 == c2 && point_set(t1) == point_set(t2),
                (a, b) => a.is_none() && b.is_none(),
            },
            _ => self.args == other.args,
        }
    }
}

impl Eq for Fact {}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pred == Predicate::Eqangle && self.is_ground() && self.args.len() % 4 == 0 {
            let angles: Vec<String> = self
                .args
                .chunks(4)
                .map(|a| format!("∠[{}{},{}{}]", a[0], a[1], a[2], a[3]))
                .collect();
            return f.write_str(&angles.join(" = "));
        }
        write!(f, "{}({})", self.pred, self.args.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(pred: &str, args: &[&str]) -> Fact {
        Fact::from_tokens(pred, args).unwrap()
    }

    #[test]
    fn test_predicate_parse() {
        assert_eq!("eqangle".parse::<Predicate>().unwrap(), Predicate::Eqangle);
        assert_eq!(Predicate::Contri.to_string(), "contri");
        assert!(matches!(
            "tangent".parse::<Predicate>(),
            Err(EngineError::UnknownPredicate(_))
        ));
    }

    #[test]
    fn test_shape_classification() {
        assert_eq!(fact("coll", &["A", "B", "C"]).shape(), ArgShape::Point);
        assert_eq!(fact("para", &["l", "m"]).shape(), ArgShape::Line);
        assert_eq!(fact("para", &["A", "B", "C", "D"]).shape(), ArgShape::PointOnLine);
        assert_eq!(fact("cong", &["A", "B", "C", "D"]).shape(), ArgShape::Segment);
        assert_eq!(fact("simtri", &["A", "B", "C", "D", "E", "F"]).shape(), ArgShape::Triangle);
        assert_eq!(fact("cyclic", &["A", "B", "C", "D"]).shape(), ArgShape::Cyclic);
        assert_eq!(fact("circle", &["O", "A", "B", "C"]).shape(), ArgShape::Circle);
    }

    #[test]
    fn test_bad_arity_rejected() {
        let err = Fact::from_tokens("perp", &["A", "B", "C"]).unwrap_err();
        assert_eq!(
            err,
            EngineError::BadArity {
                pred: Predicate::Perp,
                count: 3
            }
        );
        assert!(Fact::from_tokens("midp", &["M", "A"]).is_err());
        assert!(Fact::from_tokens("eqangle", &["A", "B", "C", "D"]).is_err());
        assert!(Fact::from_tokens("simtri", &["A", "B", "C", "D"]).is_err());
    }

    #[test]
    fn test_case_validation() {
        assert!(matches!(
            Fact::from_tokens("para", &["l", "B", "C"]),
            Err(EngineError::MixedCase { .. })
        ));
        assert!(matches!(
            Fact::from_tokens("cong", &["a", "b"]),
            Err(EngineError::UnsupportedArgumentShape { .. })
        ));
    }

    #[test]
    fn test_statement_equality() {
        assert_eq!(fact("coll", &["A", "B", "C"]), fact("coll", &["C", "A", "B"]));
        assert_eq!(
            fact("cyclic", &["A", "B", "C", "D"]),
            fact("cyclic", &["D", "C", "B", "A"])
        );
        assert_eq!(
            fact("circle", &["O", "A", "B", "C"]),
            fact("circle", &["O", "C", "B", "A"])
        );
        assert_ne!(
            fact("circle", &["O", "A", "B", "C"]),
            fact("circle", &["A", "O", "B", "C"])
        );
        assert_ne!(
            fact("cong", &["A", "B", "C", "D"]),
            fact("cong", &["B", "A", "C", "D"]),
            "cong compares ordered arguments"
        );
    }

    #[test]
    fn test_equality_ignores_provenance() {
        let given = fact("para", &["A", "B", "C", "D"]);
        let derived = Fact::derived(
            Predicate::Para,
            given.args.clone(),
            Lemma::Rule("D6".to_string()),
            vec![FactId(0), FactId(1)],
        );
        assert_eq!(given, derived);
        assert!(derived.updated);
    }

    #[test]
    fn test_display() {
        assert_eq!(fact("coll", &["A", "B", "C"]).to_string(), "coll(A,B,C)");
        assert_eq!(
            fact("eqangle", &["A", "B", "C", "D", "E", "F", "G", "H"]).to_string(),
            "∠[AB,CD] = ∠[EF,GH]"
        );
        assert_eq!(fact("eqangle", &["l", "m", "n", "p"]).to_string(), "eqangle(l,m,n,p)");
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{"pred":"cong","args":["A","B","C","D"]}"#;
        let parsed: Fact = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.lemma, Lemma::Given);
        assert_eq!(parsed.status, FactStatus::Active);
        assert!(parsed.cond.is_empty());
        assert!(!parsed.updated);
    }
}
