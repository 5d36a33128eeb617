//! Deduction rules for geometric reasoning
//!
//! A rule is a list of assumption patterns and one conclusion pattern over
//! pattern variables: uppercase names stand for points, lowercase names for
//! lines. Rules are plain data; [`crate::search::Prover`] does the matching.

/// Build a [`Rule`] from its textual form.
///
/// ```
/// use geoprover_core::rule;
///
/// let d9 = rule!(para(l, n) :- perp(l, m), perp(m, n)).unwrap();
/// assert_eq!(d9.to_string(), "para(l,n) :- perp(l,m), perp(m,n)");
/// ```
#[macro_export]
macro_rules! rule {
    ($cp:ident ( $($ca:ident),+ ) :- $( $ap:ident ( $($aa:ident),+ ) ),+ $(,)?) => {
        $crate::rules::Rule::from_tokens(
            &[$( (stringify!($ap), &[$(stringify!($aa)),+][..]) ),+],
            (stringify!($cp), &[$(stringify!($ca)),+][..]),
        )
    };
}

pub mod angle;
pub mod circle;
pub mod collinear;
pub mod equality;
pub mod parallel;
pub mod perpendicular;
pub mod triangle;

use crate::error::{EngineError, EngineResult};
use crate::ir::{is_line_var, Fact};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt;

/// Parse one pattern, e.g. `pattern("para", &["A", "B", "C", "D"])`
pub fn pattern(pred: &str, args: &[&str]) -> EngineResult<Fact> {
    Fact::from_tokens(pred, args)
}

/// Assumptions and a conclusion over shared pattern variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub assums: Vec<Fact>,
    pub concl: Fact,
    /// Two conclusion points no assumption binds. They range over the two
    /// defining points of every known line when the rule is applied.
    pub line_extension: Option<[String; 2]>,
}

impl Rule {
    /// Every conclusion variable must be bound by some assumption, except
    /// for a single pair of point variables, which becomes the line
    /// extension.
    pub fn new(assums: Vec<Fact>, concl: Fact) -> EngineResult<Self> {
        let bound: BTreeSet<&str> = assums
            .iter()
            .flat_map(|a| a.args.iter().map(String::as_str))
            .collect();
        let mut free: Vec<String> = Vec::new();
        for arg in &concl.args {
            if !bound.contains(arg.as_str()) && !free.contains(arg) {
                free.push(arg.clone());
            }
        }

        let line_extension = match free.as_slice() {
            [] => None,
            [a, b] if !is_line_var(a) && !is_line_var(b) => Some([a.clone(), b.clone()]),
            _ => return Err(EngineError::UnboundConclusion(free)),
        };
        Ok(Self {
            assums,
            concl,
            line_extension,
        })
    }

    /// Used by [`rule!`]
    pub fn from_tokens(assums: &[(&str, &[&str])], concl: (&str, &[&str])) -> EngineResult<Self> {
        let assums = assums
            .iter()
            .map(|(pred, args)| pattern(pred, args))
            .collect::<EngineResult<Vec<_>>>()?;
        Self::new(assums, pattern(concl.0, concl.1)?)
    }

    /// Number of facts one application consumes
    pub fn arity(&self) -> usize {
        self.assums.len()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assums: Vec<String> = self.assums.iter().map(|a| a.to_string()).collect();
        write!(f, "{} :- {}", self.concl, assums.join(", "))
    }
}

/// Named rules, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    rules: Vec<(String, Rule)>,
    index: FxHashMap<String, usize>,
}

impl Ruleset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, replacing any rule of the same name in place
    pub fn insert(&mut self, name: impl Into<String>, rule: Rule) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.rules[i].1 = rule,
            None => {
                self.index.insert(name.clone(), self.rules.len());
                self.rules.push((name, rule));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.index.get(name).map(|&i| &self.rules[i].1)
    }

    pub fn try_get(&self, name: &str) -> EngineResult<&Rule> {
        self.get(name)
            .ok_or_else(|| EngineError::UnknownRule(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The named rules only, in the order given
    pub fn subset(&self, names: &[&str]) -> EngineResult<Ruleset> {
        let mut out = Ruleset::new();
        for &name in names {
            out.insert(name, self.try_get(name)?.clone());
        }
        Ok(out)
    }

    fn extend(&mut self, rules: Vec<(&'static str, Rule)>) {
        for (name, rule) in rules {
            self.insert(name, rule);
        }
    }
}

impl FromIterator<(String, Rule)> for Ruleset {
    fn from_iter<I: IntoIterator<Item = (String, Rule)>>(iter: I) -> Self {
        let mut set = Ruleset::new();
        for (name, rule) in iter {
            set.insert(name, rule);
        }
        set
    }
}

/// Get all available deduction rules
pub fn default_ruleset() -> EngineResult<Ruleset> {
    let mut set = Ruleset::new();
    set.extend(collinear::rules()?);
    set.extend(parallel::rules()?);
    set.extend(perpendicular::rules()?);
    set.extend(angle::rules()?);
    set.extend(equality::rules()?);
    set.extend(circle::rules()?);
    set.extend(triangle::rules()?);
    Ok(set)
}
