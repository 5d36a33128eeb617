//! Problem loader
//!
//! Problems are JSON files listing ground hypotheses, a goal, and optionally
//! lines and circles known up front:
//!
//! ```json
//! {
//!   "id": "isosceles_base",
//!   "hypotheses": [{ "pred": "cong", "args": ["O", "A", "O", "B"] }],
//!   "goal": { "pred": "eqangle", "args": ["O", "A", "A", "B", "A", "B", "O", "B"] },
//!   "lines": [["A", "M", "B"]]
//! }
//! ```

use crate::error::{EngineError, EngineResult};
use crate::ir::{Circle, Fact, Line};
use crate::rules::Ruleset;
use crate::search::Prover;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A circle given in a problem file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<String>,
    pub points: Vec<String>,
}

/// A geometric problem with hypotheses and goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryProblem {
    /// Problem ID
    pub id: String,

    /// Problem description (natural language)
    #[serde(default)]
    pub description: String,

    /// Given facts (premises)
    pub hypotheses: Vec<Fact>,

    /// Fact to prove
    pub goal: Fact,

    /// Lines known up front, as point lists
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub circles: Vec<CircleSpec>,
}

impl GeometryProblem {
    pub fn seed_lines(&self) -> EngineResult<Vec<Line>> {
        self.lines
            .iter()
            .map(|points| Line::new(points.iter().cloned()))
            .collect()
    }

    pub fn seed_circles(&self) -> EngineResult<Vec<Circle>> {
        self.circles
            .iter()
            .map(|c| Circle::new(c.points.iter().cloned(), c.center.clone()))
            .collect()
    }

    /// Check every fact, line and circle
    pub fn validate(&self) -> EngineResult<()> {
        for fact in self.hypotheses.iter().chain(std::iter::once(&self.goal)) {
            fact.validate()?;
            if !fact.is_ground() {
                return Err(EngineError::NonGroundFact(fact.to_string()));
            }
        }
        self.seed_lines()?;
        self.seed_circles()?;
        Ok(())
    }

    /// A prover over this problem's hypotheses, goal and seeds
    pub fn to_prover(&self, ruleset: Arc<Ruleset>) -> EngineResult<Prover> {
        let prover = Prover::new(ruleset, self.hypotheses.clone(), Some(self.goal.clone()))?;
        Ok(prover.with_seeds(self.seed_lines()?, self.seed_circles()?))
    }
}

/// Problem loader result
pub type LoadResult<T> = Result<T, LoadError>;

/// Problem loading errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// File not found
    FileNotFound(String),

    /// JSON parsing error
    ParseError(String),

    /// A fact, line or circle that fails validation
    InvalidProblem { id: String, error: EngineError },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "File not found: {}", path),
            LoadError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            LoadError::InvalidProblem { id, error } => write!(f, "Invalid problem {}: {}", id, error),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parse and validate one problem
pub fn parse_problem(json: &str) -> LoadResult<GeometryProblem> {
    let problem: GeometryProblem =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;
    problem.validate().map_err(|error| LoadError::InvalidProblem {
        id: problem.id.clone(),
        error,
    })?;
    Ok(problem)
}

/// Load a single problem from a JSON file
pub fn load_problem<P: AsRef<Path>>(path: P) -> LoadResult<GeometryProblem> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    let problem = parse_problem(&contents)?;
    debug!(id = %problem.id, path = %path.display(), "loaded problem");
    Ok(problem)
}

/// Load every `*.json` problem in a directory, sorted by file name
pub fn load_problems<P: AsRef<Path>>(dir: P) -> LoadResult<Vec<GeometryProblem>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(LoadError::FileNotFound(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| LoadError::FileNotFound(format!("{}: {}", dir.display(), e)))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| LoadError::FileNotFound(format!("{}: {}", dir.display(), e)))?
            .path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(load_problem).collect()
}
