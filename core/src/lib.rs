//! Geoprover Core
//!
//! Forward-chaining deductive closure for synthetic geometry: named
//! deduction rules are applied to ground facts over point names until a
//! goal is implied or nothing new follows.

pub mod error;    // Engine errors
pub mod ir;       // Intermediate representation (facts, store, incidence, proof)
pub mod geometry; // Part equivalences, triviality, implication, merging
pub mod matcher;  // Pattern matching by argument shape
pub mod rules;    // Deduction rules
pub mod search;   // Saturation loop
pub mod loader;   // JSON problem files

pub use error::{EngineError, EngineResult};
pub use ir::*;
pub use geometry::{Combine, Detect};
pub use matcher::{Binding, Matcher, Value};
pub use rules::{default_ruleset, Rule, Ruleset};
pub use search::{Prover, SearchConfig, SearchOutcome, SearchResult, SearchState};
pub use loader::{load_problem, load_problems, CircleSpec, GeometryProblem, LoadError, LoadResult};
