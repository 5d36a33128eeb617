//! Engine errors
//!
//! Only precondition violations surface as errors. A pattern that fails to
//! match yields an empty result, and a search that never reaches its goal
//! reports a [`crate::search::SearchOutcome`], not an error.

use crate::ir::{FactId, Predicate};
use thiserror::Error;

/// Errors raised by fact construction, rule construction and rule application
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown predicate: {0}")]
    UnknownPredicate(String),

    #[error("{pred} does not accept {count} arguments")]
    BadArity { pred: Predicate, count: usize },

    #[error("{pred} mixes point and line arguments: {args:?}")]
    MixedCase { pred: Predicate, args: Vec<String> },

    #[error("{pred} has no matcher for arguments starting with {first:?}")]
    UnsupportedArgumentShape { pred: Predicate, first: String },

    #[error("rule {rule} takes {expected} assumptions, got {found}")]
    AssumptionCountMismatch {
        rule: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown rule: {0}")]
    UnknownRule(String),

    #[error("conclusion uses variables no assumption binds: {0:?}")]
    UnboundConclusion(Vec<String>),

    #[error("hypothesis {0} contains line variables")]
    NonGroundFact(String),

    #[error("a line needs two distinct points, got {0:?}")]
    DegenerateLine(Vec<String>),

    #[error("a circle needs three distinct points, got {0:?}")]
    DegenerateCircle(Vec<String>),

    #[error("no fact with id {0}")]
    FactNotFound(FactId),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
