//! Intermediate representation for the saturation engine
//!
//! - **facts**: predicate tags, argument shapes and provenance-carrying facts
//! - **state**: the append-only hypothesis arena
//! - **incidence**: derived lines and circles
//! - **proof**: replayed justification traces
//!
//! # Example
//!
//! ```rust
//! use geoprover_core::ir::*;
//!
//! let mut store = FactStore::new();
//! store.push(Fact::from_tokens("coll", &["A", "B", "C"]).unwrap());
//! store.push(Fact::from_tokens("coll", &["B", "C", "D"]).unwrap());
//!
//! let mut incidence = Incidence::new();
//! incidence.rebuild(&store);
//! assert_eq!(incidence.lines().len(), 1);
//! assert!(incidence.same_line(("A", "D"), ("B", "C")));
//! ```

mod facts;
mod incidence;
mod proof;
mod state;

pub use facts::{is_line_var, ArgShape, Fact, FactId, FactStatus, Lemma, PartMap, Predicate};
pub use incidence::{Circle, Incidence, Line};
pub use proof::{ProofError, ProofResult, ProofStatistics, ProofStep, ProofStepId, ProofTrace, COMBINE};
pub use state::FactStore;
