//! Search module - forward-chaining saturation
//!
//! A [`Prover`] owns the hypothesis collection and applies every rule to
//! every ordered selection of active hypotheses, round after round, until
//! the goal is implied, nothing new is derived, or the round cap is hit.

mod apply;
pub mod fixpoint;

pub use fixpoint::*;
