//! Proof steps and traces
//!
//! A trace is replayed from the provenance DAG of a proved fact: every
//! ancestor is visited once, in post-order, so each step only cites facts
//! that are either given or derived by an earlier step.

use super::facts::{Fact, FactId, Lemma};
use super::state::FactStore;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Marker used as `rule_id` for merge steps
pub const COMBINE: &str = "combine";

/// Errors that can occur during proof trace operations
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid proof step: {0}")]
    InvalidStep(String),
}

/// Result type for proof operations
pub type ProofResult<T> = Result<T, ProofError>;

/// Unique identifier for a proof step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProofStepId(pub u32);

impl fmt::Display for ProofStepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step{}", self.0)
    }
}

/// One derived fact and the facts it was derived from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofStep {
    pub id: ProofStepId,

    /// Fact established by this step
    pub fact_id: FactId,

    /// Rule name, or [`COMBINE`] for merges
    pub rule_id: String,

    pub premise_ids: Vec<FactId>,

    pub premises: Vec<Fact>,

    pub conclusion: Fact,

    /// Rule text, when the rule is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ProofStep {
    pub fn is_combine(&self) -> bool {
        self.rule_id == COMBINE
    }

    pub fn num_premises(&self) -> usize {
        self.premises.len()
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let premises: Vec<String> = self.premises.iter().map(|p| p.to_string()).collect();
        if self.is_combine() {
            write!(f, "{} {} :- {}", COMBINE, self.conclusion, premises.join(", "))
        } else {
            let rule = self.explanation.as_deref().unwrap_or(&self.rule_id);
            write!(f, "({}) {} :- {}", rule, self.conclusion, premises.join(", "))
        }
    }
}

/// Complete justification of a proved fact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProofTrace {
    /// Steps in dependency order
    pub steps: Vec<ProofStep>,

    pub solved: bool,

    /// Fact the trace justifies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<FactId>,

    pub metadata: BTreeMap<String, String>,
}

impl ProofTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay the derivation of `target` from the store's provenance links.
    ///
    /// `explain` maps a rule name to its printable text.
    pub fn replay<F>(store: &FactStore, target: FactId, explain: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut order = Vec::new();
        let mut visited: FxHashSet<FactId> = FxHashSet::default();
        let mut stack = vec![(target, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            for &parent in store[id].cond.iter().rev() {
                if !visited.contains(&parent) {
                    stack.push((parent, false));
                }
            }
        }

        let mut trace = ProofTrace::new();
        for id in order {
            let fact = &store[id];
            let rule_id = match &fact.lemma {
                Lemma::Given => continue,
                Lemma::Combine => COMBINE.to_string(),
                Lemma::Rule(name) => name.clone(),
            };
            let explanation = fact.rule_name().and_then(&explain);
            trace.steps.push(ProofStep {
                id: ProofStepId(trace.steps.len() as u32),
                fact_id: id,
                rule_id,
                premise_ids: fact.cond.clone(),
                premises: fact.cond.iter().map(|&c| store[c].clone()).collect(),
                conclusion: fact.clone(),
                explanation,
            });
        }
        trace.target = Some(target);
        trace.solved = true;
        trace
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn add_metadata(&mut self, key: String, value: String) {
        self.metadata.insert(key, value);
    }

    pub fn get_metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|s| s.as_str())
    }

    pub fn get_step(&self, id: ProofStepId) -> Option<&ProofStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> ProofResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to compact JSON string
    pub fn to_json_compact(&self) -> ProofResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> ProofResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn statistics(&self) -> ProofStatistics {
        let mut stats = ProofStatistics {
            num_steps: self.steps.len(),
            num_combines: 0,
            solved: self.solved,
            rules_used: BTreeMap::new(),
        };
        for step in &self.steps {
            if step.is_combine() {
                stats.num_combines += 1;
            } else {
                *stats.rules_used.entry(step.rule_id.clone()).or_insert(0) += 1;
            }
        }
        stats
    }

    /// Check that every derived premise is established by an earlier step
    pub fn validate_order(&self) -> ProofResult<()> {
        let mut established: FxHashSet<FactId> = FxHashSet::default();
        for step in &self.steps {
            if step.premise_ids.len() != step.num_premises() {
                return Err(ProofError::InvalidStep(format!(
                    "{} lists {} premise ids for {} premises",
                    step.id,
                    step.premise_ids.len(),
                    step.num_premises()
                )));
            }
            for (pid, premise) in step.premise_ids.iter().zip(&step.premises) {
                if premise.lemma != Lemma::Given && !established.contains(pid) {
                    return Err(ProofError::InvalidStep(format!(
                        "{} cites {} before it is derived",
                        step.id, pid
                    )));
                }
            }
            if !established.insert(step.fact_id) {
                return Err(ProofError::InvalidStep(format!(
                    "{} derives {} twice",
                    step.id, step.fact_id
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ProofTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}

/// Statistics about a proof trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofStatistics {
    pub num_steps: usize,

    /// Steps that merged two facts
    pub num_combines: usize,

    pub solved: bool,

    /// Count of how many times each rule was used
    pub rules_used: BTreeMap<String, usize>,
}

impl ProofStatistics {
    /// Get the most frequently used rule
    pub fn most_used_rule(&self) -> Option<(&str, usize)> {
        self.rules_used
            .iter()
            .max_by_key(|(_, count)| *count)
            .map(|(rule, count)| (rule.as_str(), *count))
    }
}
