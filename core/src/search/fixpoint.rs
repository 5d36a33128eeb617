//! Saturation loop
//!
//! One full round, then incremental rounds that only consider selections
//! containing a derived fact, until the goal is implied, a round adds
//! nothing, or `max_rounds` incremental rounds have run.

use crate::error::{EngineError, EngineResult};
use crate::geometry::Detect;
use crate::ir::{Circle, Fact, FactId, FactStore, Incidence, Line, ProofResult, ProofTrace};
use crate::rules::Ruleset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Search configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Incremental rounds allowed after the first full round
    pub max_rounds: usize,

    /// Restrict rounds after the first to selections with a derived fact
    pub incremental: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_rounds: 10,
            incremental: true,
        }
    }
}

/// Where the saturation loop stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchState {
    #[default]
    Saturating,
    Proved,
    /// A round derived nothing new
    Exhausted,
    /// Still deriving when the round cap was reached
    CapExceeded,
}

/// Terminal result of [`Prover::search_fixpoint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// `fact` implies the goal
    Proved { fact: FactId, rounds: usize },
    Exhausted { rounds: usize },
    CapExceeded { rounds: usize },
}

impl SearchOutcome {
    pub fn is_proved(&self) -> bool {
        matches!(self, SearchOutcome::Proved { .. })
    }

    pub fn proved_fact(&self) -> Option<FactId> {
        match self {
            SearchOutcome::Proved { fact, .. } => Some(*fact),
            _ => None,
        }
    }

    /// Rounds run, counting the first full round
    pub fn rounds(&self) -> usize {
        match self {
            SearchOutcome::Proved { rounds, .. }
            | SearchOutcome::Exhausted { rounds }
            | SearchOutcome::CapExceeded { rounds } => *rounds,
        }
    }

    pub fn state(&self) -> SearchState {
        match self {
            SearchOutcome::Proved { .. } => SearchState::Proved,
            SearchOutcome::Exhausted { .. } => SearchState::Exhausted,
            SearchOutcome::CapExceeded { .. } => SearchState::CapExceeded,
        }
    }
}

/// Search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Whether the goal was proved
    pub solved: bool,

    pub outcome: SearchOutcome,

    /// Replayed justification (if solved)
    pub proof: Option<ProofTrace>,

    /// Rounds run, counting the first full round
    pub rounds: usize,

    /// Size of the hypothesis collection at the end
    pub facts_total: usize,

    /// How many of those were shadowed
    pub facts_shadowed: usize,
}

impl SearchResult {
    /// Write as pretty-printed JSON
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> ProofResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ProofResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Forward-chaining prover over one hypothesis collection
#[derive(Debug, Clone)]
pub struct Prover {
    pub(super) ruleset: Arc<Ruleset>,
    pub(super) hyps: FactStore,
    pub(super) incidence: Incidence,
    goal: Option<Fact>,
    config: SearchConfig,
    state: SearchState,
    rounds: usize,
}

fn check_hypothesis(fact: &Fact) -> EngineResult<()> {
    fact.validate()?;
    if !fact.is_ground() {
        return Err(EngineError::NonGroundFact(fact.to_string()));
    }
    Ok(())
}

impl Prover {
    /// Start from ground hypotheses. Without a goal the search runs until
    /// it is exhausted or capped.
    pub fn new(ruleset: Arc<Ruleset>, hyps: Vec<Fact>, goal: Option<Fact>) -> EngineResult<Self> {
        for fact in hyps.iter().chain(goal.iter()) {
            check_hypothesis(fact)?;
        }
        let hyps: FactStore = hyps.into_iter().collect();
        let mut incidence = Incidence::new();
        incidence.rebuild(&hyps);
        Ok(Self {
            ruleset,
            hyps,
            incidence,
            goal,
            config: SearchConfig::default(),
            state: SearchState::Saturating,
            rounds: 0,
        })
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Lines and circles known before any coll, cyclic or circle fact
    pub fn with_seeds(mut self, lines: Vec<Line>, circles: Vec<Circle>) -> Self {
        self.incidence = Incidence::with_seeds(lines, circles);
        self.incidence.rebuild(&self.hyps);
        self
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn hyps(&self) -> &FactStore {
        &self.hyps
    }

    pub fn incidence(&self) -> &Incidence {
        &self.incidence
    }

    pub fn goal(&self) -> Option<&Fact> {
        self.goal.as_ref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// First hypothesis, shadowed or not, that implies the goal
    pub fn find_goal(&self) -> Option<FactId> {
        let goal = self.goal.as_ref()?;
        self.hyps
            .iter()
            .find(|(_, fact)| self.incidence.check_imply(fact, goal))
            .map(|(id, _)| id)
    }

    /// One round over every rule. Returns how many facts were appended.
    pub fn step(&mut self, only_updated: bool) -> usize {
        self.incidence.rebuild(&self.hyps);
        let before = self.hyps.len();
        let horizon = FactId(before as u32);

        let ruleset = Arc::clone(&self.ruleset);
        for (name, rule) in ruleset.iter() {
            self.apply_to_all(name, rule, horizon, only_updated);
        }

        let added = self.hyps.len() - before;
        debug!(
            round = self.rounds,
            only_updated,
            hyps = self.hyps.len(),
            lines = self.incidence.lines().len(),
            circles = self.incidence.circles().len(),
            added,
            "search step"
        );
        added
    }

    /// Apply one named rule to explicit facts, one per assumption. Returns
    /// the ids of every fact appended, merges included.
    pub fn apply_rule(&mut self, name: &str, facts: &[FactId]) -> EngineResult<Vec<FactId>> {
        let ruleset = Arc::clone(&self.ruleset);
        let rule = ruleset.try_get(name)?;
        if rule.arity() != facts.len() {
            return Err(EngineError::AssumptionCountMismatch {
                rule: name.to_string(),
                expected: rule.arity(),
                found: facts.len(),
            });
        }
        for &id in facts {
            self.hyps.try_get(id)?;
        }

        self.incidence.rebuild(&self.hyps);
        let insts = self.match_assumptions(&rule.assums, facts);
        Ok(self.apply_instances(name, rule, insts))
    }

    /// Saturate until the goal is implied, a round adds nothing, or the
    /// round cap is reached
    pub fn search_fixpoint(&mut self) -> SearchOutcome {
        self.state = SearchState::Saturating;
        self.rounds = 0;
        self.incidence.rebuild(&self.hyps);

        let mut only_updated = false;
        let outcome = loop {
            if let Some(fact) = self.find_goal() {
                break SearchOutcome::Proved {
                    fact,
                    rounds: self.rounds,
                };
            }
            if self.rounds > self.config.max_rounds {
                break SearchOutcome::CapExceeded {
                    rounds: self.rounds,
                };
            }

            let added = self.step(only_updated);
            self.rounds += 1;
            only_updated = self.config.incremental;

            if added == 0 {
                break match self.find_goal() {
                    Some(fact) => SearchOutcome::Proved {
                        fact,
                        rounds: self.rounds,
                    },
                    None => SearchOutcome::Exhausted {
                        rounds: self.rounds,
                    },
                };
            }
        };

        self.state = outcome.state();
        info!(
            ?outcome,
            hyps = self.hyps.len(),
            shadowed = self.hyps.num_shadowed(),
            "search finished"
        );
        outcome
    }

    /// Run the search and replay the proof if there is one
    pub fn solve(&mut self) -> SearchResult {
        let outcome = self.search_fixpoint();
        let proof = match outcome.proved_fact().map(|id| self.proof(id)).transpose() {
            Ok(proof) => proof,
            Err(err) => {
                warn!(%err, "proof replay failed");
                None
            }
        };
        SearchResult {
            solved: outcome.is_proved(),
            outcome,
            proof,
            rounds: outcome.rounds(),
            facts_total: self.hyps.len(),
            facts_shadowed: self.hyps.num_shadowed(),
        }
    }

    /// Justification of `id`, each rule step labelled with the rule's text
    pub fn proof(&self, id: FactId) -> EngineResult<ProofTrace> {
        let proved = self.hyps.try_get(id)?.to_string();
        let mut trace = ProofTrace::replay(&self.hyps, id, |name| {
            self.ruleset.get(name).map(|rule| rule.to_string())
        });
        if let Some(goal) = &self.goal {
            trace.add_metadata("goal".to_string(), goal.to_string());
        }
        trace.add_metadata("proved".to_string(), proved);
        trace.add_metadata("rounds".to_string(), self.rounds.to_string());
        Ok(trace)
    }
}
