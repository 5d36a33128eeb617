//! Hypothesis collection
//!
//! Facts live in an append-only arena addressed by [`FactId`]. A fact is never
//! removed: superseded facts are marked shadowed so that provenance links into
//! them stay valid.

use super::facts::{Fact, FactId, FactStatus, Lemma, PartMap, Predicate};
use crate::error::{EngineError, EngineResult};
use rustc_hash::FxHashMap;
use std::ops::Index;

/// Append-only fact arena with a per-predicate index
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    facts: Vec<Fact>,

    /// Fact ids grouped by predicate, in insertion order
    by_pred: FxHashMap<Predicate, Vec<FactId>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fact and return its id
    pub fn push(&mut self, fact: Fact) -> FactId {
        let id = FactId(self.facts.len() as u32);
        self.by_pred.entry(fact.pred).or_default().push(id);
        self.facts.push(fact);
        id
    }

    pub fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id.index())
    }

    /// Fallible lookup for ids that come from outside the store
    pub fn try_get(&self, id: FactId) -> EngineResult<&Fact> {
        self.get(id).ok_or(EngineError::FactNotFound(id))
    }

    /// Mark a fact as superseded. Shadowing is permanent.
    pub fn shadow(&mut self, id: FactId) {
        if let Some(fact) = self.facts.get_mut(id.index()) {
            fact.status = FactStatus::Shadowed;
        }
    }

    /// Number of facts ever added, shadowed ones included
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// All facts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &Fact)> {
        self.facts
            .iter()
            .enumerate()
            .map(|(i, f)| (FactId(i as u32), f))
    }

    /// Ids of non-shadowed facts, in insertion order
    pub fn active_ids(&self) -> Vec<FactId> {
        self.iter()
            .filter(|(_, f)| !f.is_shadowed())
            .map(|(id, _)| id)
            .collect()
    }

    /// Non-shadowed facts with the given predicate, in insertion order
    pub fn active_of(&self, pred: Predicate) -> impl Iterator<Item = (FactId, &Fact)> {
        self.by_pred
            .get(&pred)
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&id| (id, &self[id]))
            .filter(|(_, f)| !f.is_shadowed())
    }

    pub fn num_shadowed(&self) -> usize {
        self.facts.iter().filter(|f| f.is_shadowed()).count()
    }

    /// Narrow a match on a combined fact down to the parent that supplied
    /// the matched atomic parts.
    ///
    /// Follows `left_map` into the first parent when every index maps there,
    /// else `right_map` into the second. Stops at the first fact where the
    /// indices straddle both parents.
    pub fn subfact(&self, id: FactId, indices: &[usize]) -> FactId {
        let mut id = id;
        let mut indices = indices.to_vec();
        if indices.is_empty() {
            return id;
        }
        loop {
            let fact = &self[id];
            if fact.lemma != Lemma::Combine || fact.cond.len() != 2 {
                return id;
            }
            if let Some(mapped) = map_through(fact.left_map.as_ref(), &indices) {
                id = fact.cond[0];
                indices = mapped;
            } else if let Some(mapped) = map_through(fact.right_map.as_ref(), &indices) {
                id = fact.cond[1];
                indices = mapped;
            } else {
                return id;
            }
        }
    }
}

fn map_through(map: Option<&PartMap>, indices: &[usize]) -> Option<Vec<usize>> {
    let map = map?;
    indices.iter().map(|&i| map.get(i).copied().flatten()).collect()
}

impl Index<FactId> for FactStore {
    type Output = Fact;

    fn index(&self, id: FactId) -> &Fact {
        &self.facts[id.index()]
    }
}

impl FromIterator<Fact> for FactStore {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut store = FactStore::new();
        for fact in iter {
            store.push(fact);
        }
        store
    }
}
