//! In-memory score store.
//!
//! Holds objectives in process with participants kept in insertion order,
//! which is the enumeration order every query reports. Objective creation
//! and participant registration are host-side concerns, so they live here
//! as inherent methods rather than on the `ScoreStore` trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

use super::ScoreStore;
use crate::types::{Participant, ParticipantId, Result, Score, ScoreboardError};

#[derive(Debug, Default)]
struct Objective {
    /// Insertion-ordered `(participant, score)` pairs.
    entries: Vec<(Participant, Score)>,
}

#[derive(Debug, Default)]
struct Inner {
    objectives: HashMap<String, Objective>,
    next_id: u64,
}

/// A `ScoreStore` backed by process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| ScoreboardError::Host("score store lock poisoned".to_string()))
    }

    /// Create an objective. Returns `false` if it already existed.
    pub fn create_objective(&self, name: &str) -> Result<bool> {
        let mut inner = self.lock()?;
        if inner.objectives.contains_key(name) {
            return Ok(false);
        }
        inner.objectives.insert(name.to_string(), Objective::default());
        debug!(objective = name, "Objective created");
        Ok(true)
    }

    /// Register a new participant with an initial score.
    ///
    /// Always creates a fresh identity, even if the display name is already
    /// taken on this objective.
    pub fn add_participant(
        &self,
        objective: &str,
        name: &str,
        score: Score,
    ) -> Result<Participant> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let participant = Participant {
            id: ParticipantId(inner.next_id),
            display_name: name.to_string(),
        };
        let entry = inner
            .objectives
            .get_mut(objective)
            .ok_or_else(|| ScoreboardError::ObjectiveNotFound(objective.to_string()))?;
        entry.entries.push((participant.clone(), score));
        Ok(participant)
    }

    /// Names of all objectives, sorted.
    pub fn objective_names(&self) -> Result<Vec<String>> {
        let inner = self.lock()?;
        let mut names: Vec<String> = inner.objectives.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn with_objective<T>(
        &self,
        objective: &str,
        f: impl FnOnce(&mut Objective) -> T,
    ) -> Result<T> {
        let mut inner = self.lock()?;
        let entry = inner
            .objectives
            .get_mut(objective)
            .ok_or_else(|| ScoreboardError::ObjectiveNotFound(objective.to_string()))?;
        Ok(f(entry))
    }
}

#[async_trait]
impl ScoreStore for InMemoryStore {
    async fn has_objective(&self, objective: &str) -> Result<bool> {
        Ok(self.lock()?.objectives.contains_key(objective))
    }

    async fn participants(&self, objective: &str) -> Result<Vec<Participant>> {
        self.with_objective(objective, |o| {
            o.entries.iter().map(|(p, _)| p.clone()).collect()
        })
    }

    async fn scores(&self, objective: &str) -> Result<Vec<(Participant, Score)>> {
        self.with_objective(objective, |o| o.entries.clone())
    }

    async fn score(&self, objective: &str, participant: &Participant) -> Result<Option<Score>> {
        self.with_objective(objective, |o| {
            o.entries
                .iter()
                .find(|(p, _)| p.id == participant.id)
                .map(|(_, s)| *s)
        })
    }

    async fn set_score(
        &self,
        objective: &str,
        participant: &Participant,
        value: Score,
    ) -> Result<()> {
        self.with_objective(objective, |o| {
            match o.entries.iter().position(|(p, _)| p.id == participant.id) {
                Some(idx) => o.entries[idx].1 = value,
                // Setting a score on an unknown identity enrols it, as the host does.
                None => o.entries.push((participant.clone(), value)),
            }
        })
    }

    async fn remove_participant(
        &self,
        objective: &str,
        participant: &Participant,
    ) -> Result<bool> {
        self.with_objective(objective, |o| {
            let before = o.entries.len();
            o.entries.retain(|(p, _)| p.id != participant.id);
            o.entries.len() != before
        })
    }

    async fn remove_objective(&self, objective: &str) -> Result<bool> {
        Ok(self.lock()?.objectives.remove(objective).is_some())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
