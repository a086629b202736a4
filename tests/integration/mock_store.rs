//! Fault-injecting store for integration testing.
//!
//! Wraps an `InMemoryStore` and lets test code make individual writes fail,
//! simulating a host that refuses a score update part-way through an
//! operation.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use scorekeep::types::{Participant, Score};
use scorekeep::{InMemoryStore, Result, ScoreStore, ScoreboardError};

/// Which writes the mock should refuse.
#[derive(Debug, Clone, Default)]
pub enum WriteFault {
    #[default]
    None,
    /// Every write to a participant with this display name fails.
    Participant(String),
    /// The n-th write from now (1-based) fails, later writes succeed.
    Nth(usize),
    /// The n-th write from now and every write after it fail.
    FromNth(usize),
    /// Every read and write fails.
    All,
}

pub struct FaultyStore {
    inner: InMemoryStore,
    fault: Arc<Mutex<WriteFault>>,
    writes: Arc<Mutex<usize>>,
}

impl FaultyStore {
    /// A store with one objective seeded from `(name, score)` pairs.
    pub fn seeded(objective: &str, entries: &[(&str, Score)]) -> Self {
        let inner = InMemoryStore::new();
        inner.create_objective(objective).unwrap();
        for (name, score) in entries {
            inner.add_participant(objective, name, *score).unwrap();
        }
        Self {
            inner,
            fault: Arc::new(Mutex::new(WriteFault::None)),
            writes: Arc::new(Mutex::new(0)),
        }
    }

    pub fn inject(&self, fault: WriteFault) {
        *self.writes.lock().unwrap() = 0;
        *self.fault.lock().unwrap() = fault;
    }

    pub fn heal(&self) {
        self.inject(WriteFault::None);
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    fn check_read(&self) -> Result<()> {
        match *self.fault.lock().unwrap() {
            WriteFault::All => Err(ScoreboardError::Host("host unavailable".into())),
            _ => Ok(()),
        }
    }

    fn check_write(&self, participant: &Participant) -> Result<()> {
        let mut writes = self.writes.lock().unwrap();
        *writes += 1;
        let refused = match &*self.fault.lock().unwrap() {
            WriteFault::None => false,
            WriteFault::Participant(name) => *name == participant.display_name,
            WriteFault::Nth(n) => *writes == *n,
            WriteFault::FromNth(n) => *writes >= *n,
            WriteFault::All => true,
        };
        if refused {
            Err(ScoreboardError::Host(format!(
                "write to {} refused",
                participant.display_name
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ScoreStore for FaultyStore {
    async fn has_objective(&self, objective: &str) -> Result<bool> {
        self.check_read()?;
        self.inner.has_objective(objective).await
    }

    async fn participants(&self, objective: &str) -> Result<Vec<Participant>> {
        self.check_read()?;
        self.inner.participants(objective).await
    }

    async fn scores(&self, objective: &str) -> Result<Vec<(Participant, Score)>> {
        self.check_read()?;
        self.inner.scores(objective).await
    }

    async fn score(&self, objective: &str, participant: &Participant) -> Result<Option<Score>> {
        self.check_read()?;
        self.inner.score(objective, participant).await
    }

    async fn set_score(
        &self,
        objective: &str,
        participant: &Participant,
        value: Score,
    ) -> Result<()> {
        self.check_write(participant)?;
        self.inner.set_score(objective, participant, value).await
    }

    async fn remove_participant(&self, objective: &str, participant: &Participant) -> Result<bool> {
        self.check_write(participant)?;
        self.inner.remove_participant(objective, participant).await
    }

    async fn remove_objective(&self, objective: &str) -> Result<bool> {
        self.check_read()?;
        self.inner.remove_objective(objective).await
    }
}
