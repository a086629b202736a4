//! Player-scoped score access.
//!
//! Resolves one participant by display name within an objective and reads
//! or writes its score. Every call goes back to the store.

use tracing::{debug, warn};

use crate::store::ScoreStore;
use crate::types::{Participant, Result, Score, ScoreboardError};

/// Score accessor for participants addressed by display name.
pub struct PlayerAccessor<'a, S: ScoreStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ScoreStore + ?Sized> PlayerAccessor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve `name` or fail with `ParticipantNotFound`.
    async fn resolve(&self, name: &str, objective: &str) -> Result<Participant> {
        self.store
            .find_participant(objective, name)
            .await?
            .ok_or_else(|| ScoreboardError::participant_not_found(name, objective))
    }

    /// Read a score, keeping "absent" and "lookup failed" apart.
    ///
    /// `Ok(None)` means the objective exists but the participant is not on
    /// it (or has no score). Errors are store failures or a missing objective.
    pub async fn try_get(&self, name: &str, objective: &str) -> Result<Option<Score>> {
        match self.store.find_participant(objective, name).await? {
            Some(participant) => self.store.score(objective, &participant).await,
            None => Ok(None),
        }
    }

    /// Score of an already-resolved participant, skipping the lookup by
    /// display name. A participant with no score holds `0`; store failures
    /// are returned.
    pub async fn get_participant(
        &self,
        participant: &Participant,
        objective: &str,
    ) -> Result<Score> {
        Ok(self.store.score(objective, participant).await?.unwrap_or(0))
    }

    /// Current score of `name`, or `0`.
    ///
    /// An unknown participant, a missing objective and a failing store all
    /// read as `0`. Use [`try_get`](Self::try_get) to tell them apart.
    pub async fn get(&self, name: &str, objective: &str) -> Score {
        match self.try_get(name, objective).await {
            Ok(Some(score)) => score,
            Ok(None) => {
                debug!(name, objective, "No score recorded, reading as 0");
                0
            }
            Err(e) if e.is_not_found() => {
                debug!(name, objective, error = %e, "Lookup target missing, reading as 0");
                0
            }
            Err(e) => {
                warn!(name, objective, error = %e, "Score lookup failed, reading as 0");
                0
            }
        }
    }

    /// Overwrite the score of `name`.
    pub async fn set(&self, name: &str, objective: &str, amount: Score) -> Result<()> {
        let participant = self.resolve(name, objective).await?;
        self.store.set_score(objective, &participant, amount).await?;
        debug!(name, objective, amount, "Score set");
        Ok(())
    }

    /// Add `amount` to the score of `name`.
    pub async fn add(&self, name: &str, objective: &str, amount: Score) -> Result<()> {
        let participant = self.resolve(name, objective).await?;
        let current = self.get_participant(&participant, objective).await?;
        let next = current.checked_add(amount).ok_or(ScoreboardError::Overflow {
            current,
            op: '+',
            amount,
        })?;
        self.store.set_score(objective, &participant, next).await
    }

    /// Subtract `amount` from the score of `name`. The result may go negative.
    pub async fn remove(&self, name: &str, objective: &str, amount: Score) -> Result<()> {
        let participant = self.resolve(name, objective).await?;
        let current = self.get_participant(&participant, objective).await?;
        let next = current.checked_sub(amount).ok_or(ScoreboardError::Overflow {
            current,
            op: '-',
            amount,
        })?;
        self.store.set_score(objective, &participant, next).await
    }

    /// Remove `name` from the objective entirely.
    pub async fn clear(&self, name: &str, objective: &str) -> Result<()> {
        let participant = self.resolve(name, objective).await?;
        if !self.store.remove_participant(objective, &participant).await? {
            return Err(ScoreboardError::participant_not_found(name, objective));
        }
        debug!(name, objective, "Participant cleared");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
