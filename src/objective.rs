//! Objective-scoped aggregates and bulk operations.

use futures::future::join_all;
use tracing::{info, warn};

use crate::store::ScoreStore;
use crate::types::{ObjectiveData, Result, Score, ScoreItem, ScoreboardError};

/// Totals, listings and bulk removal over one objective.
pub struct ObjectiveAggregator<'a, S: ScoreStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ScoreStore + ?Sized> ObjectiveAggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Whether the host currently has `objective`.
    pub async fn exists(&self, objective: &str) -> Result<bool> {
        self.store.has_objective(objective).await
    }

    /// Sum of every score on the objective. An empty objective totals `0`.
    pub async fn total(&self, objective: &str) -> Result<Score> {
        let scores = self.store.scores(objective).await?;
        let mut total: Score = 0;
        for (_, score) in &scores {
            total = total.checked_add(*score).ok_or(ScoreboardError::Overflow {
                current: total,
                op: '+',
                amount: *score,
            })?;
        }
        Ok(total)
    }

    /// One row per participant, in host enumeration order.
    pub async fn list(&self, objective: &str) -> Result<Vec<ScoreItem>> {
        let scores = self.store.scores(objective).await?;
        Ok(scores
            .into_iter()
            .map(|(participant, value)| ScoreItem {
                name: participant.display_name,
                value,
            })
            .collect())
    }

    /// Listing and total, read in two separate passes.
    pub async fn all_data(&self, objective: &str) -> Result<ObjectiveData> {
        let players = self.list(objective).await?;
        let total = self.total(objective).await?;
        Ok(ObjectiveData { total, players })
    }

    /// Remove the objective from the host. Returns whether it existed.
    pub async fn delete(&self, objective: &str) -> Result<bool> {
        let removed = self.store.remove_objective(objective).await?;
        if removed {
            info!(objective, "Objective deleted");
        }
        Ok(removed)
    }

    /// Remove every participant from the objective.
    ///
    /// Removals are issued together; all of them run to completion before
    /// the first failure, if any, is returned. Returns the number removed.
    pub async fn clear(&self, objective: &str) -> Result<usize> {
        let participants = self.store.participants(objective).await?;
        let results = join_all(
            participants
                .iter()
                .map(|p| self.store.remove_participant(objective, p)),
        )
        .await;

        let mut removed = 0;
        let mut first_error = None;
        for (participant, result) in participants.iter().zip(results) {
            match result {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        objective,
                        participant = %participant,
                        error = %e,
                        "Failed to remove participant"
                    );
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            return Err(e);
        }
        info!(objective, removed, "Objective cleared");
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
