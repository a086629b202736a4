//! Host score store.
//!
//! Defines the `ScoreStore` trait the scoreboard layer is written against,
//! and provides an in-memory implementation:
//! - `memory`: insertion-ordered objectives held in process, used by the
//!   demo binary and by tests

pub mod memory;

use async_trait::async_trait;

use crate::types::{Participant, Result, Score};

/// Abstraction over the host's objective/participant/score storage.
///
/// Every call is a potential yield point for the host. Implementations
/// report an absent objective as `ScoreboardError::ObjectiveNotFound` and
/// any infrastructure failure as `ScoreboardError::Host`, so callers can
/// tell "not there" apart from "could not look".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Whether an objective with this name exists.
    async fn has_objective(&self, objective: &str) -> Result<bool>;

    /// All participants of an objective, in host enumeration order.
    async fn participants(&self, objective: &str) -> Result<Vec<Participant>>;

    /// Every participant together with its score, in host enumeration order.
    async fn scores(&self, objective: &str) -> Result<Vec<(Participant, Score)>>;

    /// Score of one participant. `Ok(None)` when the participant has no score.
    async fn score(&self, objective: &str, participant: &Participant) -> Result<Option<Score>>;

    /// Overwrite the score of one participant.
    async fn set_score(&self, objective: &str, participant: &Participant, value: Score)
        -> Result<()>;

    /// Remove a participant from an objective. Returns whether it was present.
    async fn remove_participant(&self, objective: &str, participant: &Participant)
        -> Result<bool>;

    /// Remove an objective entirely. Returns whether it existed.
    async fn remove_objective(&self, objective: &str) -> Result<bool>;

    /// Resolve a display name to a participant.
    ///
    /// When several participants share the display name, the first one in
    /// enumeration order wins.
    async fn find_participant(&self, objective: &str, name: &str) -> Result<Option<Participant>> {
        let participants = self.participants(objective).await?;
        Ok(participants.into_iter().find(|p| p.display_name == name))
    }
}
