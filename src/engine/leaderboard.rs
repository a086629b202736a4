//! Leaderboard ranking.
//!
//! Sorts an objective listing by descending score. The sort is stable, so
//! participants on equal scores keep their host enumeration order and the
//! same listing always yields the same board.

use tracing::debug;

use crate::objective::ObjectiveAggregator;
use crate::store::ScoreStore;
use crate::types::{LeaderboardEntry, LeaderboardQuery, Result, ScoreItem};

/// Rank a listing: stable sort by descending value, keep the first `limit`,
/// number placements from 1.
pub fn rank(mut items: Vec<ScoreItem>, limit: usize) -> Vec<LeaderboardEntry> {
    items.sort_by(|a, b| b.value.cmp(&a.value));
    items
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, item)| LeaderboardEntry {
            placement: idx + 1,
            name: item.name,
            value: item.value,
        })
        .collect()
}

pub struct LeaderboardRanker<'a, S: ScoreStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ScoreStore + ?Sized> LeaderboardRanker<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Fetch the current listing of `objective` and rank it.
    pub async fn leaderboard(
        &self,
        objective: &str,
        query: LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>> {
        let items = ObjectiveAggregator::new(self.store).list(objective).await?;
        let participants = items.len();
        let board = rank(items, query.limit);
        debug!(
            objective,
            participants,
            limit = query.limit,
            rows = board.len(),
            "Leaderboard ranked"
        );
        Ok(board)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
