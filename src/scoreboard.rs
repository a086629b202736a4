//! Scoreboard facade.
//!
//! Groups every public operation over one injected store handle. The facade
//! holds no score state of its own; each call goes straight to the store.

use std::sync::Arc;

use crate::config::ScoreboardConfig;
use crate::engine::{LeaderboardRanker, TransferEngine};
use crate::objective::ObjectiveAggregator;
use crate::player::PlayerAccessor;
use crate::store::ScoreStore;
use crate::types::{
    LeaderboardEntry, LeaderboardQuery, ObjectiveData, Result, Score, ScoreItem,
    TransferOutcome, TransferRequest,
};

pub struct Scoreboard<S: ScoreStore + ?Sized> {
    store: Arc<S>,
    config: ScoreboardConfig,
}

impl<S: ScoreStore + ?Sized> Clone for Scoreboard<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: ScoreStore + ?Sized> Scoreboard<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, ScoreboardConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: ScoreboardConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    // -- Player-scoped ----------------------------------------------------

    /// Player operations: `get`, `set`, `add`, `remove`, `clear`.
    pub fn player(&self) -> PlayerAccessor<'_, S> {
        PlayerAccessor::new(&*self.store)
    }

    // -- Objective-scoped -------------------------------------------------

    pub async fn exists(&self, objective: &str) -> Result<bool> {
        self.objective().exists(objective).await
    }

    pub async fn total(&self, objective: &str) -> Result<Score> {
        self.objective().total(objective).await
    }

    pub async fn list(&self, objective: &str) -> Result<Vec<ScoreItem>> {
        self.objective().list(objective).await
    }

    pub async fn all_data(&self, objective: &str) -> Result<ObjectiveData> {
        self.objective().all_data(objective).await
    }

    pub async fn delete(&self, objective: &str) -> Result<bool> {
        self.objective().delete(objective).await
    }

    /// Remove every participant of `objective`.
    pub async fn clear(&self, objective: &str) -> Result<usize> {
        self.objective().clear(objective).await
    }

    /// Move `amount` from `sender` to `receiver`. `true` only when both
    /// writes landed.
    pub async fn transfer(
        &self,
        sender: &str,
        receiver: &str,
        objective: &str,
        amount: Score,
    ) -> bool {
        let request = TransferRequest::new(sender, receiver, objective, amount);
        self.transfer_with(&request).await.is_committed()
    }

    /// Run a transfer and return the full outcome.
    pub async fn transfer_with(&self, request: &TransferRequest) -> TransferOutcome {
        TransferEngine::new(&*self.store, self.config.transfer)
            .execute(request)
            .await
    }

    /// Top `limit` participants of `objective`.
    pub async fn leaderboard(
        &self,
        objective: &str,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        self.leaderboard_with(objective, LeaderboardQuery::top(limit))
            .await
    }

    /// Leaderboard using the configured default row count.
    pub async fn top(&self, objective: &str) -> Result<Vec<LeaderboardEntry>> {
        self.leaderboard(objective, self.config.leaderboard_limit)
            .await
    }

    pub async fn leaderboard_with(
        &self,
        objective: &str,
        query: LeaderboardQuery,
    ) -> Result<Vec<LeaderboardEntry>> {
        LeaderboardRanker::new(&*self.store)
            .leaderboard(objective, query)
            .await
    }

    fn objective(&self) -> ObjectiveAggregator<'_, S> {
        ObjectiveAggregator::new(&*self.store)
    }
}
