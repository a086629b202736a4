//! scorekeep: scoreboard convenience layer over a host score store.
//!
//! Library crate exposing all modules for use by integration tests
//! and the demo binary.

pub mod config;
pub mod types;
pub mod store;
pub mod player;
pub mod objective;
pub mod engine;
pub mod scoreboard;

pub use scoreboard::Scoreboard;
pub use store::memory::InMemoryStore;
pub use store::ScoreStore;
pub use types::{
    LeaderboardEntry, LeaderboardQuery, ObjectiveData, Result, Score, ScoreItem,
    ScoreboardError, TransferOutcome, TransferRequest,
};
