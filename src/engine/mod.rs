//! Core engine: guarded transfers and leaderboard ranking.

pub mod leaderboard;
pub mod transfer;

pub use leaderboard::{rank, LeaderboardRanker};
pub use transfer::{TransferConfig, TransferEngine};
