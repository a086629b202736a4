//! Integration tests driving the public `Scoreboard` API against the
//! in-memory store and a fault-injecting wrapper around it.

mod leaderboard;
mod mock_store;
mod player;
