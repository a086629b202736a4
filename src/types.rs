//! Shared types for the scoreboard layer.
//!
//! Everything here is a read-only projection of what the host store holds
//! or a request/outcome record passed between the facade and the engines.
//! Nothing in this module is cached across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A score value as held by the host.
pub type Score = i64;

/// Largest score the host can represent (`2^32 - 1`).
pub const MAX_HOST_SCORE: Score = u32::MAX as Score;

// ---------------------------------------------------------------------------
// Participants
// ---------------------------------------------------------------------------

/// Host-side identity of a scoreboard participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A participant of one objective, as enumerated by the host.
///
/// Display names are not stable keys: two participants may share one, and
/// a player can be renamed between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
}

impl Participant {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

// ---------------------------------------------------------------------------
// Query projections
// ---------------------------------------------------------------------------

/// One `{name, value}` row of an objective listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreItem {
    pub name: String,
    pub value: Score,
}

impl ScoreItem {
    pub fn new(name: impl Into<String>, value: Score) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A ranked leaderboard row. `placement` is 1-based and purely positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub placement: usize,
    pub name: String,
    pub value: Score,
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}. {} - {}", self.placement, self.name, self.value)
    }
}

/// Total and listing of one objective, read in two separate passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectiveData {
    pub total: Score,
    pub players: Vec<ScoreItem>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Default number of rows returned by a leaderboard query.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Parameters of a leaderboard query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    /// Maximum number of rows. `0` yields an empty board.
    pub limit: usize,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

impl LeaderboardQuery {
    pub fn top(limit: usize) -> Self {
        Self { limit }
    }
}

/// A request to move `amount` from `sender` to `receiver` within `objective`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: String,
    pub receiver: String,
    pub objective: String,
    pub amount: Score,
}

impl TransferRequest {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        objective: impl Into<String>,
        amount: Score,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            objective: objective.into(),
            amount,
        }
    }
}

impl fmt::Display for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({} on '{}')",
            self.sender, self.receiver, self.amount, self.objective
        )
    }
}

// ---------------------------------------------------------------------------
// Transfer outcomes
// ---------------------------------------------------------------------------

/// Proof of a committed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub id: Uuid,
    pub request: TransferRequest,
    pub sender_before: Score,
    pub sender_after: Score,
    pub receiver_before: Score,
    pub receiver_after: Score,
    pub timestamp: DateTime<Utc>,
}

/// Why a transfer was refused before any write happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NegativeAmount,
    StoreUnavailable(String),
    UnknownSender,
    UnknownReceiver,
    SameParticipant,
    InsufficientBalance { balance: Score },
    ExceedsMaxScore { resulting: Score, max: Score },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NegativeAmount => write!(f, "amount is negative"),
            RejectReason::StoreUnavailable(msg) => write!(f, "score store unavailable: {msg}"),
            RejectReason::UnknownSender => write!(f, "sender is not on the objective"),
            RejectReason::UnknownReceiver => write!(f, "receiver is not on the objective"),
            RejectReason::SameParticipant => {
                write!(f, "sender and receiver are the same participant")
            }
            RejectReason::InsufficientBalance { balance } => {
                write!(f, "sender balance {balance} is too low")
            }
            RejectReason::ExceedsMaxScore { resulting, max } => {
                write!(f, "receiver would reach {resulting}, above {max}")
            }
        }
    }
}

/// Result of running a transfer through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Both writes landed.
    Committed(TransferReceipt),
    /// A precondition failed; nothing was written.
    Rejected(RejectReason),
    /// A write failed. `sender_debited` is true when the sender write landed
    /// before the failure; `compensated` is true when that debit was undone.
    Failed {
        error: String,
        sender_debited: bool,
        compensated: bool,
    },
}

impl TransferOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, TransferOutcome::Committed(_))
    }

    /// Whether the store may be left with the sender debited and the receiver
    /// not credited.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            TransferOutcome::Failed {
                sender_debited: true,
                compensated: false,
                ..
            }
        )
    }

    pub fn receipt(&self) -> Option<&TransferReceipt> {
        match self {
            TransferOutcome::Committed(receipt) => Some(receipt),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the scoreboard layer and by store implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreboardError {
    #[error("Objective not found: {0}")]
    ObjectiveNotFound(String),

    #[error("Participant '{name}' not found on objective '{objective}'")]
    ParticipantNotFound { name: String, objective: String },

    #[error("Score overflow: {current} {op} {amount}")]
    Overflow {
        current: Score,
        op: char,
        amount: Score,
    },

    #[error("Host store error: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScoreboardError {
    pub fn participant_not_found(name: &str, objective: &str) -> Self {
        ScoreboardError::ParticipantNotFound {
            name: name.to_string(),
            objective: objective.to_string(),
        }
    }

    /// Whether this error means "absent" rather than "lookup failed".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScoreboardError::ObjectiveNotFound(_) | ScoreboardError::ParticipantNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ScoreboardError>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
