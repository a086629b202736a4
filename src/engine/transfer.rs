//! Transfer engine: validated score moves between two participants.
//!
//! Every precondition is checked before the first write, so a rejected
//! transfer never touches the store. The two writes themselves are not
//! atomic on the host; when the receiver write fails after the sender was
//! debited, the engine restores the sender's previous score.

use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::store::ScoreStore;
use crate::types::{
    Participant, RejectReason, Score, TransferOutcome, TransferReceipt, TransferRequest,
    MAX_HOST_SCORE,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunables for the transfer engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    /// Highest score a receiver may end up with.
    pub max_score: Score,
    /// Restore the sender when the receiver write fails.
    pub compensate_on_failure: bool,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            max_score: MAX_HOST_SCORE,
            compensate_on_failure: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validated balances of a transfer that passed every precondition.
struct Plan {
    sender: Participant,
    receiver: Participant,
    sender_before: Score,
    receiver_before: Score,
}

pub struct TransferEngine<'a, S: ScoreStore + ?Sized> {
    store: &'a S,
    config: TransferConfig,
}

impl<'a, S: ScoreStore + ?Sized> TransferEngine<'a, S> {
    pub fn new(store: &'a S, config: TransferConfig) -> Self {
        Self { store, config }
    }

    /// Run a transfer and report exactly what happened.
    pub async fn execute(&self, request: &TransferRequest) -> TransferOutcome {
        let plan = match self.validate(request).await {
            Ok(plan) => plan,
            Err(reason) => {
                warn!(transfer = %request, reason = %reason, "Transfer rejected");
                return TransferOutcome::Rejected(reason);
            }
        };

        let objective = request.objective.as_str();
        let sender_after = plan.sender_before - request.amount;
        let receiver_after = plan.receiver_before + request.amount;

        if let Err(e) = self
            .store
            .set_score(objective, &plan.sender, sender_after)
            .await
        {
            warn!(transfer = %request, error = %e, "Sender write failed, nothing changed");
            return TransferOutcome::Failed {
                error: e.to_string(),
                sender_debited: false,
                compensated: false,
            };
        }

        if let Err(e) = self
            .store
            .set_score(objective, &plan.receiver, receiver_after)
            .await
        {
            let compensated = self.compensate(request, &plan).await;
            return TransferOutcome::Failed {
                error: e.to_string(),
                sender_debited: true,
                compensated,
            };
        }

        let receipt = TransferReceipt {
            id: Uuid::new_v4(),
            request: request.clone(),
            sender_before: plan.sender_before,
            sender_after,
            receiver_before: plan.receiver_before,
            receiver_after,
            timestamp: Utc::now(),
        };

        info!(
            id = %receipt.id,
            transfer = %request,
            sender_after,
            receiver_after,
            "Transfer committed"
        );

        TransferOutcome::Committed(receipt)
    }

    /// Check every precondition, in order, without writing anything.
    async fn validate(&self, request: &TransferRequest) -> Result<Plan, RejectReason> {
        if request.amount < 0 {
            return Err(RejectReason::NegativeAmount);
        }

        let objective = request.objective.as_str();
        let sender = self
            .resolve(objective, &request.sender)
            .await?
            .ok_or(RejectReason::UnknownSender)?;
        let receiver = self
            .resolve(objective, &request.receiver)
            .await?
            .ok_or(RejectReason::UnknownReceiver)?;
        if sender.id == receiver.id {
            return Err(RejectReason::SameParticipant);
        }

        let sender_before = self.read(objective, &sender).await?;
        let receiver_before = self.read(objective, &receiver).await?;

        if request.amount > sender_before {
            return Err(RejectReason::InsufficientBalance {
                balance: sender_before,
            });
        }

        match receiver_before.checked_add(request.amount) {
            Some(resulting) if resulting <= self.config.max_score => {}
            resulting => {
                return Err(RejectReason::ExceedsMaxScore {
                    resulting: resulting.unwrap_or(Score::MAX),
                    max: self.config.max_score,
                });
            }
        }

        Ok(Plan {
            sender,
            receiver,
            sender_before,
            receiver_before,
        })
    }

    async fn resolve(
        &self,
        objective: &str,
        name: &str,
    ) -> Result<Option<Participant>, RejectReason> {
        self.store
            .find_participant(objective, name)
            .await
            .map_err(|e| RejectReason::StoreUnavailable(e.to_string()))
    }

    /// A participant with no recorded score holds `0`. A failed read rejects
    /// the transfer instead, so an unreadable receiver is never overwritten.
    async fn read(
        &self,
        objective: &str,
        participant: &Participant,
    ) -> Result<Score, RejectReason> {
        self.store
            .score(objective, participant)
            .await
            .map(|score| score.unwrap_or(0))
            .map_err(|e| RejectReason::StoreUnavailable(e.to_string()))
    }

    /// Put the sender back after a failed receiver write.
    async fn compensate(&self, request: &TransferRequest, plan: &Plan) -> bool {
        if !self.config.compensate_on_failure {
            error!(
                transfer = %request,
                debited = request.amount,
                "Receiver write failed; sender left debited"
            );
            return false;
        }

        match self
            .store
            .set_score(&request.objective, &plan.sender, plan.sender_before)
            .await
        {
            Ok(()) => {
                warn!(transfer = %request, "Receiver write failed; sender restored");
                true
            }
            Err(e) => {
                error!(
                    transfer = %request,
                    error = %e,
                    debited = request.amount,
                    "Receiver write failed and sender restore failed"
                );
                false
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
