use crate::api::BetResponse;
use crate::cart::StakePolicy;
use crate::error::{Result, TwoDError};
use crate::storage::cart_store::CartPayload;
use crate::storage::{CartStore, SessionStore};
use crate::types::UserProfile;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// The two backend calls a submission needs.
#[async_trait]
pub trait BetBackend: Send + Sync {
    async fn submit_bet(&self, payload: &CartPayload) -> Result<BetResponse>;

    async fn fetch_profile(&self) -> Result<Option<UserProfile>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    Submitting,
    Settled(Settlement),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetOutcome {
    /// Cart cleared; go back to selection after `redirect_after`.
    Accepted {
        message: Option<String>,
        redirect_after: Duration,
    },
    /// Per-number limit exceeded for these numbers. Cart kept.
    OverLimit { numbers: Vec<String> },
    Rejected { message: String },
    /// Another submission is still running; nothing was sent.
    InFlight,
}

impl BetOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BetOutcome::Accepted { .. })
    }
}

/// Submits the persisted cart, at most one request at a time.
pub struct BetSubmitter {
    backend: Arc<dyn BetBackend>,
    carts: CartStore,
    session: SessionStore,
    policy: StakePolicy,
    success_delay: Duration,
    state: Mutex<FlowState>,
}

impl BetSubmitter {
    pub fn new(
        backend: Arc<dyn BetBackend>,
        carts: CartStore,
        session: SessionStore,
        policy: StakePolicy,
        success_delay: Duration,
    ) -> Self {
        Self {
            backend,
            carts,
            session,
            policy,
            success_delay,
            state: Mutex::new(FlowState::Idle),
        }
    }

    pub fn state(&self) -> FlowState {
        *self.state.lock()
    }

    fn begin(&self) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, FlowState::Validating | FlowState::Submitting) {
            return false;
        }
        *state = FlowState::Validating;
        true
    }

    pub async fn submit(&self) -> Result<BetOutcome> {
        if !self.begin() {
            tracing::debug!("Submission already in flight, ignoring");
            return Ok(BetOutcome::InFlight);
        }

        // Settles as a failure if this future is dropped mid-flight.
        let mut settle = SettleOnDrop {
            state: &self.state,
            settlement: Settlement::Failure,
        };

        let submission_id = Uuid::new_v4();
        let result = self.run(submission_id).await;

        if matches!(&result, Ok(outcome) if outcome.is_success()) {
            settle.settlement = Settlement::Success;
        }

        result
    }

    async fn run(&self, submission_id: Uuid) -> Result<BetOutcome> {
        let cart = match self.carts.load().await {
            Some(cart) if !cart.is_empty() => cart,
            _ => {
                return Err(TwoDError::validation(
                    "ထိုးမည့်ဂဏန်း မရှိပါ။ (no bets to submit)",
                ))
            }
        };

        let low: Vec<&str> = self
            .policy
            .violations(&cart)
            .into_iter()
            .map(|e| e.number.as_str())
            .collect();
        if !low.is_empty() {
            return Err(TwoDError::validation(format!(
                "Stake below the minimum of {} for: {}",
                self.policy.min_stake,
                low.join(", ")
            )));
        }

        *self.state.lock() = FlowState::Submitting;
        tracing::info!(
            %submission_id,
            "Submitting {} numbers, total {}",
            cart.len(),
            cart.total()
        );

        let response = match self.backend.submit_bet(&CartPayload::from(&cart)).await {
            Ok(response) => response,
            Err(TwoDError::SessionExpired) => {
                self.session.clear().await?;
                return Err(TwoDError::SessionExpired);
            }
            Err(e) => {
                tracing::warn!(%submission_id, "Bet submission failed: {}", e);
                return Err(e);
            }
        };

        match response {
            BetResponse::Accepted { message } => {
                self.refresh_profile(submission_id).await;

                if let Err(e) = self.carts.clear().await {
                    tracing::warn!(%submission_id, "Bet accepted but cart not cleared: {}", e);
                }

                tracing::info!(%submission_id, "Bet accepted");
                Ok(BetOutcome::Accepted {
                    message,
                    redirect_after: self.success_delay,
                })
            }
            BetResponse::OverLimit(numbers) => {
                tracing::info!(%submission_id, "Over limit: {}", numbers.join(", "));
                Ok(BetOutcome::OverLimit { numbers })
            }
            BetResponse::Rejected { message } => {
                tracing::info!(%submission_id, "Bet rejected: {}", message);
                Ok(BetOutcome::Rejected { message })
            }
        }
    }

    async fn refresh_profile(&self, submission_id: Uuid) {
        match self.backend.fetch_profile().await {
            Ok(Some(profile)) => {
                if let Err(e) = self.session.update_profile(profile, Utc::now()).await {
                    tracing::warn!(%submission_id, "Failed to store refreshed profile: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(%submission_id, "Profile refresh failed: {}", e),
        }
    }
}

struct SettleOnDrop<'a> {
    state: &'a Mutex<FlowState>,
    settlement: Settlement,
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        *self.state.lock() = FlowState::Settled(self.settlement);
    }
}
