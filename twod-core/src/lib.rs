//! 2D lottery client - core library
//!
//! Bet cart and quick-pick rules, cart hand-off between the selection and
//! confirmation steps, bet submission against the portal backend, session
//! handling and live draw polling.

pub mod api;
pub mod auth;
pub mod bet;
pub mod cart;
pub mod client;
pub mod config;
pub mod error;
pub mod live;
pub mod rules;
pub mod storage;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiClient, BetResponse};
pub use auth::AuthService;
pub use bet::{BetOutcome, BetSubmitter, ConfirmSession, FlowState, SelectionSession};
pub use cart::{BetCart, BetEntry, StakePolicy};
pub use client::TwoDClient;
pub use config::ClientConfig;
pub use error::{Result, TwoDError};
pub use live::{LivePoller, LiveView, PollerHandle};
pub use rules::{QuickPick, RuleGroup};
pub use storage::{CartStore, KeyValueStore, MemoryStore, SessionStore, Storage};
pub use types::{LiveDraw, LoginCredentials, UserProfile};
