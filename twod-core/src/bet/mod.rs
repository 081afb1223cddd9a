//! The three steps of placing a bet: select, confirm, submit.

pub mod confirm;
pub mod select;
pub mod submit;

pub use confirm::ConfirmSession;
pub use select::SelectionSession;
pub use submit::{BetBackend, BetOutcome, BetSubmitter, FlowState, Settlement};
