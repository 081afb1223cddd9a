use crate::cart::{validate_number, BetCart, BetEntry, StakePolicy};
use crate::error::{Result, TwoDError};
use crate::rules::{add_digits, reverse_digits, QuickPick};
use crate::storage::CartStore;

/// Builds a cart from quick picks and manual numbers.
///
/// Nothing is persisted until [`SelectionSession::proceed`].
pub struct SelectionSession {
    cart: BetCart,
    policy: StakePolicy,
    store: CartStore,
}

impl SelectionSession {
    pub fn new(store: CartStore, policy: StakePolicy) -> Self {
        Self {
            cart: BetCart::new(),
            policy,
            store,
        }
    }

    /// Continues from the persisted cart, if there is one.
    pub async fn resume(store: CartStore, policy: StakePolicy) -> Self {
        let cart = store.load().await.unwrap_or_default();
        Self {
            cart,
            policy,
            store,
        }
    }

    pub fn cart(&self) -> &BetCart {
        &self.cart
    }

    pub fn policy(&self) -> StakePolicy {
        self.policy
    }

    /// Applies a quick pick at `stake` per number. An unknown rule applies nothing.
    pub fn pick(&mut self, rule: &QuickPick, stake: u64) -> Result<usize> {
        self.policy.check(stake)?;

        let digits = rule.expand();
        if digits.is_empty() {
            tracing::debug!("Rule '{}' matches no numbers", rule);
            return Ok(0);
        }

        add_digits(&mut self.cart, &digits, stake)
    }

    /// Manual entry. Either every number is valid and applied, or none is.
    pub fn add_numbers<S: AsRef<str>>(&mut self, numbers: &[S], stake: u64) -> Result<usize> {
        self.policy.check(stake)?;
        for number in numbers {
            validate_number(number.as_ref())?;
        }

        add_digits(&mut self.cart, numbers, stake)
    }

    /// Adds the mirror of every number in the cart.
    pub fn reverse(&mut self, stake: u64) -> Result<usize> {
        self.policy.check(stake)?;
        reverse_digits(&mut self.cart, stake)
    }

    pub fn remove(&mut self, number: &str) -> Result<BetEntry> {
        self.cart.remove(number)
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// Hands the cart over to confirmation.
    pub async fn proceed(&self) -> Result<()> {
        if self.cart.is_empty() {
            return Err(TwoDError::validation(
                "ထိုးမည့်ဂဏန်း ရွေးပါ။ (select at least one number)",
            ));
        }

        if let Some(entry) = self.policy.violations(&self.cart).first() {
            return Err(TwoDError::validation(format!(
                "{}: stake {} is below the minimum of {}",
                entry.number, entry.amount, self.policy.min_stake
            )));
        }

        self.store.save(&self.cart).await?;
        tracing::info!(
            "Cart ready for confirmation: {} numbers, total {}",
            self.cart.len(),
            self.cart.total()
        );
        Ok(())
    }
}
