use crate::cart::{BetCart, BetEntry};
use crate::error::Result;
use crate::storage::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const CART_KEY: &str = "bets";

/// Stored and submitted shape of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    pub total_amount: u64,
    pub amounts: Vec<BetEntry>,
}

impl From<&BetCart> for CartPayload {
    fn from(cart: &BetCart) -> Self {
        Self {
            total_amount: cart.total(),
            amounts: cart.entries().to_vec(),
        }
    }
}

impl CartPayload {
    /// Rebuilds a cart, re-deriving the total. `None` if any entry is invalid.
    pub fn into_cart(self) -> Option<BetCart> {
        let mut cart = BetCart::new();
        for entry in &self.amounts {
            if let Err(e) = cart.add_or_update(&entry.number, entry.amount) {
                tracing::warn!("Stored cart entry '{}' rejected: {}", entry.number, e);
                return None;
            }
        }

        if cart.total() != self.total_amount {
            tracing::warn!(
                "Stored cart total {} disagrees with entries ({}), using entries",
                self.total_amount,
                cart.total()
            );
        }

        Some(cart)
    }
}

/// Hands the cart from the selection step to the confirmation step.
#[derive(Clone)]
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
}

impl CartStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save(&self, cart: &BetCart) -> Result<()> {
        let payload = CartPayload::from(cart);
        let json = serde_json::to_string(&payload)?;
        self.store.set(CART_KEY, &json).await?;

        tracing::debug!(
            "Saved cart with {} numbers, total {}",
            cart.len(),
            cart.total()
        );
        Ok(())
    }

    /// The persisted cart, or `None` when nothing usable is stored.
    pub async fn load(&self) -> Option<BetCart> {
        let raw = match self.store.get(CART_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read stored cart: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CartPayload>(&raw) {
            Ok(payload) => payload.into_cart(),
            Err(e) => {
                tracing::warn!("Ignoring malformed stored cart: {}", e);
                None
            }
        }
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(CART_KEY).await?;
        tracing::debug!("Cleared stored cart");
        Ok(())
    }
}
