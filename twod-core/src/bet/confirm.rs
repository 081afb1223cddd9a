use crate::cart::{BetCart, BetEntry, StakePolicy};
use crate::error::Result;
use crate::storage::CartStore;

/// Review step over the persisted cart. Every change is written back at once.
pub struct ConfirmSession {
    cart: BetCart,
    policy: StakePolicy,
    store: CartStore,
}

impl ConfirmSession {
    /// `None` when there is nothing to confirm and the caller should go back to selection.
    pub async fn open(store: CartStore, policy: StakePolicy) -> Option<Self> {
        let cart = store.load().await.filter(|cart| !cart.is_empty())?;
        Some(Self {
            cart,
            policy,
            store,
        })
    }

    pub fn cart(&self) -> &BetCart {
        &self.cart
    }

    /// Changes a stake. A stake below the floor is rejected and changes nothing.
    pub async fn edit(&mut self, number: &str, new_amount: u64) -> Result<()> {
        self.policy.check(new_amount)?;
        let mut cart = self.cart.clone();
        cart.edit(number, new_amount)?;
        self.commit(cart).await?;

        tracing::debug!("Edited {} to {}, total {}", number, new_amount, self.cart.total());
        Ok(())
    }

    pub async fn remove(&mut self, number: &str) -> Result<BetEntry> {
        let mut cart = self.cart.clone();
        let removed = cart.remove(number)?;
        self.commit(cart).await?;
        Ok(removed)
    }

    // The in-memory cart only changes once the store has it.
    async fn commit(&mut self, cart: BetCart) -> Result<()> {
        self.store.save(&cart).await?;
        self.cart = cart;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TwoDError;
    use crate::storage::{KeyValueStore, MemoryStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// Memory store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        writes_fail: AtomicBool,
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> crate::error::Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> crate::error::Result<()> {
            if self.writes_fail.load(Ordering::SeqCst) {
                return Err(TwoDError::internal("disk full"));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> crate::error::Result<()> {
            self.inner.remove(key).await
        }
    }

    async fn stored_cart() -> CartStore {
        let store = CartStore::new(Arc::new(MemoryStore::new()));
        let mut cart = BetCart::new();
        cart.add_or_update("05", 300).unwrap();
        cart.add_or_update("12", 300).unwrap();
        store.save(&cart).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_missing_or_empty_cart_redirects() {
        let store = CartStore::new(Arc::new(MemoryStore::new()));
        assert!(ConfirmSession::open(store.clone(), StakePolicy::default())
            .await
            .is_none());

        store.save(&BetCart::new()).await.unwrap();
        assert!(ConfirmSession::open(store, StakePolicy::default())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_edit_respects_floor() {
        let store = stored_cart().await;
        let mut confirm = ConfirmSession::open(store.clone(), StakePolicy::default())
            .await
            .unwrap();

        assert!(matches!(
            confirm.edit("05", 99).await,
            Err(TwoDError::Validation(_))
        ));
        assert_eq!(confirm.cart().get("05").unwrap().amount, 300);
        assert_eq!(store.load().await.unwrap().total(), 600);

        confirm.edit("05", 100).await.unwrap();
        assert_eq!(confirm.cart().total(), 400);
        assert_eq!(store.load().await.unwrap().total(), 400);

        assert!(matches!(
            confirm.edit("77", 500).await,
            Err(TwoDError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let store = stored_cart().await;
        let mut confirm = ConfirmSession::open(store.clone(), StakePolicy::default())
            .await
            .unwrap();

        let removed = confirm.remove("12").await.unwrap();
        assert_eq!(removed.amount, 300);

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.total(), 300);
    }

    #[tokio::test]
    async fn test_failed_save_leaves_session_unchanged() {
        let backing = Arc::new(FlakyStore::default());
        let store = CartStore::new(backing.clone());
        let mut cart = BetCart::new();
        cart.add_or_update("05", 300).unwrap();
        cart.add_or_update("12", 300).unwrap();
        store.save(&cart).await.unwrap();

        let mut confirm = ConfirmSession::open(store.clone(), StakePolicy::default())
            .await
            .unwrap();
        backing.writes_fail.store(true, Ordering::SeqCst);

        assert!(confirm.edit("05", 500).await.is_err());
        assert!(confirm.remove("12").await.is_err());
        assert_eq!(confirm.cart(), &cart);
        assert_eq!(store.load().await.unwrap(), cart);

        backing.writes_fail.store(false, Ordering::SeqCst);
        confirm.remove("12").await.unwrap();
        assert_eq!(confirm.cart().total(), 300);
        assert_eq!(store.load().await.unwrap().total(), 300);
    }
}
