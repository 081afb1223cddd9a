//! Bearer token and cached profile.
//!
//! Expiry here is computed on the client from `tokenTime` and is advisory
//! only; the backend's 401 remains the authority on whether a token is valid.

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_DATA_KEY: &str = "user_data";

/// Profile blob persisted next to the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Milliseconds since the epoch when the token was issued or last renewed.
    #[serde(default)]
    pub token_time: i64,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_timeout: Option<i64>,
    #[serde(default)]
    pub remember_me: bool,
}

impl StoredUser {
    pub fn is_expired_at(&self, now: DateTime<Utc>, default_timeout: Duration) -> bool {
        let timeout = self
            .session_timeout
            .unwrap_or(default_timeout.as_millis() as i64);
        now.timestamp_millis() - self.token_time > timeout
    }
}

#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    default_timeout: Duration,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, default_timeout: Duration) -> Self {
        Self {
            store,
            default_timeout,
        }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        self.store.get(TOKEN_KEY).await
    }

    /// Cached profile, `None` if missing or unreadable.
    pub async fn user(&self) -> Option<StoredUser> {
        let raw = self.store.get(USER_DATA_KEY).await.ok()??;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("Error parsing stored user data: {}", e);
                None
            }
        }
    }

    pub async fn save_login(
        &self,
        token: &str,
        profile: UserProfile,
        remember_me: bool,
        session_timeout: Duration,
        now: DateTime<Utc>,
    ) -> Result<StoredUser> {
        let user = StoredUser {
            profile,
            token_time: now.timestamp_millis(),
            session_timeout: Some(session_timeout.as_millis() as i64),
            remember_me,
        };

        self.store.set(TOKEN_KEY, token).await?;
        self.store
            .set(USER_DATA_KEY, &serde_json::to_string(&user)?)
            .await?;
        Ok(user)
    }

    /// Replaces the cached profile and renews `tokenTime`, keeping the session settings.
    pub async fn update_profile(
        &self,
        profile: UserProfile,
        now: DateTime<Utc>,
    ) -> Result<StoredUser> {
        let (session_timeout, remember_me) = match self.user().await {
            Some(previous) => (previous.session_timeout, previous.remember_me),
            None => (None, false),
        };

        let user = StoredUser {
            profile,
            token_time: now.timestamp_millis(),
            session_timeout,
            remember_me,
        };

        self.store
            .set(USER_DATA_KEY, &serde_json::to_string(&user)?)
            .await?;
        Ok(user)
    }

    /// True while a token and an unexpired profile blob exist.
    ///
    /// An expired session is cleared as a side effect.
    pub async fn is_authenticated(&self, now: DateTime<Utc>) -> Result<bool> {
        if self.token().await?.is_none() {
            return Ok(false);
        }

        let Some(user) = self.user().await else {
            return Ok(false);
        };

        if user.is_expired_at(now, self.default_timeout) {
            tracing::info!("Stored session expired, logging out");
            self.clear().await?;
            return Ok(false);
        }

        Ok(true)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_DATA_KEY).await?;
        Ok(())
    }
}
