//! Login, logout and the cached profile.

use crate::api::{ApiClient, ApiEnvelope, LoginGrant};
use crate::error::{Result, TwoDError};
use crate::storage::{SessionStore, StoredUser};
use crate::types::LoginCredentials;
use chrono::{DateTime, Utc};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn session(&self) -> &SessionStore {
        self.api.session()
    }

    /// Logs in and persists the token with a 30 day timeout when `remember_me`, 24 hours otherwise.
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
        remember_me: bool,
        now: DateTime<Utc>,
    ) -> Result<StoredUser> {
        if credentials.user_name.trim().is_empty() || credentials.password.is_empty() {
            return Err(TwoDError::validation(
                "ဖုန်းနံပါတ်နှင့် စကားဝှက် ထည့်ပါ။ (User name and password are required)",
            ));
        }

        let (status, body) = self.api.post_login(credentials).await?;

        let grant = match LoginGrant::from_body(&body) {
            Some(grant) if status.is_success() => grant,
            _ => {
                let envelope = ApiEnvelope::from_value(&body);
                let message = envelope
                    .first_error()
                    .or(envelope.message)
                    .unwrap_or_else(|| "Login failed".to_string());
                tracing::warn!("Login rejected ({}): {}", status, message);
                return Err(TwoDError::server_rejection(message));
            }
        };

        let timeout = if remember_me {
            self.api.config().remember_me_timeout
        } else {
            self.api.config().session_timeout
        };

        let user = self
            .session()
            .save_login(&grant.token, grant.user, remember_me, timeout, now)
            .await?;

        tracing::info!("Logged in as {}", user.profile.display_name());
        Ok(user)
    }

    /// Best-effort server logout; local session data is cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        if self.session().token().await?.is_some() {
            if let Err(e) = self.api.post_logout().await {
                tracing::warn!("Logout request failed, clearing local session anyway: {}", e);
            }
        }

        self.session().clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn is_authenticated(&self, now: DateTime<Utc>) -> Result<bool> {
        self.session().is_authenticated(now).await
    }

    pub async fn current_user(&self) -> Option<StoredUser> {
        self.session().user().await
    }

    /// Re-fetches the profile and renews the stored session.
    ///
    /// Returns `Ok(None)` when the backend answered with something other than JSON.
    pub async fn refresh_profile(&self, now: DateTime<Utc>) -> Result<Option<StoredUser>> {
        match self.api.get_profile().await {
            Ok(Some(profile)) => Ok(Some(self.session().update_profile(profile, now).await?)),
            Ok(None) => Ok(None),
            Err(TwoDError::SessionExpired) => {
                self.session().clear().await?;
                Err(TwoDError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }
}
