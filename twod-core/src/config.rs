use crate::error::{Result, TwoDError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://tttgamingmm.site/api";
pub const DEFAULT_LIVE_URL: &str = "https://api.thaistock2d.com/live";

/// Smallest stake accepted per number, in kyat.
pub const DEFAULT_MIN_STAKE: u64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub live_url: String,
    pub endpoints: Endpoints,
    #[serde(with = "duration_secs")]
    pub session_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub remember_me_timeout: Duration,
    pub min_stake: u64,
    #[serde(with = "duration_secs")]
    pub poll_interval: Duration,
    #[serde(with = "duration_secs")]
    pub success_delay: Duration,
    #[serde(with = "duration_secs")]
    pub request_timeout: Duration,
}

/// Paths relative to `api_base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub logout: String,
    pub user: String,
    pub two_d_bet: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            logout: "/logout".to_string(),
            user: "/user".to_string(),
            two_d_bet: "/twod-bet".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            live_url: DEFAULT_LIVE_URL.to_string(),
            endpoints: Endpoints::default(),
            session_timeout: Duration::from_secs(24 * 60 * 60), // 24 hours
            remember_me_timeout: Duration::from_secs(30 * 24 * 60 * 60), // 30 days
            min_stake: DEFAULT_MIN_STAKE,
            poll_interval: Duration::from_secs(2),
            success_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Config pointing both the backend and the live feed at `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            live_url: format!("{}/live", base_url.trim_end_matches('/')),
            api_base_url: base_url,
            ..Self::default()
        }
    }

    /// Loads `path` if it exists, falling back to defaults otherwise.
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await? {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded client config from {}", path.display());
        Ok(config)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), endpoint)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(TwoDError::config("API base URL cannot be empty"));
        }

        if self.live_url.is_empty() {
            return Err(TwoDError::config("Live data URL cannot be empty"));
        }

        if self.min_stake == 0 {
            return Err(TwoDError::config("Minimum stake must be greater than 0"));
        }

        if self.poll_interval.is_zero() {
            return Err(TwoDError::config("Poll interval must be greater than 0"));
        }

        if self.session_timeout.is_zero() || self.remember_me_timeout.is_zero() {
            return Err(TwoDError::config("Session timeouts must be greater than 0"));
        }

        Ok(())
    }
}

/// Durations in config.json are plain seconds, fractional allowed.
mod duration_secs {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        if value.subsec_nanos() == 0 {
            serializer.serialize_u64(value.as_secs())
        } else {
            serializer.serialize_f64(value.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}
