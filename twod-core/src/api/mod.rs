pub mod envelope;

pub use envelope::{ApiEnvelope, BetResponse, LoginGrant, BET_SUCCESS_STATUS};

use crate::bet::BetBackend;
use crate::config::ClientConfig;
use crate::error::{Result, TwoDError};
use crate::live::LiveSource;
use crate::storage::cart_store::CartPayload;
use crate::storage::SessionStore;
use crate::types::{LiveDraw, LoginCredentials, UserProfile};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde_json::Value;

/// HTTP client for the portal backend and the live draw feed.
///
/// The bearer token is read from the session store on every call. A 401 is
/// reported as [`TwoDError::SessionExpired`]; the caller decides what to do next.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    http_client: HttpClient,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionStore) -> Result<Self> {
        config.validate()?;

        let http_client = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TwoDError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let builder = builder.header(ACCEPT, "application/json");
        Ok(match self.session.token().await? {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        })
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend answered 401, session expired");
            return Err(TwoDError::SessionExpired);
        }
        Ok(response)
    }

    async fn read_json(response: Response) -> Result<(StatusCode, Value)> {
        let status = response.status();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| TwoDError::network(format!("Invalid response body: {}", e)))?;
        Ok((status, body))
    }

    /// POST `/login`; returns the status and raw body for normalization by the caller.
    pub async fn post_login(&self, credentials: &LoginCredentials) -> Result<(StatusCode, Value)> {
        let url = self.config.endpoint_url(&self.config.endpoints.login);
        tracing::debug!("Logging in via {}", url);

        let request = self
            .http_client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(credentials);

        let response = request.send().await?;
        Self::read_json(response).await
    }

    pub async fn post_logout(&self) -> Result<()> {
        let url = self.config.endpoint_url(&self.config.endpoints.logout);
        let request = self.authorized(self.http_client.post(&url)).await?;
        self.send(request).await?;
        Ok(())
    }

    /// GET `/user`. A non-JSON answer yields `Ok(None)`.
    pub async fn get_profile(&self) -> Result<Option<UserProfile>> {
        let url = self.config.endpoint_url(&self.config.endpoints.user);
        tracing::debug!("Fetching profile from {}", url);

        let request = self.authorized(self.http_client.get(&url)).await?;
        let response = self.send(request).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(false, |ct| ct.contains("application/json"));
        if !is_json {
            tracing::warn!("Profile update: received non-JSON response, skipping");
            return Ok(None);
        }

        let (_, body) = Self::read_json(response).await?;
        Ok(envelope::profile_from_body(&body))
    }

    /// POST `/twod-bet`, exactly once.
    pub async fn post_bet(&self, payload: &CartPayload) -> Result<BetResponse> {
        let url = self.config.endpoint_url(&self.config.endpoints.two_d_bet);
        tracing::debug!(
            "Submitting {} numbers (total {}) to {}",
            payload.amounts.len(),
            payload.total_amount,
            url
        );

        let request = self
            .authorized(self.http_client.post(&url))
            .await?
            .json(payload);
        let response = self.send(request).await?;
        let (status, body) = Self::read_json(response).await?;
        Ok(BetResponse::from_parts(status, &body))
    }

    pub async fn get_live(&self) -> Result<LiveDraw> {
        let response = self
            .http_client
            .get(&self.config.live_url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TwoDError::network(format!(
                "Live feed answered {}",
                response.status()
            )));
        }

        let draw = response
            .json::<LiveDraw>()
            .await
            .map_err(|e| TwoDError::network(format!("Invalid live data: {}", e)))?;
        Ok(draw)
    }
}

#[async_trait]
impl BetBackend for ApiClient {
    async fn submit_bet(&self, payload: &CartPayload) -> Result<BetResponse> {
        self.post_bet(payload).await
    }

    async fn fetch_profile(&self) -> Result<Option<UserProfile>> {
        self.get_profile().await
    }
}

#[async_trait]
impl LiveSource for ApiClient {
    async fn fetch_live(&self) -> Result<LiveDraw> {
        self.get_live().await
    }
}
