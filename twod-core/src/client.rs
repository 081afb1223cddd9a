use crate::api::ApiClient;
use crate::auth::AuthService;
use crate::bet::{BetSubmitter, ConfirmSession, SelectionSession};
use crate::cart::StakePolicy;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::live::LivePoller;
use crate::storage::{CartStore, KeyValueStore, SessionStore, Storage};
use std::path::Path;
use std::sync::Arc;

/// Wires every service over one store and one config.
pub struct TwoDClient {
    config: ClientConfig,
    api: ApiClient,
    auth: AuthService,
    carts: CartStore,
    submitter: Arc<BetSubmitter>,
}

impl TwoDClient {
    /// Opens (or creates) `twod.db` under `data_dir`.
    pub async fn new(data_dir: &Path, config: ClientConfig) -> Result<Self> {
        let db_path = data_dir.join("twod.db");
        let storage = Arc::new(Storage::new(&db_path).await?);
        Self::with_store(storage, config)
    }

    pub fn with_store(store: Arc<dyn KeyValueStore>, config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let session = SessionStore::new(store.clone(), config.session_timeout);
        let carts = CartStore::new(store);
        let api = ApiClient::new(config.clone(), session.clone())?;
        let auth = AuthService::new(api.clone());

        let submitter = Arc::new(BetSubmitter::new(
            Arc::new(api.clone()),
            carts.clone(),
            session,
            StakePolicy::new(config.min_stake),
            config.success_delay,
        ));

        Ok(Self {
            config,
            api,
            auth,
            carts,
            submitter,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn carts(&self) -> &CartStore {
        &self.carts
    }

    pub fn policy(&self) -> StakePolicy {
        StakePolicy::new(self.config.min_stake)
    }

    /// A selection session continuing from the stored cart.
    pub async fn selection(&self) -> SelectionSession {
        SelectionSession::resume(self.carts.clone(), self.policy()).await
    }

    pub async fn confirmation(&self) -> Option<ConfirmSession> {
        ConfirmSession::open(self.carts.clone(), self.policy()).await
    }

    /// Shared so the in-flight guard covers every caller.
    pub fn submitter(&self) -> Arc<BetSubmitter> {
        self.submitter.clone()
    }

    pub fn live_poller(&self) -> LivePoller {
        LivePoller::new(Arc::new(self.api.clone()), self.config.poll_interval)
    }
}
