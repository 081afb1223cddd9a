//! In-process stand-in for the portal backend and live feed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html; charset=UTF-8",
            body: body.to_string(),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: &'static str,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub body: Value,
}

struct MockState {
    login: Reply,
    logout: Reply,
    profile: Reply,
    bet: Reply,
    live: VecDeque<Reply>,
    live_fallback: Reply,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockBackend {
    state: Shared,
    base_url: String,
    server_handle: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            login: Reply::json(
                200,
                json!({ "success": true, "data": { "token": "mock-token", "user": { "user_name": "P0001", "balance": "10000" } } }),
            ),
            logout: Reply::json(200, json!({ "message": "Logged out" })),
            profile: Reply::json(200, json!({ "data": { "user_name": "P0001", "balance": "10000" } })),
            bet: Reply::json(200, json!({ "status": crate::api::BET_SUCCESS_STATUS, "message": "Bet placed" })),
            live: VecDeque::new(),
            live_fallback: Reply::json(200, json!({ "live": { "twod": "--" }, "result": [] })),
            requests: Vec::new(),
        }));

        let router = Router::new()
            .route("/login", post(login))
            .route("/logout", post(logout))
            .route("/user", get(profile))
            .route("/twod-bet", post(bet))
            .route("/live", get(live))
            .with_state(state.clone());

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let server_handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            state,
            base_url,
            server_handle,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_login_reply(&self, reply: Reply) {
        self.state.lock().login = reply;
    }

    pub fn set_logout_reply(&self, reply: Reply) {
        self.state.lock().logout = reply;
    }

    pub fn set_profile_reply(&self, reply: Reply) {
        self.state.lock().profile = reply;
    }

    pub fn set_bet_reply(&self, reply: Reply) {
        self.state.lock().bet = reply;
    }

    /// Queues a live reply; once the queue drains the last one served keeps repeating.
    pub fn push_live(&self, reply: Reply) {
        self.state.lock().live.push_back(reply);
    }

    pub fn requests(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    pub fn bet_requests(&self) -> Vec<RecordedRequest> {
        self.requests("/twod-bet")
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

fn record(state: &Shared, path: &'static str, headers: &HeaderMap, body: &Bytes) {
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };
    state.lock().requests.push(RecordedRequest {
        path,
        authorization: header_text(header::AUTHORIZATION),
        accept: header_text(header::ACCEPT),
        body: serde_json::from_slice(body).unwrap_or(Value::Null),
    });
}

async fn login(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Reply {
    record(&state, "/login", &headers, &body);
    let reply = state.lock().login.clone();
    reply
}

async fn logout(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Reply {
    record(&state, "/logout", &headers, &body);
    let reply = state.lock().logout.clone();
    reply
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    record(&state, "/user", &headers, &Bytes::new());
    let reply = state.lock().profile.clone();
    reply
}

async fn bet(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> Reply {
    record(&state, "/twod-bet", &headers, &body);
    let reply = state.lock().bet.clone();
    reply
}

async fn live(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    record(&state, "/live", &headers, &Bytes::new());
    let mut guard = state.lock();
    if let Some(next) = guard.live.pop_front() {
        guard.live_fallback = next;
    }
    let reply = guard.live_fallback.clone();
    reply
}
