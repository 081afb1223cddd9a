//! Response shapes of the backend, normalized in one place.

use crate::types::UserProfile;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// `status` value the bet endpoint sends on success.
pub const BET_SUCCESS_STATUS: &str = "Request was successful.";

/// Every optional field the backend has been seen to return.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl ApiEnvelope {
    /// Lenient parse: a body that is not an object, or has mistyped fields, yields an empty envelope.
    pub fn from_value(body: &Value) -> Self {
        serde_json::from_value(body.clone()).unwrap_or_default()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().and_then(Value::as_str)
    }

    fn status_truthy(&self) -> bool {
        match &self.status {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Number(_)) => true,
            _ => false,
        }
    }

    /// First validation message, if the backend sent Laravel-style `errors`.
    pub fn first_error(&self) -> Option<String> {
        let errors = self.errors.as_ref()?.as_object()?;
        errors.values().find_map(|v| match v {
            Value::Array(items) => items.first().and_then(Value::as_str).map(String::from),
            Value::String(s) => Some(s.clone()),
            _ => None,
        })
    }
}

/// Token and user extracted from a successful login body.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub token: String,
    pub user: UserProfile,
}

impl LoginGrant {
    /// Accepts `{success|status, data:{token,user}}`, `{token,user}` and `{access_token,user?}`.
    pub fn from_body(body: &Value) -> Option<Self> {
        let envelope = ApiEnvelope::from_value(body);

        let (token, user) = if envelope.success == Some(true) || envelope.status_truthy() {
            let data = envelope.data.as_ref()?;
            (
                data.get("token")?.as_str()?.to_string(),
                data.get("user").cloned().unwrap_or(Value::Null),
            )
        } else if let (Some(token), Some(user)) = (&envelope.token, &envelope.user) {
            (token.clone(), user.clone())
        } else if let Some(token) = &envelope.access_token {
            (token.clone(), envelope.user.clone().unwrap_or_else(|| body.clone()))
        } else {
            return None;
        };

        Some(Self {
            token,
            user: serde_json::from_value(user).unwrap_or_default(),
        })
    }
}

/// Outcome of a bet POST as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BetResponse {
    Accepted { message: Option<String> },
    /// Numbers whose per-number limit would be exceeded.
    OverLimit(Vec<String>),
    Rejected { message: String },
}

impl BetResponse {
    pub fn from_parts(status: StatusCode, body: &Value) -> Self {
        if let Value::Array(items) = body {
            let numbers = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => n.as_u64().map(|n| format!("{:02}", n)),
                    _ => None,
                })
                .collect();
            return BetResponse::OverLimit(numbers);
        }

        let envelope = ApiEnvelope::from_value(body);
        if status.is_success() && envelope.status_text() == Some(BET_SUCCESS_STATUS) {
            return BetResponse::Accepted {
                message: envelope.message,
            };
        }

        let first_error = envelope.first_error();
        BetResponse::Rejected {
            message: envelope
                .message
                .or(first_error)
                .unwrap_or_else(|| "Bet failed!".to_string()),
        }
    }
}

/// Profile out of a `GET /user` body (`{ data: {...} }`).
pub fn profile_from_body(body: &Value) -> Option<UserProfile> {
    let data = ApiEnvelope::from_value(body).data?;
    if !data.is_object() {
        return None;
    }
    serde_json::from_value(data).ok()
}
