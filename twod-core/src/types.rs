use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub user_name: String,
    pub password: String,
}

/// Profile and wallet balance as returned by the backend.
///
/// Unknown fields are kept so the stored profile blob round-trips intact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "amount_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance: Option<f64>,
    #[serde(
        default,
        deserialize_with = "amount_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub main_balance: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.user_name.as_deref())
            .unwrap_or("N/A")
    }
}

// The backend sends balances either as numbers or as decimal strings.
fn amount_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// The current draw as shown at the top of the live board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveSnapshot {
    #[serde(default)]
    pub twod: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

/// One settled or in-progress draw of the day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    #[serde(rename = "set", default)]
    pub set_label: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "twod", default)]
    pub two_digit: Option<String>,
    #[serde(default)]
    pub open_time: Option<String>,
}

/// Body of the live draw feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveDraw {
    #[serde(default)]
    pub live: Option<LiveSnapshot>,
    #[serde(default)]
    pub server_time: Option<String>,
    #[serde(default)]
    pub result: Vec<DrawResult>,
}

impl LiveDraw {
    pub fn current_twod(&self) -> Option<&str> {
        self.live.as_ref().and_then(|l| l.twod.as_deref())
    }
}
