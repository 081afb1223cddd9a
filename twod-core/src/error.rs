use thiserror::Error;

pub type Result<T> = std::result::Result<T, TwoDError>;

#[derive(Error, Debug)]
pub enum TwoDError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Number not in cart: {number}")]
    NotFound { number: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server rejected request: {0}")]
    ServerRejection(String),

    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl TwoDError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(number: impl Into<String>) -> Self {
        Self::NotFound {
            number: number.into(),
        }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn server_rejection(msg: impl Into<String>) -> Self {
        Self::ServerRejection(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Errors that leave every piece of local state untouched and can be retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ServerRejection(_))
    }
}

// transport failures and undecodable bodies both count as network errors
impl From<reqwest::Error> for TwoDError {
    fn from(err: reqwest::Error) -> Self {
        TwoDError::Network(err.to_string())
    }
}
