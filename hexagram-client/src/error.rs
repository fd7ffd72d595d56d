//! Error types for gateway calls

use hexagram_core::BoardError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("no session token; log in first")]
    NotLoggedIn,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl ClientError {
    /// HTTP status of a rejected response
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
