use thiserror::Error;

/// Failure of a call against the portal API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with HTTP {status}{}", suffix(.message))]
    Status { status: u16, message: Option<String> },

    #[error("request rejected{}", suffix(.message))]
    Rejected { message: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl ApiError {
    /// Text the server itself supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } | ApiError::Rejected { message } => {
                message.as_deref().filter(|m| !m.trim().is_empty())
            }
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
