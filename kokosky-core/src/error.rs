use thiserror::Error;

/// Errors surfaced by the transport and passed through the resource clients unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. Displays as the server's text only.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },
}

impl ApiError {
    /// Build the error for a non-success response from its status and body text.
    pub fn from_status(status: u16, body: String) -> Self {
        let message = if body.is_empty() {
            format!("API call failed with status: {status}")
        } else {
            body
        };
        ApiError::Status { status, message }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Human-readable message, falling back to `default` when the error carries none.
    pub fn message_or(&self, default: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() { default.to_string() } else { message }
    }
}
