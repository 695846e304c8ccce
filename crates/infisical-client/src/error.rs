//! Error types for the Infisical client.

/// All errors that can occur when talking to the Infisical API.
#[derive(Debug, thiserror::Error)]
pub enum InfisicalError {
    /// Missing or unusable client configuration.
    #[error("infisical config error: {0}")]
    Config(String),

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Authentication or authorization failed (401/403).
    #[error("infisical auth error {status_code}: {message}")]
    Auth {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the API.
        message: String,
    },

    /// The requested resource does not exist (404).
    #[error("infisical resource not found: {0}")]
    NotFound(String),

    /// API returned any other non-success status.
    #[error("infisical API error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the API.
        message: String,
    },

    /// Request timed out.
    #[error("infisical request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("infisical network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("infisical json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl InfisicalError {
    /// HTTP status the API answered with, when the error came from a response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status_code, .. } | Self::Api { status_code, .. } => Some(*status_code),
            Self::NotFound(_) => Some(404),
            Self::Config(_)
            | Self::InvalidInput(_)
            | Self::Timeout
            | Self::Network(_)
            | Self::Json(_) => None,
        }
    }
}
