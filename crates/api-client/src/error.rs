use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to execute the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Quote API returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Quote API rejected the request: {0}")]
    Rejected(String),

    #[error(
        "No data for '{0}' with range='{1}', interval='{2}'. Try a longer range or a coarser interval (e.g., 1d)."
    )]
    NoData(String, String, String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from API: {0}")]
    InvalidData(String),
}

impl ApiError {
    /// Whether a retry has any chance of succeeding: transport-level
    /// failures, timeouts, throttling, and server-side errors. Client-side
    /// rejections (bad symbol, malformed range) fail fast.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ApiError::Status(code, _) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
