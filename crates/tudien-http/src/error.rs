use std::time::Duration;

use tudien_types::FailureReason;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Failed to parse response: {0}")]
    Decode(reqwest::Error),
}

impl GatewayError {
    /// Collapse into the failure classes callers see
    pub fn reason(&self) -> FailureReason {
        match self {
            GatewayError::Timeout(_) => FailureReason::Timeout,
            GatewayError::Network(e) if e.is_timeout() => FailureReason::Timeout,
            GatewayError::Network(_) => FailureReason::NetworkError,
            GatewayError::InvalidUrl(_) | GatewayError::Status(_) | GatewayError::Decode(_) => {
                FailureReason::ServerError
            }
        }
    }
}
