use thiserror::Error;

/// Failures talking to the upstream search API.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("upstream returned an unreadable body: {0}")]
    Decode(#[from] serde_json::Error),
}
