use thiserror::Error;

/// Why a single source request produced no payload.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{path} returned status {status}")]
    Status { path: String, status: u16 },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{category} timed out after {after_ms}ms")]
    Timeout {
        category: &'static str,
        after_ms: u64,
    },
}
