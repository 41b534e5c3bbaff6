//! Dashboard Errors
//!
//! Failures raised by the backend wrappers. Callers above the wrappers
//! log these and fall back to a degraded default.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP error! status: {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("malformed payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("table body element ({selector}) not found")]
    MissingTableBody { selector: String },
}

impl DashboardError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}
