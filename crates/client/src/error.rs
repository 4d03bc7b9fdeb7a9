//! Client error types.

use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Reasons a single upstream call produced no value.
///
/// These never cross the [`BiorhythmApi`](biodash_core::api::BiorhythmApi)
/// boundary; they exist so the cause can be logged.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// HTTP status if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
