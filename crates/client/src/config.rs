//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8001/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Builds a config for `base_url`. A trailing `/` is added when missing so
    /// relative endpoint paths resolve below it.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create from environment (`BIORHYTHM_API_URL`, `BIORHYTHM_API_TOKEN`).
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BIORHYTHM_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("BIORHYTHM_API_TOKEN").ok();
        Ok(Self::new(&base_url)?.with_token(token))
    }

    /// Sets the token. Blank tokens count as none.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
