use std::{env, time::Duration};

use biodash_client::ClientConfig;

use crate::cached::CachePolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upstream API base URL (default: "http://localhost:8001/api/")
    pub api_url: String,
    /// Upstream API token, if any
    pub api_token: Option<String>,
    /// Upstream request timeout in seconds (default: 30)
    pub api_timeout_seconds: u64,
    /// Maximum number of cache entries (default: 10,000)
    pub cache_max_entries: usize,
    /// People listing TTL in seconds (default: 300)
    pub people_cache_ttl_seconds: u64,
    /// Single person TTL in seconds (default: 300)
    pub person_cache_ttl_seconds: u64,
    /// Person statistics TTL in seconds (default: 600)
    pub statistics_cache_ttl_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BIORHYTHM_API_URL` - API base URL (default: "http://localhost:8001/api/")
    /// - `BIORHYTHM_API_TOKEN` - API token (default: none)
    /// - `API_TIMEOUT_SECONDS` - Request timeout (default: 30)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000)
    /// - `PEOPLE_CACHE_TTL_SECONDS` - People listing TTL (default: 300)
    /// - `PERSON_CACHE_TTL_SECONDS` - Single person TTL (default: 300)
    /// - `STATISTICS_CACHE_TTL_SECONDS` - Statistics TTL (default: 600)
    ///
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |name: &str, default: u64| {
            lookup(name)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            api_url: lookup("BIORHYTHM_API_URL")
                .unwrap_or_else(|| biodash_client::config::DEFAULT_BASE_URL.to_string()),
            api_token: lookup("BIORHYTHM_API_TOKEN").filter(|t| !t.trim().is_empty()),
            api_timeout_seconds: number("API_TIMEOUT_SECONDS", 30),
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(10_000),
            people_cache_ttl_seconds: number("PEOPLE_CACHE_TTL_SECONDS", 300),
            person_cache_ttl_seconds: number("PERSON_CACHE_TTL_SECONDS", 300),
            statistics_cache_ttl_seconds: number("STATISTICS_CACHE_TTL_SECONDS", 600),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    /// Client settings for the upstream API.
    pub fn client_config(&self) -> biodash_client::Result<ClientConfig> {
        Ok(ClientConfig::new(&self.api_url)?
            .with_token(self.api_token.clone())
            .with_timeout(self.api_timeout()))
    }

    /// Per-resource cache TTLs.
    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            people_ttl: Duration::from_secs(self.people_cache_ttl_seconds),
            person_ttl: Duration::from_secs(self.person_cache_ttl_seconds),
            statistics_ttl: Duration::from_secs(self.statistics_cache_ttl_seconds),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
