use std::time::Duration;

/// Time-to-live per cached resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub people_ttl: Duration,
    pub person_ttl: Duration,
    /// Statistics are costlier upstream and live longer.
    pub statistics_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            people_ttl: Duration::from_secs(300),
            person_ttl: Duration::from_secs(300),
            statistics_ttl: Duration::from_secs(600),
        }
    }
}

impl CachePolicy {
    /// Same TTL for every resource.
    pub fn uniform(ttl: Duration) -> Self {
        Self {
            people_ttl: ttl,
            person_ttl: ttl,
            statistics_ttl: ttl,
        }
    }
}
