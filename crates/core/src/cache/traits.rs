use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value store with per-entry expiry.
///
/// Backends decide how entries are held; the read-through layer only relies on
/// single-key atomicity for `set` and `delete`.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value by key. Expired entries read as `None`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a value, expiring after `ttl` when given.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Removes a single key. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every key matching a glob pattern (e.g. `api:people:list:*`).
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}
