//! Shared application state.
//!
//! Holds the cached API and the clock behind trait objects so commands and
//! tests can swap either.

use std::sync::Arc;

use biodash_client::BiorhythmClient;
use biodash_core::api::BiorhythmApi;
use biodash_core::biorhythm::DateRange;
use biodash_core::clock::{Clock, SystemClock};
use chrono::NaiveDate;

use crate::cache::MemoryCache;
use crate::cached::CachedBiorhythmApi;
use crate::config::Config;
use crate::dashboard::{resolve_range, HomeOverview, PersonDashboard, DEFAULT_RANGE_DAYS};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached upstream API.
    pub api: Arc<dyn BiorhythmApi>,
    /// Backing store of `api`, kept for maintenance sweeps.
    pub cache: MemoryCache,
    /// Source of "today" for default date windows.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(api: Arc<dyn BiorhythmApi>, cache: MemoryCache, clock: Arc<dyn Clock>) -> Self {
        Self { api, cache, clock }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the HTTP client, memory cache and cached decorator from `config`.
    pub fn from_config(config: &Config) -> biodash_client::Result<Self> {
        let client = BiorhythmClient::new(config.client_config()?)?;
        let cache = MemoryCache::new(config.cache_max_entries);

        tracing::info!(
            api_url = %config.api_url,
            cache_max_entries = config.cache_max_entries,
            "Using in-memory cache"
        );

        let api = CachedBiorhythmApi::new(
            Arc::new(client),
            Arc::new(cache.clone()),
            config.cache_policy(),
        );
        Ok(Self::new(Arc::new(api), cache, Arc::new(SystemClock)))
    }

    pub async fn home(&self) -> HomeOverview {
        HomeOverview::load(self.api.as_ref()).await
    }

    /// Person page for an optional window; see [`resolve_range`] for defaults.
    pub async fn person_dashboard(
        &self,
        person_id: i64,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<PersonDashboard> {
        let range = self.resolve_range(start, end);
        PersonDashboard::load(self.api.as_ref(), person_id, range).await
    }

    pub fn resolve_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
        resolve_range(self.clock.as_ref(), start, end, DEFAULT_RANGE_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use biodash_core::clock::FixedClock;

    fn config() -> Config {
        Config::from_lookup(|_| None)
    }

    #[test]
    fn test_from_config() {
        let state = AppState::from_config(&config()).unwrap();
        let range = state.resolve_range(None, None);
        assert_eq!(range.days(), i64::from(DEFAULT_RANGE_DAYS) + 1);
    }

    #[test]
    fn test_fixed_clock_drives_range() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let state = AppState::from_config(&config())
            .unwrap()
            .with_clock(Arc::new(FixedClock(today)));

        assert_eq!(state.resolve_range(None, None).end, today);
    }
}
