//! Cached decorator for [`BiorhythmApi`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use biodash_core::api::{
    ApiInfo, BiorhythmApi, BiorhythmData, CalculateRequest, CalculationResult, CalculationsPage,
    GlobalStatistics, PeoplePage, PeopleQuery, PersonStatistics, PointsQuery,
};
use biodash_core::biorhythm::Person;
use biodash_core::cache::{
    deserialize_value, people_list_key, people_list_pattern, person_key, person_statistics_key,
    serialize_value, Cache,
};

use super::CachePolicy;

/// Read-through cache in front of a [`BiorhythmApi`].
///
/// Cache failures never surface to callers: a failed or undecodable read is a
/// miss, a failed write is logged and the fetched value is still returned.
///
/// # Type Parameters
///
/// * `A` - The upstream API implementation
/// * `C` - The cache implementation
pub struct CachedBiorhythmApi<A, C>
where
    A: BiorhythmApi,
    C: Cache,
{
    api: Arc<A>,
    cache: Arc<C>,
    policy: CachePolicy,
}

impl<A, C> CachedBiorhythmApi<A, C>
where
    A: BiorhythmApi,
    C: Cache,
{
    pub fn new(api: Arc<A>, cache: Arc<C>, policy: CachePolicy) -> Self {
        Self { api, cache, policy }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The wrapped API, for operations outside the cached surface.
    pub fn inner(&self) -> &A {
        &self.api
    }

    /// People listing for `query`, cached per distinct query.
    pub async fn people_cached(&self, query: &PeopleQuery) -> Option<PeoplePage> {
        let key = people_list_key(query);
        self.read_through(&key, self.policy.people_ttl, self.api.people(query))
            .await
    }

    pub async fn person_cached(&self, person_id: i64) -> Option<Person> {
        let key = person_key(person_id);
        self.read_through(&key, self.policy.person_ttl, self.api.person(person_id))
            .await
    }

    pub async fn person_statistics_cached(&self, person_id: i64) -> Option<PersonStatistics> {
        let key = person_statistics_key(person_id);
        self.read_through(
            &key,
            self.policy.statistics_ttl,
            self.api.person_statistics(person_id),
        )
        .await
    }

    /// Point series, always fetched upstream.
    pub async fn biorhythm_data_fresh(
        &self,
        person_id: i64,
        query: &PointsQuery,
    ) -> Option<BiorhythmData> {
        tracing::debug!(person_id, "Fetching biorhythm data upstream");
        self.api.biorhythm_data(person_id, query).await
    }

    /// Free-text people search, always fetched upstream.
    pub async fn search_people_fresh(&self, term: &str) -> Option<PeoplePage> {
        tracing::debug!(search = %term, "Searching people upstream");
        self.api.people(&PeopleQuery::search(term)).await
    }

    /// Drops the person's cached record and statistics and every people
    /// listing.
    ///
    /// Returns `false` if any delete could not be confirmed. Affected entries
    /// then stay stale until their TTL runs out.
    pub async fn invalidate_person(&self, person_id: i64) -> bool {
        let mut confirmed = true;

        for key in [person_key(person_id), person_statistics_key(person_id)] {
            if let Err(err) = self.cache.delete(&key).await {
                tracing::error!(person_id, key = %key, error = %err, "Failed to invalidate cache key");
                confirmed = false;
            }
        }

        let pattern = people_list_pattern();
        if let Err(err) = self.cache.delete_pattern(&pattern).await {
            tracing::error!(person_id, pattern = %pattern, error = %err, "Failed to invalidate people listings");
            confirmed = false;
        }

        tracing::debug!(person_id, confirmed, "Invalidated person cache");
        confirmed
    }

    /// Runs a calculation upstream, then invalidates the person's cached
    /// resources before returning the result.
    ///
    /// Invalidation also runs when the call yields nothing, since a timed-out
    /// write may still have landed upstream.
    pub async fn calculate_and_invalidate(
        &self,
        request: &CalculateRequest,
    ) -> Option<CalculationResult> {
        let result = self.api.calculate(request).await;
        self.invalidate_person(request.person_id).await;

        match &result {
            Some(r) => tracing::debug!(
                person_id = request.person_id,
                data_points = r.data_points_created,
                "Calculation completed"
            ),
            None => tracing::warn!(person_id = request.person_id, "Calculation returned no result"),
        }
        result
    }

    async fn read_through<T, F>(&self, key: &str, ttl: Duration, fetch: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: Future<Output = Option<T>> + Send,
    {
        if let Some(value) = self.cached_get(key).await {
            return Some(value);
        }

        let value = fetch.await?;
        self.cache_store(key, &value, ttl).await;
        Some(value)
    }

    async fn cached_get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_value(&bytes) {
                Ok(value) => {
                    tracing::trace!(key = %key, "Cache hit");
                    Some(value)
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "Cached value failed to decode");
                    None
                }
            },
            Ok(None) => {
                tracing::trace!(key = %key, "Cache miss");
                None
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Cache read failed");
                None
            }
        }
    }

    async fn cache_store<T: Serialize + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serialize_value(value) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "Failed to encode value for cache");
                return;
            }
        };
        if let Err(err) = self.cache.set(key, &bytes, Some(ttl)).await {
            tracing::warn!(key = %key, error = %err, "Failed to write cache");
        }
    }
}

#[async_trait]
impl<A, C> BiorhythmApi for CachedBiorhythmApi<A, C>
where
    A: BiorhythmApi + 'static,
    C: Cache + 'static,
{
    async fn api_info(&self) -> Option<ApiInfo> {
        self.api.api_info().await
    }

    async fn people(&self, query: &PeopleQuery) -> Option<PeoplePage> {
        self.people_cached(query).await
    }

    async fn person(&self, person_id: i64) -> Option<Person> {
        self.person_cached(person_id).await
    }

    async fn biorhythm_data(&self, person_id: i64, query: &PointsQuery) -> Option<BiorhythmData> {
        self.biorhythm_data_fresh(person_id, query).await
    }

    async fn person_statistics(&self, person_id: i64) -> Option<PersonStatistics> {
        self.person_statistics_cached(person_id).await
    }

    async fn calculate(&self, request: &CalculateRequest) -> Option<CalculationResult> {
        self.calculate_and_invalidate(request).await
    }

    async fn calculations(&self, person_id: Option<i64>) -> Option<CalculationsPage> {
        self.api.calculations(person_id).await
    }

    async fn global_statistics(&self) -> Option<GlobalStatistics> {
        self.api.global_statistics().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use biodash_core::api::StatisticsSummary;
    use biodash_core::cache::{CacheError, Result as CacheResult};
    use chrono::NaiveDate;
    use tokio::sync::RwLock;

    use crate::cache::MemoryCache;

    // Mock upstream that counts calls. Statistics report a version that each
    // calculation bumps, so stale reads are visible.
    #[derive(Default)]
    struct MockApi {
        people: RwLock<HashMap<i64, Person>>,
        stats_version: AtomicUsize,
        calculate_fails: AtomicBool,
        people_calls: AtomicUsize,
        person_calls: AtomicUsize,
        stats_calls: AtomicUsize,
        data_calls: AtomicUsize,
        calculate_calls: AtomicUsize,
    }

    impl MockApi {
        async fn with_person(id: i64) -> Self {
            let api = Self::default();
            api.stats_version.store(1, Ordering::SeqCst);
            api.people.write().await.insert(
                id,
                Person::new(id, "Ada", NaiveDate::from_ymd_opt(1990, 5, 15).unwrap()),
            );
            api
        }
    }

    #[async_trait]
    impl BiorhythmApi for MockApi {
        async fn api_info(&self) -> Option<ApiInfo> {
            None
        }

        async fn people(&self, query: &PeopleQuery) -> Option<PeoplePage> {
            self.people_calls.fetch_add(1, Ordering::SeqCst);
            let people = self.people.read().await;
            let results: Vec<Person> = people
                .values()
                .filter(|p| query.search.as_deref().map_or(true, |s| p.name.contains(s)))
                .cloned()
                .collect();
            Some(PeoplePage {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            })
        }

        async fn person(&self, person_id: i64) -> Option<Person> {
            self.person_calls.fetch_add(1, Ordering::SeqCst);
            self.people.read().await.get(&person_id).cloned()
        }

        async fn biorhythm_data(&self, _person_id: i64, _query: &PointsQuery) -> Option<BiorhythmData> {
            self.data_calls.fetch_add(1, Ordering::SeqCst);
            Some(BiorhythmData {
                person: None,
                biorhythm_data: vec![],
                data_points: 0,
                date_range: None,
            })
        }

        async fn person_statistics(&self, person_id: i64) -> Option<PersonStatistics> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            if !self.people.read().await.contains_key(&person_id) {
                return None;
            }
            Some(PersonStatistics {
                person: None,
                statistics: StatisticsSummary {
                    total_data_points: self.stats_version.load(Ordering::SeqCst) as u64,
                    ..Default::default()
                },
            })
        }

        async fn calculate(&self, _request: &CalculateRequest) -> Option<CalculationResult> {
            self.calculate_calls.fetch_add(1, Ordering::SeqCst);
            if self.calculate_fails.load(Ordering::SeqCst) {
                return None;
            }
            self.stats_version.fetch_add(1, Ordering::SeqCst);
            Some(CalculationResult {
                data_points_created: 365,
                ..Default::default()
            })
        }

        async fn calculations(&self, _person_id: Option<i64>) -> Option<CalculationsPage> {
            None
        }

        async fn global_statistics(&self) -> Option<GlobalStatistics> {
            None
        }
    }

    // Mock cache
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
    }

    impl MockCache {
        fn new() -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.store.write().await.remove(key);
            Ok(())
        }

        async fn delete_pattern(&self, pattern: &str) -> CacheResult<()> {
            let mut store = self.store.write().await;
            store.retain(|k, _| !biodash_core::cache::pattern_matches(pattern, k));
            Ok(())
        }
    }

    // Cache whose every operation fails.
    struct BrokenCache;

    #[async_trait]
    impl Cache for BrokenCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::ConnectionFailed("down".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("down".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("down".to_string()))
        }

        async fn delete_pattern(&self, _pattern: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("down".to_string()))
        }
    }

    fn cached<C: Cache>(
        api: &Arc<MockApi>,
        cache: &Arc<C>,
    ) -> CachedBiorhythmApi<MockApi, C> {
        CachedBiorhythmApi::new(api.clone(), cache.clone(), CachePolicy::default())
    }

    #[tokio::test]
    async fn test_person_cache_miss_populates() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        let person = cached.person_cached(1).await;

        assert_eq!(person.map(|p| p.id), Some(1));
        assert_eq!(api.person_calls.load(Ordering::SeqCst), 1);
        assert!(cache.store.read().await.contains_key(&person_key(1)));
    }

    #[tokio::test]
    async fn test_person_cache_hit() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        let _ = cached.person_cached(1).await;
        let person = cached.person_cached(1).await;

        assert_eq!(person.map(|p| p.name), Some("Ada".to_string()));
        assert_eq!(api.person_calls.load(Ordering::SeqCst), 1); // Still 1
    }

    #[tokio::test]
    async fn test_absent_result_is_not_cached() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        assert!(cached.person_cached(404).await.is_none());
        assert!(cached.person_cached(404).await.is_none());

        assert_eq!(api.person_calls.load(Ordering::SeqCst), 2);
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_people_listings_cached_per_query() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        let all = PeopleQuery::default();
        let ada = PeopleQuery::search("Ada");

        cached.people_cached(&all).await;
        cached.people_cached(&ada).await;
        cached.people_cached(&all).await;
        cached.people_cached(&ada).await;

        assert_eq!(api.people_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.store.read().await.len(), 2);
    }

    #[tokio::test]
    async fn test_point_series_always_fresh() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        cached.biorhythm_data_fresh(1, &PointsQuery::default()).await;
        cached.biorhythm_data_fresh(1, &PointsQuery::default()).await;

        assert_eq!(api.data_calls.load(Ordering::SeqCst), 2);
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_bypasses_cache() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        let page = cached.search_people_fresh("Ada").await.unwrap();
        cached.search_people_fresh("Ada").await;

        assert_eq!(page.count, 1);
        assert_eq!(api.people_calls.load(Ordering::SeqCst), 2);
        assert!(cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_statistics_refetched_once_after_ttl() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MemoryCache::new(100));
        let cached = CachedBiorhythmApi::new(
            api.clone(),
            cache.clone(),
            CachePolicy::uniform(Duration::from_millis(50)),
        );

        cached.person_statistics_cached(1).await;
        cached.person_statistics_cached(1).await;
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;

        cached.person_statistics_cached(1).await;
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);

        // The refetch was stored again.
        cached.person_statistics_cached(1).await;
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_person_is_scoped() {
        let api = Arc::new(MockApi::with_person(1).await);
        api.people.write().await.insert(
            2,
            Person::new(2, "Bob", NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()),
        );
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        cached.person_cached(1).await;
        cached.person_statistics_cached(1).await;
        cached.person_cached(2).await;
        cached.person_statistics_cached(2).await;
        cached.people_cached(&PeopleQuery::default()).await;
        cached.people_cached(&PeopleQuery::search("Bob")).await;

        assert!(cached.invalidate_person(1).await);

        let store = cache.store.read().await;
        assert!(!store.contains_key(&person_key(1)));
        assert!(!store.contains_key(&person_statistics_key(1)));
        assert!(!store.contains_key(&people_list_key(&PeopleQuery::default())));
        assert!(!store.contains_key(&people_list_key(&PeopleQuery::search("Bob"))));
        assert!(store.contains_key(&person_key(2)));
        assert!(store.contains_key(&person_statistics_key(2)));
    }

    #[tokio::test]
    async fn test_invalidated_statistics_are_refetched() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        let before = cached.person_statistics_cached(1).await.unwrap();
        cached.invalidate_person(1).await;
        let after = cached.person_statistics_cached(1).await.unwrap();

        assert_eq!(before, after);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_calculate_and_invalidate_forces_fresh_statistics() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MemoryCache::new(100));
        let cached = CachedBiorhythmApi::new(api.clone(), cache.clone(), CachePolicy::default());

        let before = cached.person_statistics_cached(1).await.unwrap();
        assert_eq!(before.statistics.total_data_points, 1);

        let result = cached
            .calculate_and_invalidate(&CalculateRequest::new(1))
            .await
            .unwrap();
        assert_eq!(result.data_points_created, 365);

        let after = cached.person_statistics_cached(1).await.unwrap();
        assert_eq!(after.statistics.total_data_points, 2);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_calculation_still_invalidates() {
        let api = Arc::new(MockApi::with_person(1).await);
        api.calculate_fails.store(true, Ordering::SeqCst);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        cached.person_statistics_cached(1).await;

        assert!(cached
            .calculate_and_invalidate(&CalculateRequest::new(1))
            .await
            .is_none());
        assert!(!cache
            .store
            .read()
            .await
            .contains_key(&person_statistics_key(1)));
    }

    #[tokio::test]
    async fn test_broken_cache_degrades_to_upstream() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(BrokenCache);
        let cached = cached(&api, &cache);

        assert!(cached.person_cached(1).await.is_some());
        assert!(cached.person_cached(1).await.is_some());

        assert_eq!(api.person_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidation_failure_does_not_fail_write() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(BrokenCache);
        let cached = cached(&api, &cache);

        assert!(!cached.invalidate_person(1).await);

        let result = cached.calculate_and_invalidate(&CalculateRequest::new(1)).await;
        assert_eq!(result.map(|r| r.data_points_created), Some(365));
    }

    #[tokio::test]
    async fn test_undecodable_cache_entry_is_a_miss() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);

        cache
            .set(&person_key(1), b"not json", None)
            .await
            .unwrap();

        let person = cached.person_cached(1).await;

        assert_eq!(person.map(|p| p.id), Some(1));
        assert_eq!(api.person_calls.load(Ordering::SeqCst), 1);
        let stored = cache.store.read().await.get(&person_key(1)).cloned().unwrap();
        assert_ne!(stored, b"not json".to_vec());
    }

    #[tokio::test]
    async fn test_trait_object_uses_cached_paths() {
        let api = Arc::new(MockApi::with_person(1).await);
        let cache = Arc::new(MockCache::new());
        let cached = cached(&api, &cache);
        let dyn_api: &dyn BiorhythmApi = &cached;

        dyn_api.person(1).await;
        dyn_api.person(1).await;
        dyn_api.person_statistics(1).await;
        dyn_api.person_statistics(1).await;
        dyn_api.calculate(&CalculateRequest::new(1)).await;
        dyn_api.person_statistics(1).await;

        assert_eq!(api.person_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
        assert_eq!(api.calculate_calls.load(Ordering::SeqCst), 1);
    }
}
