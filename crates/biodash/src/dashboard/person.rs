use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use biodash_core::api::{BiorhythmApi, BiorhythmData, PersonStatistics, PointsQuery, ReportedRange};
use biodash_core::biorhythm::{
    critical_counts_by_date, histogram, latest_phases, reconstruct_within, summarize,
    BiorhythmPoint, CorrelationMatrix, CorrelationPair, CriticalDaySummary, Cycle, CyclePhases,
    DateRange, DenseSeries, HistogramBin, Person, SeriesSummary, DEFAULT_HISTOGRAM_BINS,
};

/// Amplitude histogram of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleDistribution {
    pub cycle: Cycle,
    pub bins: Vec<HistogramBin>,
}

/// Everything the person page shows for one date window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonDashboard {
    pub person: Person,
    /// Window that was requested upstream.
    pub range: DateRange,
    /// Samples as returned upstream, possibly sparse.
    pub points: Vec<BiorhythmPoint>,
    /// Point count reported by the API.
    pub data_points: u64,
    pub reported_range: Option<ReportedRange>,
    /// Gap-free series clamped to the samples inside `range`.
    pub dense: Option<DenseSeries>,
    pub correlation: Option<CorrelationMatrix>,
    pub correlation_pairs: Vec<CorrelationPair>,
    pub critical_days: Option<CriticalDaySummary>,
    /// Critical cycle count per sampled date.
    pub critical_calendar: BTreeMap<NaiveDate, u8>,
    pub distribution: Vec<CycleDistribution>,
    /// Phases at the latest sample.
    pub phases: Option<CyclePhases>,
    pub summary: Option<SeriesSummary>,
    /// Statistics as computed upstream.
    pub statistics: Option<PersonStatistics>,
}

impl PersonDashboard {
    /// Loads the page for `person_id`, or `None` if the person is unknown.
    ///
    /// The person and statistics come through whatever caching `api` applies;
    /// the point series is requested for `range` with the default limit.
    pub async fn load<A>(api: &A, person_id: i64, range: DateRange) -> Option<Self>
    where
        A: BiorhythmApi + ?Sized,
    {
        let Some(person) = api.person(person_id).await else {
            tracing::debug!(person_id, "Person not found");
            return None;
        };

        let data = api
            .biorhythm_data(person_id, &PointsQuery::for_range(range))
            .await;
        let statistics = api.person_statistics(person_id).await;

        Some(Self::assemble(person, range, data, statistics))
    }

    /// Derives every view from already fetched data.
    pub fn assemble(
        person: Person,
        range: DateRange,
        data: Option<BiorhythmData>,
        statistics: Option<PersonStatistics>,
    ) -> Self {
        let (points, data_points, reported_range) = match data {
            Some(data) => (data.biorhythm_data, data.data_points, data.date_range),
            None => (Vec::new(), 0, None),
        };

        let dense = match reconstruct_within(&points, range) {
            Ok(series) => Some(series),
            Err(err) => {
                tracing::debug!(person_id = person.id, error = %err, "No dense series");
                None
            }
        };

        let correlation = (points.len() >= 2).then(|| CorrelationMatrix::from_points(&points));
        let correlation_pairs = correlation
            .as_ref()
            .map(CorrelationMatrix::pairs)
            .unwrap_or_default();

        let critical_days = (!points.is_empty()).then(|| CriticalDaySummary::from_points(&points));

        let distribution = if points.is_empty() {
            Vec::new()
        } else {
            Cycle::ALL
                .iter()
                .map(|&cycle| {
                    let values: Vec<f64> = points.iter().map(|p| p.value(cycle)).collect();
                    CycleDistribution {
                        cycle,
                        bins: histogram(&values, DEFAULT_HISTOGRAM_BINS),
                    }
                })
                .collect()
        };

        Self {
            critical_calendar: critical_counts_by_date(&points),
            phases: latest_phases(&points),
            summary: summarize(&points),
            person,
            range,
            data_points,
            reported_range,
            dense,
            correlation,
            correlation_pairs,
            critical_days,
            distribution,
            statistics,
            points,
        }
    }

    /// True when upstream returned at least one sample.
    pub fn has_data(&self) -> bool {
        !self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use biodash_core::api::{
        ApiInfo, CalculateRequest, CalculationResult, CalculationsPage, GlobalStatistics,
        PeoplePage, PeopleQuery, StatisticsSummary,
    };
    use biodash_core::biorhythm::CriticalFlags;
    use chrono::Duration;

    use crate::cache::MemoryCache;
    use crate::cached::{CachePolicy, CachedBiorhythmApi};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Samples on 01-01, 01-02, 01-03, 01-05 and 01-06; 01-04 is missing.
    fn sparse_points() -> Vec<BiorhythmPoint> {
        let anchor = date(2024, 1, 1);
        [0, 1, 2, 4, 5]
            .iter()
            .map(|&offset| {
                let point = BiorhythmPoint::computed(anchor + Duration::days(offset), 10_000 + offset);
                if offset == 2 {
                    point.with_critical(CriticalFlags {
                        physical: true,
                        intellectual: true,
                        ..Default::default()
                    })
                } else {
                    point
                }
            })
            .collect()
    }

    struct MockApi {
        points: Option<Vec<BiorhythmPoint>>,
        person_calls: AtomicUsize,
        data_calls: AtomicUsize,
        stats_calls: AtomicUsize,
        last_query: std::sync::Mutex<Option<PointsQuery>>,
    }

    impl MockApi {
        fn new(points: Option<Vec<BiorhythmPoint>>) -> Self {
            Self {
                points,
                person_calls: AtomicUsize::new(0),
                data_calls: AtomicUsize::new(0),
                stats_calls: AtomicUsize::new(0),
                last_query: std::sync::Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl BiorhythmApi for MockApi {
        async fn api_info(&self) -> Option<ApiInfo> {
            None
        }

        async fn people(&self, _query: &PeopleQuery) -> Option<PeoplePage> {
            None
        }

        async fn person(&self, person_id: i64) -> Option<Person> {
            self.person_calls.fetch_add(1, Ordering::SeqCst);
            (person_id == 1).then(|| Person::new(1, "Ada", date(1996, 8, 19)))
        }

        async fn biorhythm_data(&self, _person_id: i64, query: &PointsQuery) -> Option<BiorhythmData> {
            self.data_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(*query);
            let points = self.points.clone()?;
            Some(BiorhythmData {
                person: None,
                data_points: points.len() as u64,
                biorhythm_data: points,
                date_range: None,
            })
        }

        async fn person_statistics(&self, _person_id: i64) -> Option<PersonStatistics> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            Some(PersonStatistics {
                person: None,
                statistics: StatisticsSummary {
                    total_data_points: 5,
                    ..Default::default()
                },
            })
        }

        async fn calculate(&self, _request: &CalculateRequest) -> Option<CalculationResult> {
            None
        }

        async fn calculations(&self, _person_id: Option<i64>) -> Option<CalculationsPage> {
            None
        }

        async fn global_statistics(&self) -> Option<GlobalStatistics> {
            None
        }
    }

    fn january() -> DateRange {
        DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_person_is_none() {
        let api = MockApi::new(Some(sparse_points()));

        assert!(PersonDashboard::load(&api, 404, january()).await.is_none());
        assert_eq!(api.data_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requests_range_with_default_limit() {
        let api = MockApi::new(Some(sparse_points()));

        PersonDashboard::load(&api, 1, january()).await.unwrap();

        let query = api.last_query.lock().unwrap().unwrap();
        assert_eq!(query.start_date, Some(date(2024, 1, 1)));
        assert_eq!(query.end_date, Some(date(2024, 1, 31)));
        assert_eq!(query.limit, Some(PointsQuery::DEFAULT_LIMIT));
    }

    #[tokio::test]
    async fn test_dense_series_fills_gap_within_samples() {
        let api = MockApi::new(Some(sparse_points()));

        let page = PersonDashboard::load(&api, 1, january()).await.unwrap();
        let dense = page.dense.unwrap();

        // Clamped to the sampled span, not the whole month.
        assert_eq!(dense.len(), 6);
        let gap = &dense.points[3];
        assert_eq!(gap.date, date(2024, 1, 4));
        assert_eq!(gap.days_alive, 10_003);
        assert!(!gap.is_sampled());
    }

    #[tokio::test]
    async fn test_derived_views() {
        let api = MockApi::new(Some(sparse_points()));

        let page = PersonDashboard::load(&api, 1, january()).await.unwrap();

        assert!(page.has_data());
        assert_eq!(page.data_points, 5);
        assert_eq!(page.correlation_pairs.len(), 3);

        let critical = page.critical_days.unwrap();
        assert_eq!(critical.total, 1);
        assert_eq!(critical.physical, 1);
        assert_eq!(critical.emotional, 0);
        assert_eq!(page.critical_calendar.get(&date(2024, 1, 3)), Some(&2));
        assert_eq!(page.critical_calendar.get(&date(2024, 1, 4)), None);

        assert_eq!(page.distribution.len(), 3);
        for dist in &page.distribution {
            assert_eq!(dist.bins.len(), DEFAULT_HISTOGRAM_BINS);
            assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 5);
        }

        let phases = page.phases.unwrap();
        assert_eq!(phases.date, date(2024, 1, 6));
        assert_eq!(phases.days_alive, 10_005);

        assert_eq!(page.summary.unwrap().total_data_points, 5);
        assert_eq!(page.statistics.unwrap().statistics.total_data_points, 5);
    }

    #[tokio::test]
    async fn test_missing_series_is_empty_not_error() {
        let api = MockApi::new(None);

        let page = PersonDashboard::load(&api, 1, january()).await.unwrap();

        assert!(!page.has_data());
        assert!(page.dense.is_none());
        assert!(page.correlation.is_none());
        assert!(page.critical_days.is_none());
        assert!(page.critical_calendar.is_empty());
        assert!(page.distribution.is_empty());
        assert!(page.phases.is_none());
        assert!(page.summary.is_none());
        assert!(page.statistics.is_some());
    }

    #[tokio::test]
    async fn test_range_outside_samples_has_no_dense_series() {
        let api = MockApi::new(Some(sparse_points()));
        let march = DateRange::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();

        let page = PersonDashboard::load(&api, 1, march).await.unwrap();

        assert!(page.dense.is_none());
        assert!(page.has_data());
    }

    #[tokio::test]
    async fn test_single_sample_has_no_correlation() {
        let api = MockApi::new(Some(sparse_points().into_iter().take(1).collect()));

        let page = PersonDashboard::load(&api, 1, january()).await.unwrap();

        assert!(page.correlation.is_none());
        assert!(page.correlation_pairs.is_empty());
        assert_eq!(page.dense.map(|d| d.len()), Some(1));
    }

    #[tokio::test]
    async fn test_reloading_through_cache_refetches_points_only() {
        let api = Arc::new(MockApi::new(Some(sparse_points())));
        let cached = CachedBiorhythmApi::new(
            api.clone(),
            Arc::new(MemoryCache::new(100)),
            CachePolicy::default(),
        );

        PersonDashboard::load(&cached, 1, january()).await.unwrap();
        PersonDashboard::load(&cached, 1, january()).await.unwrap();

        assert_eq!(api.person_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.data_calls.load(Ordering::SeqCst), 2);
    }
}
