use serde::Serialize;

use biodash_core::api::{ApiInfo, BiorhythmApi, GlobalStatistics, PeopleQuery};
use biodash_core::biorhythm::Person;

/// Landing page data: API status, people and global totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HomeOverview {
    pub api_connected: bool,
    pub api_info: Option<ApiInfo>,
    pub people: Vec<Person>,
    pub global_stats: Option<GlobalStatistics>,
}

impl HomeOverview {
    /// Loads the overview. People and statistics are only requested once the
    /// API answered its info endpoint.
    pub async fn load<A>(api: &A) -> Self
    where
        A: BiorhythmApi + ?Sized,
    {
        let Some(api_info) = api.api_info().await else {
            tracing::warn!("Upstream API unreachable");
            return Self::default();
        };

        let people = api
            .people(&PeopleQuery::default())
            .await
            .map(|page| page.results)
            .unwrap_or_default();
        let global_stats = api.global_statistics().await;

        Self {
            api_connected: true,
            api_info: Some(api_info),
            people,
            global_stats,
        }
    }
}
