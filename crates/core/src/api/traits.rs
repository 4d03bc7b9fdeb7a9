use async_trait::async_trait;

use crate::biorhythm::Person;

use super::{
    ApiInfo, BiorhythmData, CalculateRequest, CalculationResult, CalculationsPage,
    GlobalStatistics, PeopleQuery, PeoplePage, PersonStatistics, PointsQuery,
};

/// Operations offered by the upstream biorhythm API.
///
/// Every call yields `None` when the resource is unavailable, whether it does
/// not exist or the transport failed. Implementations log the cause.
#[async_trait]
pub trait BiorhythmApi: Send + Sync {
    /// Root info endpoint, also used as a health probe.
    async fn api_info(&self) -> Option<ApiInfo>;

    async fn people(&self, query: &PeopleQuery) -> Option<PeoplePage>;

    async fn person(&self, person_id: i64) -> Option<Person>;

    async fn biorhythm_data(&self, person_id: i64, query: &PointsQuery) -> Option<BiorhythmData>;

    async fn person_statistics(&self, person_id: i64) -> Option<PersonStatistics>;

    /// Triggers a new calculation upstream.
    async fn calculate(&self, request: &CalculateRequest) -> Option<CalculationResult>;

    async fn calculations(&self, person_id: Option<i64>) -> Option<CalculationsPage>;

    async fn global_statistics(&self) -> Option<GlobalStatistics>;
}
