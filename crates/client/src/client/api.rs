//! [`BiorhythmApi`] over HTTP.

use async_trait::async_trait;
use biodash_core::api::{
    ApiInfo, BiorhythmApi, BiorhythmData, CalculateRequest, CalculationResult, CalculationsPage,
    GlobalStatistics, PeoplePage, PeopleQuery, PersonStatistics, PointsQuery,
};
use biodash_core::biorhythm::Person;

use super::BiorhythmClient;

#[async_trait]
impl BiorhythmApi for BiorhythmClient {
    async fn api_info(&self) -> Option<ApiInfo> {
        self.get_api_info().await
    }

    async fn people(&self, query: &PeopleQuery) -> Option<PeoplePage> {
        self.get_people(query).await
    }

    async fn person(&self, person_id: i64) -> Option<Person> {
        self.get_person(person_id).await
    }

    async fn biorhythm_data(&self, person_id: i64, query: &PointsQuery) -> Option<BiorhythmData> {
        self.get_biorhythm_data(person_id, query).await
    }

    async fn person_statistics(&self, person_id: i64) -> Option<PersonStatistics> {
        self.get_person_statistics(person_id).await
    }

    async fn calculate(&self, request: &CalculateRequest) -> Option<CalculationResult> {
        self.calculate_biorhythm(request).await
    }

    async fn calculations(&self, person_id: Option<i64>) -> Option<CalculationsPage> {
        self.get_calculations(person_id).await
    }

    async fn global_statistics(&self) -> Option<GlobalStatistics> {
        self.get_global_statistics().await
    }
}
