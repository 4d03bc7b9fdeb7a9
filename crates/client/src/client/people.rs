//! People endpoints.

use biodash_core::api::{BiorhythmData, PeoplePage, PeopleQuery, PersonStatistics, PointsQuery};
use biodash_core::biorhythm::Person;

use super::BiorhythmClient;

impl BiorhythmClient {
    pub async fn get_people(&self, query: &PeopleQuery) -> Option<PeoplePage> {
        self.get("people/", &query.to_pairs()).await
    }

    pub async fn get_person(&self, person_id: i64) -> Option<Person> {
        self.get(&format!("people/{}/", person_id), &[]).await
    }

    pub async fn get_biorhythm_data(
        &self,
        person_id: i64,
        query: &PointsQuery,
    ) -> Option<BiorhythmData> {
        self.get(
            &format!("people/{}/biorhythm_data/", person_id),
            &query.to_pairs(),
        )
        .await
    }

    pub async fn get_person_statistics(&self, person_id: i64) -> Option<PersonStatistics> {
        self.get(&format!("people/{}/statistics/", person_id), &[])
            .await
    }
}
