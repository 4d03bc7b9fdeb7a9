//! Calculation endpoints.

use biodash_core::api::{CalculateRequest, CalculationResult, CalculationsPage};

use super::BiorhythmClient;

impl BiorhythmClient {
    /// Starts a calculation upstream. Repeating a request is the server's concern.
    pub async fn calculate_biorhythm(
        &self,
        request: &CalculateRequest,
    ) -> Option<CalculationResult> {
        self.post("calculations/calculate/", request).await
    }

    pub async fn get_calculations(&self, person_id: Option<i64>) -> Option<CalculationsPage> {
        let query: Vec<(&str, String)> = person_id
            .map(|id| vec![("person_id", id.to_string())])
            .unwrap_or_default();
        self.get("calculations/", &query).await
    }
}
