//! Root and global statistics endpoints.

use biodash_core::api::{ApiInfo, GlobalStatistics};

use super::BiorhythmClient;

impl BiorhythmClient {
    /// Root endpoint; doubles as a connectivity probe.
    pub async fn get_api_info(&self) -> Option<ApiInfo> {
        self.get("", &[]).await
    }

    pub async fn get_global_statistics(&self) -> Option<GlobalStatistics> {
        self.get("statistics/", &[]).await
    }
}
