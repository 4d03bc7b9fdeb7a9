//! Credential exchange.

use biodash_core::api::{AuthToken, Credentials};

use super::BiorhythmClient;

impl BiorhythmClient {
    /// Exchanges credentials for a token.
    ///
    /// On success the token is attached to every later request made through
    /// this client or its clones, and returned. On failure the current token,
    /// if any, is kept.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<String> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: AuthToken = self.post("auth/token/", &credentials).await?;
        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            tracing::warn!(username, "Authentication response carried no token");
            return None;
        };
        self.set_token(token.clone()).await;
        tracing::info!(username, "Authenticated with biorhythm API");
        Some(token)
    }
}
