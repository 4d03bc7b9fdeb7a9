//! HTTP client for the biorhythm API.

pub mod api;
pub mod auth;
pub mod calculations;
pub mod info;
pub mod people;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for the biorhythm API.
///
/// Clones share the connection pool and the session token, so a successful
/// [`authenticate`](BiorhythmClient::authenticate) is seen by every clone.
#[derive(Debug, Clone)]
pub struct BiorhythmClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl BiorhythmClient {
    /// Create a new client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            token: Arc::new(RwLock::new(config.token)),
        })
    }

    /// Create from environment (`BIORHYTHM_API_URL`, `BIORHYTHM_API_TOKEN`).
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// True when requests carry an `Authorization` header.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub(crate) async fn set_token(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    /// Build a URL for an endpoint relative to the base URL.
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Performs one call and decodes the JSON body.
    ///
    /// Non-2xx responses become [`ClientError::Status`]; a body that does not
    /// decode as `T` becomes [`ClientError::Decode`].
    pub async fn try_request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Like [`try_request`](Self::try_request), but any failure is logged and
    /// reported as `None`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Option<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        match self.try_request(method.clone(), path, query, body).await {
            Ok(value) => Some(value),
            Err(err) => {
                let url = self
                    .url(path)
                    .map(|u| u.to_string())
                    .unwrap_or_else(|_| path.to_string());
                tracing::error!(method = %method, url = %url, status = ?err.status(), error = %err, "API request failed");
                None
            }
        }
    }

    /// GET without a body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Option<T> {
        self.request::<T, ()>(Method::GET, path, query, None).await
    }

    /// POST with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Option<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, path, &[], Some(body)).await
    }
}
