//! `RecommendClient` - recommendation backend client implementation.

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::RecommendApi;
use super::error::RequestError;
use super::types::{PopularMovie, Recommendation, RecommendationsResponse, SearchRequest};

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";

/// Path of the popular-movies endpoint.
const POPULAR_MOVIES_PATH: &str = "/popular-movies";

/// Recommendation backend client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RecommendClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests (always ends with `/`).
    base_url: Url,
}

/// Builder for `RecommendClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct RecommendClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
}

impl RecommendClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (config, CLI flag, or wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<RecommendClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;

        let mut base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(RecommendClient {
            http_client,
            base_url,
        })
    }
}

impl RecommendClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> RecommendClientBuilder {
        RecommendClientBuilder::new()
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Sends one GET request and decodes a 2xx JSON body.
    ///
    /// Non-2xx responses are turned into `RequestError::Status` using the
    /// body's `error` field. No retries.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path_and_query: &str,
    ) -> Result<T, RequestError> {
        let url = self
            .base_url
            .join(path_and_query.trim_start_matches('/'))
            .map_err(|e| {
                RequestError::InvalidUrl(format!("failed to join URL path {path_and_query}: {e}"))
            })?;

        tracing::debug!(url = %url, "backend request");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = RequestError::from_status_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "backend returned error status");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| RequestError::Decode(e.to_string()))
    }
}

impl RecommendApi for RecommendClient {
    #[instrument(skip_all, fields(mode = %request.mode))]
    async fn recommend(
        &self,
        request: &SearchRequest,
    ) -> Result<Vec<Recommendation>, RequestError> {
        let response: RecommendationsResponse =
            self.get_json(&request.path_and_query()).await?;
        let results = response.into_recommendations();
        tracing::debug!(count = results.len(), "recommendations received");
        Ok(results)
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self) -> Result<Vec<PopularMovie>, RequestError> {
        self.get_json(POPULAR_MOVIES_PATH).await
    }
}
