//! Authenticated GET calls against the football provider

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

use super::http_client::create_upstream_http_client;
use super::urls::{
    build_fixture_url, build_league_fixtures_url, build_live_fixtures_url, build_prediction_url,
};
use crate::config::Config;
use crate::data_fetcher::models::{
    DateRange, Fixture, FixtureApiResponse, FixtureId, Prediction, PredictionApiResponse,
    has_provider_errors,
};
use crate::data_fetcher::processors::{into_fixture, into_prediction};
use crate::error::AppError;

/// Thin client over the provider's REST API.
///
/// Performs exactly one request per call and never retries; fallback is
/// the provider's job. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    api_host: String,
}

impl fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("base_url", &self.base_url)
            .field("api_host", &self.api_host)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl UpstreamClient {
    pub fn new(
        base_url: impl Into<String>,
        api_host: &str,
        api_key: &str,
        timeout_seconds: u64,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: create_upstream_http_client(timeout_seconds, api_host, api_key)?,
            base_url: base_url.into(),
            api_host: api_host.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.api_base_url.clone(),
            &config.api_host,
            &config.api_key,
            config.http_timeout_seconds,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one GET and decodes the JSON body into `T`.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        debug!("Requesting {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                error!("Request failed for URL {}: {}", url, e);
                if e.is_timeout() {
                    AppError::upstream_timeout(url)
                } else {
                    AppError::upstream_unavailable(url, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "HTTP {} - {} (URL: {})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error"),
                url
            );
            return Err(AppError::upstream_bad_status(status.as_u16(), url));
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body from URL {}: {}", url, e);
            if e.is_timeout() {
                AppError::upstream_timeout(url)
            } else {
                AppError::upstream_unavailable(url, e.to_string())
            }
        })?;
        debug!("Response length: {} bytes", body.len());

        serde_json::from_str::<T>(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            error!("Failed to parse response from {}: {} (body: {})", url, e, preview);
            if body.trim().is_empty() {
                AppError::upstream_malformed("Response body is empty", url)
            } else {
                AppError::upstream_malformed(e.to_string(), url)
            }
        })
    }

    async fn get_fixtures(&self, url: &str) -> Result<Vec<Fixture>, AppError> {
        let payload: FixtureApiResponse = self.get(url).await?;
        if has_provider_errors(&payload.errors) {
            warn!("Provider rejected request {}: {}", url, payload.errors);
            return Err(AppError::upstream_malformed(
                format!("Provider reported errors: {}", payload.errors),
                url,
            ));
        }
        Ok(payload.response.into_iter().map(into_fixture).collect())
    }

    /// Fetches one fixture. An empty result set is `NotFound`.
    pub async fn fetch_fixture(&self, id: &FixtureId) -> Result<Fixture, AppError> {
        let url = build_fixture_url(&self.base_url, id.as_str());
        self.get_fixtures(&url)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                info!("Provider has no fixture {}", id);
                AppError::not_found(id.as_str())
            })
    }

    pub async fn fetch_league_fixtures(
        &self,
        league_id: i64,
        season: i32,
        range: &DateRange,
    ) -> Result<Vec<Fixture>, AppError> {
        let url = build_league_fixtures_url(&self.base_url, league_id, season, range.from, range.to);
        self.get_fixtures(&url).await
    }

    pub async fn fetch_live_fixtures(&self) -> Result<Vec<Fixture>, AppError> {
        let url = build_live_fixtures_url(&self.base_url);
        self.get_fixtures(&url).await
    }

    /// Fetches a fixture's prediction; an empty response means there is none.
    pub async fn fetch_prediction(&self, id: &FixtureId) -> Result<Option<Prediction>, AppError> {
        let url = build_prediction_url(&self.base_url, id.as_str());
        let payload: PredictionApiResponse = self.get(&url).await?;
        if has_provider_errors(&payload.errors) {
            return Err(AppError::upstream_malformed(
                format!("Provider reported errors: {}", payload.errors),
                url,
            ));
        }
        Ok(payload.response.into_iter().next().map(into_prediction))
    }
}
