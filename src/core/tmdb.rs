//! HTTP client for The Movie Database (TMDb) v3 API.
//!
//! [`TmdbClient`] implements [`ShowApi`] over `reqwest`. Requests are spaced at least
//! [`MIN_REQUEST_INTERVAL`] apart to stay well under TMDb's 40 requests / 10 s limit,
//! and HTTP failures are mapped onto [`SeriesNavigatorError`] variants with
//! user-facing messages.

use crate::core::api::{ShowApi, TrendingWindow};
use crate::core::config::ApiConfig;
use crate::core::error::{Result, SeriesNavigatorError};
use crate::core::models::{RawSeason, SearchPage, ShowDetails, WatchProviders};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Error body TMDb returns alongside non-2xx statuses
#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
    last_request: Mutex<Option<Instant>>,
}

impl TmdbClient {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("series-navigator/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            last_request: Mutex::new(None),
        })
    }

    /// Full image URL for a poster/still path, e.g. `image_url("/abc.jpg", "w500")`
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        image_url(&self.image_base_url, path, size)
    }

    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        resource: &str,
    ) -> Result<T> {
        self.throttle().await;

        let url = format!("{}{}", self.base_url, endpoint);
        log::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<TmdbErrorBody>()
            .await
            .ok()
            .and_then(|body| body.status_message);
        Err(map_status(status, message, resource))
    }
}

fn map_status(status: StatusCode, message: Option<String>, resource: &str) -> SeriesNavigatorError {
    match status {
        StatusCode::UNAUTHORIZED => SeriesNavigatorError::InvalidApiKey,
        StatusCode::NOT_FOUND => SeriesNavigatorError::not_found(resource),
        StatusCode::TOO_MANY_REQUESTS => SeriesNavigatorError::RateLimited,
        other => SeriesNavigatorError::api(
            message.unwrap_or_else(|| format!("HTTP {}", other.as_u16())),
        ),
    }
}

fn image_url(base: &str, path: Option<&str>, size: &str) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!("{base}/{size}{separator}{path}"))
}

#[async_trait]
impl ShowApi for TmdbClient {
    async fn search_shows(&self, query: &str, page: u32) -> Result<SearchPage> {
        self.get(
            "/search/tv",
            &[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("include_adult", "false".to_string()),
            ],
            "Search results",
        )
        .await
    }

    async fn show_details(&self, show_id: u64) -> Result<ShowDetails> {
        self.get(&format!("/tv/{show_id}"), &[], "TV show").await
    }

    async fn season_details(&self, show_id: u64, season_number: u32) -> Result<RawSeason> {
        self.get(
            &format!("/tv/{show_id}/season/{season_number}"),
            &[],
            "Season",
        )
        .await
    }

    async fn watch_providers(&self, show_id: u64) -> Result<Option<WatchProviders>> {
        match self
            .get::<WatchProviders>(&format!("/tv/{show_id}/watch/providers"), &[], "Watch providers")
            .await
        {
            Ok(providers) => Ok(Some(providers)),
            Err(e) => {
                log::warn!("Could not load watch providers for show {show_id}: {e}");
                Ok(None)
            }
        }
    }

    async fn top_rated(&self, page: u32) -> Result<SearchPage> {
        self.get("/tv/top_rated", &[("page", page.to_string())], "Top rated shows")
            .await
    }

    async fn popular(&self, page: u32) -> Result<SearchPage> {
        self.get("/tv/popular", &[("page", page.to_string())], "Popular shows")
            .await
    }

    async fn trending(&self, window: TrendingWindow) -> Result<SearchPage> {
        self.get(
            &format!("/trending/tv/{}", window.as_str()),
            &[],
            "Trending shows",
        )
        .await
    }
}
