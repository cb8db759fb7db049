//! Scripted, in-memory implementation of the remote metadata API
//!
//! Every call is counted so tests can tell cache hits from fetches. Individual shows
//! can be delayed (tokio time, so paused-clock tests stay instant) and the whole API
//! can be switched offline.

#![allow(dead_code)]

use async_trait::async_trait;
use series_navigator::core::{
    api::{ShowApi, TrendingWindow},
    error::{Result, SeriesNavigatorError},
    models::{RawSeason, SearchPage, ShowDetails, ShowSummary, WatchProviders},
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CallCounts {
    pub search: AtomicUsize,
    pub details: AtomicUsize,
    pub seasons: AtomicUsize,
    pub providers: AtomicUsize,
    pub top_rated: AtomicUsize,
    pub popular: AtomicUsize,
    pub trending: AtomicUsize,
}

impl CallCounts {
    pub fn search(&self) -> usize {
        self.search.load(Ordering::SeqCst)
    }
    pub fn details(&self) -> usize {
        self.details.load(Ordering::SeqCst)
    }
    pub fn seasons(&self) -> usize {
        self.seasons.load(Ordering::SeqCst)
    }
    pub fn providers(&self) -> usize {
        self.providers.load(Ordering::SeqCst)
    }
    pub fn top_rated(&self) -> usize {
        self.top_rated.load(Ordering::SeqCst)
    }
    pub fn popular(&self) -> usize {
        self.popular.load(Ordering::SeqCst)
    }

    /// Every remote call of any kind
    pub fn total(&self) -> usize {
        self.search()
            + self.details()
            + self.seasons()
            + self.providers()
            + self.top_rated()
            + self.popular()
            + self.trending.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeApi {
    pub calls: CallCounts,
    shows: HashMap<u64, (ShowDetails, Vec<RawSeason>)>,
    searches: HashMap<String, Vec<ShowSummary>>,
    listing: Vec<ShowSummary>,
    delays: Mutex<HashMap<u64, Duration>>,
    search_delays: Mutex<HashMap<String, Duration>>,
    listing_delay: Mutex<Option<Duration>>,
    offline: AtomicBool,
    providers_offline: AtomicBool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show(mut self, details: ShowDetails, seasons: Vec<RawSeason>) -> Self {
        self.shows.insert(details.id, (details, seasons));
        self
    }

    pub fn with_search(mut self, query: &str, results: Vec<ShowSummary>) -> Self {
        self.searches.insert(query.to_lowercase(), results);
        self
    }

    /// Results returned for every top rated / popular / trending page
    pub fn with_listing(mut self, results: Vec<ShowSummary>) -> Self {
        self.listing = results;
        self
    }

    pub fn delay_show(&self, show_id: u64, delay: Duration) {
        self.delays.lock().unwrap().insert(show_id, delay);
    }

    pub fn delay_search(&self, query: &str, delay: Duration) {
        self.search_delays
            .lock()
            .unwrap()
            .insert(query.to_lowercase(), delay);
    }

    /// Delay every top rated / popular / trending page
    pub fn delay_listing(&self, delay: Duration) {
        *self.listing_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_providers_offline(&self, offline: bool) {
        self.providers_offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SeriesNavigatorError::network("connection refused"))
        } else {
            Ok(())
        }
    }

    async fn show_delay(&self, show_id: u64) {
        let delay = self.delays.lock().unwrap().get(&show_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    async fn listing_delay(&self) {
        let delay = *self.listing_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn page(&self, page: u32) -> SearchPage {
        SearchPage {
            page,
            results: self.listing.clone(),
            total_pages: 5,
            total_results: (self.listing.len() * 5) as u32,
        }
    }
}

#[async_trait]
impl ShowApi for FakeApi {
    async fn search_shows(&self, query: &str, page: u32) -> Result<SearchPage> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        let delay = self
            .search_delays
            .lock()
            .unwrap()
            .get(&query.to_lowercase())
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;

        let results = self
            .searches
            .get(&query.to_lowercase())
            .cloned()
            .unwrap_or_default();
        Ok(SearchPage {
            page,
            total_pages: 1,
            total_results: results.len() as u32,
            results,
        })
    }

    async fn show_details(&self, show_id: u64) -> Result<ShowDetails> {
        self.calls.details.fetch_add(1, Ordering::SeqCst);
        self.show_delay(show_id).await;
        self.check_online()?;

        self.shows
            .get(&show_id)
            .map(|(details, _)| details.clone())
            .ok_or_else(|| SeriesNavigatorError::not_found("TV show"))
    }

    async fn season_details(&self, show_id: u64, season_number: u32) -> Result<RawSeason> {
        self.calls.seasons.fetch_add(1, Ordering::SeqCst);
        self.show_delay(show_id).await;
        self.check_online()?;

        self.shows
            .get(&show_id)
            .and_then(|(_, seasons)| {
                seasons
                    .iter()
                    .find(|season| season.season_number == season_number)
                    .cloned()
            })
            .ok_or_else(|| SeriesNavigatorError::not_found("Season"))
    }

    async fn watch_providers(&self, show_id: u64) -> Result<Option<WatchProviders>> {
        self.calls.providers.fetch_add(1, Ordering::SeqCst);
        self.show_delay(show_id).await;
        if self.offline.load(Ordering::SeqCst) || self.providers_offline.load(Ordering::SeqCst) {
            return Err(SeriesNavigatorError::network("connection refused"));
        }
        Ok(None)
    }

    async fn top_rated(&self, page: u32) -> Result<SearchPage> {
        self.calls.top_rated.fetch_add(1, Ordering::SeqCst);
        self.listing_delay().await;
        self.check_online()?;
        Ok(self.page(page))
    }

    async fn popular(&self, page: u32) -> Result<SearchPage> {
        self.calls.popular.fetch_add(1, Ordering::SeqCst);
        self.listing_delay().await;
        self.check_online()?;
        Ok(self.page(page))
    }

    async fn trending(&self, _window: TrendingWindow) -> Result<SearchPage> {
        self.calls.trending.fetch_add(1, Ordering::SeqCst);
        self.listing_delay().await;
        self.check_online()?;
        Ok(self.page(1))
    }
}
