//! Application state orchestrator.
//!
//! [`AppState`] ties the API boundary, the TTL cache, the rating aggregator and the
//! navigation stack together and exposes the user-level operations (search, browse,
//! select a show, back/forward, retry). Every method takes `&self`; internal state
//! sits behind `std::sync::Mutex`es that are never held across an `.await`.
//!
//! # Public API
//! - [`AppState`]: The orchestrator
//! - [`BrowseSource`]: Curated listings (top rated, popular, trending)
//!
//! # History Bookkeeping
//! The navigation stack records the views the user *left*. Leaving Home records
//! nothing. A browse listing replaced by another browse listing is updated in place.
//! Going back first records the live view (once) so forward can return to it.
//!
//! # Stale Responses
//! Show loads carry the selection generation they started with and drop their
//! results if a newer selection, restore or reset happened meanwhile. Listings are
//! applied only while their query is still the one on screen.

use crate::core::aggregator::aggregate;
use crate::core::api::{ShowApi, TrendingWindow};
use crate::core::cache::{CacheKey, Namespace, TtlCache};
use crate::core::config::{CacheTtl, SearchSettings};
use crate::core::debounce::Debouncer;
use crate::core::error::{Result, SeriesNavigatorError};
use crate::core::models::{RawSeason, SearchPage, ShowDetails, ShowSummary};
use crate::core::navigation::NavigationStack;
use crate::core::state::{
    AppSnapshot, CurrentView, SearchState, SelectedEpisode, ShowState, ViewState,
};
use futures::future::try_join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pages fetched for the top rated listing
pub const TOP_RATED_PAGES: u32 = 5;
pub const TOP_RATED_LIMIT: usize = 100;
/// Random picks come from one of the first N popular pages
pub const RANDOM_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseSource {
    TopRated,
    Popular,
    Trending(TrendingWindow),
}

impl BrowseSource {
    /// Label stored as the browse query
    pub fn label(&self) -> &'static str {
        match self {
            BrowseSource::TopRated => "Top 100 TV Shows",
            BrowseSource::Popular => "Popular Now",
            BrowseSource::Trending(window) => window.label(),
        }
    }
}

/// Last operation that failed remotely, replayed by [`AppState::retry`]
#[derive(Debug, Clone, PartialEq)]
enum FailedOperation {
    Search(String),
    Browse(BrowseSource),
    Show(ShowSummary),
    RandomShow,
}

#[derive(Debug, Default)]
struct Session {
    view: CurrentView,
    search: SearchState,
    show: ShowState,
    selected_episode: Option<SelectedEpisode>,
    history: NavigationStack<ViewState>,
    /// True when the live view is the entry at the history cursor
    live_recorded: bool,
    generation: u64,
    last_failure: Option<FailedOperation>,
}

impl Session {
    fn live_view(&self) -> Option<ViewState> {
        match self.view {
            CurrentView::Home => None,
            CurrentView::Browse => Some(ViewState::Browse {
                query: self.search.query.clone(),
                results: self.search.results.clone(),
            }),
            CurrentView::Detail => self
                .show
                .selected
                .clone()
                .map(|show| ViewState::Detail { show }),
        }
    }

    /// Record the view being left before a user transition into `target`
    fn record_transition(&mut self, target: CurrentView) {
        match (self.view, target) {
            (CurrentView::Home, _) => {}
            (CurrentView::Browse, CurrentView::Browse) => {}
            _ if self.live_recorded => {}
            _ => {
                if let Some(live) = self.live_view() {
                    self.history.push(live);
                }
            }
        }
        self.live_recorded = false;
        self.last_failure = None;
        self.selected_episode = None;
    }

    fn can_go_back(&self) -> bool {
        if self.live_recorded {
            self.history.can_go_back()
        } else {
            !self.history.is_empty()
        }
    }

    fn can_go_forward(&self) -> bool {
        self.live_recorded && self.history.can_go_forward()
    }

    /// Invalidate any in-flight show load and return the new generation
    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn begin_show_load(&mut self, show: ShowSummary) -> u64 {
        self.view = CurrentView::Detail;
        self.selected_episode = None;
        self.show = ShowState {
            selected: Some(show),
            is_loading: true,
            ..ShowState::default()
        };
        self.next_generation()
    }

    /// Start a listing fetch and return its generation
    fn begin_listing(&mut self, query: String) -> u64 {
        if self.view != CurrentView::Browse {
            self.show = ShowState::default();
        }
        self.view = CurrentView::Browse;
        self.search.query = query;
        self.search.results.clear();
        self.search.is_searching = true;
        self.search.error = None;
        self.next_generation()
    }

    fn is_listing_current(&self, query: &str, generation: u64) -> bool {
        self.generation == generation
            && self.view == CurrentView::Browse
            && self.search.query == query
    }

    /// Surface a failure on whichever view is live
    fn report_error(&mut self, message: String) {
        match self.view {
            CurrentView::Detail => {
                self.show.is_loading = false;
                self.show.error = Some(message);
            }
            CurrentView::Home | CurrentView::Browse => {
                self.search.is_searching = false;
                self.search.error = Some(message);
            }
        }
    }
}

pub struct AppState {
    api: Arc<dyn ShowApi>,
    cache: Mutex<TtlCache>,
    session: Mutex<Session>,
    ttl: CacheTtl,
    search_settings: SearchSettings,
    debouncer: Debouncer,
}

impl AppState {
    pub fn new(
        api: Arc<dyn ShowApi>,
        cache: TtlCache,
        ttl: CacheTtl,
        search_settings: SearchSettings,
    ) -> Self {
        Self {
            api,
            cache: Mutex::new(cache),
            session: Mutex::new(Session::default()),
            ttl,
            debouncer: Debouncer::new(search_settings.debounce),
            search_settings,
        }
    }

    /// Orchestrator with default TTLs and search settings
    pub fn with_defaults(api: Arc<dyn ShowApi>, cache: TtlCache) -> Self {
        Self::new(api, cache, CacheTtl::default(), SearchSettings::default())
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn cache(&self) -> MutexGuard<'_, TtlCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> AppSnapshot {
        let session = self.session();
        AppSnapshot {
            view: session.view,
            search: session.search.clone(),
            show: session.show.clone(),
            selected_episode: session.selected_episode.clone(),
            can_go_back: session.can_go_back(),
            can_go_forward: session.can_go_forward(),
        }
    }

    /// Recorded history entries and the cursor position
    pub fn history(&self) -> (Vec<ViewState>, Option<usize>) {
        let session = self.session();
        (session.history.entries().to_vec(), session.history.cursor())
    }

    // === Search ===

    /// Look up shows by name, cache first
    pub async fn search(&self, query: &str) -> Result<()> {
        let query = query.trim().to_string();

        if query.chars().count() < self.search_settings.min_length {
            let mut session = self.session();
            session.search.query = query;
            session.search.results.clear();
            session.search.is_searching = false;
            session.search.error = None;
            return Ok(());
        }

        let generation = {
            let mut session = self.session();
            session.record_transition(CurrentView::Browse);
            session.begin_listing(query.clone())
        };

        let key = CacheKey::search(&query);
        let cached = self.cache().get::<SearchPage>(&key);
        let outcome = match cached {
            Some(page) => Ok(page.results),
            None => match self.api.search_shows(&query, 1).await {
                Ok(page) => {
                    self.cache().set(&key, &page, self.ttl.search);
                    Ok(page.results)
                }
                Err(e) => Err(e),
            },
        };

        self.finish_listing(
            &query,
            generation,
            outcome,
            FailedOperation::Search(query.clone()),
        )
    }

    /// Debounced search-as-you-type. Returns whether a lookup was issued.
    pub async fn search_input(&self, query: &str) -> Result<bool> {
        {
            let mut session = self.session();
            session.search.query = query.trim().to_string();
        }

        if query.trim().chars().count() < self.search_settings.min_length {
            self.debouncer.cancel();
            let mut session = self.session();
            session.search.results.clear();
            session.search.is_searching = false;
            session.search.error = None;
            return Ok(false);
        }

        if !self.debouncer.wait().await {
            return Ok(false);
        }

        self.search(query).await?;
        Ok(true)
    }

    pub fn clear_search(&self) {
        self.debouncer.cancel();
        self.session().search = SearchState::default();
    }

    // === Browse ===

    pub async fn browse_top_rated(&self) -> Result<()> {
        self.browse(BrowseSource::TopRated).await
    }

    pub async fn browse_popular(&self) -> Result<()> {
        self.browse(BrowseSource::Popular).await
    }

    pub async fn browse_trending(&self, window: TrendingWindow) -> Result<()> {
        self.browse(BrowseSource::Trending(window)).await
    }

    pub async fn browse(&self, source: BrowseSource) -> Result<()> {
        let label = source.label();
        self.debouncer.cancel();
        let generation = {
            let mut session = self.session();
            session.record_transition(CurrentView::Browse);
            session.begin_listing(label.to_string())
        };

        let outcome = self.fetch_listing(source).await;
        self.finish_listing(label, generation, outcome, FailedOperation::Browse(source))
    }

    async fn fetch_listing(&self, source: BrowseSource) -> Result<Vec<ShowSummary>> {
        match source {
            BrowseSource::TopRated => {
                let pages = try_join_all((1..=TOP_RATED_PAGES).map(|page| self.api.top_rated(page)))
                    .await?;
                Ok(pages
                    .into_iter()
                    .flat_map(|page| page.results)
                    .take(TOP_RATED_LIMIT)
                    .collect())
            }
            BrowseSource::Popular => Ok(self.api.popular(1).await?.results),
            BrowseSource::Trending(window) => Ok(self.api.trending(window).await?.results),
        }
    }

    fn finish_listing(
        &self,
        query: &str,
        generation: u64,
        outcome: Result<Vec<ShowSummary>>,
        failure: FailedOperation,
    ) -> Result<()> {
        let mut session = self.session();
        if !session.is_listing_current(query, generation) {
            log::debug!("Discarding stale results for '{query}'");
            return Ok(());
        }

        session.search.is_searching = false;
        match outcome {
            Ok(results) => {
                session.search.results = results;
                session.search.error = None;
                session.last_failure = None;
                Ok(())
            }
            Err(e) => {
                session.search.results.clear();
                session.search.error = Some(e.to_string());
                session.last_failure = Some(failure);
                Err(e)
            }
        }
    }

    // === Show Detail ===

    /// Open a show: details, watch providers, every season, then the heatmap
    pub async fn select_show(&self, show: ShowSummary) -> Result<()> {
        self.debouncer.cancel();
        let generation = {
            let mut session = self.session();
            session.record_transition(CurrentView::Detail);
            session.begin_show_load(show.clone())
        };
        self.load_show(show, generation).await
    }

    /// Open a random pick from the popular listing. A selection made while the
    /// listing is still loading wins over the pick.
    pub async fn select_random_show(&self) -> Result<()> {
        self.debouncer.cancel();
        let generation = self.session().next_generation();
        let page = rand::thread_rng().gen_range(1..=RANDOM_PAGES);
        let outcome = self.api.popular(page).await.and_then(|listing| {
            listing
                .results
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or_else(|| SeriesNavigatorError::not_found("Random show"))
        });

        let show = {
            let mut session = self.session();
            if session.generation != generation {
                log::debug!("Discarding random pick, a newer selection was made");
                return Ok(());
            }
            match outcome {
                Ok(show) => show,
                Err(e) => {
                    session.report_error(e.to_string());
                    session.last_failure = Some(FailedOperation::RandomShow);
                    return Err(e);
                }
            }
        };

        log::debug!("Random pick from popular page {page}: {} ({})", show.name, show.id);
        self.select_show(show).await
    }

    async fn load_show(&self, show: ShowSummary, generation: u64) -> Result<()> {
        match self.load_show_chain(show.id, generation).await {
            Ok(()) => Ok(()),
            Err(e) => {
                let mut session = self.session();
                if session.generation != generation {
                    log::debug!("Ignoring failure of superseded load for show {}: {e}", show.id);
                    return Ok(());
                }
                session.show.is_loading = false;
                session.show.error = Some(e.to_string());
                session.last_failure = Some(FailedOperation::Show(show));
                Err(e)
            }
        }
    }

    async fn load_show_chain(&self, show_id: u64, generation: u64) -> Result<()> {
        let details = self.fetch_details(show_id).await?;
        let season_count = details.number_of_seasons;
        if !self.apply_if_current(generation, |session| session.show.details = Some(details)) {
            return Ok(());
        }

        let providers = self.api.watch_providers(show_id).await.unwrap_or_else(|e| {
            log::warn!("Watch providers unavailable for show {show_id}: {e}");
            None
        });
        if !self.apply_if_current(generation, |session| session.show.watch_providers = providers) {
            return Ok(());
        }

        let seasons = self.fetch_seasons(show_id, season_count).await?;
        let heatmap = aggregate(&seasons);
        self.apply_if_current(generation, |session| {
            session.show.seasons = seasons;
            session.show.heatmap = Some(heatmap);
            session.show.is_loading = false;
            session.last_failure = None;
        });
        Ok(())
    }

    /// Run `apply` only if no newer show load started since `generation`
    fn apply_if_current(&self, generation: u64, apply: impl FnOnce(&mut Session)) -> bool {
        let mut session = self.session();
        if session.generation != generation {
            log::debug!(
                "Discarding stale show response (generation {generation}, current {})",
                session.generation
            );
            return false;
        }
        apply(&mut *session);
        true
    }

    async fn fetch_details(&self, show_id: u64) -> Result<ShowDetails> {
        let key = CacheKey::show(show_id);
        let cached = self.cache().get::<ShowDetails>(&key);
        if let Some(details) = cached {
            return Ok(details);
        }

        let details = self.api.show_details(show_id).await?;
        self.cache().set(&key, &details, self.ttl.details);
        Ok(details)
    }

    async fn fetch_seasons(&self, show_id: u64, season_count: u32) -> Result<Vec<RawSeason>> {
        let mut seasons: Vec<Option<RawSeason>> = Vec::with_capacity(season_count as usize);
        let mut missing = Vec::new();
        {
            let mut cache = self.cache();
            for season_number in 1..=season_count {
                let cached = cache.get::<RawSeason>(&CacheKey::season(show_id, season_number));
                if cached.is_none() {
                    missing.push(season_number);
                }
                seasons.push(cached);
            }
        }

        if !missing.is_empty() {
            log::debug!(
                "Fetching {} of {season_count} seasons for show {show_id}",
                missing.len()
            );
            let fetched = try_join_all(
                missing
                    .iter()
                    .map(|&season_number| self.api.season_details(show_id, season_number)),
            )
            .await?;

            let mut cache = self.cache();
            for (season_number, season) in missing.into_iter().zip(fetched) {
                cache.set(
                    &CacheKey::season(show_id, season_number),
                    &season,
                    self.ttl.details,
                );
                seasons[(season_number - 1) as usize] = Some(season);
            }
        }

        Ok(seasons.into_iter().flatten().collect())
    }

    // === Episode Detail ===

    pub fn select_episode(&self, season_number: u32, episode_number: u32) -> Result<()> {
        let mut session = self.session();
        let episode = session
            .show
            .heatmap
            .as_ref()
            .ok_or(SeriesNavigatorError::NoShowSelected)?
            .episode(season_number, episode_number)
            .cloned()
            .ok_or(SeriesNavigatorError::EpisodeNotFound {
                season: season_number,
                episode: episode_number,
            })?;
        session.selected_episode = Some(SelectedEpisode {
            season_number,
            episode,
        });
        Ok(())
    }

    pub fn close_episode(&self) {
        self.session().selected_episode = None;
    }

    // === Navigation ===

    /// Step back in history. Returns whether navigation happened.
    pub async fn go_back(&self) -> Result<bool> {
        let restored = {
            let mut session = self.session();
            if !session.can_go_back() {
                return Ok(false);
            }
            if !session.live_recorded {
                if let Some(live) = session.live_view() {
                    session.history.push(live);
                }
                session.live_recorded = true;
            }
            session.history.back().cloned()
        };

        match restored {
            Some(state) => self.restore(state).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Step forward in history. Returns whether navigation happened.
    pub async fn go_forward(&self) -> Result<bool> {
        let restored = {
            let mut session = self.session();
            if !session.can_go_forward() {
                return Ok(false);
            }
            session.history.forward().cloned()
        };

        match restored {
            Some(state) => self.restore(state).await.map(|()| true),
            None => Ok(false),
        }
    }

    async fn restore(&self, state: ViewState) -> Result<()> {
        self.debouncer.cancel();
        match state {
            ViewState::Browse { query, results } => {
                let mut session = self.session();
                session.next_generation();
                session.view = CurrentView::Browse;
                session.show = ShowState::default();
                session.selected_episode = None;
                session.last_failure = None;
                session.search = SearchState {
                    query,
                    results,
                    is_searching: false,
                    error: None,
                };
                Ok(())
            }
            ViewState::Detail { show } => {
                let generation = {
                    let mut session = self.session();
                    session.last_failure = None;
                    session.begin_show_load(show.clone())
                };
                self.load_show(show, generation).await
            }
        }
    }

    /// Back to the landing view, forgetting all history
    pub fn go_home(&self) {
        self.debouncer.cancel();
        let mut session = self.session();
        session.next_generation();
        session.history.reset();
        session.live_recorded = false;
        session.view = CurrentView::Home;
        session.search = SearchState::default();
        session.show = ShowState::default();
        session.selected_episode = None;
        session.last_failure = None;
    }

    /// Re-run the last failed operation. Returns `false` when nothing failed.
    pub async fn retry(&self) -> Result<bool> {
        let failure = self.session().last_failure.clone();
        match failure {
            None => Ok(false),
            Some(FailedOperation::Search(query)) => self.search(&query).await.map(|()| true),
            Some(FailedOperation::Browse(source)) => self.browse(source).await.map(|()| true),
            Some(FailedOperation::RandomShow) => self.select_random_show().await.map(|()| true),
            Some(FailedOperation::Show(show)) => {
                let generation = self.session().begin_show_load(show.clone());
                self.load_show(show, generation).await.map(|()| true)
            }
        }
    }

    // === Cache Maintenance ===

    pub fn sweep_cache(&self) -> usize {
        self.cache().sweep_expired()
    }

    /// Clear one namespace, or everything under the cache prefix
    pub fn clear_cache(&self, namespace: Option<Namespace>) -> usize {
        let mut cache = self.cache();
        match namespace {
            Some(namespace) => cache.clear_namespace(namespace),
            None => cache.clear_all(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(id: u64) -> ShowSummary {
        ShowSummary {
            id,
            name: format!("Show {id}"),
            ..Default::default()
        }
    }

    fn browse_session(query: &str) -> Session {
        Session {
            view: CurrentView::Browse,
            search: SearchState {
                query: query.to_string(),
                results: vec![show(1), show(2)],
                ..SearchState::default()
            },
            ..Session::default()
        }
    }

    #[test]
    fn test_leaving_home_records_nothing() {
        let mut session = Session::default();
        session.record_transition(CurrentView::Browse);
        assert!(session.history.is_empty());
        assert!(!session.can_go_back());
    }

    #[test]
    fn test_browse_to_browse_updates_in_place() {
        let mut session = browse_session("lost");
        session.record_transition(CurrentView::Browse);
        assert!(session.history.is_empty());
    }

    #[test]
    fn test_browse_to_detail_records_listing() {
        let mut session = browse_session("lost");
        session.record_transition(CurrentView::Detail);
        session.begin_show_load(show(1));

        assert_eq!(session.history.len(), 1);
        assert!(matches!(
            session.history.current(),
            Some(ViewState::Browse { query, results }) if query == "lost" && results.len() == 2
        ));
        assert!(session.can_go_back());
        assert!(!session.can_go_forward());
    }

    #[test]
    fn test_recorded_live_view_is_not_pushed_twice() {
        let mut session = browse_session("lost");
        session.history.push(session.live_view().unwrap());
        session.live_recorded = true;

        session.record_transition(CurrentView::Detail);
        assert_eq!(session.history.len(), 1);
        assert!(!session.live_recorded);
    }

    #[test]
    fn test_begin_listing_drops_previous_results() {
        let mut session = browse_session("breaking");
        let first = session.begin_listing("lost".to_string());

        assert!(session.search.results.is_empty());
        assert!(session.is_listing_current("lost", first));
        assert!(!session.is_listing_current("breaking", first));

        session.next_generation();
        assert!(!session.is_listing_current("lost", first));
    }

    #[test]
    fn test_begin_show_load_bumps_generation() {
        let mut session = Session::default();
        let first = session.begin_show_load(show(1));
        let second = session.begin_show_load(show(2));
        assert!(second > first);
        assert!(session.show.is_loading);
        assert_eq!(session.show.selected.as_ref().map(|s| s.id), Some(2));
    }

    #[test]
    fn test_browse_labels() {
        assert_eq!(BrowseSource::TopRated.label(), "Top 100 TV Shows");
        assert_eq!(BrowseSource::Popular.label(), "Popular Now");
        assert_eq!(
            BrowseSource::Trending(TrendingWindow::Week).label(),
            "Trending This Week"
        );
    }
}
