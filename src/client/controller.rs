//! Incremental breed loading controller
//!
//! Drives the paged/infinite-scroll listing: merges paginated fetches into an
//! accumulated list, de-duplicates in-flight thumbnail loads, and throttles
//! scroll-driven page requests. Page loads are tagged with a session counter;
//! a response arriving after a new search has started is discarded instead of
//! clobbering the newer state.
//!
//! Scroll-driven loading is disabled while a search term is active: search
//! results are never infinite-scrolled, even when they exceed one page.

use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::client::api::BreedApi;

/// Load controller tuning knobs
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Breeds requested per page
    pub page_size: u32,
    /// Page size for the one-shot suggestion list
    pub suggestion_limit: u32,
    /// Distance from the document bottom that arms a load, in pixels
    pub scroll_threshold_px: f64,
    /// Cooldown between scroll-triggered loads
    pub scroll_cooldown: Duration,
    /// How long informational notices stay visible
    pub notice_ttl: Duration,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            suggestion_limit: 200,
            scroll_threshold_px: 500.0,
            scroll_cooldown: Duration::from_secs(1),
            notice_ttl: Duration::from_secs(3),
        }
    }
}

/// Where the controller is in its loading lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Ready,
    LoadingMore,
}

/// Kind of user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A user-facing message; new notices replace old ones, never queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    expires_at: Option<Instant>,
}

impl Notice {
    fn expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Scroll geometry fed in by the embedding UI, in pixels
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    fn near_bottom(&self, threshold: f64) -> bool {
        self.scroll_top + self.viewport_height >= self.document_height - threshold
    }
}

/// Read-only view of the controller state for rendering
#[derive(Debug, Clone)]
pub struct BrowserSnapshot {
    pub phase: LoadPhase,
    pub breeds: Vec<String>,
    pub suggestions: Vec<String>,
    pub image_map: HashMap<String, String>,
    pub favorites: Vec<String>,
    pub current_page: u32,
    pub has_more: bool,
    pub total_breeds: u64,
    pub search_term: String,
    pub notice: Option<Notice>,
}

struct BrowserState {
    phase: LoadPhase,
    /// Accumulated names, append-only within one search session; a name is
    /// appended only after its thumbnail batch has joined
    breeds: Vec<String>,
    suggestions: Vec<String>,
    image_map: HashMap<String, String>,
    in_flight: HashSet<String>,
    favorites: Vec<String>,
    current_page: u32,
    has_more: bool,
    total_breeds: u64,
    search_term: String,
    /// Bumped by every new search; page loads carry the value they were
    /// issued against and are dropped if it moved on
    session: u64,
    throttle_until: Option<Instant>,
    notice: Option<Notice>,
}

impl BrowserState {
    fn new() -> Self {
        Self {
            phase: LoadPhase::Idle,
            breeds: Vec::new(),
            suggestions: Vec::new(),
            image_map: HashMap::new(),
            in_flight: HashSet::new(),
            favorites: Vec::new(),
            current_page: 1,
            has_more: false,
            total_breeds: 0,
            search_term: String::new(),
            session: 0,
            throttle_until: None,
            notice: None,
        }
    }

    fn set_notice(&mut self, text: String, kind: NoticeKind, ttl: Option<Duration>) {
        self.notice = Some(Notice {
            text,
            kind,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        });
    }
}

/// Client-side controller for the breed listing
#[derive(Clone)]
pub struct BreedBrowser {
    api: Arc<dyn BreedApi>,
    config: BrowserConfig,
    state: Arc<RwLock<BrowserState>>,
}

impl BreedBrowser {
    pub fn new(api: Arc<dyn BreedApi>) -> Self {
        Self::with_config(api, BrowserConfig::default())
    }

    pub fn with_config(api: Arc<dyn BreedApi>, config: BrowserConfig) -> Self {
        Self {
            api,
            config,
            state: Arc::new(RwLock::new(BrowserState::new())),
        }
    }

    /// Initial load: first unfiltered page, favorites and suggestions
    pub async fn start(&self) {
        self.load_page(1, false).await;
        self.refresh_favorites().await;
        self.load_suggestions().await;
    }

    /// Start a new search session and load its first page
    ///
    /// A blank term reloads the unfiltered listing.
    pub async fn search(&self, term: &str) {
        {
            let mut state = self.state.write().await;
            state.session += 1;
            state.search_term = term.trim().to_string();
            state.breeds.clear();
            state.current_page = 1;
            state.has_more = false;
            state.total_breeds = 0;
        }
        self.load_page(1, false).await;
    }

    /// Load the next page if one exists and nothing is already loading
    pub async fn load_more(&self) {
        let next_page = {
            let mut state = self.state.write().await;
            if !state.has_more
                || matches!(state.phase, LoadPhase::Loading | LoadPhase::LoadingMore)
            {
                return;
            }
            state.phase = LoadPhase::LoadingMore;
            state.current_page + 1
        };
        self.load_page(next_page, true).await;
    }

    /// Scroll-driven trigger for [`Self::load_more`]
    ///
    /// Ignored while a search term is active and during the cooldown window.
    /// The cooldown is a fixed deadline checked lazily on the next scroll
    /// event; stopping mid-cooldown still incurs the full window.
    pub async fn handle_scroll(&self, metrics: ScrollMetrics) {
        {
            let mut state = self.state.write().await;
            if !state.search_term.is_empty() {
                return;
            }

            let now = Instant::now();
            if state.throttle_until.is_some_and(|until| now < until) {
                return;
            }
            if !metrics.near_bottom(self.config.scroll_threshold_px) {
                return;
            }
            state.throttle_until = Some(now + self.config.scroll_cooldown);
        }
        self.load_more().await;
    }

    /// Add or remove a favorite depending on current membership
    ///
    /// Success refreshes favorites from the store and surfaces a transient
    /// info notice; failure surfaces a persistent error notice. Local state
    /// is only ever what the refresh establishes.
    pub async fn toggle_favorite(&self, breed: &str) {
        let is_favorite = {
            let state = self.state.read().await;
            state.favorites.iter().any(|name| name == breed)
        };

        let result = if is_favorite {
            self.api.remove_favorite(breed).await
        } else {
            self.api.add_favorite(breed).await
        };

        match result {
            Ok(()) => {
                self.refresh_favorites().await;
                let action = if is_favorite {
                    "removed from"
                } else {
                    "added to"
                };
                let mut state = self.state.write().await;
                state.set_notice(
                    format!("{breed} {action} favorites!"),
                    NoticeKind::Info,
                    Some(self.config.notice_ttl),
                );
            }
            Err(e) => {
                warn!("Error toggling favorite '{breed}': {e}");
                let mut state = self.state.write().await;
                state.set_notice(
                    format!("Failed to update favorite status for {breed}."),
                    NoticeKind::Error,
                    None,
                );
            }
        }
    }

    /// Re-read the favorites list from the backing store
    pub async fn refresh_favorites(&self) {
        match self.api.favorites().await {
            Ok(records) => {
                let mut state = self.state.write().await;
                state.favorites = records.into_iter().map(|record| record.breed).collect();
            }
            Err(e) => warn!("Error loading favorites: {e}"),
        }
    }

    /// Fetch one large unfiltered page to back search suggestions
    pub async fn load_suggestions(&self) {
        match self
            .api
            .list_breeds(1, self.config.suggestion_limit, None)
            .await
        {
            Ok(page) => {
                let mut state = self.state.write().await;
                state.suggestions = page.breeds;
            }
            Err(e) => warn!("Error loading breed suggestions: {e}"),
        }
    }

    /// Full image set for one breed (detail/modal view); failures yield an
    /// empty gallery
    pub async fn breed_gallery(&self, breed: &str) -> Vec<String> {
        match self.api.breed_images(breed).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Error loading gallery for '{breed}': {e}");
                Vec::new()
            }
        }
    }

    /// Current state for rendering; expired notices are cleared on read
    pub async fn snapshot(&self) -> BrowserSnapshot {
        let mut state = self.state.write().await;
        if state.notice.as_ref().is_some_and(Notice::expired) {
            state.notice = None;
        }
        BrowserSnapshot {
            phase: state.phase,
            breeds: state.breeds.clone(),
            suggestions: state.suggestions.clone(),
            image_map: state.image_map.clone(),
            favorites: state.favorites.clone(),
            current_page: state.current_page,
            has_more: state.has_more,
            total_breeds: state.total_breeds,
            search_term: state.search_term.clone(),
            notice: state.notice.clone(),
        }
    }

    async fn load_page(&self, page: u32, append: bool) {
        let (session, term) = {
            let mut state = self.state.write().await;
            state.phase = if append {
                LoadPhase::LoadingMore
            } else {
                LoadPhase::Loading
            };
            (state.session, state.search_term.clone())
        };
        let search = if term.is_empty() {
            None
        } else {
            Some(term.as_str())
        };

        let result = self
            .api
            .list_breeds(page, self.config.page_size, search)
            .await;

        let fetched = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!("Error loading breeds page {page}: {e}");
                let mut state = self.state.write().await;
                if state.session == session {
                    state.phase = if state.breeds.is_empty() {
                        LoadPhase::Idle
                    } else {
                        LoadPhase::Ready
                    };
                    state.set_notice(
                        "Failed to load breeds".to_string(),
                        NoticeKind::Error,
                        None,
                    );
                }
                return;
            }
        };

        {
            let mut state = self.state.write().await;
            if state.session != session {
                return;
            }
            state.current_page = fetched.pagination.current_page;
            state.has_more = fetched.pagination.has_next_page;
            state.total_breeds = fetched.pagination.total_breeds;
        }

        // Thumbnails for exactly the newly returned names; the page only
        // becomes visible once the whole batch has joined.
        self.load_images_for(&fetched.breeds).await;

        let mut state = self.state.write().await;
        if state.session != session {
            return;
        }
        if append {
            state.breeds.extend(fetched.breeds);
        } else {
            state.breeds = fetched.breeds;
        }
        state.phase = LoadPhase::Ready;
    }

    /// Fetch one representative thumbnail per name, skipping names that are
    /// already mapped or already being fetched. Individual failures are
    /// logged and swallowed; the in-flight marker is always cleared.
    async fn load_images_for(&self, names: &[String]) {
        let to_fetch: Vec<String> = {
            let mut state = self.state.write().await;
            let mut to_fetch = Vec::new();
            for name in names {
                if !state.image_map.contains_key(name) && !state.in_flight.contains(name) {
                    state.in_flight.insert(name.clone());
                    to_fetch.push(name.clone());
                }
            }
            to_fetch
        };

        if to_fetch.is_empty() {
            return;
        }

        let fetches = to_fetch.into_iter().map(|name| {
            let api = Arc::clone(&self.api);
            async move {
                let result = api.breed_images(&name).await;
                (name, result)
            }
        });
        let results = join_all(fetches).await;

        let mut state = self.state.write().await;
        for (name, result) in results {
            state.in_flight.remove(&name);
            match result {
                Ok(urls) => {
                    if let Some(first) = urls.into_iter().next() {
                        state.image_map.insert(name, first);
                    }
                }
                Err(e) => warn!("Error loading images for {name}: {e}"),
            }
        }
    }
}
