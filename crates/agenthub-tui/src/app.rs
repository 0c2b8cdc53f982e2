//! App state, input handling, event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{info, warn};

use agenthub_core::community::Discussion;
use agenthub_core::config::Config;
use agenthub_core::events::HubEvent;
use agenthub_core::marketplace::Marketplace;
use agenthub_core::notify::Notification;
use agenthub_core::query::{QuerySpec, SortKey};
use agenthub_core::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Marketplace,
    Community,
    Featured,
    Contributors,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Marketplace, Tab::Community, Tab::Featured, Tab::Contributors];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Marketplace => "Marketplace",
            Tab::Community => "Community",
            Tab::Featured => "Featured",
            Tab::Contributors => "Contributors",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// The main application state.
pub struct App {
    pub marketplace: Arc<RwLock<Marketplace>>,
    pub tab: Tab,

    /// What the user has typed so far.
    pub search_input: String,
    /// What the current results were computed with.
    pub applied_search: String,
    last_keystroke: Option<Instant>,
    debounce: Duration,

    /// Index into `CATEGORIES`; `None` shows every category.
    pub category: Option<usize>,
    pub difficulty: Option<Difficulty>,
    pub sort: SortKey,

    pub results: Vec<CatalogEntry>,
    pub total: usize,
    pub selected: usize,

    pub discussions: Vec<Discussion>,
    pub discussion_selected: usize,

    pub featured: Vec<CatalogEntry>,
    pub featured_selected: usize,
    featured_count: usize,

    pub contributors: Vec<Contributor>,
    contributor_limit: usize,

    pub toasts: Vec<Notification>,
    pub should_quit: bool,
}

impl App {
    pub fn new(marketplace: Arc<RwLock<Marketplace>>, config: &Config) -> Self {
        App {
            marketplace,
            tab: Tab::Marketplace,
            search_input: String::new(),
            applied_search: String::new(),
            last_keystroke: None,
            debounce: config.search_debounce(),
            category: None,
            difficulty: None,
            sort: SortKey::default(),
            results: Vec::new(),
            total: 0,
            selected: 0,
            discussions: Vec::new(),
            discussion_selected: 0,
            featured: Vec::new(),
            featured_selected: 0,
            featured_count: config.featured_count,
            contributors: Vec::new(),
            contributor_limit: config.top_contributors,
            toasts: Vec::new(),
            should_quit: false,
        }
    }

    pub fn query_spec(&self) -> QuerySpec {
        let mut spec = QuerySpec::default()
            .search(self.applied_search.clone())
            .sort(self.sort);
        if let Some(idx) = self.category {
            spec = spec.category(CATEGORIES[idx].0);
        }
        if let Some(level) = self.difficulty {
            spec = spec.difficulty(level.as_str());
        }
        spec
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map(|idx| CATEGORIES[idx].1).unwrap_or("All Categories")
    }

    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.map(|d| d.as_str()).unwrap_or("All Levels")
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.results.get(self.selected)
    }

    pub fn selected_featured(&self) -> Option<&CatalogEntry> {
        self.featured.get(self.featured_selected)
    }

    pub fn selected_discussion(&self) -> Option<&Discussion> {
        self.discussions.get(self.discussion_selected)
    }

    /// Re-run the query and refresh every cached view of the marketplace.
    pub async fn reload(&mut self) {
        let market = self.marketplace.read().await;
        let catalog = market.catalog();

        self.total = catalog.len();
        self.results = catalog
            .query(&self.query_spec())
            .into_iter()
            .cloned()
            .collect();
        self.featured = catalog.featured(self.featured_count).to_vec();
        self.contributors = catalog.top_contributors(self.contributor_limit);
        self.discussions = market.discussions().to_vec();

        self.selected = self.selected.min(self.results.len().saturating_sub(1));
        self.discussion_selected = self
            .discussion_selected
            .min(self.discussions.len().saturating_sub(1));
        self.featured_selected = self
            .featured_selected
            .min(self.featured.len().saturating_sub(1));
    }

    /// Handle a marketplace event.
    pub async fn handle_event(&mut self, event: HubEvent) {
        match event {
            HubEvent::CatalogRefreshed(refreshed) => {
                info!("Catalog now has {} entries", refreshed.total);
                self.reload().await;
            }
            HubEvent::DiscussionCreated(_) | HubEvent::DiscussionLiked(_) => {
                self.discussions = self.marketplace.read().await.discussions().to_vec();
            }
            HubEvent::Notification(n) => {
                if !self.toasts.iter().any(|t| t.id == n.id) {
                    self.toasts.push(n);
                }
            }
            HubEvent::SubmissionReceived(_) => {}
        }
    }

    /// Per-frame housekeeping: apply a settled search and drop expired toasts.
    pub async fn tick(&mut self, now: Instant) {
        if self.search_due(now) {
            self.applied_search = self.search_input.clone();
            self.last_keystroke = None;
            self.selected = 0;
            self.reload().await;
        }
        self.toasts = self.marketplace.write().await.active_notifications().to_vec();
    }

    // ── Search input ──

    pub fn type_char(&mut self, c: char, now: Instant) {
        self.search_input.push(c);
        self.last_keystroke = Some(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.search_input.pop().is_some() {
            self.last_keystroke = Some(now);
        }
    }

    pub async fn clear_search(&mut self) {
        self.search_input.clear();
        self.applied_search.clear();
        self.last_keystroke = None;
        self.reload().await;
    }

    /// True once typing has paused for the debounce window.
    pub fn search_due(&self, now: Instant) -> bool {
        match self.last_keystroke {
            Some(at) => {
                now.saturating_duration_since(at) >= self.debounce
                    && self.search_input != self.applied_search
            }
            None => false,
        }
    }

    // ── Filters ──

    pub async fn cycle_category(&mut self) {
        self.category = match self.category {
            None if !CATEGORIES.is_empty() => Some(0),
            Some(idx) if idx + 1 < CATEGORIES.len() => Some(idx + 1),
            _ => None,
        };
        self.selected = 0;
        self.reload().await;
    }

    pub async fn cycle_difficulty(&mut self) {
        self.difficulty = match self.difficulty {
            None => Some(Difficulty::Beginner),
            Some(Difficulty::Beginner) => Some(Difficulty::Intermediate),
            Some(Difficulty::Intermediate) => Some(Difficulty::Advanced),
            Some(Difficulty::Advanced) => None,
        };
        self.selected = 0;
        self.reload().await;
    }

    pub async fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.reload().await;
    }

    // ── Navigation ──

    pub fn next_tab(&mut self) {
        self.tab = Tab::ALL[(self.tab.index() + 1) % Tab::ALL.len()];
    }

    pub fn prev_tab(&mut self) {
        let idx = self.tab.index();
        self.tab = Tab::ALL[(idx + Tab::ALL.len() - 1) % Tab::ALL.len()];
    }

    pub fn select_up(&mut self) {
        match self.tab {
            Tab::Marketplace => self.selected = self.selected.saturating_sub(1),
            Tab::Community => {
                self.discussion_selected = self.discussion_selected.saturating_sub(1)
            }
            Tab::Featured => self.featured_selected = self.featured_selected.saturating_sub(1),
            Tab::Contributors => {}
        }
    }

    pub fn select_down(&mut self) {
        match self.tab {
            Tab::Marketplace => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
            }
            Tab::Community => {
                if self.discussion_selected + 1 < self.discussions.len() {
                    self.discussion_selected += 1;
                }
            }
            Tab::Featured => {
                if self.featured_selected + 1 < self.featured.len() {
                    self.featured_selected += 1;
                }
            }
            Tab::Contributors => {}
        }
    }

    // ── Community ──

    pub async fn like_selected(&mut self) {
        let Some(id) = self.selected_discussion().map(|d| d.id) else {
            return;
        };
        let mut market = self.marketplace.write().await;
        if market.like_discussion(id).is_none() {
            warn!("Discussion {} vanished before it could be liked", id);
        }
        self.discussions = market.discussions().to_vec();
    }
}

/// Reload the configured catalog source without blocking readers.
pub async fn refresh_catalog(marketplace: Arc<RwLock<Marketplace>>) {
    let source = marketplace.read().await.source().clone();
    let loaded = source.load().await;
    marketplace.write().await.apply_refresh(loaded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenthub_core::submission::MemoryInbox;

    fn app() -> App {
        let config = Config::default();
        let market = Marketplace::new(config.clone(), Box::new(MemoryInbox::default()));
        App::new(Arc::new(RwLock::new(market)), &config)
    }

    #[tokio::test]
    async fn test_reload_shows_everything() {
        let mut app = app();
        app.reload().await;
        assert_eq!(app.total, 15);
        assert_eq!(app.results.len(), 15);
        assert_eq!(app.discussions.len(), 3);
        assert_eq!(app.contributors[0].name, "Microsoft");
    }

    #[tokio::test]
    async fn test_search_waits_for_debounce() {
        let mut app = app();
        app.reload().await;
        let start = Instant::now();
        for c in "slack".chars() {
            app.type_char(c, start);
        }

        app.tick(start + Duration::from_millis(100)).await;
        assert_eq!(app.applied_search, "");
        assert_eq!(app.results.len(), 15);

        app.tick(start + Duration::from_millis(300)).await;
        assert_eq!(app.applied_search, "slack");
        assert!(app.results.len() < 15);
        assert!(!app.results.is_empty());
    }

    #[tokio::test]
    async fn test_filter_cycles_wrap_around() {
        let mut app = app();
        app.reload().await;

        app.cycle_category().await;
        assert_eq!(app.category, Some(0));
        assert!(app.results.iter().all(|e| e.category == CATEGORIES[0].0));
        for _ in 0..CATEGORIES.len() {
            app.cycle_category().await;
        }
        assert_eq!(app.category, None);
        assert_eq!(app.category_label(), "All Categories");

        for _ in 0..3 {
            app.cycle_difficulty().await;
        }
        assert_eq!(app.difficulty, Some(Difficulty::Advanced));
        assert!(app.results.iter().all(|e| e.difficulty == Difficulty::Advanced));
        app.cycle_difficulty().await;
        assert_eq!(app.results.len(), 15);

        app.cycle_sort().await;
        assert_eq!(app.sort, SortKey::Rating);
        assert!(app.results.windows(2).all(|w| w[0].rating >= w[1].rating));
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.reload().await;
        app.select_up();
        assert_eq!(app.selected, 0);
        for _ in 0..40 {
            app.select_down();
        }
        assert_eq!(app.selected, 14);

        // narrowing the results pulls the selection back in range
        app.search_input = "autogen".into();
        app.applied_search = "autogen".into();
        app.reload().await;
        assert!(app.selected < app.results.len());
    }

    #[tokio::test]
    async fn test_like_selected_discussion() {
        let mut app = app();
        app.reload().await;
        app.next_tab();
        assert_eq!(app.tab, Tab::Community);
        app.select_down();
        app.like_selected().await;
        assert_eq!(app.discussions[1].likes, 68);
    }

    #[tokio::test]
    async fn test_featured_tab() {
        let mut app = app();
        app.reload().await;
        assert_eq!(app.featured.len(), 3);
        assert_eq!(app.featured[0].id, "advanced-email-automation");

        // filters on the marketplace tab leave the featured picks alone
        app.cycle_category().await;
        app.cycle_category().await;
        assert_eq!(app.featured.len(), 3);

        app.next_tab();
        app.next_tab();
        assert_eq!(app.tab, Tab::Featured);
        for _ in 0..5 {
            app.select_down();
        }
        assert_eq!(app.featured_selected, 2);
        assert_eq!(app.selected_featured().map(|e| e.id.as_str()), Some("peak-ai-agent-stack"));
    }

    #[test]
    fn test_tab_cycle() {
        let mut app = app();
        app.prev_tab();
        assert_eq!(app.tab, Tab::Contributors);
        app.next_tab();
        assert_eq!(app.tab, Tab::Marketplace);
    }
}
