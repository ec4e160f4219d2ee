use log::debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::domain::{Player, PlayerStats, SearchEnvelope};
use crate::ui::calculator::{ShotCalculation, calculate};

/// Shorter queries never reach the network
pub const MIN_QUERY_LEN: usize = 3;
/// Quiet period after the last keystroke before a search is issued
pub const DEBOUNCE: Duration = Duration::from_millis(800);

/// Where a session gets its players and stats from
pub trait PlayerSource {
    fn search_page(&self, query: &str, page: u32) -> impl Future<Output = SearchEnvelope> + Send;

    fn fetch_stats(&self, player_id: i64) -> impl Future<Output = Option<PlayerStats>> + Send;
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Typing,
    Searching,
    Results,
    NoMatches,
    Selected,
    Calculated(ShotCalculation),
    Failed(String),
}

/// Everything the view renders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub query: String,
    pub results: Vec<Player>,
    pub next_page: Option<u32>,
    pub selected: Option<Player>,
    pub phase: Phase,
}

/// Handle for one debounced search; only the newest ticket may change the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Search-and-select flow with debounced input and stale-response suppression.
///
/// Every keystroke bumps a sequence number. A debounced search that wakes up
/// behind a newer keystroke never issues its request, and a response that
/// arrives after a newer keystroke is dropped. In-flight requests are never
/// aborted.
pub struct SearchSession<S> {
    source: S,
    view: Mutex<ViewState>,
    sequence: AtomicU64,
    selection: AtomicU64,
}

impl<S: PlayerSource> SearchSession<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            view: Mutex::new(ViewState::default()),
            sequence: AtomicU64::new(0),
            selection: AtomicU64::new(0),
        }
    }

    pub async fn view(&self) -> ViewState {
        self.view.lock().await.clone()
    }

    /// Record new query text; returns a ticket when a search should follow
    pub async fn input(&self, text: &str) -> Option<Ticket> {
        let ticket = self.next_ticket();
        self.selection.fetch_add(1, Ordering::SeqCst);

        let mut view = self.view.lock().await;
        *view = ViewState {
            query: text.to_string(),
            ..ViewState::default()
        };

        let length = text.trim().chars().count();
        if length == 0 {
            view.phase = Phase::Idle;
            None
        } else if length < MIN_QUERY_LEN {
            view.phase = Phase::Typing;
            None
        } else {
            view.phase = Phase::Searching;
            Some(ticket)
        }
    }

    /// Wait out the quiet period, then search unless superseded.
    ///
    /// Returns whether the results were applied.
    pub async fn debounced_search(&self, ticket: Ticket) -> bool {
        sleep(DEBOUNCE).await;
        if !self.is_current(ticket) {
            debug!("Search {:?} superseded before it was sent", ticket);
            return false;
        }
        self.search_now(ticket).await.is_some()
    }

    /// Enter: pick the first result, searching immediately if there are none yet
    pub async fn submit(&self) {
        let (first, query) = {
            let view = self.view.lock().await;
            (view.results.first().cloned(), view.query.trim().to_string())
        };

        if let Some(player) = first {
            self.select(player).await;
            return;
        }
        if query.is_empty() {
            return;
        }

        let ticket = self.next_ticket();
        self.view.lock().await.phase = Phase::Searching;
        if let Some(Some(player)) = self.search_now(ticket).await {
            self.select(player).await;
        }
    }

    /// Fetch stats for `player` and compute the shot count
    pub async fn select(&self, player: Player) {
        let selection = self.selection.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut view = self.view.lock().await;
            view.selected = Some(player.clone());
            view.phase = Phase::Selected;
        }

        let stats = self.source.fetch_stats(player.id).await;
        if self.selection.load(Ordering::SeqCst) != selection {
            debug!("Stats for player {} arrived after selection changed", player.id);
            return;
        }

        let phase = match stats.as_ref().and_then(calculate) {
            Some(calculation) => Phase::Calculated(calculation),
            None => Phase::Failed(format!(
                "Could not calculate shots for {}. Try another player.",
                player.full_name()
            )),
        };
        self.view.lock().await.phase = phase;
    }

    /// Append the next page of results, if the last search reported one
    pub async fn load_more(&self) -> bool {
        let ticket = Ticket(self.sequence.load(Ordering::SeqCst));
        let (query, page) = {
            let view = self.view.lock().await;
            match (view.next_page, &view.phase) {
                (Some(page), Phase::Results) => (view.query.trim().to_string(), page),
                _ => return false,
            }
        };

        let envelope = self.source.search_page(&query, page).await;
        if !self.is_current(ticket) {
            return false;
        }

        let mut view = self.view.lock().await;
        view.results.extend(envelope.data);
        view.next_page = envelope.meta.next_page;
        true
    }

    /// "Try another player": clear selection and query
    pub async fn reset(&self) {
        self.next_ticket();
        self.selection.fetch_add(1, Ordering::SeqCst);
        *self.view.lock().await = ViewState::default();
    }

    // --- Helper Methods ---

    fn next_ticket(&self) -> Ticket {
        Ticket(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.load(Ordering::SeqCst) == ticket.0
    }

    /// Run the search for the current query; `None` when the response went stale,
    /// otherwise the first result if any
    async fn search_now(&self, ticket: Ticket) -> Option<Option<Player>> {
        let query = self.view.lock().await.query.trim().to_string();
        let envelope = self.source.search_page(&query, 1).await;
        if !self.is_current(ticket) {
            debug!("Dropping stale results for '{}'", query);
            return None;
        }

        let mut view = self.view.lock().await;
        view.next_page = envelope.meta.next_page;
        view.phase = match (&envelope.error, envelope.data.is_empty()) {
            (Some(error), true) => Phase::Failed(error.clone()),
            (_, true) => Phase::NoMatches,
            (_, false) => Phase::Results,
        };
        view.results = envelope.data;
        Some(view.results.first().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaginationMeta;
    use std::sync::atomic::AtomicUsize;

    struct FakeSource {
        players: Vec<Player>,
        extra_page: Vec<Player>,
        delay: Duration,
        searches: AtomicUsize,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                players: vec![
                    Player::new(2544, "LeBron", "James").with_display_name("LeBron James"),
                    Player::new(201939, "Stephen", "Curry").with_display_name("Stephen Curry"),
                    Player::new(1630000, "Zero", "Shots").with_display_name("Zero Shots"),
                ],
                extra_page: Vec::new(),
                delay: Duration::ZERO,
                searches: AtomicUsize::new(0),
            }
        }

        fn searches(&self) -> usize {
            self.searches.load(Ordering::SeqCst)
        }
    }

    impl PlayerSource for FakeSource {
        async fn search_page(&self, query: &str, page: u32) -> SearchEnvelope {
            self.searches.fetch_add(1, Ordering::SeqCst);
            sleep(self.delay).await;

            if page > 1 {
                return SearchEnvelope::from_players(self.extra_page.clone(), 25);
            }
            let query = query.to_lowercase();
            let matches: Vec<Player> = self
                .players
                .iter()
                .filter(|p| p.full_name().to_lowercase().contains(&query))
                .cloned()
                .collect();
            let mut envelope = SearchEnvelope::from_players(matches, 25);
            if !self.extra_page.is_empty() {
                envelope.meta = PaginationMeta {
                    next_page: Some(2),
                    ..envelope.meta
                };
            }
            envelope
        }

        async fn fetch_stats(&self, player_id: i64) -> Option<PlayerStats> {
            let player = self.players.iter().find(|p| p.id == player_id)?.clone();
            let (pts, fga) = match player_id {
                2544 => (27.5, 20.0),
                201939 => (26.4, 19.5),
                _ => (0.0, 0.0),
            };
            Some(PlayerStats {
                player,
                pts,
                fga,
                season: "2024-25".to_string(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_queries_never_search() {
        let session = SearchSession::new(FakeSource::new());

        assert_eq!(session.input("l").await, None);
        assert_eq!(session.input("le").await, None);
        assert_eq!(session.view().await.phase, Phase::Typing);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(session.source.searches(), 0);

        assert_eq!(session.input("").await, None);
        assert_eq!(session.view().await.phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_issues_only_latest_search() {
        let session = SearchSession::new(FakeSource::new());

        let first = session.input("jam").await.unwrap();
        let second = session.input("james").await.unwrap();
        let (a, b) = tokio::join!(
            session.debounced_search(first),
            session.debounced_search(second)
        );

        assert!(!a);
        assert!(b);
        assert_eq!(session.source.searches(), 1);

        let view = session.view().await;
        assert_eq!(view.phase, Phase::Results);
        assert_eq!(view.results.len(), 1);
        assert_eq!(view.results[0].id, 2544);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_in_flight_results_are_dropped() {
        let mut source = FakeSource::new();
        source.delay = Duration::from_millis(500);
        let session = SearchSession::new(source);

        let first = session.input("james").await.unwrap();
        let later = async {
            sleep(Duration::from_millis(900)).await;
            let ticket = session.input("curry").await.unwrap();
            session.debounced_search(ticket).await
        };
        let (a, b) = tokio::join!(session.debounced_search(first), later);

        assert!(!a);
        assert!(b);
        // the stale request was sent but its response was ignored
        assert_eq!(session.source.searches(), 2);
        let view = session.view().await;
        assert_eq!(view.query, "curry");
        assert_eq!(view.results[0].id, 201939);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_matches() {
        let session = SearchSession::new(FakeSource::new());
        let ticket = session.input("zzz").await.unwrap();
        assert!(session.debounced_search(ticket).await);
        assert_eq!(session.view().await.phase, Phase::NoMatches);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_selects_first_result() {
        let session = SearchSession::new(FakeSource::new());
        let ticket = session.input("james").await.unwrap();
        session.debounced_search(ticket).await;

        session.submit().await;
        let view = session.view().await;
        assert_eq!(view.selected.as_ref().map(|p| p.id), Some(2544));
        match view.phase {
            Phase::Calculated(calc) => {
                assert_eq!(calc.shots, 21.8);
                assert_eq!(calc.player_name, "LeBron James");
            }
            other => panic!("unexpected phase {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_before_results_searches_immediately() {
        let session = SearchSession::new(FakeSource::new());
        let _pending = session.input("curry").await;

        let started = tokio::time::Instant::now();
        session.submit().await;
        assert!(started.elapsed() < DEBOUNCE);
        assert_eq!(session.source.searches(), 1);

        let view = session.view().await;
        assert_eq!(view.selected.map(|p| p.id), Some(201939));
        assert!(matches!(view.phase, Phase::Calculated(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_with_unknown_name_reports_no_matches() {
        let session = SearchSession::new(FakeSource::new());
        let _pending = session.input("nobody").await;
        session.submit().await;

        let view = session.view().await;
        assert_eq!(view.phase, Phase::NoMatches);
        assert!(view.selected.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_stats_fail_and_reset_clears() {
        let session = SearchSession::new(FakeSource::new());
        session
            .select(Player::new(1630000, "Zero", "Shots").with_display_name("Zero Shots"))
            .await;

        let view = session.view().await;
        assert!(matches!(view.phase, Phase::Failed(ref msg) if msg.contains("Zero Shots")));

        session.reset().await;
        assert_eq!(session.view().await, ViewState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_more_appends() {
        let mut source = FakeSource::new();
        source.extra_page = vec![Player::new(1, "Extra", "James")];
        let session = SearchSession::new(source);

        let ticket = session.input("james").await.unwrap();
        session.debounced_search(ticket).await;
        assert_eq!(session.view().await.next_page, Some(2));

        assert!(session.load_more().await);
        let view = session.view().await;
        assert_eq!(view.results.len(), 2);
        assert_eq!(view.results[1].id, 1);
        assert_eq!(view.next_page, None);
        assert!(!session.load_more().await);
    }
}
