use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::candidate::{Candidate, validate_shape};
use crate::core::config::{AutocompleteConfig, SourceMode};
use crate::core::error::ConfigError;
use crate::runtime::dismiss::DismissSubscription;
use crate::runtime::event::{Effect, WidgetEvent};
use crate::runtime::fetch::{CandidateFetcher, FetchCompletion, FetchExecutor, FetchState};
use crate::runtime::navigation::NavigationState;
use crate::runtime::scheduler::DebounceScheduler;
use crate::search::matcher::{self, MatchResult, ResultSet};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

/// The incremental-search engine for one input widget.
///
/// Owns the query, result set, navigation and fetch bookkeeping; the host
/// feeds events in with [`handle_event`](Self::handle_event), drives
/// time-based work with [`poll`](Self::poll), renders the accessors, and
/// performs the returned effects. The engine emits state and never draws.
pub struct Autocomplete {
    mode: SourceMode,
    candidates: Vec<Candidate>,
    fetcher: Option<Arc<dyn CandidateFetcher>>,
    lookup_key: Option<String>,
    placeholder: Option<String>,
    no_match_message: String,
    discard_stale_responses: bool,

    query: String,
    results: ResultSet,
    nav: NavigationState,
    fetch_state: FetchState,
    focused: bool,

    scheduler: DebounceScheduler,
    executor: FetchExecutor,
    issued_requests: u64,

    dismiss: Option<DismissSubscription>,
}

impl Autocomplete {
    /// Fails fast on host-integration mistakes (candidate shape vs lookup
    /// key, dynamic mode without a fetcher). Normal operation never revisits
    /// configuration validity.
    pub fn new(config: AutocompleteConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let AutocompleteConfig {
            mode,
            candidates,
            fetcher,
            lookup_key,
            placeholder,
            no_match_message,
            debounce_window,
            discard_stale_responses,
            dismiss,
        } = config;

        Ok(Self {
            mode,
            candidates,
            fetcher,
            lookup_key,
            placeholder,
            no_match_message,
            discard_stale_responses,
            query: String::new(),
            results: Vec::new(),
            nav: NavigationState::new(),
            fetch_state: FetchState::Idle,
            focused: false,
            scheduler: DebounceScheduler::new(debounce_window),
            executor: FetchExecutor::new(),
            issued_requests: 0,
            dismiss,
        })
    }

    pub fn handle_event(&mut self, event: WidgetEvent, now: Instant) -> Vec<Effect> {
        match event {
            WidgetEvent::Input(text) => self.on_input(text, now),
            WidgetEvent::Focus => self.on_input(self.query.clone(), now),
            WidgetEvent::Key(key) => self.on_key(key),
            WidgetEvent::RowClick(index) => self.commit_row(index),
            WidgetEvent::Dismiss => {
                self.dismiss_dropdown();
                Vec::new()
            }
        }
    }

    /// Drives time-based work: dismiss signals, debounce firings and fetch
    /// completions. Hosts call this once per loop iteration.
    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        if let Some(signal) = &self.dismiss
            && signal.take_signal()
        {
            self.dismiss_dropdown();
        }

        if let Some(query) = self.scheduler.take_due(now) {
            self.fetch_state = FetchState::Loading;
            effects.extend(self.dispatch_fetch(query));
        }

        for completion in self.executor.drain_ready() {
            self.apply_completion(completion);
        }

        effects
    }

    /// How long the host loop may sleep before the pending debounce fires.
    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    /// Replaces the host-owned static collection and re-runs the current
    /// query so the dropdown tracks the new contents.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) -> Result<(), ConfigError> {
        validate_shape(&candidates, self.lookup_key.as_deref())?;
        self.candidates = candidates;
        if self.mode == SourceMode::Static {
            self.refilter();
        }
        Ok(())
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn active_index(&self) -> usize {
        self.nav.active_index()
    }

    /// The placeholder row is never shown active, even though it occupies
    /// index 0 of a non-empty result set.
    pub fn is_row_active(&self, index: usize) -> bool {
        self.nav.is_open()
            && index == self.nav.active_index()
            && self.results.get(index).is_some_and(|row| !row.placeholder)
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_state.is_loading()
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch_state
    }

    /// Input placeholder text, carried for the presentation layer.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn on_input(&mut self, text: String, now: Instant) -> Vec<Effect> {
        self.focused = true;
        self.query = text;
        match self.mode {
            SourceMode::Static => {
                self.refilter();
                Vec::new()
            }
            SourceMode::Dynamic => self.on_dynamic_input(now),
        }
    }

    fn refilter(&mut self) {
        if self.query.is_empty() {
            self.results.clear();
        } else {
            self.results = matcher::filter(
                &self.candidates,
                &self.query,
                self.lookup_key.as_deref(),
                &self.no_match_message,
            );
        }
        self.nav.sync(self.results.len(), self.focused);
    }

    fn on_dynamic_input(&mut self, now: Instant) -> Vec<Effect> {
        if self.query.is_empty() {
            // Deliberate asymmetry with static mode: the dropdown clears at
            // once, but the retrieval capability still sees the empty query
            // so server-side state can reset.
            self.results.clear();
            self.nav.close();
            self.scheduler.cancel();
            self.fetch_state = FetchState::Idle;
            return self.dispatch_fetch(String::new());
        }

        self.fetch_state = FetchState::Debouncing;
        self.scheduler.schedule(self.query.clone(), now);
        Vec::new()
    }

    fn dispatch_fetch(&mut self, query: String) -> Vec<Effect> {
        self.issued_requests = self.issued_requests.saturating_add(1);
        if let Some(fetcher) = &self.fetcher {
            self.executor
                .spawn(Arc::clone(fetcher), query.clone(), self.issued_requests);
        }
        vec![Effect::QueryChanged(query)]
    }

    fn apply_completion(&mut self, completion: FetchCompletion) {
        if self.discard_stale_responses && completion.request_id != self.issued_requests {
            return;
        }
        self.fetch_state = FetchState::Settled;

        if self.query.is_empty() {
            self.results.clear();
            self.nav.close();
            return;
        }

        let lookup_key = self.lookup_key.as_deref();
        self.results = match completion.outcome {
            Ok(items) if validate_shape(&items, lookup_key).is_ok() => {
                matcher::accept(&items, &self.query, lookup_key, &self.no_match_message)
            }
            // Failed or malformed retrievals land on the no-match row with
            // loading cleared, never a stuck spinner.
            _ => matcher::accept(&[], &self.query, lookup_key, &self.no_match_message),
        };
        self.nav.sync(self.results.len(), self.focused);
    }

    fn on_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers != KeyModifiers::NONE {
            return Vec::new();
        }
        match key.code {
            KeyCode::Enter => self.on_enter(),
            KeyCode::Up => Self::ensure_visible(self.nav.move_up(self.results.len())),
            KeyCode::Down => Self::ensure_visible(self.nav.move_down(self.results.len())),
            _ => Vec::new(),
        }
    }

    fn ensure_visible(moved: Option<usize>) -> Vec<Effect> {
        moved.map(Effect::EnsureVisible).into_iter().collect()
    }

    fn on_enter(&mut self) -> Vec<Effect> {
        let index = self.nav.active_index();
        if index < self.results.len() {
            self.commit_row(index)
        } else {
            self.commit_empty()
        }
    }

    fn commit_row(&mut self, index: usize) -> Vec<Effect> {
        let Some(row) = self.results.get(index) else {
            return Vec::new();
        };
        if row.placeholder {
            // The no-match row is informational only.
            return Vec::new();
        }
        let candidate = row.candidate.clone();
        self.query = candidate
            .display_text(self.lookup_key.as_deref())
            .unwrap_or_default()
            .to_string();
        self.finish_commit(candidate)
    }

    fn commit_empty(&mut self) -> Vec<Effect> {
        self.query.clear();
        self.finish_commit(Candidate::Text(String::new()))
    }

    fn finish_commit(&mut self, candidate: Candidate) -> Vec<Effect> {
        self.results.clear();
        self.nav.close();
        vec![Effect::Submit(candidate)]
    }

    fn dismiss_dropdown(&mut self) {
        self.results.clear();
        self.nav.close();
        self.focused = false;
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        // Pending debounce payloads and the dismiss registration must not
        // outlive the widget.
        self.scheduler.cancel();
        self.dismiss = None;
    }
}
