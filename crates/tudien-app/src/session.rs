use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use tudien_config::MAX_SUGGESTIONS;
use tudien_core::query::decode_component;
use tudien_core::{
    DictionaryService, LocationBar, LookupQuery, ParamMode, SEARCH_PARAM, SearchResult,
    SearchStatus, SessionState, normalize,
};
use tudien_types::LookupOutcome;

/// A finished network call, tagged with the search term it was issued for
#[derive(Debug, Clone)]
pub enum Completion {
    Lookup {
        query: String,
        outcome: LookupOutcome,
    },
    Suggestions {
        query: String,
        suggestions: Vec<String>,
    },
}

impl Completion {
    fn query(&self) -> &str {
        match self {
            Completion::Lookup { query, .. } | Completion::Suggestions { query, .. } => query,
        }
    }
}

/// Search session controller.
///
/// Sole owner and writer of [`SessionState`] and of the `search` URL
/// parameter. Network calls run as spawned tasks and report back through
/// a completion channel; [`SearchSession::apply`] folds them into state
/// on the caller's loop, discarding any whose tag no longer matches.
pub struct SearchSession<L: LocationBar> {
    service: Arc<dyn DictionaryService>,
    location: L,
    state: SessionState,
    initialized: bool,
    in_flight: usize,
    completion_tx: AsyncSender<Completion>,
    completion_rx: AsyncReceiver<Completion>,
    cancel: CancellationToken,
}

impl<L: LocationBar> SearchSession<L> {
    pub fn new(service: Arc<dyn DictionaryService>, location: L) -> Self {
        let (completion_tx, completion_rx) = kanal::unbounded_async();

        Self {
            service,
            location,
            state: SessionState::new(),
            initialized: false,
            in_flight: 0,
            completion_tx,
            completion_rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop outstanding calls when `cancel` fires
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    /// Receiver for finished calls, to be fed back into [`Self::apply`]
    pub fn completions(&self) -> AsyncReceiver<Completion> {
        self.completion_rx.clone()
    }

    /// Seed the session from the `search` URL parameter. Runs at most once;
    /// returns whether a lookup was started.
    pub fn init_from_url(&mut self) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;

        let Some(param) = self.location.read_query_param(SEARCH_PARAM) else {
            return false;
        };

        match LookupQuery::parse(&decode_component(&param)) {
            Ok(query) => {
                tracing::info!("Restoring search '{}' from URL", query);
                self.dispatch(query);
                true
            }
            Err(e) => {
                tracing::debug!("Ignoring search parameter '{}': {}", param, e);
                false
            }
        }
    }

    /// Search for user input. Returns whether a lookup was started.
    pub fn submit(&mut self, input: &str) -> bool {
        let query = match LookupQuery::parse(input) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!("Submit rejected: {}", e);
                return false;
            }
        };

        let encoded = query.encoded();
        let current = self.location.read_query_param(SEARCH_PARAM);

        if current.as_deref() == Some(encoded.as_str()) {
            let retrying = self.state.status == SearchStatus::Errored
                && self.state.search_term == query.as_str();
            if !retrying {
                tracing::debug!("'{}' is already the current search", query);
                return false;
            }
            tracing::info!("Retrying '{}' after error", query);
        } else {
            self.location
                .set_query_param(SEARCH_PARAM, &encoded, ParamMode::Merge);
        }

        self.dispatch(query);
        true
    }

    /// Jump to a related word or suggestion. Always searches, and leaves
    /// `search` as the only URL parameter.
    pub fn select_related(&mut self, word: &str) -> bool {
        let query = match LookupQuery::parse(word) {
            Ok(query) => query,
            Err(e) => {
                tracing::debug!("Related word rejected: {}", e);
                return false;
            }
        };

        self.location
            .set_query_param(SEARCH_PARAM, &query.encoded(), ParamMode::Replace);
        self.dispatch(query);
        true
    }

    pub fn select_suggestion(&mut self, index: usize) -> bool {
        match self.state.suggestions.get(index).cloned() {
            Some(word) => self.select_related(&word),
            None => {
                tracing::debug!("No suggestion at index {}", index);
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.state.search_term.clear();
        self.state.status = SearchStatus::Idle;
        self.state.result = None;
        self.state.error = None;
        self.state.suggestions.clear();
        self.state.reset_view();

        self.location.remove_query_param(SEARCH_PARAM);
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        if index >= self.state.entries().len() {
            return false;
        }
        self.state.active_tab_index = index;
        true
    }

    /// Expand or collapse the secondary pronunciations of entry `index`
    pub fn toggle_pronunciation_panel(&mut self, index: usize) -> bool {
        if index >= self.state.entries().len() {
            return false;
        }
        let panels = &mut self.state.expanded_pronunciation_panels;
        if !panels.remove(&index) {
            panels.insert(index);
        }
        true
    }

    /// Audio of the entry currently shown
    pub fn active_audio(&self) -> Option<&str> {
        self.state.active_entry()?.entry.audio.as_deref()
    }

    /// Fold a finished call into state. Returns false when it was stale.
    pub fn apply(&mut self, completion: Completion) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);

        if completion.query() != self.state.search_term {
            tracing::debug!(
                "Discarding stale response for '{}' (current: '{}')",
                completion.query(),
                self.state.search_term
            );
            return false;
        }

        match completion {
            Completion::Lookup { query, outcome } => {
                if self.state.status != SearchStatus::Loading {
                    tracing::debug!("Discarding duplicate lookup for '{}'", query);
                    return false;
                }
                self.apply_lookup(query, outcome);
            }
            Completion::Suggestions { query, suggestions } => {
                if self.state.status != SearchStatus::Loaded {
                    return false;
                }
                self.state.suggestions = filter_suggestions(suggestions, &query);
            }
        }

        true
    }

    /// Apply completions until nothing is outstanding
    pub async fn settle(&mut self) {
        let completions = self.completions();
        while self.in_flight > 0 {
            match completions.recv().await {
                Ok(completion) => {
                    self.apply(completion);
                }
                Err(e) => {
                    tracing::error!("Completion channel closed: {}", e);
                    break;
                }
            }
        }
    }

    fn apply_lookup(&mut self, query: String, outcome: LookupOutcome) {
        match outcome {
            LookupOutcome::Found { word, entries } => {
                tracing::info!("'{}' found with {} entries", query, entries.len());
                let entries = entries.iter().map(normalize).collect();
                self.state.result = Some(SearchResult::Found { word, entries });
                self.state.status = SearchStatus::Loaded;
                self.state.reset_view();

                if let Ok(query) = LookupQuery::parse(&query) {
                    self.spawn_suggestions(query);
                }
            }
            LookupOutcome::NotFound => {
                tracing::info!("'{}' not found", query);
                self.state.result = Some(SearchResult::NotFound);
                self.state.status = SearchStatus::Loaded;
                self.state.reset_view();
            }
            LookupOutcome::Failed { reason } => {
                tracing::warn!("Lookup for '{}' failed: {}", query, reason);
                self.state.error = Some(reason);
                self.state.status = SearchStatus::Errored;
            }
        }
    }

    fn dispatch(&mut self, query: LookupQuery) {
        self.state.search_term = query.as_str().to_string();
        self.state.status = SearchStatus::Loading;
        self.state.result = None;
        self.state.error = None;
        self.state.suggestions.clear();

        self.spawn_lookup(query);
    }

    fn spawn_lookup(&mut self, query: LookupQuery) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        let cancel = self.cancel.child_token();
        let tag = query.as_str().to_string();
        self.in_flight += 1;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Lookup for '{}' cancelled", tag);
                }
                outcome = service.lookup(&query) => {
                    let completion = Completion::Lookup { query: tag, outcome };
                    if let Err(e) = tx.send(completion).await {
                        tracing::error!("Failed to deliver lookup result: {}", e);
                    }
                }
            }
        });
    }

    fn spawn_suggestions(&mut self, query: LookupQuery) {
        let service = Arc::clone(&self.service);
        let tx = self.completion_tx.clone();
        let cancel = self.cancel.child_token();
        let tag = query.as_str().to_string();
        self.in_flight += 1;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Suggestions for '{}' cancelled", tag);
                }
                suggestions = service.suggest_or_empty(&query) => {
                    let completion = Completion::Suggestions { query: tag, suggestions };
                    if let Err(e) = tx.send(completion).await {
                        tracing::error!("Failed to deliver suggestions: {}", e);
                    }
                }
            }
        });
    }
}

/// Drop the searched word itself and cap the list
pub fn filter_suggestions(suggestions: Vec<String>, searched: &str) -> Vec<String> {
    suggestions
        .into_iter()
        .filter(|s| s != searched)
        .take(MAX_SUGGESTIONS)
        .collect()
}
