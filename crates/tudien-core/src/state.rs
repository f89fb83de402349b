use std::collections::BTreeSet;

use tudien_types::FailureReason;

use crate::normalize::GroupedEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// A completed lookup as shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    NotFound,
    Found {
        word: String,
        entries: Vec<GroupedEntry>,
    },
}

/// Everything the presentation layer reads. Written only by the search controller.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub search_term: String,
    pub status: SearchStatus,
    pub result: Option<SearchResult>,
    pub error: Option<FailureReason>,
    pub suggestions: Vec<String>,
    pub active_tab_index: usize,
    pub expanded_pronunciation_panels: BTreeSet<usize>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grouped entries of the current result, empty unless a word was found
    pub fn entries(&self) -> &[GroupedEntry] {
        match &self.result {
            Some(SearchResult::Found { entries, .. }) => entries,
            _ => &[],
        }
    }

    pub fn active_entry(&self) -> Option<&GroupedEntry> {
        self.entries().get(self.active_tab_index)
    }

    /// Status code of the last completed lookup
    pub fn status_code(&self) -> Option<u16> {
        match (&self.error, &self.result) {
            (Some(reason), _) => Some(reason.status_code()),
            (None, Some(_)) => Some(200),
            (None, None) => None,
        }
    }

    /// Tab and pronunciation toggles back to their defaults
    pub fn reset_view(&mut self) {
        self.active_tab_index = 0;
        self.expanded_pronunciation_panels.clear();
    }
}
