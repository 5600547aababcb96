//! Search state container
//!
//! All mutation goes through [`SearchState::apply`] and
//! [`SearchState::begin_fetch`], so every transition can be tested without a
//! runtime, network or view.

use crate::models::{Movie, MovieQuery, TrendingEntry};

/// Progress of the most recent fetch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Identifies one issued fetch and the term that triggered it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub id: u64,
    pub term: String,
}

/// Inputs to the state container
#[derive(Debug, Clone)]
pub enum SearchEvent {
    RawTermChanged(String),
    DebouncedTermCommitted(String),
    FetchSucceeded {
        tag: RequestTag,
        movies: Vec<Movie>,
    },
    /// `message` is `None` when the failure is not shown to the user
    FetchFailed {
        tag: RequestTag,
        message: Option<String>,
    },
    TrendingLoaded(Vec<TrendingEntry>),
}

/// Result of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    /// The event would not change anything observable
    ///
    /// A committed term that maps to the same query as the current one is
    /// stored but reported as unchanged.
    Unchanged,
    /// A fetch completion for a request that is no longer the latest
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub raw_term: String,
    pub debounced_term: String,
    pub movies: Vec<Movie>,
    pub trending: Vec<TrendingEntry>,
    pub phase: FetchPhase,
    pub error_message: Option<String>,
    latest_request: Option<RequestTag>,
    next_request_id: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only while the latest issued fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    pub fn latest_request(&self) -> Option<&RequestTag> {
        self.latest_request.as_ref()
    }

    /// Fetch-started transition: tags a new request and enters `Loading`
    ///
    /// Any request issued earlier becomes stale.
    pub fn begin_fetch(&mut self, term: &str) -> RequestTag {
        self.next_request_id += 1;
        let tag = RequestTag {
            id: self.next_request_id,
            term: term.to_string(),
        };

        self.phase = FetchPhase::Loading;
        self.error_message = None;
        self.latest_request = Some(tag.clone());
        tag
    }

    pub fn apply(&mut self, event: SearchEvent) -> Transition {
        match event {
            SearchEvent::RawTermChanged(text) => {
                if self.raw_term == text {
                    return Transition::Unchanged;
                }
                self.raw_term = text;
                Transition::Applied
            }
            SearchEvent::DebouncedTermCommitted(term) => {
                let same_query =
                    MovieQuery::from_term(&self.debounced_term) == MovieQuery::from_term(&term);
                self.debounced_term = term;
                if same_query {
                    Transition::Unchanged
                } else {
                    Transition::Applied
                }
            }
            SearchEvent::FetchSucceeded { tag, movies } => {
                if !self.is_latest(&tag) {
                    return Transition::Discarded;
                }
                self.movies = movies;
                self.error_message = None;
                self.phase = FetchPhase::Success;
                Transition::Applied
            }
            SearchEvent::FetchFailed { tag, message } => {
                if !self.is_latest(&tag) {
                    return Transition::Discarded;
                }
                self.movies.clear();
                self.error_message = message;
                self.phase = FetchPhase::Failed;
                Transition::Applied
            }
            SearchEvent::TrendingLoaded(entries) => {
                self.trending = entries;
                Transition::Applied
            }
        }
    }

    fn is_latest(&self, tag: &RequestTag) -> bool {
        self.latest_request.as_ref() == Some(tag)
    }
}
