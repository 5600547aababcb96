//! Search controller
//!
//! Turns keystrokes into debounced fetches and keeps [`SearchState`] in sync
//! with the two external services. Two flows run independently on the tokio
//! runtime: the debounce-driven movie fetch and the one-shot trending load.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::{
    error::{ErrorPolicy, ExternalCall, FetchError},
    models::{Movie, MovieQuery},
    services::{MovieProvider, TrendingStore},
};

pub mod debounce;
pub mod state;

pub use debounce::Debouncer;
pub use state::{FetchPhase, RequestTag, SearchEvent, SearchState, Transition};

/// Cheap to clone; all clones share one state
#[derive(Clone)]
pub struct SearchController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    state: RwLock<SearchState>,
    movies: Arc<dyn MovieProvider>,
    trending: Arc<dyn TrendingStore>,
    debouncer: Debouncer,
    mounted: AtomicBool,
}

impl SearchController {
    pub fn new(
        movies: Arc<dyn MovieProvider>,
        trending: Arc<dyn TrendingStore>,
        debounce: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                state: RwLock::new(SearchState::new()),
                movies,
                trending,
                debouncer: Debouncer::new(debounce),
                mounted: AtomicBool::new(false),
            }),
        }
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> SearchState {
        self.inner.state.read().await.clone()
    }

    /// Runs the initial effects: a fetch for the (empty) debounced term and
    /// the trending load
    ///
    /// Only the first call does anything. The returned handles let callers
    /// wait for both flows.
    pub fn mount(&self) -> Vec<JoinHandle<()>> {
        if self.inner.mounted.swap(true, Ordering::SeqCst) {
            tracing::debug!("Search controller already mounted");
            return Vec::new();
        }

        tracing::info!(
            provider = self.inner.movies.name(),
            store = self.inner.trending.name(),
            debounce_ms = self.inner.debouncer.delay().as_millis() as u64,
            "Mounting search controller"
        );

        let trending = {
            let controller = self.clone();
            tokio::spawn(async move { controller.load_trending_movies().await })
        };

        let initial = {
            let controller = self.clone();
            tokio::spawn(async move {
                let term = controller.inner.state.read().await.debounced_term.clone();
                // Failure is already reflected in state
                let _ = controller.fetch_movies(&term).await;
            })
        };

        vec![initial, trending]
    }

    /// Cancels any pending debounce; in-flight fetches are left to finish
    pub async fn unmount(&self) {
        self.inner.debouncer.cancel().await;
        tracing::info!("Search controller unmounted");
    }

    /// Records a keystroke and restarts the debounce timer
    pub async fn set_raw_term(&self, text: impl Into<String>) {
        self.apply(SearchEvent::RawTermChanged(text.into())).await;

        let controller = self.clone();
        self.inner
            .debouncer
            .schedule(async move { controller.commit_term().await })
            .await;
    }

    /// Whether a keystroke is still waiting out the quiet period
    pub async fn has_pending_input(&self) -> bool {
        self.inner.debouncer.is_pending().await
    }

    /// Commits the raw term as it stands when the quiet period ends
    async fn commit_term(&self) {
        let (term, transition) = {
            let mut state = self.inner.state.write().await;
            let term = state.raw_term.clone();
            let transition = state.apply(SearchEvent::DebouncedTermCommitted(term.clone()));
            (term, transition)
        };

        if transition == Transition::Unchanged {
            tracing::debug!(term = %term, "Debounced term unchanged, skipping fetch");
            return;
        }

        tracing::debug!(term = %term, "Debounced term committed");

        // Separate task so a later keystroke cannot abort the fetch
        let controller = self.clone();
        tokio::spawn(async move {
            let _ = controller.fetch_movies(&term).await;
        });
    }

    /// Fetches movies for `term` and applies the outcome to state
    ///
    /// An empty term discovers popular movies. A non-empty term with at least
    /// one result is forwarded to the trending store along with its top
    /// result. Completions of superseded requests leave state untouched.
    pub async fn fetch_movies(&self, term: &str) -> Result<Vec<Movie>, FetchError> {
        let query = MovieQuery::from_term(term);
        let tag = self.inner.state.write().await.begin_fetch(term);

        tracing::debug!(request_id = tag.id, query = %query, "Fetch started");

        let result = self.inner.movies.fetch_movies(&query).await;

        // Completion step shared by every exit path
        let event = match &result {
            Ok(movies) => SearchEvent::FetchSucceeded {
                tag: tag.clone(),
                movies: movies.clone(),
            },
            Err(e) => {
                let message = match report_failure(ExternalCall::FetchMovies, e) {
                    ErrorPolicy::Surface => Some(e.user_message()),
                    ErrorPolicy::LogOnly => None,
                };
                SearchEvent::FetchFailed {
                    tag: tag.clone(),
                    message,
                }
            }
        };

        if self.apply(event).await == Transition::Discarded {
            tracing::debug!(
                request_id = tag.id,
                term = %tag.term,
                "Discarding stale fetch result"
            );
        }

        if let (Ok(movies), Some(search_term)) = (&result, query.term()) {
            if let Some(top) = movies.first() {
                self.record_search(search_term, top).await;
            }
        }

        result
    }

    /// Loads the trending list; failure leaves it empty without a visible error
    pub async fn load_trending_movies(&self) {
        let entries = match self.inner.trending.trending_movies().await {
            Ok(entries) => entries,
            Err(e) => {
                report_failure(ExternalCall::LoadTrending, &e);
                Vec::new()
            }
        };

        self.apply(SearchEvent::TrendingLoaded(entries)).await;
    }

    /// Bumps the search count for `term`; failures are logged only
    pub async fn record_search(&self, term: &str, movie: &Movie) {
        if let Err(e) = self.inner.trending.update_search_count(term, movie).await {
            report_failure(ExternalCall::RecordSearch, &e);
        }
    }

    async fn apply(&self, event: SearchEvent) -> Transition {
        self.inner.state.write().await.apply(event)
    }
}

/// Logs a failed external call at the level its policy calls for
fn report_failure(call: ExternalCall, error: &impl Display) -> ErrorPolicy {
    let policy = call.policy();
    match policy {
        ErrorPolicy::Surface => {
            tracing::error!(call = call.name(), error = %error, "External call failed");
        }
        ErrorPolicy::LogOnly => {
            tracing::warn!(
                call = call.name(),
                error = %error,
                "External call failed, degrading"
            );
        }
    }
    policy
}
