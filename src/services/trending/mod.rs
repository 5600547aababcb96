/// Trending search store abstraction
///
/// Search counts live in a backend-as-a-service collection. This system only
/// reads the ranking and asks the store to bump a term's counter.
use crate::{
    error::TrendingError,
    models::{Movie, TrendingEntry},
};

pub mod appwrite;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrendingStore: Send + Sync {
    /// Most searched terms, highest count first
    async fn trending_movies(&self) -> Result<Vec<TrendingEntry>, TrendingError>;

    /// Increment the stored count for `term`, creating the entry on first use
    ///
    /// `movie` is the top result for the term and supplies the poster shown
    /// in the trending list.
    async fn update_search_count(&self, term: &str, movie: &Movie) -> Result<(), TrendingError>;

    /// Store name for logging and debugging
    fn name(&self) -> &'static str;
}
