/// Movie metadata provider abstraction
///
/// The controller only sees this trait, so the TMDB client can be swapped for
/// another metadata source or a mock in tests.
use crate::{
    error::FetchError,
    models::{Movie, MovieQuery},
};

pub mod tmdb;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch the first page of movies for a query
    ///
    /// `MovieQuery::Discover` returns popular movies; `MovieQuery::Search`
    /// returns title matches. An empty list is a success.
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, FetchError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
