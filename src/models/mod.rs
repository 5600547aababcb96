use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Base URL for TMDB poster images at the size the cards use
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Builds the full poster URL for a TMDB poster path
pub fn poster_url(poster_path: &str) -> String {
    format!("{}{}", POSTER_BASE_URL, poster_path)
}

/// A movie as returned by the metadata API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    /// Minimal movie, mostly useful for fixtures
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            popularity: 0.0,
            vote_average: None,
            release_date: None,
            original_language: None,
        }
    }
}

/// Response body of the search and discover endpoints
///
/// Some deployments answer with HTTP 200 and a `Response: "False"` marker
/// instead of a status code, so both shapes are accepted.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MoviePage {
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default, alias = "Response")]
    pub response: Option<String>,
    #[serde(default, alias = "Error")]
    pub error: Option<String>,
}

impl MoviePage {
    /// Whether the payload carries the explicit failure marker
    pub fn is_failure(&self) -> bool {
        self.response
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    }
}

/// Which metadata endpoint a term maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieQuery {
    /// Popular movies, used while the search box is empty
    Discover,
    /// Title search
    Search(String),
}

impl MovieQuery {
    /// Maps a debounced term to a query; whitespace-only terms discover
    pub fn from_term(term: &str) -> Self {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            MovieQuery::Discover
        } else {
            MovieQuery::Search(trimmed.to_string())
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            MovieQuery::Discover => "/discover/movie",
            MovieQuery::Search(_) => "/search/movie",
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            MovieQuery::Discover => vec![("sort_by", "popularity.desc".to_string())],
            MovieQuery::Search(term) => vec![("query", term.clone())],
        }
    }

    /// The search term, if this is a search
    pub fn term(&self) -> Option<&str> {
        match self {
            MovieQuery::Discover => None,
            MovieQuery::Search(term) => Some(term),
        }
    }
}

impl Display for MovieQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovieQuery::Discover => write!(f, "discover"),
            MovieQuery::Search(term) => write!(f, "search:{}", term),
        }
    }
}

/// A search term ranked by how often it was searched
///
/// Owned by the backend service; the count is never modified locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingEntry {
    #[serde(rename = "$id")]
    pub id: String,
    /// The search term, displayed as the entry's title
    #[serde(rename = "searchTerm")]
    pub title: String,
    #[serde(default)]
    pub movie_id: Option<u64>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub count: u64,
}
