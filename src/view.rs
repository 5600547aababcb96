//! View model derived from [`SearchState`]
//!
//! The results area shows exactly one of a loading indicator, an error
//! message or the movie cards. The trending section is omitted while empty.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    controller::{FetchPhase, SearchState},
    models::{poster_url, Movie, TrendingEntry},
};

/// Poster shown for movies without artwork
pub const NO_POSTER: &str = "/no-movie.png";

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub language: String,
    pub year: String,
}

impl From<&Movie> for MovieCard {
    fn from(movie: &Movie) -> Self {
        let rating = movie
            .vote_average
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        let year = movie
            .release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.year().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url: movie
                .poster_path
                .as_deref()
                .map(poster_url)
                .unwrap_or_else(|| NO_POSTER.to_string()),
            rating,
            language: movie
                .original_language
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            year,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendingCard {
    pub rank: usize,
    pub title: String,
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsView {
    Loading,
    Error { message: String },
    Movies { movies: Vec<MovieCard> },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub search_term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<TrendingCard>>,
    pub results: ResultsView,
}

impl From<&SearchState> for ResultsView {
    fn from(state: &SearchState) -> Self {
        if state.phase == FetchPhase::Loading {
            return ResultsView::Loading;
        }

        if let Some(message) = &state.error_message {
            return ResultsView::Error {
                message: message.clone(),
            };
        }

        ResultsView::Movies {
            movies: state.movies.iter().map(MovieCard::from).collect(),
        }
    }
}

pub fn trending_cards(entries: &[TrendingEntry]) -> Vec<TrendingCard> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| TrendingCard {
            rank: i + 1,
            title: entry.title.clone(),
            poster_url: entry.poster_url.clone(),
        })
        .collect()
}

impl From<&SearchState> for PageView {
    fn from(state: &SearchState) -> Self {
        let trending = if state.trending.is_empty() {
            None
        } else {
            Some(trending_cards(&state.trending))
        };

        Self {
            search_term: state.raw_term.clone(),
            trending,
            results: ResultsView::from(state),
        }
    }
}
