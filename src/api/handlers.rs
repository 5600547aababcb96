use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::TrendingEntry,
    view::PageView,
};

use super::AppState;

/// Longest term accepted from the search box, in characters
pub const MAX_TERM_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub term: String,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current page: search box text, trending section and results area
pub async fn get_view(State(state): State<AppState>) -> Json<PageView> {
    let snapshot = state.controller.snapshot().await;
    Json(PageView::from(&snapshot))
}

/// A keystroke in the search box
///
/// Returns immediately; the fetch happens once typing pauses.
pub async fn put_search(
    State(state): State<AppState>,
    Json(input): Json<SearchInput>,
) -> AppResult<(StatusCode, Json<PageView>)> {
    if input.term.chars().count() > MAX_TERM_CHARS {
        return Err(AppError::InvalidInput(format!(
            "Search term cannot exceed {} characters",
            MAX_TERM_CHARS
        )));
    }

    state.controller.set_raw_term(input.term).await;

    let snapshot = state.controller.snapshot().await;
    Ok((StatusCode::ACCEPTED, Json(PageView::from(&snapshot))))
}

/// Trending entries as loaded on mount
pub async fn get_trending(State(state): State<AppState>) -> Json<Vec<TrendingEntry>> {
    Json(state.controller.snapshot().await.trending)
}
