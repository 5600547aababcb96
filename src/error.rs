use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown when the metadata API does not supply one of its own
pub const GENERIC_FETCH_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Message shown when the API flags a failure without an explanation
pub const DEFAULT_API_FAILURE_MESSAGE: &str = "Failed to fetch movies";

/// Failure of a single movie metadata request
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Movie API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The API answered successfully but flagged the payload as a failure
    #[error("Movie API reported failure: {0}")]
    Api(String),

    #[error("Failed to parse movie API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Text shown to the user in place of the result list
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Api(message) => message.clone(),
            _ => GENERIC_FETCH_MESSAGE.to_string(),
        }
    }
}

/// Failure reading or writing the trending search counts
#[derive(thiserror::Error, Debug)]
pub enum TrendingError {
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Appwrite returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse Appwrite response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outbound calls made by the search controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalCall {
    FetchMovies,
    LoadTrending,
    RecordSearch,
}

/// What happens to a failure of an [`ExternalCall`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Logged and shown to the user
    Surface,
    /// Logged only; the affected section degrades to empty
    LogOnly,
}

impl ExternalCall {
    pub fn policy(self) -> ErrorPolicy {
        match self {
            ExternalCall::FetchMovies => ErrorPolicy::Surface,
            ExternalCall::LoadTrending => ErrorPolicy::LogOnly,
            ExternalCall::RecordSearch => ErrorPolicy::LogOnly,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExternalCall::FetchMovies => "fetch_movies",
            ExternalCall::LoadTrending => "load_trending",
            ExternalCall::RecordSearch => "record_search",
        }
    }
}

/// Errors returned by the HTTP handlers
///
/// Upstream failures never reach a handler: they land in `SearchState` and
/// are rendered as part of the view.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
