/// TMDB (The Movie Database) provider
///
/// API Flow:
/// 1. Empty search box: /discover/movie?sort_by=popularity.desc
/// 2. Typed term: /search/movie?query=<term>
///
/// Both endpoints authenticate with the v4 read access token as a bearer token.
use crate::{
    error::{FetchError, DEFAULT_API_FAILURE_MESSAGE},
    models::{Movie, MoviePage, MovieQuery},
    services::providers::MovieProvider,
};
use reqwest::{header::ACCEPT, Client as HttpClient};
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider with a per-request timeout
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, query: &MovieQuery) -> String {
        format!("{}{}", self.api_url, query.path())
    }

    /// Turns a decoded page into results, honoring the in-body failure marker
    fn into_results(page: MoviePage) -> Result<Vec<Movie>, FetchError> {
        if page.is_failure() {
            let message = page
                .error
                .unwrap_or_else(|| DEFAULT_API_FAILURE_MESSAGE.to_string());
            return Err(FetchError::Api(message));
        }
        Ok(page.results)
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, FetchError> {
        let url = self.url_for(query);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
            .query(&query.params())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw TMDB API response");

        let page: MoviePage = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            FetchError::Decode(e)
        })?;

        let movies = Self::into_results(page)?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = "tmdb",
            "Movie fetch completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
