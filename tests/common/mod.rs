#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;

use movie_finder::{
    error::{FetchError, TrendingError},
    models::{Movie, MovieQuery, TrendingEntry},
    services::{MovieProvider, TrendingStore},
};

/// One request seen by a [`FakeServer`]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl SeenRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

type Responder = dyn Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync;

#[derive(Clone)]
struct FakeState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    respond: Arc<Responder>,
}

/// Local HTTP server standing in for a third-party API
pub struct FakeServer {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeServer {
    /// Starts a server that answers every request via `respond(method, path)`
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Method, &str) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            seen: seen.clone(),
            respond: Arc::new(respond),
        };

        let app = Router::new().fallback(handle).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            seen,
        }
    }

    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

async fn handle(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let (status, response) = (state.respond)(&method, uri.path());
    state.seen.lock().unwrap().push(SeenRequest {
        method,
        path: uri.path().to_string(),
        query,
        headers,
        body,
    });

    (status, Json(response))
}

/// Provider answering every query with the same movies
pub struct StaticProvider {
    pub movies: Vec<Movie>,
    pub queries: Mutex<Vec<MovieQuery>>,
}

impl StaticProvider {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<MovieQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieProvider for StaticProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, FetchError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.movies.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Store with a fixed trending list that records search-count updates
#[derive(Default)]
pub struct RecordingStore {
    pub trending: Vec<TrendingEntry>,
    pub fail_load: bool,
    pub recorded: Mutex<Vec<(String, u64)>>,
}

impl RecordingStore {
    pub fn with_trending(trending: Vec<TrendingEntry>) -> Self {
        Self {
            trending,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_load: true,
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<(String, u64)> {
        self.recorded.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrendingStore for RecordingStore {
    async fn trending_movies(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
        if self.fail_load {
            return Err(TrendingError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "unavailable".to_string(),
            });
        }
        Ok(self.trending.clone())
    }

    async fn update_search_count(&self, term: &str, movie: &Movie) -> Result<(), TrendingError> {
        self.recorded
            .lock()
            .unwrap()
            .push((term.to_string(), movie.id));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

pub fn trending_entry(title: &str, count: u64) -> TrendingEntry {
    TrendingEntry {
        id: format!("doc-{}", title),
        title: title.to_string(),
        movie_id: Some(count),
        poster_url: Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", title)),
        count,
    }
}
