/// Appwrite Databases store for search counts
///
/// Each document in the collection is one search term:
/// `{ searchTerm, count, movie_id, poster_url }`.
///
/// API Flow:
/// 1. Trending: list documents ordered by `count` descending, limited
/// 2. Record: list documents where `searchTerm` equals the term, then either
///    patch `count + 1` on the match or create a document with `count: 1`
use crate::{
    config::Config,
    error::TrendingError,
    models::{poster_url, Movie, TrendingEntry},
    services::trending::TrendingStore,
};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";

/// Location and credentials of the search-count collection
#[derive(Debug, Clone)]
pub struct AppwriteCollection {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

impl From<&Config> for AppwriteCollection {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: config.appwrite_endpoint.clone(),
            project_id: config.appwrite_project_id.clone(),
            database_id: config.appwrite_database_id.clone(),
            collection_id: config.appwrite_collection_id.clone(),
            api_key: config.appwrite_api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList<T> {
    #[serde(default = "Vec::new")]
    documents: Vec<T>,
}

#[derive(Clone)]
pub struct AppwriteStore {
    http_client: HttpClient,
    collection: AppwriteCollection,
    trending_limit: u32,
}

impl AppwriteStore {
    pub fn new(
        collection: AppwriteCollection,
        trending_limit: u32,
        timeout: Duration,
    ) -> Result<Self, TrendingError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            collection,
            trending_limit,
        })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.collection.endpoint.trim_end_matches('/'),
            self.collection.database_id,
            self.collection.collection_id
        )
    }

    fn document_url(&self, document_id: &str) -> String {
        format!("{}/{}", self.documents_url(), document_id)
    }

    /// Attaches project and (optional) key headers
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(PROJECT_HEADER, &self.collection.project_id);
        match &self.collection.api_key {
            Some(key) => request.header(KEY_HEADER, key),
            None => request,
        }
    }

    fn trending_queries(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "queries[]",
                json!({ "method": "orderDesc", "attribute": "count" }).to_string(),
            ),
            (
                "queries[]",
                json!({ "method": "limit", "values": [self.trending_limit] }).to_string(),
            ),
        ]
    }

    fn term_queries(term: &str) -> Vec<(&'static str, String)> {
        vec![(
            "queries[]",
            json!({ "method": "equal", "attribute": "searchTerm", "values": [term] }).to_string(),
        )]
    }

    fn new_document(term: &str, movie: &Movie) -> Value {
        json!({
            "documentId": Uuid::new_v4().simple().to_string(),
            "data": {
                "searchTerm": term,
                "count": 1,
                "movie_id": movie.id,
                "poster_url": movie.poster_path.as_deref().map(poster_url),
            }
        })
    }

    async fn list_documents(
        &self,
        queries: &[(&'static str, String)],
    ) -> Result<Vec<TrendingEntry>, TrendingError> {
        let response = self
            .authorize(self.http_client.get(self.documents_url()))
            .query(queries)
            .send()
            .await?;

        let body = check_status(response).await?.text().await?;
        let list: DocumentList<TrendingEntry> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %body,
                "Failed to deserialize Appwrite documents"
            );
            TrendingError::Decode(e)
        })?;

        Ok(list.documents)
    }
}

async fn check_status(response: Response) -> Result<Response, TrendingError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(TrendingError::Status { status, body })
}

#[async_trait::async_trait]
impl TrendingStore for AppwriteStore {
    async fn trending_movies(&self) -> Result<Vec<TrendingEntry>, TrendingError> {
        let entries = self.list_documents(&self.trending_queries()).await?;

        tracing::info!(
            entries = entries.len(),
            store = "appwrite",
            "Trending movies loaded"
        );

        Ok(entries)
    }

    async fn update_search_count(&self, term: &str, movie: &Movie) -> Result<(), TrendingError> {
        let existing = self.list_documents(&Self::term_queries(term)).await?;

        if let Some(entry) = existing.into_iter().next() {
            let response = self
                .authorize(self.http_client.patch(self.document_url(&entry.id)))
                .json(&json!({ "data": { "count": entry.count + 1 } }))
                .send()
                .await?;
            check_status(response).await?;

            tracing::info!(term = %term, count = entry.count + 1, "Search count incremented");
        } else {
            let response = self
                .authorize(self.http_client.post(self.documents_url()))
                .json(&Self::new_document(term, movie))
                .send()
                .await?;
            check_status(response).await?;

            tracing::info!(term = %term, movie_id = movie.id, "Search count created");
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "appwrite"
    }
}
