mod common;

use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::FakeServer;
use movie_finder::{
    error::TrendingError,
    models::Movie,
    services::{trending::appwrite::AppwriteCollection, AppwriteStore, TrendingStore},
};

const DOCUMENTS_PATH: &str = "/v1/databases/db/collections/metrics/documents";

fn store(server: &FakeServer, api_key: Option<&str>) -> AppwriteStore {
    AppwriteStore::new(
        AppwriteCollection {
            endpoint: format!("{}/v1", server.base_url),
            project_id: "project".to_string(),
            database_id: "db".to_string(),
            collection_id: "metrics".to_string(),
            api_key: api_key.map(str::to_string),
        },
        5,
        Duration::from_secs(5),
    )
    .unwrap()
}

fn existing_document() -> serde_json::Value {
    json!({
        "total": 1,
        "documents": [{
            "$id": "doc-bat",
            "$collectionId": "metrics",
            "searchTerm": "bat",
            "count": 3,
            "movie_id": 268,
            "poster_url": "https://image.tmdb.org/t/p/w500/bat.jpg"
        }]
    })
}

fn batman() -> Movie {
    let mut movie = Movie::new(268, "Batman");
    movie.poster_path = Some("/bat.jpg".to_string());
    movie
}

#[tokio::test]
async fn test_trending_lists_by_count() {
    let server =
        FakeServer::start(|_: &Method, _: &str| (StatusCode::OK, existing_document())).await;

    let entries = store(&server, Some("secret")).trending_movies().await.unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "bat");
    assert_eq!(entries[0].count, 3);

    let requests = server.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, DOCUMENTS_PATH);
    assert_eq!(requests[0].header("x-appwrite-project"), Some("project"));
    assert_eq!(requests[0].header("x-appwrite-key"), Some("secret"));

    let queries: Vec<&str> = requests[0]
        .query
        .iter()
        .filter(|(k, _)| k == "queries[]")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].contains("orderDesc"));
    assert!(queries[1].contains("limit"));
}

#[tokio::test]
async fn test_existing_term_is_incremented() {
    let server = FakeServer::start(|method: &Method, _: &str| {
        if *method == Method::GET {
            (StatusCode::OK, existing_document())
        } else {
            (StatusCode::OK, json!({ "$id": "doc-bat", "count": 4 }))
        }
    })
    .await;

    store(&server, None)
        .update_search_count("bat", &batman())
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].param("queries[]").unwrap().contains("searchTerm"));
    assert_eq!(requests[0].header("x-appwrite-key"), None);

    assert_eq!(requests[1].method, Method::PATCH);
    assert_eq!(requests[1].path, format!("{}/doc-bat", DOCUMENTS_PATH));
    let body = requests[1].body.as_ref().unwrap();
    assert_eq!(body["data"]["count"], 4);
}

#[tokio::test]
async fn test_new_term_is_created() {
    let server = FakeServer::start(|method: &Method, _: &str| {
        if *method == Method::GET {
            (StatusCode::OK, json!({ "total": 0, "documents": [] }))
        } else {
            (StatusCode::CREATED, json!({ "$id": "new" }))
        }
    })
    .await;

    store(&server, None)
        .update_search_count("bat", &batman())
        .await
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, DOCUMENTS_PATH);

    let data = &requests[1].body.as_ref().unwrap()["data"];
    assert_eq!(data["searchTerm"], "bat");
    assert_eq!(data["count"], 1);
    assert_eq!(data["movie_id"], 268);
    assert_eq!(data["poster_url"], "https://image.tmdb.org/t/p/w500/bat.jpg");
}

#[tokio::test]
async fn test_error_status_is_trending_error() {
    let server = FakeServer::start(|_: &Method, _: &str| {
        (
            StatusCode::UNAUTHORIZED,
            json!({ "message": "missing scope", "code": 401 }),
        )
    })
    .await;

    let err = store(&server, None).trending_movies().await.unwrap_err();
    match err {
        TrendingError::Status { status, body } => {
            assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
            assert!(body.contains("missing scope"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_documents_key_is_empty_list() {
    let server =
        FakeServer::start(|_: &Method, _: &str| (StatusCode::OK, json!({ "total": 0 }))).await;

    let entries = store(&server, None).trending_movies().await.unwrap();
    assert!(entries.is_empty());
}
