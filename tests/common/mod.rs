#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use bookmarks_api::{
    db,
    models::bookmark::{Bookmark, NewBookmark},
    routes::routes,
    sanitize::MarkupEscaper,
    services::{
        bookmark_repository::{BookmarkRepository, SqliteBookmarkRepository},
        memory_repository::InMemoryBookmarkRepository,
    },
    state::AppState,
};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

pub const API_TOKEN: &str = "test-api-token";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
    pub raw_len: usize,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

pub fn bookmarks_fixture() -> Vec<Bookmark> {
    vec![
        Bookmark {
            id: 1,
            title: "First Test".into(),
            url: "some-url".into(),
            description: "First description".into(),
            rating: "5.00".into(),
        },
        Bookmark {
            id: 2,
            title: "Second Test".into(),
            url: "some-url".into(),
            description: "Second description".into(),
            rating: "4.50".into(),
        },
        Bookmark {
            id: 3,
            title: "Third Test".into(),
            url: "some-url".into(),
            description: "Third description".into(),
            rating: "3.14".into(),
        },
    ]
}

fn app_for(repo: Arc<dyn BookmarkRepository>) -> Router {
    routes::app(AppState::new(repo, Arc::new(MarkupEscaper), API_TOKEN))
}

pub fn memory_app(rows: Vec<Bookmark>) -> Router {
    app_for(Arc::new(InMemoryBookmarkRepository::with_rows(rows)))
}

/// Router over a fresh in-memory SQLite database, plus the pool for direct inspection.
pub async fn sqlite_app(rows: Vec<Bookmark>) -> (Router, Arc<SqlitePool>) {
    let pool = db::connect_in_memory().await.expect("sqlite pool");
    db::run_migrations(&pool).await.expect("migrations");
    let pool = Arc::new(pool);
    let repo = SqliteBookmarkRepository::new(pool.clone());

    // Fresh AUTOINCREMENT table: inserting in order reproduces the fixture ids.
    for row in rows {
        let stored = repo
            .insert(NewBookmark {
                title: row.title,
                url: row.url,
                description: row.description,
                rating: row.rating,
            })
            .await
            .expect("seed row");
        assert_eq!(stored.id, row.id, "fixture ids must be sequential from 1");
    }

    (app_for(Arc::new(repo)), pool)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", API_TOKEN));
    dispatch(app, builder, body).await
}

pub async fn send_with_auth(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    dispatch(app, builder, None).await
}

async fn dispatch(
    app: &Router,
    builder: axum::http::request::Builder,
    body: Option<Value>,
) -> TestResponse {
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    TestResponse {
        status,
        headers,
        body,
        raw_len: bytes.len(),
    }
}

pub fn to_json(bookmarks: &[Bookmark]) -> Value {
    serde_json::to_value(bookmarks).expect("serialize bookmarks")
}
