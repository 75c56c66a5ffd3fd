mod common;

use axum::http::{Method, StatusCode};
use common::{bookmarks_fixture, send, sqlite_app};
use serde_json::json;

#[tokio::test]
async fn raw_markup_is_persisted_unescaped() {
    let (app, pool) = sqlite_app(vec![]).await;

    let created = send(
        &app,
        Method::POST,
        "/api/bookmarks",
        Some(json!({
            "title": "<script>alert(1)</script>",
            "url": "https://example.com/?a=1&b=2",
            "description": "Tom & Jerry",
            "rating": "4.25"
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["id"].as_i64().unwrap();

    let (title, url, description): (String, String, String) =
        sqlx::query_as("SELECT title, url, description FROM bookmarks WHERE id = ?")
            .bind(id)
            .fetch_one(&*pool)
            .await
            .unwrap();

    assert_eq!(title, "<script>alert(1)</script>");
    assert_eq!(url, "https://example.com/?a=1&b=2");
    assert_eq!(description, "Tom & Jerry");

    let fetched = send(&app, Method::GET, &format!("/api/bookmarks/{}", id), None).await;
    assert_eq!(fetched.body["title"], "&lt;script&gt;alert(1)&lt;/script&gt;");
    assert_eq!(fetched.body["description"], "Tom &amp; Jerry");
}

#[tokio::test]
async fn patch_is_persisted_as_a_merge() {
    let (app, pool) = sqlite_app(bookmarks_fixture()).await;

    let res = send(
        &app,
        Method::PATCH,
        "/api/bookmarks/3",
        Some(json!({ "rating": 2 })),
    )
    .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let row: (String, String, String, String) = sqlx::query_as(
        "SELECT title, url, description, rating FROM bookmarks WHERE id = 3",
    )
    .fetch_one(&*pool)
    .await
    .unwrap();
    assert_eq!(
        row,
        (
            "Third Test".to_string(),
            "some-url".to_string(),
            "Third description".to_string(),
            "2".to_string()
        )
    );
}

#[tokio::test]
async fn deleted_rows_are_gone_from_storage() {
    let (app, pool) = sqlite_app(bookmarks_fixture()).await;

    let res = send(&app, Method::DELETE, "/api/bookmarks/1", None).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM bookmarks ORDER BY id")
        .fetch_all(&*pool)
        .await
        .unwrap();
    assert_eq!(ids, vec![2, 3]);
}

#[tokio::test]
async fn storage_failure_is_a_500_without_detail() {
    let (app, pool) = sqlite_app(bookmarks_fixture()).await;
    pool.close().await;

    let res = send(&app, Method::GET, "/api/bookmarks", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, json!({ "error": { "message": "server error" } }));

    let ready = send(&app, Method::GET, "/readyz", None).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body["status"], "error");
    assert_eq!(
        ready.body["checks"]["storage"],
        json!({ "ok": false, "error": "storage unavailable" })
    );
}
