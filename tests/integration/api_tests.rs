//! API integration tests driving the full router in-process

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    repository::{BookStore, InMemoryBookStore, Repository},
    services::Services,
    AppState,
};

fn router(store: Arc<dyn BookStore>) -> Router {
    create_router(AppState {
        services: Arc::new(Services::new(store)),
    })
}

async fn sqlite_app() -> Router {
    let repository = Repository::in_memory()
        .await
        .expect("Failed to open in-memory database");
    router(Arc::new(repository.books))
}

fn memory_app() -> Router {
    router(Arc::new(InMemoryBookStore::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

/// Send a JSON body without any `Content-Type` header
async fn send_bare(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

async fn count(app: &Router) -> usize {
    let (status, body) = send(app, "GET", "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("Expected an array").len()
}

/// Create, read, partially update, then delete one book
async fn book_lifecycle(app: Router) {
    let (status, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({
            "title": "Solid Book",
            "author": "Robert Martin",
            "publicationYear": 2023
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("No book ID");
    assert_eq!(created["title"], "Solid Book");
    assert_eq!(created["author"], "Robert Martin");
    assert_eq!(created["publicationYear"], 2023);

    let uri = format!("/api/books/{}", id);
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, again) = send(&app, "GET", &uri, None).await;
    assert_eq!(again, fetched);

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "title": "Updated Title Book" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Updated Title Book");

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(
        fetched,
        json!({
            "id": id,
            "title": "Updated Title Book",
            "author": "Robert Martin",
            "publicationYear": 2023
        })
    );

    let before = count(&app).await;
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(count(&app).await, before - 1);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Book not found.");
}

#[tokio::test]
async fn test_book_lifecycle_sqlite() {
    book_lifecycle(sqlite_app().await).await;
}

#[tokio::test]
async fn test_book_lifecycle_in_memory() {
    book_lifecycle(memory_app()).await;
}

#[tokio::test]
async fn test_list_is_empty_array_initially() {
    let app = sqlite_app().await;
    let (status, body) = send(&app, "GET", "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_returns_books_in_creation_order() {
    let app = sqlite_app().await;
    for (title, year) in [("New Book", 2022), ("Clean Code", 2008)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/books",
            Some(json!({ "title": title, "author": "John Doe", "publicationYear": year })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, "GET", "/api/books", None).await;
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["New Book", "Clean Code"]);
}

#[tokio::test]
async fn test_create_with_missing_fields_writes_nothing() {
    let app = sqlite_app().await;
    for body in [
        json!({ "author": "Robert Martin", "publicationYear": 2023 }),
        json!({ "title": "Solid Book", "publicationYear": 2023 }),
        json!({ "title": "Solid Book", "author": "Robert Martin" }),
        json!({ "title": "Solid Book", "author": null, "publicationYear": 2023 }),
    ] {
        let (status, response) = send(&app, "POST", "/api/books", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["code"], "ValidationFailed");
    }
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn test_create_accepts_numeric_string_year() {
    let app = memory_app();
    let (status, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({ "title": "T", "author": "A", "publicationYear": "1999" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["publicationYear"], 1999);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = memory_app();
    let request = Request::post("/api/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "BadRequest");
}

#[tokio::test]
async fn test_update_and_delete_of_unknown_id_are_not_found() {
    let app = sqlite_app().await;
    let (status, _) = send(&app, "PUT", "/api/books/404", Some(json!({ "title": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/books/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bodies_without_content_type_are_decoded() {
    for app in [sqlite_app().await, memory_app()] {
        let (status, created) = send_bare(
            &app,
            "POST",
            "/api/books",
            json!({
                "title": "Solid Book",
                "author": "Robert Martin",
                "publicationYear": 2023
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().expect("No book ID");

        let uri = format!("/api/books/{}", id);
        let (status, updated) = send_bare(
            &app,
            "PUT",
            &uri,
            json!({
                "title": "Updated Title Book",
                "author": "Updated Author",
                "publicationYear": 2022
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            updated,
            json!({
                "id": id,
                "title": "Updated Title Book",
                "author": "Updated Author",
                "publicationYear": 2022
            })
        );
    }
}

#[tokio::test]
async fn test_empty_body_is_bad_request() {
    let app = memory_app();
    let request = Request::post("/api/books").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_year_beyond_32_bits_is_stored() {
    let app = sqlite_app().await;
    let year: i64 = 5_000_000_000;
    let (status, created) = send(
        &app,
        "POST",
        "/api/books",
        Some(json!({ "title": "Far Future", "author": "Nobody", "publicationYear": year })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/books/{}", created["id"]);
    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["publicationYear"], year);
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = sqlite_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
