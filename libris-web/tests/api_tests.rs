//! HTTP API integration tests
//!
//! Router-level tests via tower `oneshot`, covering the lookup wire
//! contract (400 / 404 / 200 shapes), identity extraction, and the scan
//! endpoint's find-or-create behavior.

mod helpers;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use helpers::{state_with_empty_providers, stub_metadata, test_state, StubProvider};
use libris_web::build_router;
use libris_web::models::Source;

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request_as_user(method: Method, uri: &str, user_id: Uuid, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user-id", user_id.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_router(state_with_empty_providers().await);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["module"], json!("libris-web"));
}

#[tokio::test]
async fn lookup_without_isbn_is_bad_request() {
    let app = build_router(state_with_empty_providers().await);

    let response = app
        .oneshot(json_request(Method::POST, "/api/lookup", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("ISBN is required"));
}

#[tokio::test]
async fn lookup_with_blank_isbn_is_bad_request() {
    let app = build_router(state_with_empty_providers().await);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/lookup",
            json!({"isbn": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_miss_echoes_cleaned_isbn() {
    let app = build_router(state_with_empty_providers().await);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/lookup",
            json!({"isbn": "978-0-14-044913-6"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Book not found in any database"));
    assert_eq!(body["isbn"], json!("9780140449136"));
}

#[tokio::test]
async fn lookup_hit_returns_canonical_metadata() {
    let primary = StubProvider::new(Source::OpenLibrary)
        .with_book(stub_metadata("9783161484100", "Example", Source::OpenLibrary));
    let app = build_router(test_state(vec![Box::new(primary)]).await);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/lookup",
            json!({"isbn": "978-3-16-148410-0"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["isbn"], json!("9783161484100"));
    assert_eq!(body["title"], json!("Example"));
    assert_eq!(body["source"], json!("Open Library"));
    assert_eq!(body["authors"], json!(["Test Author"]));
    // Canonical JSON uses camelCase for the multi-word fields
    assert!(body.get("pageCount").is_some());
    assert!(body.get("rawData").is_some());
}

#[tokio::test]
async fn scan_without_identity_is_unauthorized() {
    let app = build_router(state_with_empty_providers().await);

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/books/scan",
            json!({"isbn": "9783161484100"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scan_with_garbage_identity_is_unauthorized() {
    let app = build_router(state_with_empty_providers().await);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books/scan")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-user-id", "not-a-uuid")
        .body(Body::from(json!({"isbn": "9783161484100"}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scan_creates_then_increments() {
    let primary = StubProvider::new(Source::OpenLibrary)
        .with_book(stub_metadata("9783161484100", "Example", Source::OpenLibrary));
    let app = build_router(test_state(vec![Box::new(primary)]).await);
    let user_id = Uuid::new_v4();

    let response = app
        .clone()
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/books/scan",
            user_id,
            json!({"isbn": "9783161484100"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await;
    assert_eq!(first["quantity"], json!(1));

    let response = app
        .clone()
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/books/scan",
            user_id,
            json!({"isbn": "978-3-16-148410-0"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;
    assert_eq!(second["quantity"], json!(2));
    assert_eq!(second["id"], first["id"]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/books")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn scan_of_unresolvable_isbn_is_not_found() {
    let app = build_router(state_with_empty_providers().await);
    let user_id = Uuid::new_v4();

    let response = app
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/books/scan",
            user_id,
            json!({"isbn": "9780140449136"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Book not found in any database"));
    assert_eq!(body["isbn"], json!("9780140449136"));
}

#[tokio::test]
async fn delete_of_missing_book_is_not_found() {
    let app = build_router(state_with_empty_providers().await);
    let user_id = Uuid::new_v4();

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(&format!("/api/books/{}", Uuid::new_v4()))
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn folder_lifecycle_over_http() {
    let primary = StubProvider::new(Source::OpenLibrary)
        .with_book(stub_metadata("9783161484100", "Example", Source::OpenLibrary));
    let app = build_router(test_state(vec![Box::new(primary)]).await);
    let user_id = Uuid::new_v4();

    // Create a folder
    let response = app
        .clone()
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/folders",
            user_id,
            json!({"name": "Fiction"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let folder = body_json(response).await;
    assert_eq!(folder["name"], json!("Fiction"));
    assert_eq!(folder["color"], json!("#8B4513"));
    let folder_id = folder["id"].as_str().unwrap().to_string();

    // Scan a book into it
    let response = app
        .clone()
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/books/scan",
            user_id,
            json!({"isbn": "9783161484100", "folder_id": folder_id}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let entry = body_json(response).await;
    assert_eq!(entry["folder_id"], json!(folder_id));

    // Delete the folder; the entry becomes unfiled
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(&format!("/api/folders/{}", folder_id))
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/books")
                .header("x-user-id", user_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let list = body_json(response).await;
    assert_eq!(list[0]["folder_id"], Value::Null);
}

#[tokio::test]
async fn create_folder_without_name_is_bad_request() {
    let app = build_router(state_with_empty_providers().await);
    let user_id = Uuid::new_v4();

    let response = app
        .oneshot(json_request_as_user(
            Method::POST,
            "/api/folders",
            user_id,
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
