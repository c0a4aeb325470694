//! HTTP API integration tests
//!
//! Exercises the router end-to-end against a scripted catalog.

mod helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use helpers::{RecordBuilder, ScriptedCatalog};
use yomu_cr::{build_router, AppState};

const ANILIST_ID: i64 = 30013;

fn test_app(catalog: ScriptedCatalog) -> axum::Router {
    build_router(AppState::new(Arc::new(catalog)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_module_identity() {
    let app = test_app(ScriptedCatalog::new());

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "yomu-cr");
    assert_eq!(body["cached_records"], 0);
}

#[tokio::test]
async fn resolve_endpoint_returns_canonical_slug() {
    let catalog = ScriptedCatalog::new().with_record(
        "kingdom",
        RecordBuilder::new("kingdom").al(ANILIST_ID).build(),
    );
    let app = test_app(catalog);

    let request = Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "anilist_id": ANILIST_ID,
                "linked_slugs": ["kingdom"],
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["slug"], "kingdom");
}

#[tokio::test]
async fn resolve_endpoint_answers_null_for_unresolvable_series() {
    let app = test_app(ScriptedCatalog::new());

    let request = Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"anilist_id": ANILIST_ID, "title_candidates": ["Unknown"]}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["slug"].is_null());
}

#[tokio::test]
async fn resolve_endpoint_rejects_non_positive_id() {
    let app = test_app(ScriptedCatalog::new());

    let request = Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"anilist_id": 0}).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn comic_detail_404s_for_unknown_slug() {
    let app = test_app(ScriptedCatalog::new());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/comic/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comic_detail_serves_resolved_record() {
    let catalog = ScriptedCatalog::new().with_record(
        "kingdom",
        RecordBuilder::new("kingdom")
            .al(ANILIST_ID)
            .title("Kingdom")
            .last_chapter(700.0)
            .build(),
    );
    let app = test_app(catalog);

    let resolve = Request::builder()
        .method("POST")
        .uri("/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"anilist_id": ANILIST_ID, "linked_slugs": ["kingdom"]}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(resolve).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/comic/kingdom?cache=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["canonical"]["slug"], "kingdom");
    assert_eq!(body["canonical"]["title"], "Kingdom");
    assert_eq!(body["canonical"]["last_chapter"], 700.0);
}
