//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the endpoints with `tower::ServiceExt::oneshot()` against the in-memory
//! backend. No binary spawn, no network port, no live Qdrant.

use ragd::api::{create_app, ApiState};
use ragd::controller::Controller;
use ragd::store::{DocumentStore, MemoryStore};
use ragd::workflow::RagWorkflow;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let workflow = Arc::new(RagWorkflow::new(store.clone()));
    let controller = Arc::new(Controller::new(workflow, store));
    create_app(ApiState { controller })
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Full add → ask → status scenario against the memory backend.
#[tokio::test]
async fn test_add_ask_status_end_to_end() {
    let app = create_test_app();

    // Add a document
    let resp = app
        .clone()
        .oneshot(json_post(
            "/add",
            serde_json::json!({"text": "Paris is the capital of France"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let add = body_json(resp).await;
    assert_eq!(add["status"], "added (memory)");
    assert!(
        !add["id"].as_str().unwrap().is_empty(),
        "id must be present"
    );

    // Ask about it
    let resp = app
        .clone()
        .oneshot(json_post(
            "/ask",
            serde_json::json!({"question": "capital of France"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ask = body_json(resp).await;
    assert_eq!(ask["question"], "capital of France");
    assert_eq!(
        ask["answer"],
        "I found this: 'Paris is the capital of France...'"
    );
    assert_eq!(
        ask["context_used"],
        serde_json::json!(["Paris is the capital of France"])
    );
    assert!(ask["latency_sec"].as_f64().unwrap() >= 0.0);

    // Status reflects the stored document
    let resp = app
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let status = body_json(resp).await;
    assert_eq!(status["qdrant_ready"], false);
    assert_eq!(status["docs_count"], 1);
    assert_eq!(status["graph_ready"], true);
}

/// Asking against an empty store yields the "don't know" answer and no context.
#[tokio::test]
async fn test_ask_empty_store() {
    let app = create_test_app();

    let resp = app
        .oneshot(json_post(
            "/ask",
            serde_json::json!({"question": "anything at all"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let ask = body_json(resp).await;
    assert_eq!(ask["answer"], "Sorry, I don't know.");
    assert_eq!(ask["context_used"], serde_json::json!([]));
}

/// The no-match fallback surfaces the first stored document over HTTP.
#[tokio::test]
async fn test_ask_no_match_returns_first_document() {
    let app = create_test_app();

    for text in ["the cat sat", "a dog ran"] {
        let resp = app
            .clone()
            .oneshot(json_post("/add", serde_json::json!({"text": text})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .oneshot(json_post("/ask", serde_json::json!({"question": "zzz"})))
        .await
        .unwrap();
    let ask = body_json(resp).await;
    assert_eq!(ask["context_used"], serde_json::json!(["the cat sat"]));
    assert_eq!(ask["answer"], "I found this: 'the cat sat...'");
}

/// Sequential adds return pairwise-distinct ids and an accurate count.
#[tokio::test]
async fn test_sequential_adds_distinct_ids() {
    let app = create_test_app();
    let mut ids = std::collections::HashSet::new();

    for i in 0..5 {
        let resp = app
            .clone()
            .oneshot(json_post(
                "/add",
                serde_json::json!({"text": format!("doc {i}")}),
            ))
            .await
            .unwrap();
        let add = body_json(resp).await;
        assert!(ids.insert(add["id"].as_str().unwrap().to_string()));
    }

    let resp = app
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = body_json(resp).await;
    assert_eq!(status["docs_count"], 5);
}

/// Malformed bodies are rejected at the transport edge, not a 500.
#[tokio::test]
async fn test_malformed_body_is_client_error() {
    let app = create_test_app();

    let resp = app
        .oneshot(
            Request::post("/ask")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"nope": 1}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

/// Health probe reports the active backend.
#[tokio::test]
async fn test_health_reports_backend() {
    let app = create_test_app();

    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let health = body_json(resp).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["backend"], "memory");
}
