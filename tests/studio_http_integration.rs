//! Integration tests for the studio HTTP endpoints.
//!
//! These tests drive the full axum router with `tower::ServiceExt::oneshot`:
//! 1. Public routes work without an identity
//! 2. Identified routes resolve `X-User-Id` and reject unknown users
//! 3. Redesign runs map classified errors to the documented statuses

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use redesign_studio::adapters::ai::{MockAssistant, MockRoomAnalyzer, MockRoomSynthesizer};
use redesign_studio::adapters::credential::MockCredentialGate;
use redesign_studio::adapters::http::middleware::USER_ID_HEADER;
use redesign_studio::adapters::http::{studio_router, StudioAppState};
use redesign_studio::adapters::memory::InMemoryStudioStore;
use redesign_studio::application::{RunRedesignHandler, ASSISTANT_FALLBACK_REPLY};
use redesign_studio::domain::account::Credits;
use redesign_studio::domain::redesign::ServiceFailure;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    analyzer: Arc<MockRoomAnalyzer>,
    synthesizer: Arc<MockRoomSynthesizer>,
    assistant: Arc<MockAssistant>,
    gate: Arc<MockCredentialGate>,
}

fn test_app(initial_credits: u32) -> TestApp {
    let analyzer = Arc::new(MockRoomAnalyzer::new());
    let synthesizer = Arc::new(MockRoomSynthesizer::new());
    let assistant = Arc::new(MockAssistant::new());
    let gate = Arc::new(MockCredentialGate::selected());
    let store = Arc::new(InMemoryStudioStore::new(Credits::new(initial_credits)));
    let handler = Arc::new(RunRedesignHandler::new(
        analyzer.clone(),
        synthesizer.clone(),
        gate.clone(),
        store.clone(),
        store.clone(),
    ));
    let state = StudioAppState {
        redesign_handler: handler,
        ledger: store.clone(),
        project_store: store.clone(),
        directory: store,
        assistant: assistant.clone(),
    };
    TestApp {
        router: studio_router(state, 1024 * 1024),
        analyzer,
        synthesizer,
        assistant,
        gate,
    }
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn sign_up(router: &Router, email: &str) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/api/sessions",
        None,
        Some(json!({"email": email, "name": "Ada"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

fn redesign_body(style: &str) -> Value {
    json!({
        "image": {"mime_type": "image/jpeg", "data_base64": "/9j/4AAQSkZJRg=="},
        "style": style
    })
}

// =============================================================================
// Public Routes
// =============================================================================

#[tokio::test]
async fn styles_are_listed_in_catalog_order() {
    let app = test_app(3);

    let (status, body) = send(&app.router, Method::GET, "/api/styles", None, None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["modern", "minimalist", "scandinavian", "industrial", "luxury", "bohemian", "japandi"]
    );
}

#[tokio::test]
async fn session_creation_grants_initial_credits_once() {
    let app = test_app(3);

    let first = sign_up(&app.router, "ada@example.com").await;
    let second = sign_up(&app.router, "ADA@example.com").await;

    assert_eq!(first, second);
    let (_, me) = send(&app.router, Method::GET, "/api/me", Some(&first), None).await;
    assert_eq!(me["credits"], 3);
    assert_eq!(me["email"], "ada@example.com");
}

#[tokio::test]
async fn invalid_identity_is_bad_request() {
    let app = test_app(3);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/sessions",
        None,
        Some(json!({"email": "no-at-sign", "name": "Ada"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

// =============================================================================
// Identity
// =============================================================================

#[tokio::test]
async fn identified_routes_require_a_user() {
    let app = test_app(3);

    let (missing, _) = send(&app.router, Method::GET, "/api/credits", None, None).await;
    let (unknown, body) =
        send(&app.router, Method::GET, "/api/credits", Some("ghost"), None).await;

    assert_eq!(missing, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNKNOWN_USER");
}

// =============================================================================
// Redesign Runs
// =============================================================================

#[tokio::test]
async fn redesign_run_charges_and_records_history() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("scandinavian")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["credit_charged"], true);
    assert_eq!(body["remaining_credits"], 2);
    assert_eq!(body["project"]["style"], "scandinavian");
    assert_eq!(body["project"]["room_type"], "living room");
    assert!(body["project"]["redesigned_image"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));

    let (_, credits) = send(&app.router, Method::GET, "/api/credits", Some(&user), None).await;
    assert_eq!(credits["credits"], 2);

    let (_, projects) = send(&app.router, Method::GET, "/api/projects", Some(&user), None).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
    assert_eq!(projects[0]["id"], body["project"]["id"]);
}

#[tokio::test]
async fn zero_credits_is_payment_required() {
    let app = test_app(0);
    let user = sign_up(&app.router, "ada@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("modern")),
    )
    .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], "INSUFFICIENT_CREDITS");
    assert_eq!(app.analyzer.call_count(), 0);
}

#[tokio::test]
async fn unknown_style_is_bad_request() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("gothic")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNKNOWN_STYLE");
    assert_eq!(body["details"]["styles"][2], "scandinavian");
}

#[tokio::test]
async fn unsupported_image_type_is_bad_request() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(json!({
            "image": {"mime_type": "image/gif", "data_base64": "R0lGODlh"},
            "style": "modern"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn non_room_photo_is_unprocessable() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;
    app.analyzer
        .push_failure(ServiceFailure::new("This photo is not a room."));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("modern")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_ROOM_IMAGE");
    assert_eq!(body["message"], "This photo is not a room.");

    let (_, credits) = send(&app.router, Method::GET, "/api/credits", Some(&user), None).await;
    assert_eq!(credits["credits"], 3);
}

#[tokio::test]
async fn rejected_credential_is_forbidden() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;
    app.analyzer
        .push_failure(ServiceFailure::new("PERMISSION_DENIED").with_status(403));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("modern")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "CREDENTIAL_REJECTED");
    assert!(!app.gate.is_selected());
    assert_eq!(app.gate.request_count(), 1);
}

#[tokio::test]
async fn invalid_credential_is_unauthorized() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;
    app.analyzer
        .push_failure(ServiceFailure::new("API key not valid. Please pass a valid API key."));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(redesign_body("modern")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "CREDENTIAL_INVALID");
}

#[tokio::test]
async fn history_is_newest_first_and_stable_across_reads() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;

    for style in ["modern", "japandi"] {
        let (status, _) = send(
            &app.router,
            Method::POST,
            "/api/redesigns",
            Some(&user),
            Some(redesign_body(style)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, first) = send(&app.router, Method::GET, "/api/projects", Some(&user), None).await;
    let (_, second) = send(&app.router, Method::GET, "/api/projects", Some(&user), None).await;

    assert_eq!(first, second);
    assert_eq!(first[0]["style"], "japandi");
    assert_eq!(first[1]["style"], "modern");
}

#[tokio::test]
async fn octet_stream_upload_is_accepted_by_file_extension() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/redesigns",
        Some(&user),
        Some(json!({
            "image": {
                "mime_type": "application/octet-stream",
                "filename": "living-room.jpg",
                "data_base64": "/9j/4AAQSkZJRg=="
            },
            "style": "minimalist"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["project"]["original_image"]
        .as_str()
        .unwrap()
        .starts_with("data:image/jpeg;base64,"));
}

#[tokio::test]
async fn concurrent_runs_for_one_user_conflict_and_charge_once() {
    let app = test_app(3);
    let user = sign_up(&app.router, "ada@example.com").await;
    app.synthesizer
        .set_delay(std::time::Duration::from_millis(200));

    let ((first, _), (second, _)) = tokio::join!(
        send(
            &app.router,
            Method::POST,
            "/api/redesigns",
            Some(&user),
            Some(redesign_body("modern")),
        ),
        send(
            &app.router,
            Method::POST,
            "/api/redesigns",
            Some(&user),
            Some(redesign_body("luxury")),
        )
    );

    let mut statuses = vec![first, second];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, credits) = send(&app.router, Method::GET, "/api/credits", Some(&user), None).await;
    assert_eq!(credits["credits"], 2);
    let (_, projects) = send(&app.router, Method::GET, "/api/projects", Some(&user), None).await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
}

// =============================================================================
// Design Assistant
// =============================================================================

#[tokio::test]
async fn assistant_answers_without_an_identity() {
    let app = test_app(3);
    app.assistant.push_success("A jute rug suits a small hall.");

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/assistant/chat",
        None,
        Some(json!({"message": "Which rug for a small hall?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "A jute rug suits a small hall.");
    assert_eq!(app.assistant.messages(), vec!["Which rug for a small hall?"]);
}

#[tokio::test]
async fn assistant_failure_gets_fallback_reply() {
    let app = test_app(3);
    app.assistant
        .push_failure(ServiceFailure::new("PERMISSION_DENIED").with_status(403));

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/assistant/chat",
        None,
        Some(json!({"message": "Paint ideas?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], ASSISTANT_FALLBACK_REPLY);
    assert!(app.gate.is_selected());
}

#[tokio::test]
async fn blank_assistant_question_is_bad_request() {
    let app = test_app(3);

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/assistant/chat",
        None,
        Some(json!({"message": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert!(app.assistant.messages().is_empty());
}
