//! HTTP surface tests
//!
//! Drive the router in-process with a fixed completion client.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use solve_coach_backend::api;
use solve_coach_backend::bridge::{BridgeError, BridgeReply, CompletionClient};
use solve_coach_backend::session::{RubricStage, RubricState, Turn};
use solve_coach_backend::state::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Always answers with the same outcome
struct FixedClient(Result<BridgeReply, BridgeError>);

#[async_trait]
impl CompletionClient for FixedClient {
    async fn send_turn(
        &self,
        _history: &[Turn],
        finalize: bool,
    ) -> Result<BridgeReply, BridgeError> {
        match (&self.0, finalize) {
            (Ok(reply), true) => Ok(BridgeReply {
                display_text: reply.display_text.clone(),
                rubric_state: RubricState::all_complete(),
            }),
            (result, _) => result.clone(),
        }
    }
}

fn app(result: Result<BridgeReply, BridgeError>) -> Router {
    let state = AppState::new(Arc::new(FixedClient(result)), "claude-test", true);
    api::router(state.shared())
}

fn ok_app() -> Router {
    app(Ok(BridgeReply {
        display_text: "Tell me more.".to_string(),
        rubric_state: RubricState::default().with(RubricStage::SpotPain, true),
    }))
}

async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn started(app: Router) -> Value {
    let (status, conversation) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({"persona": "cfo", "industry": "healthcare"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    conversation
}

#[tokio::test]
async fn test_health_reports_model() {
    let (status, body) = send(ok_app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model"], "claude-test");
    assert_eq!(body["api_key_configured"], true);
}

#[tokio::test]
async fn test_catalog_lists_personas_and_industries() {
    let (status, body) = send(ok_app(), "GET", "/api/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["personas"].as_array().unwrap().is_empty());
    assert!(!body["industries"].as_array().unwrap().is_empty());
    assert_eq!(body["personas"][0]["id"], "cfo");
}

#[tokio::test]
async fn test_start_session_unknown_industry() {
    let (status, body) = send(
        ok_app(),
        "POST",
        "/api/sessions",
        Some(json!({"persona": "cfo", "industry": "space"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("space"));
}

#[tokio::test]
async fn test_turn_round_trip() {
    let conversation = started(ok_app()).await;
    assert_eq!(conversation["turns"].as_array().unwrap().len(), 2);

    let (status, body) = send(
        ok_app(),
        "POST",
        "/api/sessions/turn",
        Some(json!({"conversation": conversation, "message": "What keeps you up at night?"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let turns = body["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[2]["speaker"], "user");
    assert_eq!(turns[3]["speaker"], "prospect");
    assert_eq!(turns[3]["text"], "Tell me more.");
    assert_eq!(
        body["rubric"],
        json!({"S": true, "O": false, "L": false, "V": false, "E": false})
    );
}

#[tokio::test]
async fn test_turn_failure_returns_conversation_with_user_turn() {
    let conversation = started(ok_app()).await;
    let failing = app(Err(BridgeError::RateLimited {
        attempts: 3,
        message: "Slow down".to_string(),
    }));

    let (status, body) = send(
        failing,
        "POST",
        "/api/sessions/turn",
        Some(json!({"conversation": conversation, "message": "Hello?"})),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(body["error"].as_str().unwrap().contains("Slow down"));
    let turns = body["conversation"]["turns"].as_array().unwrap();
    assert_eq!(turns.len(), 3);
    assert_eq!(turns[2]["text"], "Hello?");
}

#[tokio::test]
async fn test_missing_key_surfaces_as_server_error() {
    let conversation = started(ok_app()).await;
    let unconfigured = app(Err(BridgeError::Configuration(
        "ANTHROPIC_API_KEY is not set".to_string(),
    )));

    let (status, body) = send(
        unconfigured,
        "POST",
        "/api/sessions/turn",
        Some(json!({"conversation": conversation, "message": "Hi"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("ANTHROPIC_API_KEY"));
}

#[tokio::test]
async fn test_finish_then_turn_conflicts() {
    let conversation = started(ok_app()).await;

    let (status, finished) = send(
        ok_app(),
        "POST",
        "/api/sessions/finish",
        Some(json!({"conversation": conversation})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(finished["finished"], true);
    assert_eq!(
        finished["rubric"],
        json!({"S": true, "O": true, "L": true, "V": true, "E": true})
    );
    assert_eq!(finished["turns"].as_array().unwrap().last().unwrap()["speaker"], "coach");

    let (status, _) = send(
        ok_app(),
        "POST",
        "/api/sessions/turn",
        Some(json!({"conversation": finished, "message": "Wait"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
