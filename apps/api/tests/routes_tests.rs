mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;
use interview_api::config::FeedbackSettings;
use interview_api::routes::build_router;
use interview_api::state::AppState;
use interview_api::transcript::TranscriptError;

fn app(transcripts: FakeTranscripts, generator: FakeGenerator) -> Router {
    build_router(AppState {
        transcripts: Arc::new(transcripts),
        generator: Arc::new(generator),
        feedback: FeedbackSettings::default(),
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn feedback_body() -> Value {
    json!({
        "chatId": "chat-42",
        "jobInfo": {
            "title": "Backend Engineer",
            "description": "Payment APIs",
            "experienceLevel": "senior"
        },
        "userName": "Jordan"
    })
}

#[tokio::test]
async fn test_health_reports_service() {
    let response = app(
        FakeTranscripts::with_turns(Vec::new()),
        FakeGenerator::returning(""),
    )
    .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "interview-api");
}

#[tokio::test]
async fn test_feedback_route_returns_document_and_scorecard() {
    let (status, body) = post_json(
        app(
            FakeTranscripts::with_turns(sample_turns()),
            FakeGenerator::returning(WELL_FORMED_FEEDBACK),
        ),
        "/api/v1/interviews/feedback",
        feedback_body(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["feedback"]
        .as_str()
        .unwrap()
        .starts_with("Overall Rating: 7/10"));
    assert_eq!(body["scorecard"]["overallRating"], 7.0);
    assert_eq!(
        body["scorecard"]["categories"][0]["name"],
        "Communication Clarity"
    );
    assert_eq!(body["scorecard"]["categories"][0]["band"], "strong");
}

#[tokio::test]
async fn test_feedback_route_rejects_blank_chat_id() {
    let mut request = feedback_body();
    request["chatId"] = json!("  ");
    let (status, body) = post_json(
        app(
            FakeTranscripts::with_turns(sample_turns()),
            FakeGenerator::returning(WELL_FORMED_FEEDBACK),
        ),
        "/api/v1/interviews/feedback",
        request,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_feedback_route_maps_missing_chat_to_404() {
    let (status, body) = post_json(
        app(
            FakeTranscripts::failing(TranscriptError::NotFound("chat-42".to_string())),
            FakeGenerator::returning(WELL_FORMED_FEEDBACK),
        ),
        "/api/v1/interviews/feedback",
        feedback_body(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_feedback_route_maps_generation_failure_to_500() {
    let (status, body) = post_json(
        app(
            FakeTranscripts::with_turns(sample_turns()),
            FakeGenerator::failing(),
        ),
        "/api/v1/interviews/feedback",
        feedback_body(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "LLM_ERROR");
}

#[tokio::test]
async fn test_normalize_route_extracts_summary() {
    let content = format!(
        "{{\"overallRating\":7,\"categories\":[{{\"name\":\"Response Quality\",\"rating\":6,\"summary\":\"Thin\"}}]}}\n\n{WELL_FORMED_FEEDBACK}"
    );
    let (status, body) = post_json(
        app(
            FakeTranscripts::with_turns(Vec::new()),
            FakeGenerator::returning(""),
        ),
        "/api/v1/feedback/normalize",
        json!({ "content": content }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["overallRating"], 7.0);
    assert_eq!(body["scorecard"]["categories"][0]["summary"], "Thin");
    assert!(body["markdown"]
        .as_str()
        .unwrap()
        .contains("## Response Quality: 6/10"));
}
