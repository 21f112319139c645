use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::feedback::normalizer::normalize;
use crate::feedback::pipeline::{generate_feedback, FeedbackRequest};
use crate::feedback::scorecard::Scorecard;
use crate::feedback::summary::{parse_summary, FeedbackSummary};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct FeedbackResponse {
    pub feedback: String,
    pub scorecard: Scorecard,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResponse {
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FeedbackSummary>,
    pub scorecard: Scorecard,
}

/// POST /api/v1/interviews/feedback
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    validate_request(&req)?;

    let feedback = generate_feedback(
        state.transcripts.as_ref(),
        state.generator.as_ref(),
        &state.feedback,
        &req,
    )
    .await?;
    let scorecard = Scorecard::from_markdown(&feedback);

    Ok(Json(FeedbackResponse {
        feedback,
        scorecard,
    }))
}

/// POST /api/v1/feedback/normalize
///
/// Re-normalizes previously generated feedback without calling any backend.
pub async fn handle_normalize(
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let summary = parse_summary(req.content.trim()).summary;
    let scorecard = Scorecard::from_feedback(&req.content);

    Ok(Json(NormalizeResponse {
        markdown: normalize(&req.content),
        summary,
        scorecard,
    }))
}

fn validate_request(req: &FeedbackRequest) -> Result<(), AppError> {
    if req.chat_id.trim().is_empty() {
        return Err(AppError::Validation("chatId must not be empty".to_string()));
    }
    if req.user_name.trim().is_empty() {
        return Err(AppError::Validation("userName must not be empty".to_string()));
    }
    if req.job_info.title.trim().is_empty() {
        return Err(AppError::Validation(
            "jobInfo.title must not be empty".to_string(),
        ));
    }
    if req.options.max_messages == Some(0) {
        return Err(AppError::Validation(
            "options.maxMessages must be at least 1".to_string(),
        ));
    }
    Ok(())
}
