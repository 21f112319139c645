//! Interview feedback — orchestrates the full generation pipeline.
//!
//! Flow: fetch transcript → sanitize → build prompt → generate → normalize.
//!
//! The two collaborator calls are awaited once each. Their errors come back
//! to the caller unchanged; nothing here retries.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::FeedbackSettings;
use crate::feedback::normalizer::normalize;
use crate::feedback::prompts::{build_prompt, JobInfo, SYSTEM_INSTRUCTIONS};
use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
use crate::transcript::{sanitize_transcript, TranscriptError, TranscriptLimits, TranscriptSource};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Per-request overrides. Unset fields fall back to `FeedbackSettings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOptions {
    #[serde(default, alias = "model_name")]
    pub model_name: Option<String>,
    /// Tail window of transcript turns to include.
    #[serde(default, alias = "max_messages")]
    pub max_messages: Option<usize>,
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Ask the model for a leading JSON summary before the markdown.
    #[serde(default, alias = "include_json_summary")]
    pub include_json_summary: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[serde(alias = "chat_id")]
    pub chat_id: String,
    #[serde(alias = "job_info")]
    pub job_info: JobInfo,
    #[serde(alias = "user_name")]
    pub user_name: String,
    #[serde(default)]
    pub options: FeedbackOptions,
}

/// Failures of the two external calls, passed through untouched.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    Transcript(#[from] TranscriptError),

    #[error(transparent)]
    Generation(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates the normalized feedback document for one interview.
///
/// Steps:
/// 1. `transcripts.fetch()` → raw chat turns
/// 2. `sanitize_transcript()` → bounded transcript
/// 3. `build_prompt()` → prompt text
/// 4. `generator.generate()` with the system instructions, step limit and temperature
/// 5. `normalize()` → final markdown
pub async fn generate_feedback(
    transcripts: &dyn TranscriptSource,
    generator: &dyn TextGenerator,
    settings: &FeedbackSettings,
    request: &FeedbackRequest,
) -> Result<String, FeedbackError> {
    let options = &request.options;

    // Step 1: Fetch raw turns
    let raw_turns = transcripts.fetch(&request.chat_id).await?;

    // Step 2: Sanitize
    let limits = TranscriptLimits {
        max_messages: options.max_messages.unwrap_or(settings.max_messages),
        ..Default::default()
    };
    let transcript = sanitize_transcript(&raw_turns, limits);
    info!(
        "Chat {}: {} raw turns, {} kept for prompt",
        request.chat_id,
        raw_turns.len(),
        transcript.len()
    );

    // Step 3: Build prompt
    let prompt = build_prompt(
        &transcript,
        &request.job_info,
        &request.user_name,
        options.include_json_summary,
    );

    // Step 4: Generate
    let model = options.model_name.as_deref().unwrap_or(&settings.model);
    let generated = generator
        .generate(GenerationRequest {
            model,
            prompt: &prompt,
            system: SYSTEM_INSTRUCTIONS,
            step_limit: settings.step_limit,
            temperature: Some(options.temperature.unwrap_or(settings.temperature)),
        })
        .await?;
    info!(
        "Chat {}: generated {} chars in {} step(s) with {}",
        request.chat_id,
        generated.text.len(),
        generated.steps,
        model
    );

    // Step 5: Normalize
    Ok(normalize(&generated.text))
}
