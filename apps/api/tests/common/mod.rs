#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use interview_api::feedback::{ExperienceLevel, FeedbackOptions, FeedbackRequest, JobInfo};
use interview_api::llm_client::{GeneratedText, GenerationRequest, LlmError, TextGenerator};
use interview_api::transcript::{RawChatTurn, TranscriptError, TranscriptSource};

pub const WELL_FORMED_FEEDBACK: &str = "Overall Rating: 7/10
Communication Clarity: 8/10
You explained your ideas clearly.
Response Quality: 6/10
Answers lacked concrete examples.
Overall Strengths & Areas for Improvement
Strengths:
Clear structure.
Areas for Improvement:
More metrics.";

/// Returns a fixed list of turns, or a canned failure.
pub struct FakeTranscripts {
    pub turns: Vec<RawChatTurn>,
    pub fail_with: Mutex<Option<TranscriptError>>,
    pub requested: Mutex<Vec<String>>,
}

impl FakeTranscripts {
    pub fn with_turns(turns: Vec<RawChatTurn>) -> Self {
        Self {
            turns,
            fail_with: Mutex::new(None),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: TranscriptError) -> Self {
        Self {
            turns: Vec::new(),
            fail_with: Mutex::new(Some(err)),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

#[async_trait]
impl TranscriptSource for FakeTranscripts {
    async fn fetch(&self, chat_id: &str) -> Result<Vec<RawChatTurn>, TranscriptError> {
        self.requested.lock().unwrap().push(chat_id.to_string());
        if let Some(err) = self.fail_with.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.turns.clone())
    }
}

/// Owned copy of what the pipeline asked the generator for.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub system: String,
    pub step_limit: u32,
    pub temperature: Option<f32>,
}

pub struct FakeGenerator {
    pub output: String,
    pub fail: bool,
    pub recorded: Mutex<Vec<RecordedRequest>>,
}

impl FakeGenerator {
    pub fn returning(output: &str) -> Self {
        Self {
            output: output.to_string(),
            fail: false,
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            output: String::new(),
            fail: true,
            recorded: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.recorded
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("generator was never called")
    }

    pub fn calls(&self) -> usize {
        self.recorded.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<GeneratedText, LlmError> {
        self.recorded.lock().unwrap().push(RecordedRequest {
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
            system: request.system.to_string(),
            step_limit: request.step_limit,
            temperature: request.temperature,
        });
        if self.fail {
            return Err(LlmError::Api {
                status: 500,
                message: "upstream exploded".to_string(),
            });
        }
        Ok(GeneratedText {
            text: self.output.clone(),
            steps: 1,
        })
    }
}

pub fn user_turn(text: &str) -> RawChatTurn {
    serde_json::from_value(json!({ "type": "USER_MESSAGE", "messageText": text })).unwrap()
}

pub fn agent_turn(text: &str) -> RawChatTurn {
    serde_json::from_value(json!({ "type": "AGENT_MESSAGE", "messageText": text })).unwrap()
}

pub fn sample_turns() -> Vec<RawChatTurn> {
    vec![
        serde_json::from_value(json!({ "type": "SYSTEM_PROMPT", "messageText": "be nice" }))
            .unwrap(),
        agent_turn("Tell me about a project you are proud of."),
        serde_json::from_value(json!({
            "type": "USER_MESSAGE",
            "messageText": "I rebuilt our billing pipeline.",
            "emotionFeatures": "{\"Calmness\": 0.61234, \"Anxiety\": 1.7}"
        }))
        .unwrap(),
    ]
}

pub fn sample_request() -> FeedbackRequest {
    FeedbackRequest {
        chat_id: "chat-42".to_string(),
        job_info: JobInfo {
            title: "Backend Engineer".to_string(),
            description: "Build and operate payment APIs.".to_string(),
            experience_level: ExperienceLevel::Senior,
        },
        user_name: "Jordan".to_string(),
        options: FeedbackOptions::default(),
    }
}
