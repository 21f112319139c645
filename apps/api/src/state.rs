use std::sync::Arc;

use crate::config::FeedbackSettings;
use crate::llm_client::TextGenerator;
use crate::transcript::TranscriptSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Chat transcript backend. Default: HumeClient.
    pub transcripts: Arc<dyn TranscriptSource>,
    /// Text generation backend. Default: LlmClient.
    pub generator: Arc<dyn TextGenerator>,
    pub feedback: FeedbackSettings,
}
