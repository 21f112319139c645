use anyhow::{Context, Result};
use std::str::FromStr;

use crate::llm_client::DEFAULT_MODEL;
use crate::transcript::hume::DEFAULT_HUME_API_URL;
use crate::transcript::sanitizer::DEFAULT_MAX_MESSAGES;

pub const DEFAULT_STEP_LIMIT: u32 = 10;
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub hume_api_key: String,
    pub hume_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub feedback: FeedbackSettings,
}

/// Tunables for the feedback pipeline. Request options override these.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackSettings {
    pub model: String,
    pub max_messages: usize,
    /// Ceiling on generation round-trips per request.
    pub step_limit: u32,
    pub temperature: f32,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_messages: DEFAULT_MAX_MESSAGES,
            step_limit: DEFAULT_STEP_LIMIT,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = FeedbackSettings::default();

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            hume_api_key: require_env("HUME_API_KEY")?,
            hume_api_url: std::env::var("HUME_API_URL")
                .unwrap_or_else(|_| DEFAULT_HUME_API_URL.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            feedback: FeedbackSettings {
                model: std::env::var("FEEDBACK_MODEL").unwrap_or(defaults.model),
                max_messages: parse_env("FEEDBACK_MAX_MESSAGES", defaults.max_messages)?,
                step_limit: parse_env("FEEDBACK_STEP_LIMIT", defaults.step_limit)?,
                temperature: parse_env("FEEDBACK_TEMPERATURE", defaults.temperature)?,
            },
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
