//! Transcript sanitization — turns raw chat turns into a bounded,
//! speaker-tagged transcript that is safe to embed in a prompt.
//!
//! Nothing in here fails. Malformed turns and feature values are dropped.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::transcript::{RawChatTurn, Speaker, TranscriptMessage, TurnType};

/// Appended to any text cut by `truncate`.
pub const TRUNCATION_MARKER: &str = " …[truncated]";

pub const DEFAULT_MAX_MESSAGES: usize = 400;
pub const DEFAULT_MAX_MESSAGE_TEXT_LENGTH: usize = 2_000;

/// Emotion feature keys longer than this are cut.
pub const MAX_EMOTION_KEY_LENGTH: usize = 40;

/// Bounds applied while sanitizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLimits {
    /// Tail window: only the last `max_messages` kept turns survive.
    pub max_messages: usize,
    /// Per-message character cap.
    pub max_text_length: usize,
}

impl Default for TranscriptLimits {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            max_text_length: DEFAULT_MAX_MESSAGE_TEXT_LENGTH,
        }
    }
}

/// Returns `value` unchanged if it has at most `max` characters, otherwise its
/// first `max` characters followed by `TRUNCATION_MARKER`.
pub fn truncate(value: &str, max: usize) -> String {
    match value.char_indices().nth(max) {
        None => value.to_string(),
        Some((cut, _)) => format!("{}{}", &value[..cut], TRUNCATION_MARKER),
    }
}

/// Builds the prompt transcript from raw turns.
///
/// Keeps user and agent messages with non-blank text, takes the last
/// `limits.max_messages` of them, trims and truncates each text, and attaches
/// sanitized emotion features to interviewee turns.
pub fn sanitize_transcript(turns: &[RawChatTurn], limits: TranscriptLimits) -> Vec<TranscriptMessage> {
    let kept: Vec<(Speaker, &RawChatTurn, &str)> = turns
        .iter()
        .filter_map(|turn| {
            let speaker = match turn.turn_type {
                TurnType::UserMessage => Speaker::Interviewee,
                TurnType::AgentMessage => Speaker::Interviewer,
                _ => return None,
            };
            let text = turn.message_text.as_deref()?.trim();
            (!text.is_empty()).then_some((speaker, turn, text))
        })
        .collect();

    let skip = kept.len().saturating_sub(limits.max_messages);

    kept.into_iter()
        .skip(skip)
        .map(|(speaker, turn, text)| TranscriptMessage {
            speaker,
            text: truncate(text, limits.max_text_length),
            emotion_features: match speaker {
                Speaker::Interviewee => sanitize_emotion_features(turn.emotion_features.as_ref()),
                Speaker::Interviewer => None,
            },
        })
        .collect()
}

/// Filters an emotion feature mapping down to finite values in `[0, 1]`,
/// rounded to 3 decimals, with keys capped at `MAX_EMOTION_KEY_LENGTH` chars.
///
/// Accepts a JSON object or a string holding a JSON object. Returns `None`
/// rather than an empty map when nothing qualifies.
pub fn sanitize_emotion_features(features: Option<&Value>) -> Option<BTreeMap<String, f64>> {
    let decoded;
    let object = match features? {
        Value::Object(map) => map,
        Value::String(raw) => {
            decoded = serde_json::from_str::<Value>(raw).ok()?;
            decoded.as_object()?
        }
        _ => return None,
    };

    let cleaned: BTreeMap<String, f64> = object
        .iter()
        .filter_map(|(key, value)| {
            let v = value.as_f64()?;
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return None;
            }
            let key: String = key.chars().take(MAX_EMOTION_KEY_LENGTH).collect();
            Some((key, round3(v)))
        })
        .collect();

    (!cleaned.is_empty()).then_some(cleaned)
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}
