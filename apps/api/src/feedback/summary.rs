//! Structured summary extraction.
//!
//! When asked for one, the model puts a JSON summary object before the
//! markdown. The object is located by brace depth: the first point where the
//! depth returns to zero ends it. Braces inside JSON string values are counted
//! too, so a summary text containing `{` or `}` misplaces the boundary and the
//! whole output is treated as markdown.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const MIN_RATING: f64 = 0.0;
const MAX_RATING: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub rating: f64,
    pub summary: String,
}

/// The optional structured half of a feedback document. Only ever surfaced
/// after `validate` has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub overall_rating: f64,
    pub categories: Vec<CategorySummary>,
}

/// Why a candidate summary was rejected.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("output does not start with a JSON object")]
    NotPresent,

    #[error("JSON object is never closed")]
    Unterminated,

    #[error("invalid summary JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("overall rating {0} is outside 0-10")]
    OverallRatingOutOfRange(f64),

    #[error("summary has no categories")]
    NoCategories,

    #[error("category {index} has an empty {field}")]
    EmptyField { index: usize, field: &'static str },

    #[error("category {index} rating {rating} is outside 0-10")]
    CategoryRatingOutOfRange { index: usize, rating: f64 },
}

impl FeedbackSummary {
    pub fn validate(&self) -> Result<(), SummaryError> {
        if !in_rating_range(self.overall_rating) {
            return Err(SummaryError::OverallRatingOutOfRange(self.overall_rating));
        }
        if self.categories.is_empty() {
            return Err(SummaryError::NoCategories);
        }
        for (index, category) in self.categories.iter().enumerate() {
            if category.name.is_empty() {
                return Err(SummaryError::EmptyField { index, field: "name" });
            }
            if category.summary.is_empty() {
                return Err(SummaryError::EmptyField {
                    index,
                    field: "summary",
                });
            }
            if !in_rating_range(category.rating) {
                return Err(SummaryError::CategoryRatingOutOfRange {
                    index,
                    rating: category.rating,
                });
            }
        }
        Ok(())
    }
}

fn in_rating_range(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Result of splitting a model output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFeedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FeedbackSummary>,
    pub markdown: String,
}

/// Splits a leading JSON summary from the markdown that follows it.
///
/// Never fails. Without a valid summary the whole `output` comes back
/// untouched as markdown.
pub fn parse_summary(output: &str) -> ParsedFeedback {
    match extract_summary(output) {
        Ok((summary, rest)) => ParsedFeedback {
            summary: Some(summary),
            markdown: rest.to_string(),
        },
        Err(SummaryError::NotPresent) => ParsedFeedback {
            summary: None,
            markdown: output.to_string(),
        },
        Err(e) => {
            debug!("Discarding feedback summary: {e}");
            ParsedFeedback {
                summary: None,
                markdown: output.to_string(),
            }
        }
    }
}

/// Strict form of `parse_summary`: the validated summary and the remainder
/// (leading whitespace trimmed), or the reason extraction failed.
pub fn extract_summary(output: &str) -> Result<(FeedbackSummary, &str), SummaryError> {
    let text = output.trim_start();
    if !text.starts_with('{') {
        return Err(SummaryError::NotPresent);
    }

    let end = json_object_end(text).ok_or(SummaryError::Unterminated)?;
    let summary: FeedbackSummary = serde_json::from_str(&text[..end])?;
    summary.validate()?;

    Ok((summary, text[end..].trim_start()))
}

/// Byte offset just past the brace that brings the depth back to zero.
fn json_object_end(text: &str) -> Option<usize> {
    let mut depth: i64 = 0;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        if depth == 0 {
            return Some(i + c.len_utf8());
        }
    }
    None
}
