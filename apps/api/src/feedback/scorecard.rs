//! Scorecard — the rating overview shown next to a feedback document.
//!
//! Prefers the structured summary when the raw output carried a valid one;
//! otherwise reads ratings back out of the normalized headings.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feedback::categories::CanonicalCategory;
use crate::feedback::normalizer::normalize;
use crate::feedback::summary::parse_summary;

static HEADING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^##\s+(.+?)(?::\s*(\d{1,2})/10)?\s*$")
        .expect("HEADING_PATTERN regex should compile")
});
static OVERALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\W*overall rating:\s*(\d{1,2})/10").expect("OVERALL_PATTERN regex should compile")
});

const STRONG_THRESHOLD: f64 = 8.0;
const MODERATE_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Strong,
    Moderate,
    NeedsWork,
}

impl RatingBand {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= STRONG_THRESHOLD {
            RatingBand::Strong
        } else if rating >= MODERATE_THRESHOLD {
            RatingBand::Moderate
        } else {
            RatingBand::NeedsWork
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band: Option<RatingBand>,
}

impl CategoryScore {
    fn new(name: String, rating: Option<f64>, summary: Option<String>) -> Self {
        Self {
            name,
            rating,
            summary,
            band: rating.map(RatingBand::for_rating),
        }
    }

    /// Canonical categories first, in table order; anything else after them.
    fn sort_key(&self) -> usize {
        CanonicalCategory::from_name(&self.name)
            .map(CanonicalCategory::position)
            .unwrap_or(CanonicalCategory::ALL.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
    pub categories: Vec<CategoryScore>,
}

impl Scorecard {
    /// Builds a scorecard from raw model output or an already normalized document.
    pub fn from_feedback(content: &str) -> Self {
        if let Some(summary) = parse_summary(content).summary {
            return Self::sorted(
                Some(summary.overall_rating),
                summary
                    .categories
                    .into_iter()
                    .map(|c| CategoryScore::new(c.name, Some(c.rating), Some(c.summary)))
                    .collect(),
            );
        }
        Self::from_markdown(&normalize(content))
    }

    /// Reads overall and per-category ratings from normalized markdown.
    pub fn from_markdown(markdown: &str) -> Self {
        let overall_rating = OVERALL_PATTERN
            .captures(markdown)
            .and_then(|caps| caps[1].parse::<f64>().ok());

        let categories = HEADING_PATTERN
            .captures_iter(markdown)
            .filter(|caps| !OVERALL_PATTERN.is_match(&caps[0]))
            .map(|caps| {
                let rating = caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok());
                CategoryScore::new(caps[1].trim().to_string(), rating, None)
            })
            .collect();

        Self::sorted(overall_rating, categories)
    }

    fn sorted(overall_rating: Option<f64>, mut categories: Vec<CategoryScore>) -> Self {
        categories.sort_by_key(CategoryScore::sort_key);
        Self {
            overall_rating,
            categories,
        }
    }
}
