//! Canonical feedback categories.
//!
//! This table is the only place the category list lives. The prompt directive,
//! the markdown normalizer and the scorecard sort all read from `ALL`, so the
//! instructions the model receives and the structure we rebuild cannot drift.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalCategory {
    CommunicationClarity,
    ConfidenceAndEmotionalState,
    ResponseQuality,
    PacingAndTiming,
    EngagementAndInteraction,
    RoleFitAndAlignment,
    OverallStrengthsAndAreasForImprovement,
}

impl CanonicalCategory {
    /// Every category, in the order the feedback document must present them.
    pub const ALL: [CanonicalCategory; 7] = [
        CanonicalCategory::CommunicationClarity,
        CanonicalCategory::ConfidenceAndEmotionalState,
        CanonicalCategory::ResponseQuality,
        CanonicalCategory::PacingAndTiming,
        CanonicalCategory::EngagementAndInteraction,
        CanonicalCategory::RoleFitAndAlignment,
        CanonicalCategory::OverallStrengthsAndAreasForImprovement,
    ];

    /// Display name, exactly as it appears in headings.
    pub fn name(self) -> &'static str {
        match self {
            CanonicalCategory::CommunicationClarity => "Communication Clarity",
            CanonicalCategory::ConfidenceAndEmotionalState => "Confidence and Emotional State",
            CanonicalCategory::ResponseQuality => "Response Quality",
            CanonicalCategory::PacingAndTiming => "Pacing and Timing",
            CanonicalCategory::EngagementAndInteraction => "Engagement and Interaction",
            CanonicalCategory::RoleFitAndAlignment => "Role Fit & Alignment",
            CanonicalCategory::OverallStrengthsAndAreasForImprovement => {
                "Overall Strengths & Areas for Improvement"
            }
        }
    }

    /// Lowercase match key used for prefix detection.
    pub fn key(self) -> &'static str {
        match self {
            CanonicalCategory::CommunicationClarity => "communication clarity",
            CanonicalCategory::ConfidenceAndEmotionalState => "confidence and emotional state",
            CanonicalCategory::ResponseQuality => "response quality",
            CanonicalCategory::PacingAndTiming => "pacing and timing",
            CanonicalCategory::EngagementAndInteraction => "engagement and interaction",
            CanonicalCategory::RoleFitAndAlignment => "role fit & alignment",
            CanonicalCategory::OverallStrengthsAndAreasForImprovement => {
                "overall strengths & areas for improvement"
            }
        }
    }

    /// Zero-based position in the canonical order.
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|&c| c == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Exact (case-insensitive, whitespace-trimmed) lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Prefix lookup: the first category whose lowercase name starts `lower`.
    pub(crate) fn match_prefix(lower: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| lower.starts_with(c.key()))
    }
}
