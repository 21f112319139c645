//! Interview feedback: prompt construction, generation, and the
//! post-processing that turns model output into a stable document.

pub mod categories;
pub mod handlers;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod scorecard;
pub mod summary;

pub use categories::CanonicalCategory;
pub use normalizer::normalize;
pub use pipeline::{generate_feedback, FeedbackError, FeedbackOptions, FeedbackRequest};
pub use prompts::{build_prompt, ExperienceLevel, JobInfo, SYSTEM_INSTRUCTIONS};
pub use scorecard::{CategoryScore, RatingBand, Scorecard};
pub use summary::{parse_summary, CategorySummary, FeedbackSummary, ParsedFeedback};
