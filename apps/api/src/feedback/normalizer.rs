//! Markdown normalization — rebuilds model feedback into the canonical
//! heading structure regardless of how closely the model followed the
//! requested layout.
//!
//! # Rules
//! - The first `Overall Rating: N/10` line (bold or heading markers allowed)
//!   moves to the top, followed by a blank line.
//! - A line whose text (after stripping `#` and bold markers) starts with a
//!   canonical category name becomes `## <Canonical Name>[: R/10]`.
//! - Lines after a category line, up to the next one, are that section's body.
//! - Lines before the first category line are dropped.
//! - No category lines at all: the text is returned as-is.
//! - Every bare `Strengths:` / `Areas for Improvement:` line with text on
//!   both sides becomes a bold label.
//!
//! Output ends with exactly one newline. On any output with at least one
//! canonical heading, `normalize` is a fixed point.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::feedback::categories::CanonicalCategory;
use crate::feedback::summary::parse_summary;

static OVERALL_RATING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^overall rating:\s*\d{1,2}/10").expect("OVERALL_RATING_PATTERN regex should compile")
});
static RATING_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}/10)").expect("RATING_TOKEN_PATTERN regex should compile")
});

const STRENGTHS_SENTINEL: &str = "strengths:";
const AREAS_SENTINEL: &str = "areas for improvement:";

/// Normalizes a feedback document. Pure; never fails.
pub fn normalize(raw: &str) -> String {
    let text = parse_summary(raw.trim()).markdown;
    let text = text.trim();

    let mut lines: Vec<&str> = text.lines().collect();

    let overall_idx = lines
        .iter()
        .position(|line| OVERALL_RATING_PATTERN.is_match(strip_markers(line)));
    let overall_line = overall_idx.map(|idx| lines.remove(idx).trim().to_string());

    let mut rebuilt: Vec<String> = Vec::new();
    if let Some(line) = overall_line {
        rebuilt.push(line);
        rebuilt.push(String::new());
    }

    let mut headings = 0;
    let mut i = 0;
    while i < lines.len() {
        let Some(category) = detect_category(lines[i]) else {
            i += 1;
            continue;
        };

        let heading = match RATING_TOKEN_PATTERN.find(lines[i]) {
            Some(rating) => format!("## {}: {}", category.name(), rating.as_str()),
            None => format!("## {}", category.name()),
        };
        rebuilt.push(heading);
        rebuilt.push(String::new());
        headings += 1;
        i += 1;

        let start = i;
        while i < lines.len() && detect_category(lines[i]).is_none() {
            i += 1;
        }
        let body = trim_blank_lines(&lines[start..i]);
        if !body.is_empty() {
            rebuilt.push(body.join("\n"));
            rebuilt.push(String::new());
        }
    }

    if headings == 0 {
        debug!("No canonical category headings found; returning feedback unmodified");
        return format!("{text}\n");
    }

    let joined = rebuilt.join("\n");
    let lines: Vec<&str> = joined.trim().split('\n').collect();
    let last = lines.len().saturating_sub(1);
    // Sentinels are only replaced between two newlines, never on the edges.
    let normalized: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(idx, &line)| {
            if idx == 0 || idx == last {
                line
            } else {
                bold_sentinel(line)
            }
        })
        .collect();

    format!("{}\n", normalized.join("\n").trim())
}

/// Maps a bare `Strengths:` / `Areas for Improvement:` line to its bold label.
fn bold_sentinel(line: &str) -> &str {
    if line.eq_ignore_ascii_case(STRENGTHS_SENTINEL) {
        "**Strengths**"
    } else if line.eq_ignore_ascii_case(AREAS_SENTINEL) {
        "**Areas for Improvement**"
    } else {
        line
    }
}

/// Strips leading whitespace, `#` heading markers and the surrounding bold
/// markers used for detection.
fn strip_markers(line: &str) -> &str {
    let line = line.trim_start().trim_start_matches('#').trim_start();
    let line = line
        .strip_prefix("**")
        .or_else(|| line.strip_prefix("__"))
        .unwrap_or(line);
    let line = line.trim_end();
    line.strip_suffix("**")
        .or_else(|| line.strip_suffix("__"))
        .unwrap_or(line)
        .trim()
}

fn detect_category(line: &str) -> Option<CanonicalCategory> {
    CanonicalCategory::match_prefix(&strip_markers(line).to_lowercase())
}

fn trim_blank_lines<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(start, |idx| idx + 1);
    &lines[start..end]
}
