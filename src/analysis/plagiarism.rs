//! Advisory plagiarism estimate.
//!
//! The score is derived from an md5 digest of the text plus a few surface
//! features. It does not compare the text against any corpus and must not
//! be presented as a real similarity check; reports carry `advisory: true`.

use serde::{Deserialize, Serialize};

use crate::utils::text::count_phrase;
use crate::utils::{validate_text_length, ValidationError, MAX_ANALYSIS_CHARS, MIN_ANALYSIS_CHARS};

/// Stock phrases that nudge the estimate upwards
const COMMON_PHRASES: [&str; 4] = [
    "according to",
    "research shows",
    "studies indicate",
    "it is important",
];

const MAX_SCORE: u32 = 25;
const SOURCES_ABOVE: u32 = 15;

/// Risk band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        if score < 10 {
            RiskLevel::Low
        } else if score < 20 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// Display colour used by UIs
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }
}

/// Illustrative similar-source entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarSource {
    pub url: String,
    pub title: String,
    /// Percentage, e.g. "7%"
    pub similarity: String,
}

/// Result of a plagiarism estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    /// Estimated percentage, 2..=25
    pub plagiarism_score: u32,
    pub status: RiskLevel,
    pub color: String,
    pub word_count: usize,
    pub char_count: usize,
    #[serde(default)]
    pub sources: Vec<SimilarSource>,
    /// RFC 3339 UTC timestamp
    pub checked_at: String,
    pub method: String,
    /// Always true: the score is not a real comparison
    pub advisory: bool,
}

/// Sum of the first eight hex digits of the md5 digest
fn digest_sum(text: &str) -> u32 {
    format!("{:x}", md5::compute(text.as_bytes()))
        .chars()
        .take(8)
        .filter_map(|c| c.to_digit(16))
        .sum()
}

/// Estimate a plagiarism score for `text`
///
/// Identical text always yields the same score and sources. Length limits
/// are enforced by callers.
pub fn estimate_plagiarism(text: &str) -> PlagiarismReport {
    let word_count = text.split_whitespace().count();
    let char_count = text.chars().count();
    let hash_sum = digest_sum(text);

    let mut score = hash_sum % 12 + 2;
    if word_count > 1000 {
        score += 3;
    } else if word_count > 500 {
        score += 1;
    }

    let phrases = COMMON_PHRASES
        .iter()
        .filter(|p| count_phrase(text, p) > 0)
        .count() as u32;
    score += phrases.min(5);

    let score = score.min(MAX_SCORE);
    let status = RiskLevel::from_score(score);

    let sources = if score > SOURCES_ABOVE {
        vec![
            SimilarSource {
                url: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC8234567/".to_string(),
                title: "Similar Research Paper on Related Topic".to_string(),
                similarity: format!("{}%", hash_sum % 10 + 5),
            },
            SimilarSource {
                url: "https://arxiv.org/abs/2301.12345".to_string(),
                title: "Academic Paper with Similar Content".to_string(),
                similarity: format!("{}%", hash_sum % 6 + 3),
            },
        ]
    } else {
        Vec::new()
    };

    PlagiarismReport {
        plagiarism_score: score,
        status,
        color: status.color().to_string(),
        word_count,
        char_count,
        sources,
        checked_at: chrono::Utc::now().to_rfc3339(),
        method: "hash_estimate".to_string(),
        advisory: true,
    }
}

/// Validate length, then estimate
pub fn check_text(text: &str) -> Result<PlagiarismReport, ValidationError> {
    let text = validate_text_length(text, MIN_ANALYSIS_CHARS, MAX_ANALYSIS_CHARS)?;
    Ok(estimate_plagiarism(text))
}

/// Per-item outcome of a batch check
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub text_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PlagiarismReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check several texts; invalid items are reported, not fatal
pub fn check_batch<S: AsRef<str>>(texts: &[S]) -> Vec<BatchEntry> {
    texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let text = text.as_ref();
            let mut text_preview: String = text.chars().take(100).collect();
            if text.chars().count() > 100 {
                text_preview.push_str("...");
            }

            match check_text(text) {
                Ok(report) => BatchEntry {
                    index,
                    text_preview,
                    report: Some(report),
                    error: None,
                },
                Err(e) => {
                    tracing::debug!(index, error = %e, "Skipping batch item");
                    BatchEntry {
                        index,
                        text_preview,
                        report: None,
                        error: Some("Text too short or invalid format".to_string()),
                    }
                }
            }
        })
        .collect()
}

/// Limits and thresholds reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct PlagiarismSettings {
    pub min_text_length: usize,
    pub max_text_length: usize,
    pub supported_languages: Vec<&'static str>,
    pub low_risk_below: u32,
    pub medium_risk_below: u32,
    pub max_score: u32,
}

impl Default for PlagiarismSettings {
    fn default() -> Self {
        Self {
            min_text_length: MIN_ANALYSIS_CHARS,
            max_text_length: MAX_ANALYSIS_CHARS,
            supported_languages: vec!["en"],
            low_risk_below: 10,
            medium_risk_below: 20,
            max_score: MAX_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Graph coloring assigns colors to vertices so that adjacent vertices differ. \
                          According to classic results, the problem is NP-hard in general.";

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate_plagiarism(SAMPLE);
        let b = estimate_plagiarism(SAMPLE);
        assert_eq!(a.plagiarism_score, b.plagiarism_score);
        assert_eq!(a.sources, b.sources);
        assert!(a.advisory);
    }

    #[test]
    fn test_score_bounds() {
        for text in [SAMPLE, "x", &"word ".repeat(1200)] {
            let report = estimate_plagiarism(text);
            assert!((2..=MAX_SCORE).contains(&report.plagiarism_score));
            assert_eq!(report.color, report.status.color());
            assert_eq!(report.sources.is_empty(), report.plagiarism_score <= SOURCES_ABOVE);
        }
    }

    #[test]
    fn test_score_formula() {
        let hash_sum = digest_sum(SAMPLE);
        // one common phrase, fewer than 500 words
        let expected = (hash_sum % 12 + 2 + 1).min(MAX_SCORE);
        assert_eq!(estimate_plagiarism(SAMPLE).plagiarism_score, expected);
    }

    #[test]
    fn test_check_text_enforces_length() {
        assert!(matches!(
            check_text("too short"),
            Err(ValidationError::TextTooShort { min: 50, .. })
        ));
        assert!(check_text(SAMPLE).is_ok());
    }

    #[test]
    fn test_batch_reports_per_item() {
        let entries = check_batch(&[SAMPLE, "tiny"]);
        assert_eq!(entries.len(), 2);
        assert!(entries[0].report.is_some());
        assert_eq!(entries[1].error.as_deref(), Some("Text too short or invalid format"));
        assert_eq!(entries[1].text_preview, "tiny");
        assert!(entries[0].text_preview.ends_with("..."));
    }

    #[test]
    fn test_risk_levels() {
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(10), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::High);
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium Risk\"");
    }
}
