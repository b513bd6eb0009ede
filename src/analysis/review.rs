//! Reviewer-style summary derived from a [`QualityReport`].

use serde::{Deserialize, Serialize};

use super::quality::QualityReport;

const MAX_POINTS: usize = 3;

/// Papers shorter than this are flagged as short
const MIN_WORDS: usize = 800;

/// Letter grade for an overall score
pub fn grade(score: u32) -> &'static str {
    match score {
        90.. => "A",
        80..=89 => "B",
        70..=79 => "C",
        60..=69 => "D",
        _ => "F",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub content_quality: u32,
    pub structure: u32,
    pub citations: u32,
    pub originality: u32,
}

/// Strengths, weaknesses and comments for one paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerReview {
    pub overall_score: u32,
    pub grade: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_scores: DetailedScores,
    pub reviewer_comments: Vec<String>,
}

/// Build a review from quality metrics
pub fn peer_review(report: &QualityReport) -> PeerReview {
    PeerReview {
        overall_score: report.overall_quality,
        grade: grade(report.overall_quality).to_string(),
        strengths: strengths(report),
        weaknesses: weaknesses(report),
        suggestions: report.recommendations.clone(),
        detailed_scores: DetailedScores {
            content_quality: report.academic_tone_score,
            structure: report.structure_score,
            citations: report.citation_quality,
            originality: report.originality_index,
        },
        reviewer_comments: comments(report),
    }
}

fn strengths(report: &QualityReport) -> Vec<String> {
    let checks = [
        (report.citation_quality >= 80, "Excellent use of recent and relevant citations"),
        (report.structure_score >= 85, "Well-organized paper structure with clear sections"),
        (report.academic_tone_score >= 70, "Appropriate academic writing style and terminology"),
        (report.originality_index >= 75, "Good originality and unique insights"),
    ];
    let mut out: Vec<String> = checks
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, text)| text.to_string())
        .take(MAX_POINTS)
        .collect();
    if out.is_empty() {
        out.push("Clear presentation of research topic".to_string());
    }
    out
}

fn weaknesses(report: &QualityReport) -> Vec<String> {
    let checks = [
        (report.citation_quality < 60, "Citations could be more recent and comprehensive"),
        (report.structure_score < 70, "Paper structure could be improved with additional sections"),
        (report.academic_tone_score < 60, "Writing style could be more academic and formal"),
        (report.word_count < MIN_WORDS, "Paper length is below typical academic standards"),
    ];
    checks
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, text)| text.to_string())
        .take(MAX_POINTS)
        .collect()
}

fn comments(report: &QualityReport) -> Vec<String> {
    let verdict = match report.overall_quality {
        85.. => "This is a well-executed research paper with strong academic merit.",
        70..=84 => "Good research paper with some areas for improvement.",
        _ => "The paper shows potential but needs significant revision.",
    };
    vec![
        verdict.to_string(),
        format!(
            "The paper demonstrates {} level writing.",
            report.readability.level.as_str().to_lowercase()
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Readability, ReadingLevel};

    fn report(citations: u32, structure: u32, tone: u32, originality: u32, overall: u32, words: usize) -> QualityReport {
        QualityReport {
            citation_quality: citations,
            readability: Readability {
                score: 45.0,
                level: ReadingLevel::MiddleSchool,
            },
            structure_score: structure,
            originality_index: originality,
            academic_tone_score: tone,
            word_count: words,
            estimated_pages: 1,
            reading_time: "1 minutes".to_string(),
            overall_quality: overall,
            recommendations: vec!["Add more citations".to_string()],
        }
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(grade(95), "A");
        assert_eq!(grade(80), "B");
        assert_eq!(grade(79), "C");
        assert_eq!(grade(60), "D");
        assert_eq!(grade(12), "F");
    }

    #[test]
    fn test_strong_paper() {
        let review = peer_review(&report(90, 90, 80, 80, 88, 2400));
        assert_eq!(review.strengths.len(), 3);
        assert!(review.weaknesses.is_empty());
        assert_eq!(review.grade, "B");
        assert_eq!(
            review.reviewer_comments[0],
            "This is a well-executed research paper with strong academic merit."
        );
        assert_eq!(review.detailed_scores.content_quality, 80);
    }

    #[test]
    fn test_weak_paper() {
        let review = peer_review(&report(40, 50, 30, 20, 40, 300));
        assert_eq!(review.strengths, vec!["Clear presentation of research topic".to_string()]);
        assert_eq!(review.weaknesses.len(), 3);
        assert_eq!(review.suggestions, vec!["Add more citations".to_string()]);
        assert_eq!(
            review.reviewer_comments[1],
            "The paper demonstrates middle school level writing."
        );
    }
}
