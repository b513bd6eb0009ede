//! Heuristic paper quality metrics.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::models::{Citation, GeneratedPaper, SectionKind};

static SENTENCE_END: OnceLock<Option<Regex>> = OnceLock::new();

const TONE_INDICATORS: [&str; 13] = [
    "research",
    "study",
    "analysis",
    "findings",
    "methodology",
    "literature",
    "evidence",
    "significant",
    "furthermore",
    "however",
    "therefore",
    "consequently",
    "moreover",
];

const MAX_RECOMMENDATIONS: usize = 3;

/// Readability band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingLevel {
    Elementary,
    #[serde(rename = "Middle School")]
    MiddleSchool,
    #[serde(rename = "High School")]
    HighSchool,
    College,
    Graduate,
}

impl ReadingLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 30.0 {
            ReadingLevel::Elementary
        } else if score < 50.0 {
            ReadingLevel::MiddleSchool
        } else if score < 60.0 {
            ReadingLevel::HighSchool
        } else if score < 70.0 {
            ReadingLevel::College
        } else {
            ReadingLevel::Graduate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Elementary => "Elementary",
            ReadingLevel::MiddleSchool => "Middle School",
            ReadingLevel::HighSchool => "High School",
            ReadingLevel::College => "College",
            ReadingLevel::Graduate => "Graduate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    /// 0..=100, one decimal
    pub score: f64,
    pub level: ReadingLevel,
}

/// Quality metrics for a paper or a piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub citation_quality: u32,
    pub readability: Readability,
    pub structure_score: u32,
    pub originality_index: u32,
    pub academic_tone_score: u32,
    pub word_count: usize,
    pub estimated_pages: usize,
    /// e.g. "3 minutes"
    pub reading_time: String,
    pub overall_quality: u32,
    pub recommendations: Vec<String>,
}

/// Which parts of a document are present, for the structure score
#[derive(Debug, Clone, Default)]
struct Outline {
    title: bool,
    abstract_: bool,
    introduction: bool,
    conclusion: bool,
    literature_review: bool,
    methodology: bool,
    results: bool,
    references: bool,
}

/// Scores papers on citations, readability, structure, originality and tone
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAnalyzer;

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze a stored paper
    pub fn analyze_paper(&self, paper: &GeneratedPaper) -> QualityReport {
        let has = |kind: SectionKind| {
            paper
                .section(&kind)
                .is_some_and(|text| !text.trim().is_empty())
        };
        let outline = Outline {
            title: !paper.title.trim().is_empty(),
            abstract_: has(SectionKind::Abstract),
            introduction: has(SectionKind::Introduction),
            conclusion: has(SectionKind::Conclusion),
            literature_review: has(SectionKind::LiteratureReview),
            methodology: has(SectionKind::Methodology),
            results: has(SectionKind::Results),
            references: !paper.references.is_empty(),
        };

        let mut text = paper.full_text();
        for bullet in &paper.summary {
            text.push(' ');
            text.push_str(bullet);
        }

        self.build_report(&text, &outline, &paper.citations)
    }

    /// Analyze free text with optional citations; no sections are assumed
    pub fn analyze_text(&self, text: &str, citations: &[Citation]) -> QualityReport {
        self.build_report(text, &Outline::default(), citations)
    }

    fn build_report(&self, text: &str, outline: &Outline, citations: &[Citation]) -> QualityReport {
        let word_count = text.split_whitespace().count();

        let citation_quality = citation_quality(citations);
        let readability = readability(text);
        let structure_score = structure_score(outline);
        let originality_index = originality_index(text);
        let academic_tone_score = academic_tone(text);

        let overall = citation_quality as f64 * 0.25
            + structure_score as f64 * 0.25
            + originality_index as f64 * 0.20
            + academic_tone_score as f64 * 0.15
            + readability.score * 0.15;

        let mut recommendations = Vec::new();
        if citation_quality < 70 {
            recommendations.push("Add more recent citations (2020+) to improve citation quality");
        }
        if structure_score < 80 {
            recommendations
                .push("Consider adding methodology or results sections for better structure");
        }
        if academic_tone_score < 60 {
            recommendations.push("Use more academic language and formal terminology");
        }
        if originality_index < 70 {
            recommendations.push("Enhance originality by adding unique insights and analysis");
        }
        if word_count < 500 {
            recommendations.push("Expand content to meet academic paper length standards");
        }
        recommendations.truncate(MAX_RECOMMENDATIONS);

        QualityReport {
            citation_quality,
            readability,
            structure_score,
            originality_index,
            academic_tone_score,
            word_count,
            estimated_pages: (word_count / 250).max(1),
            reading_time: format!("{} minutes", (word_count / 200).max(1)),
            overall_quality: overall.round() as u32,
            recommendations: recommendations.into_iter().map(String::from).collect(),
        }
    }
}

/// Average per-citation score: recency, DOI and journal bonuses
fn citation_quality(citations: &[Citation]) -> u32 {
    if citations.is_empty() {
        return 0;
    }

    let total: u32 = citations
        .iter()
        .map(|c| {
            let recency = match c.year {
                Some(y) if y >= 2020 => 20,
                Some(y) if y >= 2015 => 15,
                Some(_) => 10,
                // undated entries are treated as recent
                None => 20,
            };
            let doi = if c.doi.is_some() { 15 } else { 0 };
            let journal = if c.journal.is_some() { 10 } else { 0 };
            recency + doi + journal
        })
        .sum();

    (total / citations.len() as u32).min(100)
}

fn sentence_count(text: &str) -> usize {
    match SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]+").ok()) {
        Some(re) => re.split(text).filter(|s| !s.trim().is_empty()).count(),
        None => 1,
    }
}

fn readability(text: &str) -> Readability {
    let words: Vec<&str> = text.split_whitespace().collect();
    let sentences = sentence_count(text);
    if words.is_empty() || sentences == 0 {
        return Readability {
            score: 50.0,
            level: ReadingLevel::College,
        };
    }

    let avg_sentence = words.len() as f64 / sentences as f64;
    let complex = words.iter().filter(|w| w.chars().count() > 6).count();
    let complex_pct = complex as f64 / words.len() as f64 * 100.0;

    let score = (100.0 - avg_sentence * 1.5 - complex_pct).max(0.0);
    let score = (score * 10.0).round() / 10.0;

    Readability {
        score,
        level: ReadingLevel::from_score(score),
    }
}

fn structure_score(outline: &Outline) -> u32 {
    let required = [
        outline.title,
        outline.abstract_,
        outline.introduction,
        outline.conclusion,
    ];
    let bonus = [
        outline.literature_review,
        outline.methodology,
        outline.results,
    ];

    let mut score = required.iter().filter(|p| **p).count() as u32 * 25
        + bonus.iter().filter(|p| **p).count() as u32 * 5;
    if outline.references {
        score += 10;
    }
    score.min(100)
}

/// Vocabulary diversity scaled and capped at 90
fn originality_index(text: &str) -> u32 {
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return 50;
    }

    let unique: HashSet<&String> = words.iter().collect();
    let diversity = unique.len() as f64 / words.len() as f64 * 100.0;
    (diversity * 1.2).min(90.0).round() as u32
}

fn academic_tone(text: &str) -> u32 {
    let total = text.split_whitespace().count();
    if total == 0 {
        return 50;
    }

    let lower = text.to_lowercase();
    let present = TONE_INDICATORS
        .iter()
        .filter(|w| lower.contains(*w))
        .count();

    let ratio = present as f64 / total as f64 * 100.0;
    ((ratio * 10.0).round() as u32).min(100)
}
