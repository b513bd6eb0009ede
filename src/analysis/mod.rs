//! Advisory analysis: research-domain classification, plagiarism estimate,
//! quality metrics and the peer review built on them.
//!
//! None of these compare against real corpora. Scores are deterministic
//! for identical input.

mod domain;
mod plagiarism;
mod quality;
mod review;

pub use domain::{
    classify_by_keywords, ClassificationMethod, Confidence, DomainClassification,
    DomainClassifier, DEFAULT_DOMAIN, DOMAIN_CATEGORIES,
};
pub use plagiarism::{
    check_batch, check_text, estimate_plagiarism, BatchEntry, PlagiarismReport,
    PlagiarismSettings, RiskLevel, SimilarSource,
};
pub use quality::{QualityAnalyzer, QualityReport, Readability, ReadingLevel};
pub use review::{grade, peer_review, DetailedScores, PeerReview};
