//! Assembled paper model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Citation, CitationStyle, DetailLevel, GenerationSource, SectionKind};
use crate::analysis::PlagiarismReport;

/// Default research field when a request doesn't name one
pub const DEFAULT_FIELD: &str = "Computer Science";

/// Request for assembling a full paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRequest {
    pub topic: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub citation_style: CitationStyle,

    #[serde(default)]
    pub detail_level: DetailLevel,

    #[serde(default = "default_field")]
    pub field: String,

    /// Body sections to generate; the title is always generated
    #[serde(default = "default_sections")]
    pub sections: Vec<SectionKind>,
}

fn default_field() -> String {
    DEFAULT_FIELD.to_string()
}

/// Sections generated when the request doesn't list any
pub fn default_sections() -> Vec<SectionKind> {
    vec![
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Conclusion,
    ]
}

impl PaperRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            keywords: Vec::new(),
            citation_style: CitationStyle::default(),
            detail_level: DetailLevel::default(),
            field: default_field(),
            sections: default_sections(),
        }
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn citation_style(mut self, style: CitationStyle) -> Self {
        self.citation_style = style;
        self
    }

    pub fn detail_level(mut self, level: DetailLevel) -> Self {
        self.detail_level = level;
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    pub fn sections(mut self, sections: Vec<SectionKind>) -> Self {
        self.sections = sections;
        self
    }
}

/// One generated body section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSection {
    pub kind: SectionKind,
    pub text: String,
    pub source: GenerationSource,
}

/// Bookkeeping attached to every generated paper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub topic: String,
    pub keywords: Vec<String>,
    pub citation_style: CitationStyle,
    pub detail_level: DetailLevel,
    pub field: String,
    pub sections: Vec<SectionKind>,
    /// RFC 3339 UTC timestamp
    pub generated_at: String,
    pub word_count: usize,
    pub research_domain: String,
    pub domain_confidence: String,
}

/// A generated paper as kept in the paper store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPaper {
    pub paper_id: Uuid,
    pub title: String,
    pub title_source: GenerationSource,
    pub sections: Vec<PaperSection>,
    pub citations: Vec<Citation>,
    /// Citations formatted in the requested style
    pub references: Vec<String>,
    pub summary: Vec<String>,
    pub metadata: PaperMetadata,
    #[serde(default)]
    pub plagiarism_check: Option<PlagiarismReport>,
}

impl GeneratedPaper {
    /// Text of a section, if it was generated
    pub fn section(&self, kind: &SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| &s.kind == kind)
            .map(|s| s.text.as_str())
    }

    /// Title and body text joined with spaces (references and metadata excluded)
    pub fn full_text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.sections.iter().map(|s| s.text.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Word count over title, body sections and summary bullets
    pub fn word_count(&self) -> usize {
        self.full_text().split_whitespace().count()
            + self
                .summary
                .iter()
                .map(|s| s.split_whitespace().count())
                .sum::<usize>()
    }

    pub fn summary_entry(&self) -> PaperSummary {
        PaperSummary {
            paper_id: self.paper_id,
            title: self.title.clone(),
            topic: self.metadata.topic.clone(),
            generated_at: self.metadata.generated_at.clone(),
            word_count: self.metadata.word_count,
        }
    }
}

/// Listing entry for stored papers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperSummary {
    pub paper_id: Uuid,
    pub title: String,
    pub topic: String,
    pub generated_at: String,
    pub word_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_request_defaults() {
        let request: PaperRequest = serde_json::from_str(r#"{"topic": "graph coloring"}"#).unwrap();
        assert_eq!(request.field, DEFAULT_FIELD);
        assert_eq!(request.citation_style, CitationStyle::Apa);
        assert_eq!(request.sections, default_sections());
        assert_eq!(request.detail_level, DetailLevel::Intermediate);
    }

    #[test]
    fn test_paper_request_builder() {
        let request = PaperRequest::new("quantum error correction")
            .keywords(["surface codes"])
            .citation_style(CitationStyle::Ieee)
            .sections(vec![SectionKind::Abstract]);

        assert_eq!(request.keywords, vec!["surface codes".to_string()]);
        assert_eq!(request.citation_style, CitationStyle::Ieee);
        assert_eq!(request.sections.len(), 1);
    }
}
