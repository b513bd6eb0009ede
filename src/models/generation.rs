//! Section generation request and result models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The academic-document section being generated
///
/// Parsing never fails: anything outside the recognized set becomes
/// [`SectionKind::Custom`] and is generated as a free-text section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Title,
    Abstract,
    Introduction,
    LiteratureReview,
    Methodology,
    Results,
    Discussion,
    Conclusion,
    Custom(String),
}

impl SectionKind {
    /// Recognized section kinds, in document order
    pub const STANDARD: [SectionKind; 8] = [
        SectionKind::Title,
        SectionKind::Abstract,
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Methodology,
        SectionKind::Results,
        SectionKind::Discussion,
        SectionKind::Conclusion,
    ];

    /// Parse a section name, normalizing case, spaces and hyphens
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "title" => SectionKind::Title,
            "abstract" => SectionKind::Abstract,
            "introduction" => SectionKind::Introduction,
            "literature_review" | "related_work" => SectionKind::LiteratureReview,
            "methodology" | "methods" => SectionKind::Methodology,
            "results" => SectionKind::Results,
            "discussion" => SectionKind::Discussion,
            "conclusion" | "conclusions" => SectionKind::Conclusion,
            _ => SectionKind::Custom(name.trim().to_string()),
        }
    }

    /// Machine identifier (snake_case)
    pub fn id(&self) -> &str {
        match self {
            SectionKind::Title => "title",
            SectionKind::Abstract => "abstract",
            SectionKind::Introduction => "introduction",
            SectionKind::LiteratureReview => "literature_review",
            SectionKind::Methodology => "methodology",
            SectionKind::Results => "results",
            SectionKind::Discussion => "discussion",
            SectionKind::Conclusion => "conclusion",
            SectionKind::Custom(name) => name,
        }
    }

    /// Human-readable heading, e.g. "Literature Review"
    pub fn heading(&self) -> String {
        self.id()
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SectionKind::Custom(_))
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl Serialize for SectionKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for SectionKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SectionKind::parse(&raw))
    }
}

/// Coarse length/depth control for generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl DetailLevel {
    /// Target word count used in prompts
    pub fn word_target(&self) -> usize {
        match self {
            DetailLevel::Beginner => 150,
            DetailLevel::Intermediate => 200,
            DetailLevel::Advanced => 300,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Beginner => "beginner",
            DetailLevel::Intermediate => "intermediate",
            DetailLevel::Advanced => "advanced",
        }
    }
}

impl FromStr for DetailLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(DetailLevel::Beginner),
            "intermediate" => Ok(DetailLevel::Intermediate),
            "advanced" => Ok(DetailLevel::Advanced),
            other => Err(format!(
                "Unknown detail level '{}' (expected beginner, intermediate or advanced)",
                other
            )),
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for generating one section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Paper topic (must be non-empty after trimming; checked by callers)
    pub topic: String,

    /// Section to generate
    pub section_kind: SectionKind,

    /// Target depth
    #[serde(default)]
    pub detail_level: DetailLevel,

    /// Focus keywords, in order
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Research field, e.g. "Computer Science"
    #[serde(default)]
    pub field: Option<String>,
}

impl GenerationRequest {
    /// Create a request with default detail level and no keywords
    pub fn new(topic: impl Into<String>, section_kind: SectionKind) -> Self {
        Self {
            topic: topic.into(),
            section_kind,
            detail_level: DetailLevel::default(),
            keywords: Vec::new(),
            field: None,
        }
    }

    pub fn detail_level(mut self, level: DetailLevel) -> Self {
        self.detail_level = level;
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Keywords joined with ", " (empty when there are none)
    pub fn keyword_list(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Field text, empty when absent
    pub fn field_text(&self) -> &str {
        self.field.as_deref().map(str::trim).unwrap_or("")
    }
}

/// Which path produced a section's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationSource {
    /// A networked provider; `rank` is its position in the chain (0 = primary)
    Provider { id: String, rank: usize },
    /// Deterministic offline templates
    OfflineFallback,
}

impl GenerationSource {
    pub fn provider(id: impl Into<String>, rank: usize) -> Self {
        GenerationSource::Provider {
            id: id.into(),
            rank,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self, GenerationSource::OfflineFallback)
    }

    /// Provider id, or `None` for the offline path
    pub fn provider_id(&self) -> Option<&str> {
        match self {
            GenerationSource::Provider { id, .. } => Some(id),
            GenerationSource::OfflineFallback => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            GenerationSource::Provider { id, .. } => id.clone(),
            GenerationSource::OfflineFallback => "offline_fallback".to_string(),
        }
    }
}

/// Generated section text and its provenance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub text: String,
    pub source: GenerationSource,
    /// Number of chars in `text`
    pub length_chars: usize,
}

impl GenerationResult {
    pub fn new(text: impl Into<String>, source: GenerationSource) -> Self {
        let text = text.into();
        let length_chars = text.chars().count();
        Self {
            text,
            source,
            length_chars,
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_parse() {
        assert_eq!(SectionKind::parse("Abstract"), SectionKind::Abstract);
        assert_eq!(
            SectionKind::parse("literature review"),
            SectionKind::LiteratureReview
        );
        assert_eq!(
            SectionKind::parse("future-work"),
            SectionKind::Custom("future-work".to_string())
        );
        assert!(SectionKind::parse("future-work").is_custom());
        assert!(!SectionKind::parse("methods").is_custom());
    }

    #[test]
    fn test_section_heading() {
        assert_eq!(SectionKind::LiteratureReview.heading(), "Literature Review");
        assert_eq!(
            SectionKind::Custom("threats_to_validity".into()).heading(),
            "Threats To Validity"
        );
    }

    #[test]
    fn test_word_targets_increase() {
        assert!(DetailLevel::Beginner.word_target() < DetailLevel::Intermediate.word_target());
        assert!(DetailLevel::Intermediate.word_target() < DetailLevel::Advanced.word_target());
    }

    #[test]
    fn test_result_length_counts_chars() {
        let result = GenerationResult::new("Réseaux", GenerationSource::OfflineFallback);
        assert_eq!(result.length_chars, 7);
    }

    #[test]
    fn test_section_kind_serde() {
        let json = serde_json::to_string(&SectionKind::LiteratureReview).unwrap();
        assert_eq!(json, "\"literature_review\"");

        let kind: SectionKind = serde_json::from_str("\"appendix\"").unwrap();
        assert_eq!(kind, SectionKind::Custom("appendix".into()));
    }

    #[test]
    fn test_keyword_list() {
        let req = GenerationRequest::new("graph coloring", SectionKind::Title)
            .keywords(["approximation", " ", "heuristics"]);
        assert_eq!(req.keyword_list(), "approximation, heuristics");
        assert_eq!(req.field_text(), "");
    }
}
