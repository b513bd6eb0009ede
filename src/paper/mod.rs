//! Full paper assembly on top of the section generator.
//!
//! [`PaperService::generate_paper`] produces the title and each body section
//! through [`ContentGenerationService`], attaches formatted citations and a
//! domain classification, and keeps the result in a [`PaperStore`].
//! Outlines and passage rewrites go through the same provider chain.

mod store;

pub use store::PaperStore;

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::analysis::{
    peer_review, DomainClassifier, PeerReview, PlagiarismReport, QualityAnalyzer, RiskLevel,
};
use crate::citations::{format_all, CitationError, CitationService};
use crate::config::Config;
use crate::generation::{
    offline_outline, outline_prompt, ContentGenerationService, Enhancement, DEFAULT_PAPER_TYPE,
};
use crate::models::{
    GeneratedPaper, GenerationRequest, GenerationSource, PaperMetadata, PaperRequest,
    PaperSection, PaperSummary, SectionKind,
};
use crate::providers::{ProviderError, ProviderRegistry};
use crate::utils::{validate_text, validate_topic, ValidationError};

/// Citations fetched for every paper
pub const PAPER_CITATIONS: usize = 3;

/// Errors from paper operations
#[derive(Debug, thiserror::Error)]
pub enum PaperError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Paper not found: {0}")]
    NotFound(Uuid),

    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Citation setup failed: {0}")]
    Citation(#[from] CitationError),
}

/// One row of the plagiarism history
#[derive(Debug, Clone, Serialize)]
pub struct PlagiarismHistoryEntry {
    pub paper_id: Uuid,
    pub title: String,
    pub plagiarism_score: u32,
    pub status: RiskLevel,
    pub checked_at: String,
}

/// Structured outline for a planned paper
#[derive(Debug, Clone, Serialize)]
pub struct Outline {
    pub topic: String,
    pub paper_type: String,
    pub outline: String,
    pub source: GenerationSource,
}

/// A passage rewritten in one [`Enhancement`] mode
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedText {
    pub mode: Enhancement,
    pub original: String,
    pub enhanced: String,
    pub source: GenerationSource,
}

/// Assembles, stores and retrieves generated papers
#[derive(Debug, Clone)]
pub struct PaperService {
    generator: Arc<ContentGenerationService>,
    citations: Arc<CitationService>,
    classifier: DomainClassifier,
    store: Arc<PaperStore>,
}

impl PaperService {
    pub fn new(
        generator: Arc<ContentGenerationService>,
        citations: Arc<CitationService>,
        classifier: DomainClassifier,
    ) -> Self {
        Self {
            generator,
            citations,
            classifier,
            store: Arc::new(PaperStore::new()),
        }
    }

    /// Wire providers, citation sources and the classifier from config
    pub fn from_config(config: &Config) -> Result<Self, PaperError> {
        let registry = ProviderRegistry::from_config(config)?;
        let generator =
            ContentGenerationService::from_registry(&registry, config.generation.clone());
        let citations = CitationService::from_config(config)?;

        let classifier = match registry.configured().first() {
            Some(provider) => DomainClassifier::with_provider(Arc::clone(provider)),
            None => DomainClassifier::new(),
        };

        Ok(Self::new(Arc::new(generator), Arc::new(citations), classifier))
    }

    /// No providers or citation APIs; everything comes from offline templates
    pub fn offline() -> Self {
        Self::new(
            Arc::new(ContentGenerationService::offline_only()),
            Arc::new(CitationService::offline_only()),
            DomainClassifier::new(),
        )
    }

    pub fn generator(&self) -> &ContentGenerationService {
        &self.generator
    }

    pub fn citations(&self) -> &CitationService {
        &self.citations
    }

    pub fn classifier(&self) -> &DomainClassifier {
        &self.classifier
    }

    pub fn store(&self) -> &PaperStore {
        &self.store
    }

    /// Generate, store and return a full paper
    pub async fn generate_paper(&self, request: PaperRequest) -> Result<GeneratedPaper, PaperError> {
        let topic = validate_topic(&request.topic)?;
        tracing::info!(topic = %topic, sections = request.sections.len(), "Generating paper");

        let section_request = |kind: SectionKind| {
            GenerationRequest::new(topic.clone(), kind)
                .detail_level(request.detail_level)
                .keywords(request.keywords.iter().cloned())
                .field(request.field.clone())
        };

        let title = self.generator.generate(&section_request(SectionKind::Title)).await;

        let mut sections: Vec<PaperSection> = Vec::new();
        for kind in &request.sections {
            if *kind == SectionKind::Title
                || kind.is_custom()
                || sections.iter().any(|s| &s.kind == kind)
            {
                tracing::debug!(section = %kind, "Skipping section");
                continue;
            }
            let result = self.generator.generate(&section_request(kind.clone())).await;
            sections.push(PaperSection {
                kind: kind.clone(),
                text: result.text,
                source: result.source,
            });
        }

        let citations = self.citations.fetch_citations(&topic, PAPER_CITATIONS).await;
        let references = format_all(&citations, request.citation_style);
        let summary = summary_points(&topic);

        let title_text = title.text.trim().to_string();
        let abstract_text = sections
            .iter()
            .find(|s| s.kind == SectionKind::Abstract)
            .map(|s| s.text.as_str())
            .unwrap_or_default();
        let domain = self.classifier.classify(abstract_text, &title_text).await;

        let mut paper = GeneratedPaper {
            paper_id: Uuid::new_v4(),
            title: title_text,
            title_source: title.source,
            sections,
            citations,
            references,
            summary,
            metadata: PaperMetadata {
                topic,
                keywords: request.keywords.clone(),
                citation_style: request.citation_style,
                detail_level: request.detail_level,
                field: request.field.clone(),
                sections: request.sections.clone(),
                generated_at: chrono::Utc::now().to_rfc3339(),
                word_count: 0,
                research_domain: domain.domain,
                domain_confidence: domain.confidence.as_str().to_string(),
            },
            plagiarism_check: None,
        };
        paper.metadata.word_count = paper.word_count();

        tracing::info!(
            paper_id = %paper.paper_id,
            words = paper.metadata.word_count,
            domain = %paper.metadata.research_domain,
            "Paper generated"
        );
        self.store.insert(paper.clone()).await;
        Ok(paper)
    }

    /// Outline a paper of `paper_type` (blank means "research paper")
    pub async fn generate_outline(&self, topic: &str, paper_type: &str) -> Result<Outline, PaperError> {
        let topic = validate_topic(topic)?;
        let paper_type = match paper_type.trim() {
            "" => DEFAULT_PAPER_TYPE.to_string(),
            other => other.to_string(),
        };

        let result = self
            .generator
            .complete_or_else(&outline_prompt(&topic, &paper_type), "outline", || {
                offline_outline(&topic, &paper_type)
            })
            .await;

        Ok(Outline {
            topic,
            paper_type,
            outline: result.text,
            source: result.source,
        })
    }

    /// Rewrite a passage, falling back to rule-based edits offline
    pub async fn enhance_text(&self, text: &str, mode: Enhancement) -> Result<EnhancedText, PaperError> {
        let original = validate_text(text)?;
        let result = self
            .generator
            .complete_or_else(&mode.prompt(original), mode.id(), || mode.apply_offline(original))
            .await;

        Ok(EnhancedText {
            mode,
            original: original.to_string(),
            enhanced: result.text,
            source: result.source,
        })
    }

    /// Reviewer summary for a stored paper
    pub async fn peer_review(&self, id: &Uuid) -> Result<PeerReview, PaperError> {
        let paper = self.get(id).await?;
        let report = QualityAnalyzer::new().analyze_paper(&paper);
        tracing::info!(paper_id = %id, overall = report.overall_quality, "Peer review");
        Ok(peer_review(&report))
    }

    pub async fn get(&self, id: &Uuid) -> Result<GeneratedPaper, PaperError> {
        self.store.get(id).await.ok_or(PaperError::NotFound(*id))
    }

    pub async fn list(&self) -> Vec<PaperSummary> {
        self.store.list().await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), PaperError> {
        if self.store.remove(id).await {
            tracing::info!(paper_id = %id, "Paper deleted");
            Ok(())
        } else {
            Err(PaperError::NotFound(*id))
        }
    }

    pub async fn attach_plagiarism_report(
        &self,
        id: &Uuid,
        report: PlagiarismReport,
    ) -> Result<(), PaperError> {
        if self.store.set_plagiarism_report(id, report).await {
            Ok(())
        } else {
            Err(PaperError::NotFound(*id))
        }
    }

    /// Checked papers, most recent check first
    pub async fn plagiarism_history(&self) -> Vec<PlagiarismHistoryEntry> {
        let mut history: Vec<PlagiarismHistoryEntry> = self
            .store
            .checked()
            .await
            .into_iter()
            .filter_map(|paper| {
                let report = paper.plagiarism_check?;
                Some(PlagiarismHistoryEntry {
                    paper_id: paper.paper_id,
                    title: paper.title,
                    plagiarism_score: report.plagiarism_score,
                    status: report.status,
                    checked_at: report.checked_at,
                })
            })
            .collect();
        history.sort_by(|a, b| b.checked_at.cmp(&a.checked_at));
        history
    }
}

/// Fixed key-point bullets attached to every paper
fn summary_points(topic: &str) -> Vec<String> {
    vec![
        format!("Comprehensive analysis of {}", topic),
        "Review of current methodologies and approaches".to_string(),
        "Identification of key challenges and opportunities".to_string(),
        "Evidence-based findings and recommendations".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::estimate_plagiarism;
    use crate::config::GenerationConfig;
    use crate::models::{CitationOrigin, CitationStyle, GenerationSource};
    use crate::providers::MockProvider;

    #[tokio::test]
    async fn test_offline_paper() {
        let service = PaperService::offline();
        let paper = service
            .generate_paper(PaperRequest::new("graph coloring"))
            .await
            .unwrap();

        assert!(paper.title.contains("graph coloring"));
        assert!(paper.title_source.is_offline());
        assert_eq!(paper.sections.len(), 4);
        assert_eq!(paper.citations.len(), PAPER_CITATIONS);
        assert!(paper.citations.iter().all(|c| c.origin == CitationOrigin::Offline));
        assert_eq!(paper.references.len(), PAPER_CITATIONS);
        assert_eq!(paper.summary[0], "Comprehensive analysis of graph coloring");
        assert_eq!(paper.metadata.word_count, paper.word_count());
        assert_eq!(service.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_topic_rejected() {
        let service = PaperService::offline();
        let err = service.generate_paper(PaperRequest::new("   ")).await.unwrap_err();
        assert!(matches!(err, PaperError::Validation(ValidationError::EmptyTopic)));
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_title_and_custom_sections_skipped() {
        let service = PaperService::offline();
        let request = PaperRequest::new("soil microbiomes").sections(vec![
            SectionKind::Title,
            SectionKind::Methodology,
            SectionKind::parse("acknowledgements"),
            SectionKind::Methodology,
        ]);

        let paper = service.generate_paper(request).await.unwrap();
        assert_eq!(paper.sections.len(), 1);
        assert_eq!(paper.sections[0].kind, SectionKind::Methodology);
    }

    #[tokio::test]
    async fn test_provider_sections_and_ieee_references() {
        let text = "A sufficiently long provider-written passage about the topic at hand.";
        let provider = Arc::new(MockProvider::new("gemini", text));
        let generator = ContentGenerationService::new(
            vec![provider.clone()],
            GenerationConfig::default(),
        );
        let service = PaperService::new(
            Arc::new(generator),
            Arc::new(CitationService::offline_only()),
            DomainClassifier::new(),
        );

        let request = PaperRequest::new("graph coloring")
            .citation_style(CitationStyle::Ieee)
            .sections(vec![SectionKind::Abstract]);
        let paper = service.generate_paper(request).await.unwrap();

        assert_eq!(paper.title, text);
        assert_eq!(paper.sections[0].source, GenerationSource::provider("gemini", 0));
        assert_eq!(provider.calls(), 2);
        assert!(paper.references[0].starts_with("[1]"));
    }

    #[tokio::test]
    async fn test_get_delete_and_history() {
        let service = PaperService::offline();
        let paper = service
            .generate_paper(PaperRequest::new("coral reef bleaching"))
            .await
            .unwrap();
        let id = paper.paper_id;

        assert!(service.plagiarism_history().await.is_empty());
        let report = estimate_plagiarism(&paper.full_text());
        service.attach_plagiarism_report(&id, report.clone()).await.unwrap();

        let history = service.plagiarism_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].plagiarism_score, report.plagiarism_score);
        assert!(service.get(&id).await.unwrap().plagiarism_check.is_some());

        service.delete(&id).await.unwrap();
        assert!(matches!(service.get(&id).await, Err(PaperError::NotFound(_))));
        assert!(matches!(service.delete(&id).await, Err(PaperError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_offline_outline_defaults_paper_type() {
        let service = PaperService::offline();
        let outline = service.generate_outline(" graph coloring ", "  ").await.unwrap();

        assert_eq!(outline.topic, "graph coloring");
        assert_eq!(outline.paper_type, DEFAULT_PAPER_TYPE);
        assert_eq!(outline.source, GenerationSource::OfflineFallback);
        assert!(outline.outline.contains("I. Introduction"));

        let err = service.generate_outline("", "survey").await.unwrap_err();
        assert!(matches!(err, PaperError::Validation(ValidationError::EmptyTopic)));
    }

    #[tokio::test]
    async fn test_enhance_uses_provider_then_offline_rules() {
        let rewrite = "Caching reduces the mean latency of repeated requests considerably.";
        let provider = Arc::new(MockProvider::new("gemini", rewrite));
        let generator = ContentGenerationService::new(
            vec![provider.clone()],
            GenerationConfig::default(),
        );
        let service = PaperService::new(
            Arc::new(generator),
            Arc::new(CitationService::offline_only()),
            DomainClassifier::new(),
        );

        let enhanced = service
            .enhance_text("caches make stuff fast", Enhancement::AcademicTone)
            .await
            .unwrap();
        assert_eq!(enhanced.enhanced, rewrite);
        assert_eq!(enhanced.source, GenerationSource::provider("gemini", 0));
        assert_eq!(provider.calls(), 1);

        let offline = PaperService::offline()
            .enhance_text("the cache is fast and it's cheap", Enhancement::AcademicTone)
            .await
            .unwrap();
        assert_eq!(offline.enhanced, "The cache is fast and it is cheap.");
        assert_eq!(offline.source, GenerationSource::OfflineFallback);
    }

    #[tokio::test]
    async fn test_enhance_rejects_blank_text() {
        let err = PaperService::offline()
            .enhance_text("  ", Enhancement::Clarity)
            .await
            .unwrap_err();
        assert!(matches!(err, PaperError::Validation(ValidationError::EmptyText)));
    }

    #[tokio::test]
    async fn test_peer_review_of_stored_paper() {
        let service = PaperService::offline();
        let paper = service
            .generate_paper(PaperRequest::new("coral reef bleaching"))
            .await
            .unwrap();

        let review = service.peer_review(&paper.paper_id).await.unwrap();
        assert!(!review.strengths.is_empty());
        assert_eq!(review.grade, crate::analysis::grade(review.overall_score));
        assert_eq!(review.reviewer_comments.len(), 2);

        let missing = service.peer_review(&Uuid::new_v4()).await;
        assert!(matches!(missing, Err(PaperError::NotFound(_))));
    }
}
