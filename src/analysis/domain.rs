//! Research-domain classification.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::providers::TextProvider;
use crate::utils::text::{contains_term, truncate_chars};

/// Standard academic domains accepted from a provider
pub const DOMAIN_CATEGORIES: [&str; 22] = [
    "Computer Science",
    "Electrical Engineering",
    "Biomedical Engineering",
    "Mechanical Engineering",
    "Civil Engineering",
    "Chemical Engineering",
    "Materials Science",
    "Physics",
    "Mathematics",
    "Biology",
    "Medicine",
    "Neuroscience",
    "Psychology",
    "Economics",
    "Business",
    "Management",
    "Social Sciences",
    "Environmental Science",
    "Energy Systems",
    "Telecommunications",
    "Robotics",
    "Artificial Intelligence",
];

/// Keyword table for the fallback classifier; earlier rows win ties
const DOMAIN_KEYWORDS: [(&str, &[&str]); 10] = [
    (
        "Computer Science",
        &["algorithm", "software", "programming", "computing", "data structure"],
    ),
    (
        "Artificial Intelligence",
        &["ai", "machine learning", "neural network", "deep learning", "nlp"],
    ),
    (
        "Biomedical Engineering",
        &["biomedical", "medical device", "healthcare", "clinical"],
    ),
    (
        "Neuroscience",
        &["brain", "neural", "fmri", "eeg", "neuron", "cognitive"],
    ),
    (
        "Electrical Engineering",
        &["circuit", "signal", "electronics", "power", "voltage"],
    ),
    (
        "Mechanical Engineering",
        &["mechanical", "thermal", "fluid", "dynamics", "manufacturing"],
    ),
    ("Physics", &["quantum", "particle", "wave", "energy", "physics"]),
    (
        "Mathematics",
        &["theorem", "proof", "mathematical", "equation", "statistics"],
    ),
    (
        "Medicine",
        &["patient", "treatment", "diagnosis", "clinical", "medical"],
    ),
    (
        "Biology",
        &["cell", "gene", "protein", "organism", "biological"],
    ),
];

/// Domain used when nothing matches
pub const DEFAULT_DOMAIN: &str = "Computer Science";

/// How sure the classifier is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

/// Which path produced the classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMethod {
    AiClassification,
    KeywordMatching,
    Default,
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainClassification {
    pub domain: String,
    pub confidence: Confidence,
    pub method: ClassificationMethod,
    /// "[Domain: X]"
    pub formatted_output: String,
}

impl DomainClassification {
    fn new(domain: &str, confidence: Confidence, method: ClassificationMethod) -> Self {
        Self {
            domain: domain.to_string(),
            confidence,
            method,
            formatted_output: format!("[Domain: {}]", domain),
        }
    }
}

/// Assigns a paper to one of the standard academic domains
///
/// When a provider is attached it is asked first; its answer is only
/// accepted if it names a known category.
#[derive(Debug, Clone, Default)]
pub struct DomainClassifier {
    provider: Option<Arc<dyn TextProvider>>,
}

impl DomainClassifier {
    /// Keyword-only classifier
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Classify from body text and title
    pub async fn classify(&self, text: &str, title: &str) -> DomainClassification {
        if let Some(provider) = self.provider.as_ref().filter(|p| p.is_configured()) {
            let prompt = classification_prompt(text, title);
            match provider.complete(&prompt).await {
                Ok(reply) => {
                    if let Some(domain) = parse_domain_reply(&reply) {
                        return DomainClassification::new(
                            domain,
                            Confidence::High,
                            ClassificationMethod::AiClassification,
                        );
                    }
                    tracing::debug!(reply = %reply.trim(), "Provider named no known domain");
                }
                Err(e) => {
                    tracing::warn!(provider = provider.id(), kind = %e.kind(), error = %e, "Domain classification failed");
                }
            }
        }

        classify_by_keywords(text, title)
    }
}

fn classification_prompt(text: &str, title: &str) -> String {
    format!(
        "Identify the research domain of this paper the way digital libraries and citation styles \
         (IEEE, Springer, APA, MLA) classify research work.\n\n\
         Title: {}\n\
         Abstract/Content: {}\n\n\
         Choose exactly one of these domains: {}\n\n\
         Respond ONLY with: [Domain: YourDomainName]",
        title,
        truncate_chars(text, 1000),
        DOMAIN_CATEGORIES.join(", ")
    )
}

/// Extract a known category from "[Domain: X]"
fn parse_domain_reply(reply: &str) -> Option<&'static str> {
    let (_, rest) = reply.split_once("[Domain:")?;
    let (domain, _) = rest.split_once(']')?;
    let domain = domain.trim();
    DOMAIN_CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(domain))
        .copied()
}

/// Keyword-table classification
pub fn classify_by_keywords(text: &str, title: &str) -> DomainClassification {
    let content = format!("{} {}", title, text);

    let mut best: Option<(&str, usize)> = None;
    for (domain, keywords) in DOMAIN_KEYWORDS.iter() {
        let score = keywords.iter().filter(|k| contains_term(&content, k)).count();
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((*domain, score));
        }
    }

    match best {
        Some((domain, _)) => DomainClassification::new(
            domain,
            Confidence::Medium,
            ClassificationMethod::KeywordMatching,
        ),
        None => DomainClassification::new(
            DEFAULT_DOMAIN,
            Confidence::Low,
            ClassificationMethod::Default,
        ),
    }
}
