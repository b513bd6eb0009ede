//! Citation lookup and formatting.
//!
//! [`CitationService::fetch_citations`] queries each [`CitationSource`] in
//! order (Semantic Scholar, then CrossRef) and falls back to deterministic
//! offline citations when the APIs return too few results. Each networked
//! source throttles itself with a `governor` rate limiter.

mod crossref;
pub mod format;
mod offline;
mod semantic;

pub use crossref::CrossRefSource;
pub use format::{
    format_all, format_bibliography, format_citation, validate_citation, CitationValidation,
};
pub use offline::offline_citations;
pub use semantic::SemanticScholarSource;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{normalize_credential, Config};
use crate::models::Citation;

/// Results needed from the APIs before the offline set is skipped
pub const MIN_API_RESULTS: usize = 3;

/// A citation lookup backend
#[async_trait]
pub trait CitationSource: Send + Sync + std::fmt::Debug {
    /// Unique identifier (e.g. "semantic", "crossref")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Search for works about a topic
    async fn search(&self, topic: &str, limit: usize) -> Result<Vec<Citation>, CitationError>;
}

/// Errors that can occur when querying a citation source
#[derive(Debug, thiserror::Error)]
pub enum CitationError {
    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Non-success status from the API
    #[error("API error: {0}")]
    Api(String),

    /// Response could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for CitationError {
    fn from(err: reqwest::Error) -> Self {
        CitationError::Network(err.to_string())
    }
}

/// Fetches citations with API fallback
#[derive(Debug, Clone)]
pub struct CitationService {
    sources: Vec<Arc<dyn CitationSource>>,
}

impl CitationService {
    /// Create a service over sources in preference order
    pub fn new(sources: Vec<Arc<dyn CitationSource>>) -> Self {
        Self { sources }
    }

    /// Semantic Scholar then CrossRef, configured from [`Config`]
    pub fn from_config(config: &Config) -> Result<Self, CitationError> {
        let citations = &config.citations;
        let timeout = Duration::from_secs(citations.timeout_secs);

        let semantic = SemanticScholarSource::new(
            citations.semantic_scholar_base_url.clone(),
            normalize_credential(config.api_keys.semantic_scholar.as_deref()),
            timeout,
            citations.semantic_scholar_requests_per_second,
        )?;
        let crossref = CrossRefSource::new(
            citations.crossref_base_url.clone(),
            timeout,
            citations.crossref_requests_per_second,
        )?;

        Ok(Self::new(vec![Arc::new(semantic), Arc::new(crossref)]))
    }

    /// A service that only returns offline citations
    pub fn offline_only() -> Self {
        Self::new(Vec::new())
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.id()).collect()
    }

    /// Fetch up to `limit` citations for a topic; never fails
    ///
    /// API results are used once at least `min(3, limit)` have been
    /// collected; otherwise the offline set is returned instead.
    pub async fn fetch_citations(&self, topic: &str, limit: usize) -> Vec<Citation> {
        if limit == 0 {
            return Vec::new();
        }

        let needed = MIN_API_RESULTS.min(limit);
        let mut collected: Vec<Citation> = Vec::new();

        for source in &self.sources {
            match source.search(topic, limit).await {
                Ok(found) => {
                    tracing::debug!(source = source.id(), count = found.len(), "Citation search returned");
                    collected.extend(found);
                }
                Err(e) => {
                    tracing::warn!(source = source.id(), error = %e, "Citation search failed");
                }
            }

            if collected.len() >= needed {
                collected.truncate(limit);
                return collected;
            }
        }

        tracing::info!(topic, "Using offline citations");
        offline_citations(topic, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CitationOrigin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct FixedSource {
        id: &'static str,
        results: Option<usize>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(id: &'static str, results: Option<usize>) -> Arc<Self> {
            Arc::new(Self {
                id,
                results,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CitationSource for FixedSource {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.id
        }

        async fn search(&self, topic: &str, _limit: usize) -> Result<Vec<Citation>, CitationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.results {
                Some(n) => Ok((0..n)
                    .map(|i| {
                        Citation::new(format!("{} {}", topic, i), ["A Author"], CitationOrigin::CrossRef)
                    })
                    .collect()),
                None => Err(CitationError::Network("offline".into())),
            }
        }
    }

    #[tokio::test]
    async fn test_first_source_sufficient() {
        let first = FixedSource::new("semantic", Some(3));
        let second = FixedSource::new("crossref", Some(3));
        let service = CitationService::new(vec![first.clone(), second.clone()]);

        let citations = service.fetch_citations("graphs", 5).await;
        assert_eq!(citations.len(), 3);
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_sources_accumulate_and_truncate() {
        let first = FixedSource::new("semantic", Some(2));
        let second = FixedSource::new("crossref", Some(4));
        let service = CitationService::new(vec![first, second]);

        let citations = service.fetch_citations("graphs", 4).await;
        assert_eq!(citations.len(), 4);
    }

    #[tokio::test]
    async fn test_falls_back_to_offline() {
        let first = FixedSource::new("semantic", None);
        let second = FixedSource::new("crossref", Some(1));
        let service = CitationService::new(vec![first, second]);

        let citations = service.fetch_citations("graph coloring", 3).await;
        assert_eq!(citations.len(), 3);
        assert!(citations.iter().all(|c| c.origin == CitationOrigin::Offline));
    }

    #[tokio::test]
    async fn test_small_limit_lowers_threshold() {
        let service = CitationService::new(vec![FixedSource::new("semantic", Some(1))]);
        let citations = service.fetch_citations("graphs", 1).await;
        assert_eq!(citations[0].origin, CitationOrigin::CrossRef);
        assert!(service.fetch_citations("graphs", 0).await.is_empty());
    }
}
