//! Semantic Scholar citation source.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::citations::{CitationError, CitationSource};
use crate::models::{Citation, CitationOrigin};
use crate::utils::HttpClient;

/// Authors kept per entry
const MAX_AUTHORS: usize = 3;

/// Semantic Scholar Graph API paper search
#[derive(Debug, Clone)]
pub struct SemanticScholarSource {
    client: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

impl SemanticScholarSource {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self, CitationError> {
        Ok(Self {
            client: HttpClient::with_timeout(timeout)?.rate_limited(requests_per_second),
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Add API key to request headers if available
    fn add_api_key_if_present(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    fn parse_paper(paper: S2Paper) -> Option<Citation> {
        let title = paper.title.filter(|t| !t.trim().is_empty())?;
        let authors: Vec<String> = paper
            .authors
            .into_iter()
            .take(MAX_AUTHORS)
            .map(|a| a.name.unwrap_or_else(|| "Unknown".to_string()))
            .collect();
        if authors.is_empty() {
            return None;
        }

        let mut citation = Citation::new(title.trim(), authors, CitationOrigin::SemanticScholar);
        if let Some(year) = paper.year {
            citation = citation.year(year);
        }
        if let Some(doi) = paper.external_ids.and_then(|ids| ids.doi) {
            citation = citation.doi(doi);
        }
        if let Some(journal) = paper.journal.and_then(|j| j.name).filter(|n| !n.trim().is_empty()) {
            citation = citation.journal(journal);
        }
        Some(citation)
    }
}

#[async_trait]
impl CitationSource for SemanticScholarSource {
    fn id(&self) -> &str {
        "semantic"
    }

    fn name(&self) -> &str {
        "Semantic Scholar"
    }

    async fn search(&self, topic: &str, limit: usize) -> Result<Vec<Citation>, CitationError> {
        let url = format!(
            "{}/paper/search?query={}&limit={}&fields=title,authors,year,externalIds,journal",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(topic),
            limit
        );

        let client = self.client.throttled().await;
        let response = self
            .add_api_key_if_present(client.get(&url))
            .send()
            .await
            .map_err(|e| CitationError::Network(format!("Failed to search Semantic Scholar: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(CitationError::RateLimited("Semantic Scholar".to_string()));
        }
        if !status.is_success() {
            return Err(CitationError::Api(format!(
                "Semantic Scholar API returned status: {}",
                status
            )));
        }

        let data: S2SearchResponse = response
            .json()
            .await
            .map_err(|e| CitationError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(data.data.into_iter().filter_map(Self::parse_paper).collect())
    }
}

#[derive(Debug, Deserialize)]
struct S2SearchResponse {
    #[serde(default)]
    data: Vec<S2Paper>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct S2Paper {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<S2Author>,
    year: Option<i32>,
    external_ids: Option<S2ExternalIds>,
    journal: Option<S2Journal>,
}

#[derive(Debug, Deserialize)]
struct S2Author {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

#[derive(Debug, Deserialize)]
struct S2Journal {
    name: Option<String>,
}
