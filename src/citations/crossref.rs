//! CrossRef citation source.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::citations::{CitationError, CitationSource};
use crate::models::{Citation, CitationOrigin};
use crate::utils::{HttpClient, USER_AGENT};

/// Authors kept per entry
const MAX_AUTHORS: usize = 3;

/// CrossRef REST API works search
#[derive(Debug, Clone)]
pub struct CrossRefSource {
    client: HttpClient,
    base_url: String,
}

impl CrossRefSource {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self, CitationError> {
        // CrossRef routes identified clients to its polite pool
        let user_agent = format!("{} (mailto:crossref@crossref.org)", USER_AGENT);
        Ok(Self {
            client: HttpClient::with_user_agent(&user_agent, timeout)?
                .rate_limited(requests_per_second),
            base_url: base_url.into(),
        })
    }

    fn parse_item(item: CRItem) -> Option<Citation> {
        let title = item
            .title
            .into_iter()
            .find(|t| !t.trim().is_empty())?;

        let authors: Vec<String> = item
            .author
            .into_iter()
            .take(MAX_AUTHORS)
            .filter_map(|a| {
                let family = a.family?;
                Some(
                    format!("{} {}", a.given.unwrap_or_default(), family)
                        .trim()
                        .to_string(),
                )
            })
            .collect();
        if authors.is_empty() {
            return None;
        }

        let mut citation = Citation::new(title.trim(), authors, CitationOrigin::CrossRef);

        let year = item
            .published_print
            .and_then(|d| d.date_parts.into_iter().next())
            .and_then(|parts| parts.into_iter().next())
            .flatten();
        if let Some(year) = year {
            citation = citation.year(year);
        }
        if let Some(doi) = item.doi {
            citation = citation.doi(doi);
        }
        if let Some(journal) = item.container_title.into_iter().find(|j| !j.trim().is_empty()) {
            citation = citation.journal(journal);
        }
        Some(citation)
    }
}

#[async_trait]
impl CitationSource for CrossRefSource {
    fn id(&self) -> &str {
        "crossref"
    }

    fn name(&self) -> &str {
        "CrossRef"
    }

    async fn search(&self, topic: &str, limit: usize) -> Result<Vec<Citation>, CitationError> {
        let url = format!(
            "{}/works?query={}&rows={}&select=title,author,published-print,DOI,container-title",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(topic),
            limit
        );

        let response = self
            .client
            .throttled()
            .await
            .get(&url)
            .send()
            .await
            .map_err(|e| CitationError::Network(format!("Failed to search CrossRef: {}", e)))?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(CitationError::RateLimited("CrossRef".to_string()));
        }
        if !status.is_success() {
            return Err(CitationError::Api(format!(
                "CrossRef API returned status: {}",
                status
            )));
        }

        let data: CRResponse = response
            .json()
            .await
            .map_err(|e| CitationError::Parse(format!("Failed to parse JSON: {}", e)))?;

        Ok(data
            .message
            .items
            .into_iter()
            .filter_map(Self::parse_item)
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct CRResponse {
    message: CRMessage,
}

#[derive(Debug, Deserialize)]
struct CRMessage {
    #[serde(default)]
    items: Vec<CRItem>,
}

#[derive(Debug, Deserialize)]
struct CRItem {
    #[serde(default)]
    title: Vec<String>,
    #[serde(default)]
    author: Vec<CRAuthor>,
    #[serde(rename = "published-print")]
    published_print: Option<CRDate>,
    #[serde(rename = "DOI")]
    doi: Option<String>,
    #[serde(rename = "container-title", default)]
    container_title: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CRAuthor {
    given: Option<String>,
    family: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CRDate {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[tokio::test]
    async fn test_search_maps_items() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/works")
            .match_query(Matcher::UrlEncoded("rows".into(), "5".into()))
            .with_status(200)
            .with_body(
                r#"{"message":{"items":[
                    {"title":["Register Allocation via Coloring"],
                     "author":[{"given":"Gregory","family":"Chaitin"},{"name":"Consortium"}],
                     "published-print":{"date-parts":[[1982, 6]]},
                     "DOI":"10.1145/800230.806984",
                     "container-title":["SIGPLAN Notices"]},
                    {"title":["Anonymous Work"],"author":[]}
                ]}}"#,
            )
            .create_async()
            .await;

        let source = CrossRefSource::new(server.url(), Duration::from_secs(5), 10).unwrap();
        let citations = source.search("register allocation", 5).await.unwrap();
        mock.assert_async().await;

        assert_eq!(citations.len(), 1);
        let c = &citations[0];
        assert_eq!(c.authors, vec!["Gregory Chaitin".to_string()]);
        assert_eq!(c.year, Some(1982));
        assert_eq!(c.journal.as_deref(), Some("SIGPLAN Notices"));
        assert_eq!(c.origin, CitationOrigin::CrossRef);
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/works")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let source = CrossRefSource::new(server.url(), Duration::from_secs(5), 10).unwrap();
        let err = source.search("x", 3).await.unwrap_err();
        assert!(matches!(err, CitationError::Api(_)));
    }
}
