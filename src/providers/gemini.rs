//! Google Gemini provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::providers::{ProviderError, TextProvider};
use crate::utils::HttpClient;

/// Gemini `generateContent` client
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    config: ProviderConfig,
    client: HttpClient,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let client = HttpClient::with_timeout(config.timeout)?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiProvider {
    fn id(&self) -> &str {
        &self.config.id
    }

    fn name(&self) -> &str {
        "Google Gemini"
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Unavailable("GEMINI_API_KEY is not set".to_string()))?;

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        let response = self
            .client
            .client()
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::from_status("Gemini", status, &text));
        }

        let text = response.text().await?;
        let data: GenerateContentResponse = serde_json::from_str(&text)?;

        let content: String = data
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(ProviderError::MalformedResponse(
                "Gemini response contained no text".to_string(),
            ));
        }

        Ok(content)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn provider(base_url: &str, key: &str) -> GeminiProvider {
        let config = ProviderConfig::new("gemini", "gemini-1.5-flash", base_url).api_key(key);
        GeminiProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_complete_joins_parts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{ "parts": [{ "text": "Write a title" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"Graph Coloring "},{"text":"Revisited"}]}}]}"#,
            )
            .create_async()
            .await;

        let text = provider(&server.url(), "test-key")
            .complete("Write a title")
            .await
            .unwrap();

        assert_eq!(text, "Graph Coloring Revisited");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"message":"Resource has been exhausted (e.g. check quota)."}}"#)
            .create_async()
            .await;

        let err = provider(&server.url(), "test-key")
            .complete("prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::RateLimited(_)));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = provider(&server.url(), "test-key")
            .complete("prompt")
            .await
            .unwrap_err();

        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_makes_no_request() {
        let gemini = provider("http://127.0.0.1:9", "sk-test-key-placeholder");
        assert!(!gemini.is_configured());
        let err = gemini.complete("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
