//! Integration tests for paper-forge
//!
//! These tests drive the MCP tool registry end to end over the offline
//! backends, and the provider chain against mocked HTTP endpoints.

use paper_forge::config::{GenerationConfig, ProviderConfig};
use paper_forge::mcp::server::McpServer;
use paper_forge::mcp::{ToolError, ToolRegistry};
use paper_forge::models::{GenerationSource, SectionKind};
use paper_forge::providers::{GeminiProvider, OpenAiProvider, TextProvider};
use paper_forge::{ContentGenerationService, GenerationRequest, PaperService};
use serde_json::json;
use std::sync::Arc;

const GEMINI_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn gemini(base_url: &str) -> Arc<dyn TextProvider> {
    let config = ProviderConfig::new("gemini", "gemini-1.5-flash", base_url).api_key("g-key");
    Arc::new(GeminiProvider::new(config).unwrap())
}

fn openai(base_url: &str) -> Arc<dyn TextProvider> {
    let config = ProviderConfig::new("openai", "gpt-3.5-turbo", base_url).api_key("sk-live");
    Arc::new(OpenAiProvider::new(config).unwrap())
}

fn gemini_body(text: &str) -> String {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

fn openai_body(text: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": text}}]}).to_string()
}

#[test]
fn test_server_exposes_all_tools() {
    let server = McpServer::new(PaperService::offline()).unwrap();
    let names = server.tool_names();

    assert_eq!(names.len(), 21);
    for expected in [
        "generate_section",
        "generate_paper",
        "export_paper",
        "search_citations",
        "check_plagiarism",
        "classify_domain",
        "analyze_quality",
        "generate_outline",
        "enhance_section",
        "writing_suggestions",
        "peer_review",
        "latex_templates",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing tool {}", expected);
    }
}

#[tokio::test]
async fn test_offline_paper_lifecycle() {
    let registry = ToolRegistry::new(PaperService::offline());

    let generated = registry
        .execute(
            "generate_paper",
            json!({
                "topic": "neural network pruning",
                "keywords": ["sparsity", "compression"],
                "citation_style": "ieee",
                "sections": ["abstract", "introduction", "conclusion"]
            }),
        )
        .await
        .unwrap();
    let paper_id = generated["paper_id"].as_str().unwrap().to_string();
    let paper = &generated["paper"];
    assert_eq!(paper["sections"].as_array().unwrap().len(), 3);
    assert_eq!(paper["references"].as_array().unwrap().len(), 3);
    assert!(paper["references"][0].as_str().unwrap().starts_with("[1]"));

    let listed = registry.execute("list_papers", json!({})).await.unwrap();
    assert_eq!(listed["count"], 1);

    let latex = registry
        .execute(
            "export_paper",
            json!({"paper_id": paper_id, "format": "latex", "template": "ieee"}),
        )
        .await
        .unwrap();
    let content = latex["content"].as_str().unwrap();
    assert!(content.contains("\\documentclass"));
    assert!(content.contains("\\begin{thebibliography}"));
    assert!(latex["filename"].as_str().unwrap().ends_with(".tex"));

    let markdown = registry
        .execute("export_paper", json!({"paper_id": paper_id, "format": "markdown"}))
        .await
        .unwrap();
    assert!(markdown["content"].as_str().unwrap().contains("## Abstract"));

    let checked = registry
        .execute("check_paper_plagiarism", json!({"paper_id": paper_id}))
        .await
        .unwrap();
    assert!(checked["plagiarism_check"]["plagiarism_score"].as_u64().unwrap() <= 100);

    let history = registry.execute("plagiarism_history", json!({})).await.unwrap();
    assert_eq!(history["count"], 1);
    assert_eq!(history["history"][0]["paper_id"], paper_id.as_str());

    let quality = registry
        .execute("analyze_quality", json!({"paper_id": paper_id}))
        .await
        .unwrap();
    assert!(quality["overall_quality"].as_u64().unwrap() <= 100);

    registry
        .execute("delete_paper", json!({"paper_id": paper_id}))
        .await
        .unwrap();
    let err = registry
        .execute("get_paper", json!({"paper_id": paper_id}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
}

#[tokio::test]
async fn test_offline_writing_assistant_tools() {
    let registry = ToolRegistry::new(PaperService::offline());

    let outline = registry
        .execute("generate_outline", json!({"topic": "soil microbiomes", "paper_type": "review"}))
        .await
        .unwrap();
    assert_eq!(outline["paper_type"], "review");
    assert_eq!(outline["provider"], "offline_fallback");
    assert!(outline["outline"].as_str().unwrap().contains("II. Literature Review"));

    let enhanced = registry
        .execute(
            "enhance_section",
            json!({"text": "we can't sample every plot. the cost isn't small", "enhancement_type": "academic_tone"}),
        )
        .await
        .unwrap();
    assert_eq!(enhanced["enhanced"], "We cannot sample every plot. The cost is not small.");

    let generated = registry
        .execute("generate_paper", json!({"topic": "soil microbiomes"}))
        .await
        .unwrap();
    let paper_id = generated["paper_id"].as_str().unwrap();
    let review = registry
        .execute("peer_review", json!({"paper_id": paper_id}))
        .await
        .unwrap();
    let grade = review["review"]["grade"].as_str().unwrap();
    assert!(["A", "B", "C", "D", "F"].contains(&grade));
    assert!(!review["review"]["strengths"].as_array().unwrap().is_empty());

    let templates = registry.execute("latex_templates", json!({})).await.unwrap();
    assert_eq!(templates["templates"].as_array().unwrap().len(), 4);

    let err = registry
        .execute("writing_suggestions", json!({"section": "methodology"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));
}

#[tokio::test]
async fn test_tool_argument_errors() {
    let registry = ToolRegistry::new(PaperService::offline());

    let err = registry.execute("generate_paper", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));

    let err = registry
        .execute("check_plagiarism", json!({"text": "too short"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidParams(_)));

    let err = registry.execute("no_such_tool", json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
}

#[tokio::test]
async fn test_offline_citation_search_and_styles() {
    let registry = ToolRegistry::new(PaperService::offline());

    let found = registry
        .execute("search_citations", json!({"query": "protein folding", "limit": 2, "style": "mla"}))
        .await
        .unwrap();
    assert_eq!(found["formatted"].as_array().unwrap().len(), 2);

    let styles = registry.execute("citation_styles", json!({})).await.unwrap();
    assert_eq!(styles["styles"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_chain_falls_through_rate_limited_primary() {
    let mut primary = mockito::Server::new_async().await;
    let mut secondary = mockito::Server::new_async().await;

    let rate_limited = primary
        .mock("POST", GEMINI_PATH)
        .with_status(429)
        .with_body(r#"{"error":{"message":"Resource has been exhausted"}}"#)
        .create_async()
        .await;
    let answered = secondary
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(openai_body(
            "Pruning removes redundant weights while preserving accuracy on held-out data.",
        ))
        .create_async()
        .await;

    let service = ContentGenerationService::new(
        vec![gemini(&primary.url()), openai(&secondary.url())],
        GenerationConfig::default(),
    );
    let result = service
        .generate(&GenerationRequest::new("neural network pruning", SectionKind::Abstract))
        .await;

    assert_eq!(result.source, GenerationSource::provider("openai", 1));
    assert!(result.text.starts_with("Pruning removes"));
    rate_limited.assert_async().await;
    answered.assert_async().await;
}

#[tokio::test]
async fn test_short_reply_is_rejected() {
    let mut primary = mockito::Server::new_async().await;
    let mut secondary = mockito::Server::new_async().await;

    primary
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body("Too short."))
        .create_async()
        .await;
    secondary
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(openai_body("A sufficiently long introduction paragraph."))
        .create_async()
        .await;

    let service = ContentGenerationService::new(
        vec![gemini(&primary.url()), openai(&secondary.url())],
        GenerationConfig::default(),
    );
    let result = service
        .generate(&GenerationRequest::new("graph coloring", SectionKind::Introduction))
        .await;

    assert_eq!(result.source, GenerationSource::provider("openai", 1));
}

#[tokio::test]
async fn test_all_providers_failing_uses_offline_templates() {
    let mut primary = mockito::Server::new_async().await;
    let mut secondary = mockito::Server::new_async().await;

    primary
        .mock("POST", GEMINI_PATH)
        .with_status(500)
        .create_async()
        .await;
    secondary
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let service = ContentGenerationService::new(
        vec![gemini(&primary.url()), openai(&secondary.url())],
        GenerationConfig::default(),
    );
    let result = service
        .generate(&GenerationRequest::new("soil microbiomes", SectionKind::Conclusion))
        .await;

    assert_eq!(result.source, GenerationSource::OfflineFallback);
    assert!(result.text.chars().count() > 20);
}

#[tokio::test]
async fn test_paper_export_round_trip_through_file() {
    let papers = PaperService::offline();
    let paper = papers
        .generate_paper(paper_forge::PaperRequest::new("quantum error correction"))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.json");
    std::fs::write(&path, serde_json::to_string(&paper).unwrap()).unwrap();

    let loaded: paper_forge::GeneratedPaper =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.paper_id, paper.paper_id);
    assert_eq!(loaded.sections.len(), paper.sections.len());

    let doc = paper_forge::export::export_paper(
        &loaded,
        paper_forge::export::ExportFormat::Markdown,
    );
    assert!(doc.content.contains(&loaded.title));
}
