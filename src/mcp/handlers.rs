//! Tool handlers backed by the paper service.

use serde_json::{json, Value};
use uuid::Uuid;

use super::tools::{ToolError, ToolHandler};
use crate::analysis::{check_batch, check_text, PlagiarismSettings, QualityAnalyzer};
use crate::citations::{format_all, format_citation, validate_citation};
use crate::export::{export_paper, template_catalog, ExportFormat};
use crate::generation::{writing_suggestions, Enhancement};
use crate::models::{
    default_sections, Citation, CitationStyle, DetailLevel, GenerationRequest, PaperRequest,
    SectionKind, DEFAULT_FIELD,
};
use crate::paper::PaperService;
use crate::utils::{parse_paper_id, validate_topic, MIN_ANALYSIS_CHARS};

/// Default and maximum number of citations for search_citations
const DEFAULT_CITATION_LIMIT: usize = 5;
const MAX_CITATION_LIMIT: usize = 20;

/// Maximum texts accepted by batch_check_plagiarism
const MAX_BATCH_TEXTS: usize = 20;

fn paper_id_arg(args: &Value) -> Result<Uuid, ToolError> {
    let id = args
        .get("paper_id")
        .and_then(|v| v.as_str())
        .ok_or("Missing 'paper_id' parameter")?;
    Ok(parse_paper_id(id)?)
}

/// Keywords as an array of strings or a comma-separated string
fn keywords_arg(args: &Value) -> Vec<String> {
    match args.get("keywords") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn detail_level_arg(args: &Value) -> Result<DetailLevel, ToolError> {
    match args
        .get("detail_level")
        .or_else(|| args.get("research_level"))
        .and_then(|v| v.as_str())
    {
        Some(level) => level.parse().map_err(ToolError::InvalidParams),
        None => Ok(DetailLevel::default()),
    }
}

fn style_arg(args: &Value, key: &str) -> Result<CitationStyle, ToolError> {
    match args.get(key).and_then(|v| v.as_str()) {
        Some(style) => style.parse().map_err(ToolError::InvalidParams),
        None => Ok(CitationStyle::default()),
    }
}

fn field_arg(args: &Value) -> Option<String> {
    args.get("field")
        .or_else(|| args.get("research_field"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Handler for generating a single section
#[derive(Debug)]
pub struct GenerateSectionHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for GenerateSectionHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;
        let topic = validate_topic(topic)?;

        let section = args
            .get("section")
            .or_else(|| args.get("section_kind"))
            .and_then(|v| v.as_str())
            .map(SectionKind::parse)
            .unwrap_or(SectionKind::Abstract);

        let mut request = GenerationRequest::new(topic, section)
            .detail_level(detail_level_arg(&args)?)
            .keywords(keywords_arg(&args));
        if let Some(field) = field_arg(&args) {
            request = request.field(field);
        }

        let result = self.papers.generator().generate(&request).await;

        Ok(json!({
            "section": request.section_kind,
            "text": result.text,
            "source": result.source,
            "provider": result.source.label(),
            "length_chars": result.length_chars,
            "word_count": result.word_count(),
        }))
    }
}

/// Handler for generating and storing a full paper
#[derive(Debug)]
pub struct GeneratePaperHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for GeneratePaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;

        let sections = match args.get("sections").and_then(|v| v.as_array()) {
            Some(items) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(SectionKind::parse)
                .collect(),
            None => default_sections(),
        };

        let request = PaperRequest::new(topic)
            .keywords(keywords_arg(&args))
            .citation_style(style_arg(&args, "citation_style")?)
            .detail_level(detail_level_arg(&args)?)
            .field(field_arg(&args).unwrap_or_else(|| DEFAULT_FIELD.to_string()))
            .sections(sections);

        let paper = self.papers.generate_paper(request).await?;

        Ok(json!({
            "paper_id": paper.paper_id,
            "paper": serde_json::to_value(&paper)?,
            "message": "Paper generated successfully",
        }))
    }
}

/// Handler for fetching a stored paper
#[derive(Debug)]
pub struct GetPaperHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for GetPaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let id = paper_id_arg(&args)?;
        let paper = self.papers.get(&id).await?;
        Ok(serde_json::to_value(&paper)?)
    }
}

/// Handler for listing stored papers
#[derive(Debug)]
pub struct ListPapersHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for ListPapersHandler {
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        let papers = self.papers.list().await;
        Ok(json!({
            "count": papers.len(),
            "papers": papers,
        }))
    }
}

/// Handler for deleting a stored paper
#[derive(Debug)]
pub struct DeletePaperHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for DeletePaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let id = paper_id_arg(&args)?;
        self.papers.delete(&id).await?;
        Ok(json!({
            "paper_id": id,
            "message": "Paper deleted successfully",
        }))
    }
}

/// Handler for exporting a stored paper
#[derive(Debug)]
pub struct ExportPaperHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for ExportPaperHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let id = paper_id_arg(&args)?;
        let format = args
            .get("format")
            .and_then(|v| v.as_str())
            .unwrap_or("latex");
        let template = args.get("template").and_then(|v| v.as_str());
        let format = ExportFormat::parse(format, template)?;

        let paper = self.papers.get(&id).await?;
        let document = export_paper(&paper, format);
        Ok(serde_json::to_value(&document)?)
    }
}

/// Handler for citation search
#[derive(Debug)]
pub struct SearchCitationsHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for SearchCitationsHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let query = args
            .get("query")
            .or_else(|| args.get("topic"))
            .and_then(|v| v.as_str())
            .ok_or("Missing 'query' parameter")?;
        let query = validate_topic(query)?;

        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_CITATION_LIMIT)
            .min(MAX_CITATION_LIMIT);
        let style = style_arg(&args, "style")?;

        let citations = self.papers.citations().fetch_citations(&query, limit).await;
        let formatted = format_all(&citations, style);

        Ok(json!({
            "query": query,
            "style": style,
            "count": citations.len(),
            "citations": citations,
            "formatted": formatted,
        }))
    }
}

/// Handler for formatting a single citation
#[derive(Debug)]
pub struct FormatCitationHandler;

#[async_trait::async_trait]
impl ToolHandler for FormatCitationHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let data = args
            .get("citation")
            .cloned()
            .ok_or("Missing 'citation' parameter")?;
        let citation: Citation = serde_json::from_value(data)
            .map_err(|e| ToolError::InvalidParams(format!("Invalid citation data: {}", e)))?;
        let style = style_arg(&args, "style")?;

        Ok(json!({
            "style": style,
            "formatted": format_citation(&citation, style, 1),
        }))
    }
}

/// Handler for validating free-text citations
#[derive(Debug)]
pub struct ValidateCitationHandler;

#[async_trait::async_trait]
impl ToolHandler for ValidateCitationHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = args
            .get("citation")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("Missing 'citation' parameter")?;

        Ok(serde_json::to_value(validate_citation(text))?)
    }
}

/// Handler listing supported citation styles
#[derive(Debug)]
pub struct CitationStylesHandler;

#[async_trait::async_trait]
impl ToolHandler for CitationStylesHandler {
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        let styles: Vec<Value> = CitationStyle::ALL
            .iter()
            .map(|s| json!({"code": s.code(), "name": s.to_string()}))
            .collect();
        Ok(json!({ "styles": styles }))
    }
}

/// Handler for checking free text
#[derive(Debug)]
pub struct CheckPlagiarismHandler;

#[async_trait::async_trait]
impl ToolHandler for CheckPlagiarismHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = args
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'text' parameter")?;

        let report = check_text(text)?;
        Ok(serde_json::to_value(&report)?)
    }
}

/// Handler for checking a stored paper
#[derive(Debug)]
pub struct CheckPaperPlagiarismHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for CheckPaperPlagiarismHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let id = paper_id_arg(&args)?;
        let paper = self.papers.get(&id).await?;

        let text = paper.full_text();
        if text.trim().chars().count() < MIN_ANALYSIS_CHARS {
            return Err(ToolError::InvalidParams(
                "Paper content too short for plagiarism check".to_string(),
            ));
        }
        let report = crate::analysis::estimate_plagiarism(&text);
        self.papers.attach_plagiarism_report(&id, report.clone()).await?;

        Ok(json!({
            "paper_id": id,
            "plagiarism_check": report,
        }))
    }
}

/// Handler for checking several texts at once
#[derive(Debug)]
pub struct BatchCheckPlagiarismHandler;

#[async_trait::async_trait]
impl ToolHandler for BatchCheckPlagiarismHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let items = args
            .get("texts")
            .and_then(|v| v.as_array())
            .filter(|a| !a.is_empty())
            .ok_or("Array of texts is required")?;
        if items.len() > MAX_BATCH_TEXTS {
            return Err(ToolError::InvalidParams(format!(
                "At most {} texts can be checked per batch",
                MAX_BATCH_TEXTS
            )));
        }

        let texts: Vec<&str> = items.iter().map(|v| v.as_str().unwrap_or_default()).collect();
        let results = check_batch(&texts);
        let checked = results.iter().filter(|r| r.report.is_some()).count();

        Ok(json!({
            "results": results,
            "total_checked": checked,
        }))
    }
}

/// Handler listing papers with plagiarism reports
#[derive(Debug)]
pub struct PlagiarismHistoryHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for PlagiarismHistoryHandler {
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        let history = self.papers.plagiarism_history().await;
        Ok(json!({
            "count": history.len(),
            "history": history,
            "settings": PlagiarismSettings::default(),
        }))
    }
}

/// Handler for research-domain classification
#[derive(Debug)]
pub struct ClassifyDomainHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for ClassifyDomainHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = args
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'text' parameter")?;
        let title = args.get("title").and_then(|v| v.as_str()).unwrap_or("");
        if text.trim().is_empty() && title.trim().is_empty() {
            return Err("Text or title is required".into());
        }

        let classification = self.papers.classifier().classify(text, title).await;
        Ok(serde_json::to_value(&classification)?)
    }
}

/// Handler for quality metrics
#[derive(Debug)]
pub struct AnalyzeQualityHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for AnalyzeQualityHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let analyzer = QualityAnalyzer::new();

        let report = if args.get("paper_id").is_some() {
            let id = paper_id_arg(&args)?;
            let paper = self.papers.get(&id).await?;
            analyzer.analyze_paper(&paper)
        } else {
            let text = args
                .get("text")
                .and_then(|v| v.as_str())
                .filter(|s| !s.trim().is_empty())
                .ok_or("Either 'paper_id' or 'text' is required")?;
            analyzer.analyze_text(text, &[])
        };

        Ok(serde_json::to_value(&report)?)
    }
}

/// Handler for paper outlines
#[derive(Debug)]
pub struct GenerateOutlineHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for GenerateOutlineHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;
        let paper_type = args.get("paper_type").and_then(|v| v.as_str()).unwrap_or("");

        let outline = self.papers.generate_outline(topic, paper_type).await?;
        Ok(json!({
            "topic": outline.topic,
            "paper_type": outline.paper_type,
            "outline": outline.outline,
            "provider": outline.source.label(),
            "source": outline.source,
        }))
    }
}

/// Handler for rewriting a passage
#[derive(Debug)]
pub struct EnhanceSectionHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for EnhanceSectionHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let text = args
            .get("text")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'text' parameter")?;
        let mode = args
            .get("enhancement_type")
            .or_else(|| args.get("mode"))
            .and_then(|v| v.as_str())
            .map(Enhancement::parse)
            .unwrap_or_default();

        let enhanced = self.papers.enhance_text(text, mode).await?;
        Ok(json!({
            "enhancement_type": enhanced.mode,
            "original": enhanced.original,
            "enhanced": enhanced.enhanced,
            "provider": enhanced.source.label(),
            "source": enhanced.source,
        }))
    }
}

/// Handler for per-section writing tips
#[derive(Debug)]
pub struct WritingSuggestionsHandler;

#[async_trait::async_trait]
impl ToolHandler for WritingSuggestionsHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let topic = args
            .get("topic")
            .and_then(|v| v.as_str())
            .ok_or("Missing 'topic' parameter")?;
        let topic = validate_topic(topic)?;
        let section = args
            .get("section")
            .and_then(|v| v.as_str())
            .map(SectionKind::parse)
            .unwrap_or(SectionKind::Introduction);

        Ok(json!({
            "topic": topic,
            "section": section,
            "suggestions": writing_suggestions(&topic, &section),
        }))
    }
}

/// Handler for the reviewer summary of a stored paper
#[derive(Debug)]
pub struct PeerReviewHandler {
    pub papers: PaperService,
}

#[async_trait::async_trait]
impl ToolHandler for PeerReviewHandler {
    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let id = paper_id_arg(&args)?;
        let review = self.papers.peer_review(&id).await?;
        Ok(json!({
            "paper_id": id,
            "review": review,
        }))
    }
}

/// Handler listing LaTeX templates
#[derive(Debug)]
pub struct LatexTemplatesHandler;

#[async_trait::async_trait]
impl ToolHandler for LatexTemplatesHandler {
    async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
        Ok(json!({ "templates": template_catalog() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_arg_accepts_array_and_string() {
        assert_eq!(
            keywords_arg(&json!({"keywords": ["a", " b ", ""]})),
            vec!["a".to_string(), "b".to_string()]
        );
        assert_eq!(
            keywords_arg(&json!({"keywords": "x, y"})),
            vec!["x".to_string(), "y".to_string()]
        );
        assert!(keywords_arg(&json!({})).is_empty());
    }

    #[test]
    fn test_style_and_level_args() {
        assert_eq!(style_arg(&json!({"style": "mla"}), "style").unwrap(), CitationStyle::Mla);
        assert!(matches!(
            style_arg(&json!({"style": "harvard"}), "style"),
            Err(ToolError::InvalidParams(_))
        ));
        assert_eq!(
            detail_level_arg(&json!({"research_level": "advanced"})).unwrap(),
            DetailLevel::Advanced
        );
    }

    #[tokio::test]
    async fn test_generate_section_rejects_empty_topic() {
        let handler = GenerateSectionHandler {
            papers: PaperService::offline(),
        };
        let err = handler.execute(json!({"topic": "  "})).await.unwrap_err();
        assert_eq!(err, ToolError::InvalidParams("Topic is required".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_paper_is_not_found() {
        let handler = GetPaperHandler {
            papers: PaperService::offline(),
        };
        let err = handler
            .execute(json!({"paper_id": Uuid::new_v4().to_string()}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));

        let err = handler.execute(json!({"paper_id": "nope"})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidParams(_)));
    }

    #[tokio::test]
    async fn test_enhance_unknown_mode_means_clarity() {
        let handler = EnhanceSectionHandler {
            papers: PaperService::offline(),
        };
        let result = handler
            .execute(json!({"text": "caches  help. they cut latency", "enhancement_type": "poetic"}))
            .await
            .unwrap();
        assert_eq!(result["enhancement_type"], "clarity");
        assert_eq!(result["enhanced"], "Caches help. They cut latency.");
        assert_eq!(result["provider"], "offline_fallback");

        let err = handler.execute(json!({})).await.unwrap_err();
        assert_eq!(err, ToolError::InvalidParams("Missing 'text' parameter".to_string()));
    }

    #[tokio::test]
    async fn test_writing_suggestions_default_section() {
        let result = WritingSuggestionsHandler
            .execute(json!({"topic": "fMRI"}))
            .await
            .unwrap();
        assert_eq!(result["suggestions"][0], "Begin with a compelling hook about fMRI");
        assert_eq!(result["suggestions"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_latex_templates_listing() {
        let result = LatexTemplatesHandler.execute(json!({})).await.unwrap();
        let templates = result["templates"].as_array().unwrap();
        assert_eq!(templates.len(), 4);
        assert_eq!(templates[0]["id"], "article");
        assert_eq!(templates[3]["name"], "ACM Article");
    }
}
