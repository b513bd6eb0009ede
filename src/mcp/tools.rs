//! Tool registry for MCP tools.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use super::handlers::{
    AnalyzeQualityHandler, BatchCheckPlagiarismHandler, CheckPaperPlagiarismHandler,
    CheckPlagiarismHandler, CitationStylesHandler, ClassifyDomainHandler, DeletePaperHandler,
    EnhanceSectionHandler, ExportPaperHandler, FormatCitationHandler, GenerateOutlineHandler,
    GeneratePaperHandler, GenerateSectionHandler, GetPaperHandler, LatexTemplatesHandler,
    ListPapersHandler, PeerReviewHandler, PlagiarismHistoryHandler, SearchCitationsHandler,
    ValidateCitationHandler, WritingSuggestionsHandler,
};
use crate::export::ExportError;
use crate::paper::{PaperError, PaperService};
use crate::utils::ValidationError;

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "generate_paper")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Errors returned by tool handlers
///
/// `InvalidParams` and `NotFound` are the caller's fault and map to
/// `invalid_params`; `Internal` maps to `internal`.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ToolError {
    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<&str> for ToolError {
    fn from(message: &str) -> Self {
        ToolError::InvalidParams(message.to_string())
    }
}

impl From<ValidationError> for ToolError {
    fn from(err: ValidationError) -> Self {
        ToolError::InvalidParams(err.to_string())
    }
}

impl From<ExportError> for ToolError {
    fn from(err: ExportError) -> Self {
        ToolError::InvalidParams(err.to_string())
    }
}

impl From<PaperError> for ToolError {
    fn from(err: PaperError) -> Self {
        match err {
            PaperError::Validation(e) => e.into(),
            PaperError::NotFound(_) => ToolError::NotFound(err.to_string()),
            other => ToolError::Internal(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        ToolError::Internal(format!("Failed to serialize result: {}", err))
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry with every tool bound to the paper service
    pub fn new(papers: PaperService) -> Self {
        let mut registry = Self {
            tools: BTreeMap::new(),
        };
        registry.register_generation_tools(&papers);
        registry.register_writing_tools(&papers);
        registry.register_citation_tools(&papers);
        registry.register_analysis_tools(&papers);
        registry
    }

    fn register_generation_tools(&mut self, papers: &PaperService) {
        self.register(Tool {
            name: "generate_section".to_string(),
            description: format!(
                "Generate one section of an academic paper. Tries {} configured provider(s) in order and falls back to offline templates.",
                papers.generator().providers().len()
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {"type": "string", "description": "Paper topic"},
                    "section": {
                        "type": "string",
                        "description": "Section kind: title, abstract, introduction, literature_review, methodology, results, discussion, conclusion, or any custom name",
                        "default": "abstract"
                    },
                    "detail_level": {
                        "type": "string",
                        "enum": ["beginner", "intermediate", "advanced"],
                        "default": "intermediate"
                    },
                    "keywords": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Focus keywords"
                    },
                    "field": {"type": "string", "description": "Research field, e.g. 'Computer Science'"}
                },
                "required": ["topic"]
            }),
            handler: Arc::new(GenerateSectionHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "generate_paper".to_string(),
            description: "Generate a complete paper (title, sections, references, summary) and store it. Returns the paper and its paper_id.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {"type": "string", "description": "Paper topic"},
                    "keywords": {"type": "array", "items": {"type": "string"}},
                    "citation_style": {
                        "type": "string",
                        "enum": ["APA", "MLA", "IEEE", "Chicago", "BibTeX"],
                        "default": "APA"
                    },
                    "detail_level": {
                        "type": "string",
                        "enum": ["beginner", "intermediate", "advanced"],
                        "default": "intermediate"
                    },
                    "field": {"type": "string", "default": "Computer Science"},
                    "sections": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Body sections; defaults to abstract, introduction, literature_review, conclusion"
                    }
                },
                "required": ["topic"]
            }),
            handler: Arc::new(GeneratePaperHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "get_paper".to_string(),
            description: "Get a stored paper by id.".to_string(),
            input_schema: paper_id_schema(),
            handler: Arc::new(GetPaperHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "list_papers".to_string(),
            description: "List stored papers (id, title, topic, generation time, word count).".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
            handler: Arc::new(ListPapersHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "delete_paper".to_string(),
            description: "Delete a stored paper.".to_string(),
            input_schema: paper_id_schema(),
            handler: Arc::new(DeletePaperHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "export_paper".to_string(),
            description: "Export a stored paper as LaTeX (article, report, ieee, acm), Markdown or a bibliography file.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "paper_id": {"type": "string"},
                    "format": {
                        "type": "string",
                        "enum": ["latex", "markdown", "bibliography"],
                        "default": "latex"
                    },
                    "template": {
                        "type": "string",
                        "enum": ["article", "report", "ieee", "acm"],
                        "default": "article"
                    }
                },
                "required": ["paper_id"]
            }),
            handler: Arc::new(ExportPaperHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "latex_templates".to_string(),
            description: "List LaTeX export templates with what each is suited for.".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
            handler: Arc::new(LatexTemplatesHandler),
        });
    }

    fn register_writing_tools(&mut self, papers: &PaperService) {
        self.register(Tool {
            name: "generate_outline".to_string(),
            description: "Generate a structured outline (Roman numerals, lettered points) for a paper. Falls back to a standard outline offline.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {"type": "string", "description": "Paper topic"},
                    "paper_type": {"type": "string", "default": "research paper"}
                },
                "required": ["topic"]
            }),
            handler: Arc::new(GenerateOutlineHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "enhance_section".to_string(),
            description: "Rewrite a passage for clarity, academic tone, expansion, concision or technical depth. Unknown modes mean clarity.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string"},
                    "enhancement_type": {
                        "type": "string",
                        "enum": ["clarity", "academic_tone", "expand", "concise", "technical"],
                        "default": "clarity"
                    }
                },
                "required": ["text"]
            }),
            handler: Arc::new(EnhanceSectionHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "writing_suggestions".to_string(),
            description: "Writing tips for one section of a paper on a topic.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {"type": "string"},
                    "section": {"type": "string", "default": "introduction"}
                },
                "required": ["topic"]
            }),
            handler: Arc::new(WritingSuggestionsHandler),
        });
    }

    fn register_citation_tools(&mut self, papers: &PaperService) {
        self.register(Tool {
            name: "search_citations".to_string(),
            description: format!(
                "Find citations for a topic via {} and format them. Falls back to offline citations when the APIs return too few results.",
                if papers.citations().source_ids().is_empty() {
                    "offline data only".to_string()
                } else {
                    papers.citations().source_ids().join(", ")
                }
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "Topic to search for"},
                    "limit": {"type": "integer", "default": 5, "maximum": 20},
                    "style": {"type": "string", "default": "APA"}
                },
                "required": ["query"]
            }),
            handler: Arc::new(SearchCitationsHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "format_citation".to_string(),
            description: "Format citation data in APA, MLA, IEEE, Chicago or BibTeX.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "citation": {
                        "type": "object",
                        "properties": {
                            "title": {"type": "string"},
                            "authors": {"type": "array", "items": {"type": "string"}},
                            "year": {"type": "integer"},
                            "journal": {"type": "string"},
                            "doi": {"type": "string"}
                        },
                        "required": ["title"]
                    },
                    "style": {"type": "string", "default": "APA"}
                },
                "required": ["citation"]
            }),
            handler: Arc::new(FormatCitationHandler),
        });

        self.register(Tool {
            name: "validate_citation".to_string(),
            description: "Heuristically check a free-text citation for authors, year, title, length and DOI.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"citation": {"type": "string"}},
                "required": ["citation"]
            }),
            handler: Arc::new(ValidateCitationHandler),
        });

        self.register(Tool {
            name: "citation_styles".to_string(),
            description: "List supported citation styles.".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
            handler: Arc::new(CitationStylesHandler),
        });
    }

    fn register_analysis_tools(&mut self, papers: &PaperService) {
        self.register(Tool {
            name: "check_plagiarism".to_string(),
            description: "Advisory plagiarism estimate for 50 to 10000 characters of text. Not a real corpus comparison.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            }),
            handler: Arc::new(CheckPlagiarismHandler),
        });

        self.register(Tool {
            name: "check_paper_plagiarism".to_string(),
            description: "Advisory plagiarism estimate for a stored paper; the report is saved with the paper.".to_string(),
            input_schema: paper_id_schema(),
            handler: Arc::new(CheckPaperPlagiarismHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "batch_check_plagiarism".to_string(),
            description: "Advisory plagiarism estimates for several texts; short items are reported individually.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "texts": {"type": "array", "items": {"type": "string"}}
                },
                "required": ["texts"]
            }),
            handler: Arc::new(BatchCheckPlagiarismHandler),
        });

        self.register(Tool {
            name: "plagiarism_history".to_string(),
            description: "List stored papers that have a plagiarism report, plus the checker's limits and thresholds.".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
            handler: Arc::new(PlagiarismHistoryHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "classify_domain".to_string(),
            description: "Classify text into one of the standard academic research domains.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Abstract or body text"},
                    "title": {"type": "string"}
                },
                "required": ["text"]
            }),
            handler: Arc::new(ClassifyDomainHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "analyze_quality".to_string(),
            description: "Quality metrics (citations, readability, structure, originality, tone) for a stored paper or free text.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "paper_id": {"type": "string"},
                    "text": {"type": "string"}
                }
            }),
            handler: Arc::new(AnalyzeQualityHandler {
                papers: papers.clone(),
            }),
        });

        self.register(Tool {
            name: "peer_review".to_string(),
            description: "Reviewer-style summary (grade, strengths, weaknesses, comments) of a stored paper, derived from its quality metrics.".to_string(),
            input_schema: paper_id_schema(),
            handler: Arc::new(PeerReviewHandler {
                papers: papers.clone(),
            }),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools, ordered by name
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::NotFound(format!("Tool '{}' not found", name)))?;

        tool.handler.execute(args).await
    }
}

fn paper_id_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "paper_id": {"type": "string", "description": "Paper id returned by generate_paper"}
        },
        "required": ["paper_id"]
    })
}
