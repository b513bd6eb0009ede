//! # paper-forge
//!
//! Academic paper drafting over a chain of LLM providers, with citation
//! lookup, analysis heuristics, export, and a Model Context Protocol (MCP)
//! server.
//!
//! ## Architecture
//!
//! - [`providers`]: text-completion backends tried in configured order
//! - [`generation`]: section generation, outlines and rewrites with provider fallback and offline templates
//! - [`citations`]: Semantic Scholar / CrossRef lookup, formatting and validation
//! - [`paper`]: full-paper assembly and the in-memory paper store
//! - [`analysis`]: domain classification, plagiarism estimate, quality metrics, peer review
//! - [`export`]: LaTeX, Markdown and bibliography rendering
//! - [`mcp`]: MCP protocol tools and server
//! - [`config`]: Configuration management
//!
//! ```rust,no_run
//! use paper_forge::{PaperRequest, PaperService};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let papers = PaperService::offline();
//! let paper = papers
//!     .generate_paper(PaperRequest::new("graph coloring heuristics"))
//!     .await?;
//! println!("{}", paper.title);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod citations;
pub mod config;
pub mod export;
pub mod generation;
pub mod mcp;
pub mod models;
pub mod paper;
pub mod providers;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use generation::ContentGenerationService;
pub use models::{GeneratedPaper, GenerationRequest, GenerationResult, PaperRequest, SectionKind};
pub use paper::PaperService;
pub use providers::{ProviderRegistry, TextProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
