//! Core data models for generated sections, citations and papers.

mod citation;
mod generation;
mod paper;

pub use citation::{Citation, CitationOrigin, CitationStyle};
pub use generation::{
    DetailLevel, GenerationRequest, GenerationResult, GenerationSource, SectionKind,
};
pub use paper::{
    default_sections, GeneratedPaper, PaperMetadata, PaperRequest, PaperSection, PaperSummary,
    DEFAULT_FIELD,
};
