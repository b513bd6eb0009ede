//! Paper export: LaTeX templates, Markdown and bibliography files.

mod latex;
mod markdown;

pub use latex::{escape_latex, render_latex, template_catalog, LatexTemplate, TemplateInfo, PACKAGES};
pub use markdown::{render_bibliography, render_markdown};

use serde::Serialize;
use std::str::FromStr;

use crate::models::GeneratedPaper;
use crate::utils::filename_stem;

/// Export errors
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ExportError {
    #[error("Unknown LaTeX template: {0} (expected article, report, ieee or acm)")]
    UnknownTemplate(String),

    #[error("Unknown export format: {0} (expected latex, markdown or bibliography)")]
    UnknownFormat(String),
}

/// Output format for [`export_paper`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Latex(LatexTemplate),
    Markdown,
    Bibliography,
}

impl ExportFormat {
    /// Parse a format name plus an optional LaTeX template (default "article")
    pub fn parse(format: &str, template: Option<&str>) -> Result<Self, ExportError> {
        match format.trim().to_lowercase().as_str() {
            "latex" | "tex" => {
                let template = match template {
                    Some(t) => LatexTemplate::from_str(t)?,
                    None => LatexTemplate::Article,
                };
                Ok(ExportFormat::Latex(template))
            }
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "bibliography" | "bib" | "references" => Ok(ExportFormat::Bibliography),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Rendered export ready to be written or returned to a client
#[derive(Debug, Clone, Serialize)]
pub struct ExportedDocument {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Render a stored paper
pub fn export_paper(paper: &GeneratedPaper, format: ExportFormat) -> ExportedDocument {
    let stem = filename_stem(&paper.title);
    match format {
        ExportFormat::Latex(template) => ExportedDocument {
            filename: format!("{}_{}.tex", stem, template.id()),
            mime_type: "application/x-tex",
            content: render_latex(paper, template),
        },
        ExportFormat::Markdown => ExportedDocument {
            filename: format!("{}.md", stem),
            mime_type: "text/markdown",
            content: render_markdown(paper),
        },
        ExportFormat::Bibliography => ExportedDocument {
            filename: format!("references_{}.txt", stem),
            mime_type: "text/plain",
            content: render_bibliography(paper),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CitationStyle, PaperRequest};
    use crate::paper::PaperService;

    async fn sample_paper(style: CitationStyle) -> GeneratedPaper {
        PaperService::offline()
            .generate_paper(
                PaperRequest::new("R&D cost_models")
                    .keywords(["budgets"])
                    .citation_style(style),
            )
            .await
            .unwrap()
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(
            ExportFormat::parse("latex", Some("acm")).unwrap(),
            ExportFormat::Latex(LatexTemplate::Acm)
        );
        assert_eq!(
            ExportFormat::parse("LaTeX", None).unwrap(),
            ExportFormat::Latex(LatexTemplate::Article)
        );
        assert_eq!(ExportFormat::parse("md", None).unwrap(), ExportFormat::Markdown);
        assert!(matches!(
            ExportFormat::parse("latex", Some("thesis")),
            Err(ExportError::UnknownTemplate(_))
        ));
        assert!(matches!(ExportFormat::parse("docx", None), Err(ExportError::UnknownFormat(_))));
    }

    #[tokio::test]
    async fn test_latex_templates() {
        let paper = sample_paper(CitationStyle::Ieee).await;

        for template in LatexTemplate::ALL {
            let doc = export_paper(&paper, ExportFormat::Latex(template));
            assert!(doc.filename.ends_with(&format!("_{}.tex", template.id())));
            assert!(doc.content.contains("\\begin{document}"));
            assert!(doc.content.trim_end().ends_with("\\end{document}"));
            assert!(doc.content.contains("R\\&D cost\\_models"));
            assert!(!doc.content.contains("\\bibitem{ref1} [1]"));
        }

        let report = render_latex(&paper, LatexTemplate::Report);
        assert!(report.contains("\\tableofcontents"));
        assert!(report.contains("\\chapter{Introduction}"));

        let ieee = render_latex(&paper, LatexTemplate::Ieee);
        assert!(ieee.contains("\\begin{IEEEkeywords}\nbudgets\n\\end{IEEEkeywords}"));
    }

    #[tokio::test]
    async fn test_markdown_export() {
        let paper = sample_paper(CitationStyle::Apa).await;
        let doc = export_paper(&paper, ExportFormat::Markdown);

        assert!(doc.content.starts_with(&format!("# {}\n", paper.title)));
        assert!(doc.content.contains("## Literature Review"));
        assert!(doc.content.contains("## Key Insights"));
        assert!(doc.filename.ends_with(".md"));
    }

    #[tokio::test]
    async fn test_bibliography_styles() {
        let apa = sample_paper(CitationStyle::Apa).await;
        let doc = export_paper(&apa, ExportFormat::Bibliography);
        assert!(doc.content.starts_with("# References (APA Style)"));

        let chicago = sample_paper(CitationStyle::Chicago).await;
        let doc = export_paper(&chicago, ExportFormat::Bibliography);
        assert!(doc.content.starts_with("# References (IEEE Style)"));
        assert!(doc.content.contains("[1]"));
    }
}
