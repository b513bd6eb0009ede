//! Markdown and bibliography rendering.

use crate::citations::format_bibliography;
use crate::models::{CitationStyle, GeneratedPaper};

/// Render the paper as a Markdown document
pub fn render_markdown(paper: &GeneratedPaper) -> String {
    let mut doc = format!("# {}\n\n", paper.title);

    doc.push_str(&format!(
        "*{} | {} | {}*\n\n",
        paper.metadata.field, paper.metadata.research_domain, paper.metadata.generated_at
    ));
    if !paper.metadata.keywords.is_empty() {
        doc.push_str(&format!("**Keywords:** {}\n\n", paper.metadata.keywords.join(", ")));
    }

    for section in &paper.sections {
        doc.push_str(&format!("## {}\n\n{}\n\n", section.kind.heading(), section.text.trim()));
    }

    if !paper.summary.is_empty() {
        doc.push_str("## Key Insights\n\n");
        for point in &paper.summary {
            doc.push_str(&format!("- {}\n", point));
        }
        doc.push('\n');
    }

    if !paper.references.is_empty() {
        doc.push_str("## References\n\n");
        for reference in &paper.references {
            doc.push_str(reference);
            doc.push_str("\n\n");
        }
    }

    doc.trim_end().to_string() + "\n"
}

/// Bibliography file: APA and MLA keep their style, everything else is IEEE-numbered
pub fn render_bibliography(paper: &GeneratedPaper) -> String {
    let style = match paper.metadata.citation_style {
        CitationStyle::Apa => CitationStyle::Apa,
        CitationStyle::Mla => CitationStyle::Mla,
        _ => CitationStyle::Ieee,
    };
    format_bibliography(&paper.metadata.topic, &paper.citations, style)
}
