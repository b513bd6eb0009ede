//! LaTeX rendering for generated papers.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ExportError;
use crate::models::GeneratedPaper;

/// Packages loaded by the article and report templates
pub const PACKAGES: [&str; 8] = [
    "inputenc",
    "fontenc",
    "amsmath",
    "graphicx",
    "hyperref",
    "geometry",
    "setspace",
    "cite",
];

/// Supported document templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LatexTemplate {
    Article,
    Report,
    Ieee,
    Acm,
}

impl LatexTemplate {
    pub const ALL: [LatexTemplate; 4] = [
        LatexTemplate::Article,
        LatexTemplate::Report,
        LatexTemplate::Ieee,
        LatexTemplate::Acm,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            LatexTemplate::Article => "article",
            LatexTemplate::Report => "report",
            LatexTemplate::Ieee => "ieee",
            LatexTemplate::Acm => "acm",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LatexTemplate::Article => "Standard Article",
            LatexTemplate::Report => "Technical Report",
            LatexTemplate::Ieee => "IEEE Conference",
            LatexTemplate::Acm => "ACM Article",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LatexTemplate::Article => "Basic academic article template",
            LatexTemplate::Report => "Detailed technical report format",
            LatexTemplate::Ieee => "IEEE conference paper format",
            LatexTemplate::Acm => "ACM publication format",
        }
    }

    /// Venues and document kinds the template fits
    pub fn suitable_for(&self) -> [&'static str; 3] {
        match self {
            LatexTemplate::Article => ["Research papers", "Journal articles", "Conference papers"],
            LatexTemplate::Report => ["Technical reports", "Research reports", "Project documentation"],
            LatexTemplate::Ieee => ["IEEE conferences", "Technical papers", "Engineering research"],
            LatexTemplate::Acm => ["ACM conferences", "Computer science papers", "Software research"],
        }
    }

    /// `\documentclass` line
    fn document_class(&self) -> &'static str {
        match self {
            LatexTemplate::Article => "\\documentclass[12pt,a4paper]{article}",
            LatexTemplate::Report => "\\documentclass[12pt,a4paper]{report}",
            LatexTemplate::Ieee => "\\documentclass[conference]{IEEEtran}",
            LatexTemplate::Acm => "\\documentclass[sigconf]{acmart}",
        }
    }
}

impl fmt::Display for LatexTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LatexTemplate {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "article" => Ok(LatexTemplate::Article),
            "report" => Ok(LatexTemplate::Report),
            "ieee" => Ok(LatexTemplate::Ieee),
            "acm" => Ok(LatexTemplate::Acm),
            other => Err(ExportError::UnknownTemplate(other.to_string())),
        }
    }
}

/// Catalog entry for one template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub suitable_for: Vec<&'static str>,
}

impl From<LatexTemplate> for TemplateInfo {
    fn from(template: LatexTemplate) -> Self {
        Self {
            id: template.id(),
            name: template.name(),
            description: template.description(),
            suitable_for: template.suitable_for().to_vec(),
        }
    }
}

/// Every supported template, in [`LatexTemplate::ALL`] order
pub fn template_catalog() -> Vec<TemplateInfo> {
    LatexTemplate::ALL.into_iter().map(TemplateInfo::from).collect()
}

/// Escape LaTeX special characters
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape, then turn `*emphasis*` spans into `\textit{...}`
fn escape_reference(text: &str) -> String {
    let escaped = escape_latex(text);
    if escaped.matches('*').count() % 2 != 0 {
        return escaped;
    }
    escaped
        .split('*')
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("\\textit{{{}}}", part)
            } else {
                part.to_string()
            }
        })
        .collect()
}

/// Render a paper with the given template
pub fn render_latex(paper: &GeneratedPaper, template: LatexTemplate) -> String {
    let mut doc = String::new();
    doc.push_str(template.document_class());
    doc.push('\n');
    preamble(&mut doc, paper, template);

    doc.push_str("\n\\begin{document}\n\n");

    let abstract_text = paper
        .section(&crate::models::SectionKind::Abstract)
        .map(escape_latex);

    match template {
        LatexTemplate::Acm => {
            // acmart expects the abstract and keywords before \maketitle
            if let Some(text) = &abstract_text {
                doc.push_str(&format!("\\begin{{abstract}}\n{}\n\\end{{abstract}}\n\n", text));
            }
            if !paper.metadata.keywords.is_empty() {
                doc.push_str(&format!("\\keywords{{{}}}\n\n", keyword_line(paper)));
            }
            doc.push_str("\\maketitle\n\n");
        }
        LatexTemplate::Ieee => {
            doc.push_str("\\maketitle\n\n");
            if let Some(text) = &abstract_text {
                doc.push_str(&format!("\\begin{{abstract}}\n{}\n\\end{{abstract}}\n\n", text));
            }
            if !paper.metadata.keywords.is_empty() {
                doc.push_str(&format!(
                    "\\begin{{IEEEkeywords}}\n{}\n\\end{{IEEEkeywords}}\n\n",
                    keyword_line(paper)
                ));
            }
        }
        LatexTemplate::Article | LatexTemplate::Report => {
            doc.push_str("\\maketitle\n\n");
            if let Some(text) = &abstract_text {
                doc.push_str(&format!("\\begin{{abstract}}\n{}\n\\end{{abstract}}\n\n", text));
            }
            if template == LatexTemplate::Report {
                doc.push_str("\\tableofcontents\n\\newpage\n\n");
            }
        }
    }

    let heading_cmd = if template == LatexTemplate::Report {
        "chapter"
    } else {
        "section"
    };

    for section in paper
        .sections
        .iter()
        .filter(|s| s.kind != crate::models::SectionKind::Abstract)
    {
        doc.push_str(&format!(
            "\\{}{{{}}}\n{}\n\n",
            heading_cmd,
            escape_latex(&section.kind.heading()),
            escape_latex(section.text.trim())
        ));
    }

    if !paper.summary.is_empty() {
        doc.push_str(&format!("\\{}*{{Key Insights}}\n\\begin{{itemize}}\n", heading_cmd));
        for point in &paper.summary {
            doc.push_str(&format!("  \\item {}\n", escape_latex(point)));
        }
        doc.push_str("\\end{itemize}\n\n");
    }

    if !paper.references.is_empty() {
        doc.push_str(&format!(
            "\\begin{{thebibliography}}{{{}}}\n",
            paper.references.len()
        ));
        for (i, reference) in paper.references.iter().enumerate() {
            // \bibitem numbers entries itself
            let text = reference
                .strip_prefix('[')
                .and_then(|rest| rest.split_once("] "))
                .map_or(reference.as_str(), |(_, rest)| rest)
                .trim();
            doc.push_str(&format!("\\bibitem{{ref{}}} {}\n", i + 1, escape_reference(text)));
        }
        doc.push_str("\\end{thebibliography}\n\n");
    }

    doc.push_str("\\end{document}\n");
    doc
}

fn preamble(doc: &mut String, paper: &GeneratedPaper, template: LatexTemplate) {
    match template {
        LatexTemplate::Article | LatexTemplate::Report => {
            doc.push_str("\\usepackage[utf8]{inputenc}\n");
            doc.push_str("\\usepackage[T1]{fontenc}\n");
            for package in PACKAGES.iter().skip(2) {
                if *package == "geometry" {
                    doc.push_str("\\usepackage[margin=1in]{geometry}\n");
                } else {
                    doc.push_str(&format!("\\usepackage{{{}}}\n", package));
                }
            }
            doc.push_str("\\onehalfspacing\n");
        }
        LatexTemplate::Ieee => {
            doc.push_str("\\usepackage{cite}\n\\usepackage{amsmath}\n\\usepackage{graphicx}\n");
        }
        LatexTemplate::Acm => {}
    }

    doc.push_str(&format!("\n\\title{{{}}}\n", escape_latex(&paper.title)));
    doc.push_str(&format!(
        "\\author{{{} Research Group}}\n",
        escape_latex(&paper.metadata.field)
    ));
    if template != LatexTemplate::Acm {
        doc.push_str("\\date{\\today}\n");
    }
}

fn keyword_line(paper: &GeneratedPaper) -> String {
    paper
        .metadata
        .keywords
        .iter()
        .map(|k| escape_latex(k.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("R&D 100%"), "R\\&D 100\\%");
        assert_eq!(escape_latex("a_b {c}"), "a\\_b \\{c\\}");
        assert_eq!(escape_latex("\\x ~ ^"), "\\textbackslash{}x \\textasciitilde{} \\textasciicircum{}");
    }

    #[test]
    fn test_escape_reference_italics() {
        assert_eq!(
            escape_reference("Doe, J. (2020). Title. *Journal of X & Y*."),
            "Doe, J. (2020). Title. \\textit{Journal of X \\& Y}."
        );
        assert_eq!(escape_reference("odd * count"), "odd * count");
    }

    #[test]
    fn test_template_parse() {
        assert_eq!("IEEE".parse::<LatexTemplate>().unwrap(), LatexTemplate::Ieee);
        assert!(matches!(
            "beamer".parse::<LatexTemplate>(),
            Err(ExportError::UnknownTemplate(t)) if t == "beamer"
        ));
    }

    #[test]
    fn test_template_catalog() {
        let catalog = template_catalog();
        assert_eq!(catalog.len(), LatexTemplate::ALL.len());
        assert_eq!(catalog[2].id, "ieee");
        assert_eq!(catalog[2].name, "IEEE Conference");
        assert!(catalog[2].suitable_for.contains(&"IEEE conferences"));
        assert!(catalog.iter().all(|t| !t.description.is_empty()));
    }
}
