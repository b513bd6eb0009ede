//! Citation formatting in various styles.
//!
//! Supports APA 7th, MLA 9th, IEEE, Chicago 17th and BibTeX, plus a
//! heuristic validator for free-text citations.

use serde::Serialize;

use crate::models::{Citation, CitationStyle};

/// Format a citation in the specified style
///
/// `index` is the 1-based reference number used by IEEE.
pub fn format_citation(citation: &Citation, style: CitationStyle, index: usize) -> String {
    match style {
        CitationStyle::Apa => format_apa(citation),
        CitationStyle::Mla => format_mla(citation),
        CitationStyle::Ieee => format_ieee(citation, index),
        CitationStyle::Chicago => format_chicago(citation),
        CitationStyle::Bibtex => format_bibtex(citation),
    }
}

/// Format every citation, numbering from 1
pub fn format_all(citations: &[Citation], style: CitationStyle) -> Vec<String> {
    citations
        .iter()
        .enumerate()
        .map(|(i, c)| format_citation(c, style, i + 1))
        .collect()
}

/// Render a standalone bibliography document in Markdown
pub fn format_bibliography(topic: &str, citations: &[Citation], style: CitationStyle) -> String {
    let heading = match style {
        CitationStyle::Apa => "# References (APA Style)",
        CitationStyle::Mla => "# Works Cited (MLA Style)",
        CitationStyle::Ieee => "# References (IEEE Style)",
        CitationStyle::Chicago => "# Bibliography (Chicago Style)",
        CitationStyle::Bibtex => "% BibTeX references",
    };

    let mut out = String::new();
    out.push_str(heading);
    out.push_str("\n\n");

    if style != CitationStyle::Bibtex {
        out.push_str(&format!("Topic: {}\n\n", topic));
    }

    for entry in format_all(citations, style) {
        out.push_str(&entry);
        out.push_str("\n\n");
    }

    out.trim_end().to_string() + "\n"
}

fn first_three(authors: &[String]) -> String {
    let mut joined = authors
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if authors.len() > 3 {
        joined.push_str(", et al.");
    }
    joined
}

fn author_or_unknown(authors: &[String]) -> String {
    match authors.first() {
        Some(first) if authors.len() > 1 => format!("{}, et al.", first),
        Some(first) => first.clone(),
        None => "Unknown".to_string(),
    }
}

/// "First Middle Last" -> "Last, First Middle"; "Last, First" kept as is
fn inverted_name(author: &str) -> String {
    if author.contains(',') {
        return author.trim().to_string();
    }
    let words: Vec<&str> = author.split_whitespace().collect();
    match words.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, {}", last, rest.join(" ")),
        _ => author.trim().to_string(),
    }
}

fn family_name(author: &str) -> &str {
    if let Some((family, _)) = author.split_once(',') {
        return family.trim();
    }
    author.split_whitespace().last().unwrap_or("unknown")
}

/// Format: Authors (Year). Title. *Journal*. https://doi.org/DOI
fn format_apa(citation: &Citation) -> String {
    let authors = if citation.authors.is_empty() {
        "Unknown".to_string()
    } else {
        first_three(&citation.authors)
    };

    let mut formatted = format!(
        "{} ({}). {}. *{}*",
        authors,
        citation.year_text(),
        citation.title,
        citation.journal_text()
    );
    if let Some(doi) = citation.doi_text() {
        formatted.push_str(&format!(". https://doi.org/{}", doi));
    }
    formatted
}

/// Format: Author, et al. "Title." *Journal*, Year.
fn format_mla(citation: &Citation) -> String {
    format!(
        "{}. \"{}.\" *{}*, {}.",
        author_or_unknown(&citation.authors),
        citation.title,
        citation.journal_text(),
        citation.year_text()
    )
}

/// Format: [n] Last, First, Last, First, "Title," *Journal*, Year.
fn format_ieee(citation: &Citation, index: usize) -> String {
    let authors = if citation.authors.is_empty() {
        "Unknown".to_string()
    } else {
        citation
            .authors
            .iter()
            .take(3)
            .map(|a| inverted_name(a))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "[{}] {}, \"{},\" *{}*, {}.",
        index,
        authors,
        citation.title,
        citation.journal_text(),
        citation.year_text()
    )
}

/// Format: Last, First, and First Last. Year. "Title." Journal. DOI.
fn format_chicago(citation: &Citation) -> String {
    let authors = match citation.authors.as_slice() {
        [] => "Anonymous".to_string(),
        [only] => inverted_name(only),
        [first, second] => format!("{} and {}", inverted_name(first), second),
        [first, ..] => format!("{} et al.", inverted_name(first)),
    };

    let mut formatted = format!(
        "{}. {}. \"{}.\" {}.",
        authors,
        citation.year_text(),
        citation.title,
        citation.journal_text()
    );
    if let Some(doi) = citation.doi_text() {
        formatted.push_str(&format!(" https://doi.org/{}.", doi));
    }
    formatted
}

/// Citation key: FirstAuthorFamilyYearFirstThreeTitleWords
fn bibtex_key(citation: &Citation) -> String {
    let family: String = citation
        .authors
        .first()
        .map(|a| family_name(a))
        .unwrap_or("unknown")
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();

    let title_key: String = citation
        .title
        .split_whitespace()
        .take(3)
        .flat_map(|w| w.chars().filter(|c| c.is_alphanumeric()))
        .collect();

    format!("{}{}{}", family.to_lowercase(), citation.year_text(), title_key)
}

/// Generate a BibTeX entry
fn format_bibtex(citation: &Citation) -> String {
    let authors = citation
        .authors
        .iter()
        .map(|a| inverted_name(a))
        .collect::<Vec<_>>()
        .join(" and ");

    let mut fields = vec![
        format!("  author = {{{}}}", authors),
        format!("  title = {{{}}}", citation.title),
        format!("  journal = {{{}}}", citation.journal_text()),
        format!("  year = {{{}}}", citation.year_text()),
    ];
    if let Some(doi) = citation.doi_text() {
        fields.push(format!("  doi = {{{}}}", doi));
    }

    format!("@article{{{},\n{}\n}}", bibtex_key(citation), fields.join(",\n"))
}

/// Result of heuristically checking a free-text citation
#[derive(Debug, Clone, Serialize)]
pub struct CitationValidation {
    pub has_authors: bool,
    pub has_year: bool,
    pub has_title: bool,
    pub proper_length: bool,
    pub has_doi: bool,
    /// Percentage of checks passed (0-100)
    pub score: u32,
    pub is_valid: bool,
    pub suggestions: Vec<String>,
}

/// Minimum score for a citation to count as valid
pub const VALID_CITATION_SCORE: u32 = 60;

/// Heuristically check a free-text citation
pub fn validate_citation(text: &str) -> CitationValidation {
    let length = text.chars().count();
    let has_authors = text.chars().any(char::is_uppercase);
    let has_year = text.chars().any(|c| c.is_ascii_digit());
    let has_title = text.split_whitespace().count() > 3;
    let proper_length = (20..=500).contains(&length);
    let lower = text.to_lowercase();
    let has_doi = lower.contains("doi") || text.contains("10.");

    let checks = [has_authors, has_year, has_title, proper_length, has_doi];
    let passed = checks.iter().filter(|c| **c).count() as u32;
    let score = passed * 100 / checks.len() as u32;

    let mut suggestions = Vec::new();
    if !has_authors {
        suggestions.push("Add author names".to_string());
    }
    if !has_year {
        suggestions.push("Include publication year".to_string());
    }
    if !has_title {
        suggestions.push("Include the full title of the work".to_string());
    }
    if !proper_length {
        suggestions.push("Citation length should be between 20 and 500 characters".to_string());
    }
    if !has_doi {
        suggestions.push("Consider adding a DOI".to_string());
    }

    CitationValidation {
        has_authors,
        has_year,
        has_title,
        proper_length,
        has_doi,
        score,
        is_valid: score >= VALID_CITATION_SCORE,
        suggestions,
    }
}
