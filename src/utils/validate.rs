//! Input validation for topics, free text, paper ids and filenames.
//!
//! These checks run at the caller layer (tools, CLI, paper assembly) before
//! any generation or analysis is invoked.

use thiserror::Error;
use uuid::Uuid;

/// Minimum text length (chars) accepted by the plagiarism estimator
pub const MIN_ANALYSIS_CHARS: usize = 50;

/// Maximum text length (chars) accepted by the plagiarism estimator
pub const MAX_ANALYSIS_CHARS: usize = 10_000;

/// Validation error types
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Topic is required")]
    EmptyTopic,

    #[error("Text is required")]
    EmptyText,

    #[error("Text must be at least {min} characters long (got {actual})")]
    TextTooShort { min: usize, actual: usize },

    #[error("Text must be at most {max} characters long (got {actual})")]
    TextTooLong { max: usize, actual: usize },

    #[error("Invalid paper ID: {0}")]
    InvalidPaperId(String),

    #[error("Invalid filename: contains disallowed characters")]
    InvalidFilename,

    #[error("Path traversal detected: {0}")]
    PathTraversal(String),
}

/// Trim a topic and reject it when nothing is left
pub fn validate_topic(topic: &str) -> Result<String, ValidationError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    Ok(topic.to_string())
}

/// Trim free text and reject it when nothing is left
pub fn validate_text(text: &str) -> Result<&str, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(text)
}

/// Check trimmed text length (in chars) against inclusive bounds
pub fn validate_text_length(text: &str, min: usize, max: usize) -> Result<&str, ValidationError> {
    let text = text.trim();
    let actual = text.chars().count();

    if actual < min {
        return Err(ValidationError::TextTooShort { min, actual });
    }
    if actual > max {
        return Err(ValidationError::TextTooLong { max, actual });
    }

    Ok(text)
}

/// Parse a paper id (UUID)
pub fn parse_paper_id(id: &str) -> Result<Uuid, ValidationError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ValidationError::InvalidPaperId("empty ID".to_string()));
    }
    Uuid::parse_str(id).map_err(|e| ValidationError::InvalidPaperId(format!("{}: {}", id, e)))
}

/// Sanitize a filename to prevent path traversal
///
/// Keeps alphanumerics, dash, underscore, dot and space; limits length.
pub fn sanitize_filename(filename: &str) -> Result<String, ValidationError> {
    let filename = filename.trim();

    if filename.is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    if filename.contains("..")
        || filename.starts_with('/')
        || filename.starts_with('\\')
        || filename.contains(":/")
        || filename.contains(":\\")
    {
        return Err(ValidationError::PathTraversal(filename.to_string()));
    }

    let mut sanitized: String = filename
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_' | '.' | ' '))
        .collect();

    const MAX_FILENAME_CHARS: usize = 200;
    if sanitized.chars().count() > MAX_FILENAME_CHARS {
        let ext = sanitized
            .rfind('.')
            .map(|pos| sanitized[pos..].to_string())
            .unwrap_or_default();
        let base: String = sanitized
            .chars()
            .take(MAX_FILENAME_CHARS.saturating_sub(ext.chars().count()))
            .collect();
        sanitized = format!("{}{}", base, ext);
    }

    if sanitized.trim().is_empty() {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

/// Turn a paper title into a filename stem ("Graph Coloring: A Study" -> "graph_coloring_a_study")
pub fn filename_stem(title: &str) -> String {
    let stem = title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .take(8)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        "paper".to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_topic() {
        assert_eq!(validate_topic("  graph coloring ").unwrap(), "graph coloring");
        assert_eq!(validate_topic(""), Err(ValidationError::EmptyTopic));
        assert_eq!(validate_topic(" \t\n"), Err(ValidationError::EmptyTopic));
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text("  caches help \n"), Ok("caches help"));
        assert_eq!(validate_text("   "), Err(ValidationError::EmptyText));
    }

    #[test]
    fn test_validate_text_length() {
        assert_eq!(
            validate_text_length("short", 50, 100),
            Err(ValidationError::TextTooShort { min: 50, actual: 5 })
        );
        assert!(validate_text_length(&"a".repeat(60), 50, 100).is_ok());
        assert!(matches!(
            validate_text_length(&"a".repeat(101), 50, 100),
            Err(ValidationError::TextTooLong { .. })
        ));
    }

    #[test]
    fn test_parse_paper_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_paper_id(&id.to_string()).unwrap(), id);
        assert!(parse_paper_id("").is_err());
        assert!(parse_paper_id("not-a-uuid").is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my_paper.tex").unwrap(), "my_paper.tex");
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("/etc/passwd").is_err());
        assert!(!sanitize_filename("test;rm -rf;file.md").unwrap().contains(';'));
    }

    #[test]
    fn test_filename_stem() {
        assert_eq!(filename_stem("Graph Coloring: A Study"), "graph_coloring_a_study");
        assert_eq!(filename_stem("!!!"), "paper");
    }
}
