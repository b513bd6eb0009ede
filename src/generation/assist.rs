//! Writing-assistant prompts: outlines, rewrites and per-section tips.
//!
//! Each prompt has a deterministic offline counterpart so that
//! [`ContentGenerationService::complete_or_else`](super::ContentGenerationService::complete_or_else)
//! always has something to return.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::SectionKind;

/// Paper type used when none is given
pub const DEFAULT_PAPER_TYPE: &str = "research paper";

/// Provider prompt for a structured outline
pub fn outline_prompt(topic: &str, paper_type: &str) -> String {
    format!(
        "Create a detailed outline for a {paper_type} on the topic: {topic}\n\n\
         Include:\n\
         - Main sections and subsections\n\
         - Key points to cover in each section\n\
         - Logical flow of arguments\n\
         - Suggested research areas\n\n\
         Format as a structured outline with Roman numerals, letters, and numbers."
    )
}

/// Outline built from the standard section order
pub fn offline_outline(topic: &str, paper_type: &str) -> String {
    let topic = topic.trim();
    let sections: [(&str, Vec<String>); 6] = [
        (
            "Introduction",
            vec![
                format!("Background and context of {}", topic),
                "Problem statement and research gap".to_string(),
                format!("Objectives and contributions of this {}", paper_type),
            ],
        ),
        (
            "Literature Review",
            vec![
                format!("Foundational work on {}", topic),
                "Recent developments and competing approaches".to_string(),
                "Open problems".to_string(),
            ],
        ),
        (
            "Methodology",
            vec![
                "Research design".to_string(),
                "Data collection and materials".to_string(),
                "Evaluation criteria".to_string(),
            ],
        ),
        (
            "Results",
            vec![
                "Principal findings".to_string(),
                "Comparison with baseline methods".to_string(),
            ],
        ),
        (
            "Discussion",
            vec![
                format!("Implications for {}", topic),
                "Limitations".to_string(),
            ],
        ),
        (
            "Conclusion",
            vec![
                "Summary of contributions".to_string(),
                "Future research directions".to_string(),
            ],
        ),
    ];

    let mut out = format!("Outline: {}\n", topic);
    for (i, (heading, points)) in sections.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", roman(i + 1), heading));
        for (j, point) in points.iter().enumerate() {
            let letter = char::from(b'A' + j as u8);
            out.push_str(&format!("   {}. {}\n", letter, point));
        }
    }
    out
}

fn roman(n: usize) -> &'static str {
    const NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
    NUMERALS.get(n.wrapping_sub(1)).copied().unwrap_or("X")
}

/// Kind of rewrite requested for a passage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Enhancement {
    #[default]
    Clarity,
    AcademicTone,
    Expand,
    Concise,
    Technical,
}

/// Informal phrases and their formal replacements
const FORMAL_REPLACEMENTS: [(&str, &str); 12] = [
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("won't", "will not"),
    ("it's", "it is"),
    ("we're", "we are"),
    ("a lot of", "a substantial number of"),
    ("lots of", "numerous"),
    ("really ", ""),
    ("pretty ", "relatively "),
];

/// Words dropped by the concise rewrite
const FILLER_WORDS: [&str; 5] = ["very ", "really ", "basically ", "actually ", "quite "];

impl Enhancement {
    pub const ALL: [Enhancement; 5] = [
        Enhancement::Clarity,
        Enhancement::AcademicTone,
        Enhancement::Expand,
        Enhancement::Concise,
        Enhancement::Technical,
    ];

    /// Parse a mode name; anything unrecognised means clarity
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "academic_tone" | "academic" | "formal" => Enhancement::AcademicTone,
            "expand" => Enhancement::Expand,
            "concise" => Enhancement::Concise,
            "technical" => Enhancement::Technical,
            _ => Enhancement::Clarity,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Enhancement::Clarity => "clarity",
            Enhancement::AcademicTone => "academic_tone",
            Enhancement::Expand => "expand",
            Enhancement::Concise => "concise",
            Enhancement::Technical => "technical",
        }
    }

    fn instruction(&self) -> &'static str {
        match self {
            Enhancement::Clarity => "Make this text clearer and more understandable",
            Enhancement::AcademicTone => "Rewrite this in a more academic and formal tone",
            Enhancement::Expand => "Expand this section with more detail and examples",
            Enhancement::Concise => "Make this text more concise while keeping key information",
            Enhancement::Technical => "Add more technical depth and specificity to",
        }
    }

    /// Provider prompt for rewriting `text`
    pub fn prompt(&self, text: &str) -> String {
        format!("{}: {}", self.instruction(), text.trim())
    }

    /// Rule-based rewrite used when no provider answers
    pub fn apply_offline(&self, text: &str) -> String {
        let sentences = split_sentences(text);
        match self {
            Enhancement::Clarity => sentences.join(" "),
            Enhancement::AcademicTone => {
                let mut out = sentences.join(" ");
                for (informal, formal) in FORMAL_REPLACEMENTS {
                    out = out.replace(informal, formal);
                }
                out
            }
            Enhancement::Expand => {
                let mut out = sentences.join(" ");
                out.push_str(
                    " These observations are examined in further detail below, with attention to \
                     the assumptions they rest on and the evidence that supports them. Concrete \
                     examples and comparisons with prior work illustrate how the argument applies \
                     in practice.",
                );
                out
            }
            Enhancement::Concise => {
                let keep = sentences.len().div_ceil(2).max(1);
                let mut out = sentences
                    .into_iter()
                    .take(keep)
                    .collect::<Vec<_>>()
                    .join(" ");
                for filler in FILLER_WORDS {
                    out = out.replace(filler, "");
                }
                out
            }
            Enhancement::Technical => {
                let mut out = sentences.join(" ");
                out.push_str(
                    " Formally, the approach is characterised by its inputs, its computational \
                     cost and its measured accuracy against established baselines, with \
                     parameters reported so that results can be reproduced.",
                );
                out
            }
        }
    }
}

impl fmt::Display for Enhancement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Split on sentence punctuation, normalising whitespace and capitalisation
fn split_sentences(text: &str) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in normalized.chars() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return;
    }
    let mut chars = trimmed.chars();
    let mut sentence: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => return,
    };
    if !sentence.ends_with(['.', '!', '?']) {
        sentence.push('.');
    }
    sentences.push(sentence);
}

/// Writing tips for one section of a paper on `topic`
pub fn writing_suggestions(topic: &str, section: &SectionKind) -> Vec<String> {
    let topic = topic.trim();
    match section {
        SectionKind::Introduction => vec![
            format!("Begin with a compelling hook about {}", topic),
            format!("Define key terms related to {}", topic),
            "State your research question clearly".to_string(),
            "Outline the paper structure".to_string(),
        ],
        SectionKind::LiteratureReview => vec![
            format!("Search for recent papers on {} (2020+)", topic),
            format!("Identify key researchers in {} field", topic),
            "Look for systematic reviews or meta-analyses".to_string(),
            format!("Find gaps in current {} research", topic),
        ],
        SectionKind::Methodology => vec![
            format!("Describe your research approach for {}", topic),
            "Justify your methodology choice".to_string(),
            "Explain data collection methods".to_string(),
            "Address potential limitations".to_string(),
        ],
        SectionKind::Conclusion => vec![
            format!("Summarize key findings about {}", topic),
            format!("Discuss implications for {} field", topic),
            "Suggest future research directions".to_string(),
            "End with a strong closing statement".to_string(),
        ],
        _ => vec![
            "Use clear, academic language".to_string(),
            "Support claims with evidence".to_string(),
            "Maintain logical flow".to_string(),
            "Check for grammar and clarity".to_string(),
        ],
    }
}
