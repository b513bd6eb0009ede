//! Terminal output helpers for the CLI.
//!
//! Colored status lines, spinners, and tables for papers, providers and
//! analysis reports.

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::analysis::{
    DomainClassification, PeerReview, PlagiarismReport, QualityReport, RiskLevel,
};
use crate::citations::CitationValidation;
use crate::export::TemplateInfo;
use crate::models::{GeneratedPaper, GenerationResult, GenerationSource, PaperSummary};
use crate::providers::TextProvider;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Print a styled status line.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!();
    println!("{}", format!("━━━ {} ━━━", title).bold().cyan());
}

fn source_badge(source: &GenerationSource) -> String {
    match source {
        GenerationSource::Provider { id, rank } => {
            format!("[{} #{}]", id, rank + 1).green().to_string()
        }
        GenerationSource::OfflineFallback => "[offline]".yellow().to_string(),
    }
}

/// Print where a piece of text came from.
pub fn print_source(source: &GenerationSource) {
    println!("{}", source_badge(source));
}

/// Print one generated section.
pub fn print_generation(heading: &str, result: &GenerationResult) {
    print_section(heading);
    println!("{}", result.text.trim());
    println!();
    println!(
        "{} {} chars, {} words",
        source_badge(&result.source),
        result.length_chars,
        result.word_count()
    );
}

/// Print a full paper.
pub fn print_paper(paper: &GeneratedPaper) {
    println!();
    println!("{}", paper.title.bold());
    println!(
        "{} {}",
        source_badge(&paper.title_source),
        format!(
            "{} | {} ({}) | {} words",
            paper.metadata.field,
            paper.metadata.research_domain,
            paper.metadata.domain_confidence,
            format_number(paper.metadata.word_count)
        )
        .dimmed()
    );
    println!("{} {}", "id:".dimmed(), paper.paper_id);

    for section in &paper.sections {
        print_section(&section.kind.heading());
        println!("{}", section.text.trim());
        println!("{}", source_badge(&section.source));
    }

    if !paper.summary.is_empty() {
        print_section("Key Insights");
        for point in &paper.summary {
            println!("  • {}", point);
        }
    }

    if !paper.references.is_empty() {
        print_section(&format!("References ({})", paper.metadata.citation_style.code()));
        for reference in &paper.references {
            println!("  {}", reference);
        }
    }
    println!();
}

/// Table of stored papers.
pub fn papers_table(papers: &[PaperSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Topic", "Words", "Generated"]);
    for paper in papers {
        table.add_row(vec![
            Cell::new(paper.paper_id.to_string()),
            Cell::new(truncate_with_ellipsis(&paper.title, 50)).add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(&paper.topic, 30)),
            Cell::new(format_number(paper.word_count)),
            Cell::new(&paper.generated_at),
        ]);
    }
    table
}

/// Table of providers in chain order.
pub fn providers_table<P: AsRef<dyn TextProvider>>(providers: &[P]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rank", "ID", "Name", "Credential"]);
    for (rank, provider) in providers.iter().enumerate() {
        let provider: &dyn TextProvider = provider.as_ref();
        let credential = if provider.is_configured() {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new("missing (skipped)").fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(provider.id()).add_attribute(Attribute::Bold),
            Cell::new(provider.name()),
            credential,
        ]);
    }
    table
}

fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::DarkYellow,
        RiskLevel::High => Color::Red,
    }
}

/// Print a plagiarism report.
pub fn print_plagiarism(report: &PlagiarismReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Score", "Status", "Words", "Chars", "Checked"]);
    table.add_row(vec![
        Cell::new(format!("{}%", report.plagiarism_score)).add_attribute(Attribute::Bold),
        Cell::new(report.status.label()).fg(risk_color(report.status)),
        Cell::new(format_number(report.word_count)),
        Cell::new(format_number(report.char_count)),
        Cell::new(&report.checked_at),
    ]);
    println!("{table}");

    for source in &report.sources {
        println!("  {} {} ({})", "~".dimmed(), source.title, source.similarity);
        println!("    {}", source.url.dimmed());
    }
    println!(
        "{}",
        "Advisory estimate only: the text was not compared against any corpus.".dimmed()
    );
}

/// Print a domain classification.
pub fn print_domain(classification: &DomainClassification) {
    println!(
        "{} {} {}",
        classification.formatted_output.bold(),
        format!("confidence: {}", classification.confidence.as_str()).dimmed(),
        format!("method: {:?}", classification.method).dimmed()
    );
}

/// Print a quality report.
pub fn print_quality(report: &QualityReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Metric", "Value"]);
    let rows = [
        ("Overall", report.overall_quality.to_string()),
        ("Citation quality", report.citation_quality.to_string()),
        (
            "Readability",
            format!("{} ({})", report.readability.score, report.readability.level.as_str()),
        ),
        ("Structure", report.structure_score.to_string()),
        ("Originality", report.originality_index.to_string()),
        ("Academic tone", report.academic_tone_score.to_string()),
        ("Words", format_number(report.word_count)),
        ("Pages", report.estimated_pages.to_string()),
        ("Reading time", report.reading_time.clone()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![Cell::new(metric), Cell::new(value)]);
    }
    println!("{table}");

    if !report.recommendations.is_empty() {
        print_section("Recommendations");
        for rec in &report.recommendations {
            println!("  • {}", rec);
        }
    }
}

/// Print a peer review.
pub fn print_peer_review(review: &PeerReview) {
    print_section(&format!("Review: grade {} ({}/100)", review.grade, review.overall_score));
    for comment in &review.reviewer_comments {
        println!("{}", comment);
    }

    print_section("Strengths");
    for point in &review.strengths {
        println!("  {} {}", "+".green(), point);
    }
    if !review.weaknesses.is_empty() {
        print_section("Weaknesses");
        for point in &review.weaknesses {
            println!("  {} {}", "-".red(), point);
        }
    }
    if !review.suggestions.is_empty() {
        print_section("Suggestions");
        for point in &review.suggestions {
            println!("  • {}", point);
        }
    }
}

/// Table of LaTeX templates.
pub fn templates_table(templates: &[TemplateInfo]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Description", "Suitable for"]);
    for template in templates {
        table.add_row(vec![
            Cell::new(template.id).add_attribute(Attribute::Bold),
            Cell::new(template.name),
            Cell::new(template.description),
            Cell::new(template.suitable_for.join(", ")),
        ]);
    }
    table
}

/// Print a citation validation result.
pub fn print_citation_validation(validation: &CitationValidation) {
    let checks = [
        ("authors", validation.has_authors),
        ("year", validation.has_year),
        ("title", validation.has_title),
        ("length", validation.proper_length),
        ("doi", validation.has_doi),
    ];
    for (name, ok) in checks {
        let status = if ok { Status::Success } else { Status::Warning };
        print_status(status, name);
    }
    let verdict = format!("Score {}%", validation.score);
    if validation.is_valid {
        print_status(Status::Success, &verdict);
    } else {
        print_status(Status::Error, &verdict);
    }
    for suggestion in &validation.suggestions {
        println!("  • {}", suggestion);
    }
}

/// Format a number with thousands separators.
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Truncate text to `max_chars`, ending in "..." when cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return "...".to_string();
    }
    let truncated: String = text.chars().take(max_chars - 3).collect();
    format!("{}...", truncated)
}

/// A loading spinner; hidden when stdout is not a terminal.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with the given message.
    pub fn new(msg: &str) -> Self {
        let pb = if is_terminal() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    /// Set the message.
    pub fn set_message(&self, msg: &str) {
        self.pb.set_message(msg.to_string());
    }

    /// Stop and clear the spinner.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
