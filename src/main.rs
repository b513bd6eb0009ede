use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use paper_forge::analysis::{check_text, peer_review, QualityAnalyzer};
use paper_forge::citations::{format_all, validate_citation};
use paper_forge::config::{find_config_file, load_config, load_from_env, render_config, Config, LogFormat};
use paper_forge::export::{export_paper, template_catalog, ExportFormat};
use paper_forge::generation::{writing_suggestions, Enhancement};
use paper_forge::mcp::McpServer;
use paper_forge::models::{
    default_sections, CitationStyle, DetailLevel, GeneratedPaper, GenerationRequest,
    PaperRequest, SectionKind,
};
use paper_forge::paper::PaperService;
use paper_forge::providers::ProviderRegistry;
use paper_forge::ui::{self, Spinner, Status};
use paper_forge::utils::{sanitize_filename, validate_topic};
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// paper-forge - Assemble academic paper drafts from LLM providers, citation APIs and offline templates
#[derive(Parser, Debug)]
#[command(name = "paper-forge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Generate academic paper sections, citations and analyses", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Provider request timeout in seconds (overrides config)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Skip providers and citation APIs; use offline templates only
    #[arg(long, global = true)]
    offline: bool,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Text on a terminal, JSON otherwise
    Auto,
    /// Human-readable text and tables
    Text,
    /// JSON (machine-readable)
    Json,
}

impl OutputFormat {
    fn is_json(self) -> bool {
        match self {
            OutputFormat::Json => true,
            OutputFormat::Text => false,
            OutputFormat::Auto => !std::io::stdout().is_terminal(),
        }
    }
}

/// Detail level argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<Level> for DetailLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => DetailLevel::Beginner,
            Level::Intermediate => DetailLevel::Intermediate,
            Level::Advanced => DetailLevel::Advanced,
        }
    }
}

/// Citation style argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    Apa,
    Mla,
    Ieee,
    Chicago,
    Bibtex,
}

impl From<Style> for CitationStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Apa => CitationStyle::Apa,
            Style::Mla => CitationStyle::Mla,
            Style::Ieee => CitationStyle::Ieee,
            Style::Chicago => CitationStyle::Chicago,
            Style::Bibtex => CitationStyle::Bibtex,
        }
    }
}

/// Rewrite mode argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Clarity,
    AcademicTone,
    Expand,
    Concise,
    Technical,
}

impl From<Mode> for Enhancement {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Clarity => Enhancement::Clarity,
            Mode::AcademicTone => Enhancement::AcademicTone,
            Mode::Expand => Enhancement::Expand,
            Mode::Concise => Enhancement::Concise,
            Mode::Technical => Enhancement::Technical,
        }
    }
}

/// Text input shared by the analysis commands
#[derive(clap::Args, Debug)]
struct TextInput {
    /// Text to analyze (reads stdin when neither text nor --file is given)
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, short, conflicts_with = "text")]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a single section
    #[command(alias = "g")]
    Generate {
        /// Paper topic
        topic: String,

        /// Section kind (title, abstract, introduction, literature_review, ...)
        #[arg(long, short, default_value = "abstract")]
        section: String,

        /// Detail level
        #[arg(long, short, value_enum, default_value_t = Level::Intermediate)]
        level: Level,

        /// Focus keywords (comma-separated)
        #[arg(long, short, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Research field
        #[arg(long)]
        field: Option<String>,
    },

    /// Generate a full paper
    #[command(alias = "p")]
    Paper {
        /// Paper topic
        topic: String,

        /// Focus keywords (comma-separated)
        #[arg(long, short, value_delimiter = ',')]
        keywords: Vec<String>,

        /// Citation style for references
        #[arg(long, value_enum, default_value_t = Style::Apa)]
        style: Style,

        /// Detail level
        #[arg(long, short, value_enum, default_value_t = Level::Intermediate)]
        level: Level,

        /// Research field
        #[arg(long, default_value = paper_forge::models::DEFAULT_FIELD)]
        field: String,

        /// Body sections (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sections: Vec<String>,

        /// Save the paper as JSON (input for `export`)
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Outline a paper before writing it
    Outline {
        /// Paper topic
        topic: String,

        /// Kind of paper (e.g. "survey", "thesis chapter")
        #[arg(long, default_value = paper_forge::generation::DEFAULT_PAPER_TYPE)]
        paper_type: String,
    },

    /// Rewrite a passage
    Enhance {
        #[command(flatten)]
        input: TextInput,

        /// Rewrite mode
        #[arg(long, short, value_enum, default_value_t = Mode::Clarity)]
        mode: Mode,
    },

    /// Writing tips for one section
    Suggest {
        /// Paper topic
        topic: String,

        /// Section kind
        #[arg(long, short, default_value = "introduction")]
        section: String,
    },

    /// Reviewer-style summary of a saved paper
    Review {
        /// Paper JSON saved with `paper --save`
        paper: PathBuf,
    },

    /// List LaTeX export templates
    Templates,

    /// Search, validate and list citation styles
    Cite {
        #[command(subcommand)]
        command: CiteCommands,
    },

    /// Advisory plagiarism estimate for a text
    Plagiarism {
        #[command(flatten)]
        input: TextInput,
    },

    /// Classify a text into a research domain
    Classify {
        #[command(flatten)]
        input: TextInput,

        /// Paper title
        #[arg(long, short, default_value = "")]
        title: String,
    },

    /// Quality metrics for a saved paper or a text
    Quality {
        /// Paper JSON saved with `paper --save`
        #[arg(long, conflicts_with_all = ["text", "file"])]
        paper: Option<PathBuf>,

        #[command(flatten)]
        input: TextInput,
    },

    /// Export a saved paper as LaTeX, Markdown or a bibliography
    Export {
        /// Paper JSON saved with `paper --save`
        paper: PathBuf,

        /// Export format (latex, markdown, bibliography)
        #[arg(long, short, default_value = "latex")]
        format: String,

        /// LaTeX template (article, report, ieee, acm)
        #[arg(long, short)]
        template: Option<String>,

        /// Output directory (prints to stdout when omitted)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// List the provider chain and credential status
    Providers,

    /// Run the MCP server
    Serve {
        /// Run in stdio mode
        #[arg(long, default_value_t = true)]
        stdio: bool,

        /// Run in streamable HTTP mode (overrides --stdio)
        #[arg(long)]
        http: bool,

        /// Port for HTTP mode (default from config)
        #[arg(long, short)]
        port: Option<u16>,

        /// Host to bind to for HTTP mode (default from config)
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Print the config file path in use instead
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
enum CiteCommands {
    /// Find citations for a topic
    Search {
        /// Topic to search for
        topic: String,

        /// Maximum citations
        #[arg(long, short, default_value_t = 5)]
        limit: usize,

        /// Citation style
        #[arg(long, short, value_enum, default_value_t = Style::Apa)]
        style: Style,
    },

    /// Check a free-text citation
    Validate {
        /// Citation text
        citation: String,
    },

    /// List supported styles
    Styles,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("paper-forge - Environment Variables");
    println!();
    println!("Provider credentials:");
    println!("  GEMINI_API_KEY               Google Gemini API key (primary provider)");
    println!("  OPENAI_API_KEY               OpenAI API key (secondary provider)");
    println!("  SEMANTIC_SCHOLAR_API_KEY     Semantic Scholar API key (higher rate limits)");
    println!();
    println!("Configuration overrides (PAPER_FORGE__<SECTION>__<KEY>):");
    println!("  PAPER_FORGE__PROVIDERS__ORDER              Provider chain, comma-separated (default: gemini,openai)");
    println!("  PAPER_FORGE__PROVIDERS__GEMINI_MODEL       Gemini model (default: gemini-1.5-flash)");
    println!("  PAPER_FORGE__PROVIDERS__OPENAI_MODEL       OpenAI model (default: gpt-3.5-turbo)");
    println!("  PAPER_FORGE__PROVIDERS__TIMEOUT_SECS       Provider request timeout (default: 30)");
    println!("  PAPER_FORGE__GENERATION__MIN_RESPONSE_CHARS  Shortest accepted provider reply (default: 20)");
    println!("  PAPER_FORGE__CITATIONS__TIMEOUT_SECS       Citation API timeout (default: 10)");
    println!("  PAPER_FORGE__SERVER__HOST                  HTTP bind host (default: 127.0.0.1)");
    println!("  PAPER_FORGE__SERVER__PORT                  HTTP port (default: 3000)");
    println!("  PAPER_FORGE__LOGGING__FORMAT               text or json (default: text)");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                     Logging filter (e.g., debug, paper_forge=trace)");
    println!();
    println!("Example:");
    println!("  export GEMINI_API_KEY=\"your-key-here\"");
    println!("  export PAPER_FORGE__PROVIDERS__ORDER=\"openai,gemini\"");
}

/// Resolve the config file and load it, falling back to environment-only config
fn resolve_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };
    let config = match &path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_from_env().context("Failed to load config from environment")?,
    };
    Ok((config, path))
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone().unwrap_or_else(|| "info".to_string()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("paper_forge={}", level)));

    // stdout carries MCP traffic in stdio mode
    match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn read_input(input: &TextInput) -> Result<String> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn read_paper(path: &Path) -> Result<GeneratedPaper> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("{} is not a saved paper", path.display()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let (mut config, config_path) = resolve_config(cli.config.as_deref())?;
    if let Some(timeout) = cli.timeout {
        config.providers.timeout_secs = timeout;
    }

    init_tracing(&cli, &config);
    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let json = cli.output.is_json();
    let papers = || -> Result<PaperService> {
        if cli.offline {
            Ok(PaperService::offline())
        } else {
            Ok(PaperService::from_config(&config)?)
        }
    };

    match cli.command {
        Some(Commands::Generate {
            topic,
            section,
            level,
            keywords,
            field,
        }) => {
            let topic = validate_topic(&topic)?;
            let kind = SectionKind::parse(&section);
            let mut request = GenerationRequest::new(topic, kind.clone())
                .detail_level(level.into())
                .keywords(keywords);
            if let Some(field) = field {
                request = request.field(field);
            }

            let service = papers()?;
            let spinner = (!json && !cli.quiet).then(|| Spinner::new(&format!("Generating {}...", kind)));
            let result = service.generator().generate(&request).await;
            if let Some(spinner) = spinner {
                spinner.finish();
            }

            if json {
                print_json(&result)?;
            } else {
                ui::print_generation(&kind.heading(), &result);
            }
        }

        Some(Commands::Paper {
            topic,
            keywords,
            style,
            level,
            field,
            sections,
            save,
        }) => {
            let sections = if sections.is_empty() {
                default_sections()
            } else {
                sections.iter().map(|s| SectionKind::parse(s)).collect()
            };
            let request = PaperRequest::new(topic)
                .keywords(keywords)
                .citation_style(style.into())
                .detail_level(level.into())
                .field(field)
                .sections(sections);

            let service = papers()?;
            let spinner = (!json && !cli.quiet).then(|| Spinner::new("Generating paper..."));
            let paper = service.generate_paper(request).await;
            if let Some(spinner) = spinner {
                spinner.finish();
            }
            let paper = paper?;

            if let Some(path) = save {
                std::fs::write(&path, serde_json::to_string_pretty(&paper)?)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !cli.quiet {
                    ui::print_status(Status::Success, &format!("Saved to {}", path.display()));
                }
            }

            if json {
                print_json(&paper)?;
            } else {
                ui::print_paper(&paper);
            }
        }

        Some(Commands::Outline { topic, paper_type }) => {
            let service = papers()?;
            let spinner = (!json && !cli.quiet).then(|| Spinner::new("Outlining..."));
            let outline = service.generate_outline(&topic, &paper_type).await;
            if let Some(spinner) = spinner {
                spinner.finish();
            }
            let outline = outline?;

            if json {
                print_json(&outline)?;
            } else {
                ui::print_section(&format!("Outline ({})", outline.paper_type));
                println!("{}", outline.outline.trim());
                ui::print_source(&outline.source);
            }
        }

        Some(Commands::Enhance { input, mode }) => {
            let text = read_input(&input)?;
            let service = papers()?;
            let enhanced = service.enhance_text(&text, mode.into()).await?;

            if json {
                print_json(&enhanced)?;
            } else {
                ui::print_section(&format!("Enhanced ({})", enhanced.mode));
                println!("{}", enhanced.enhanced);
                ui::print_source(&enhanced.source);
            }
        }

        Some(Commands::Suggest { topic, section }) => {
            let topic = validate_topic(&topic)?;
            let kind = SectionKind::parse(&section);
            let suggestions = writing_suggestions(&topic, &kind);

            if json {
                print_json(&serde_json::json!({
                    "topic": topic,
                    "section": kind,
                    "suggestions": suggestions,
                }))?;
            } else {
                ui::print_section(&kind.heading());
                for tip in suggestions {
                    println!("  • {}", tip);
                }
            }
        }

        Some(Commands::Review { paper }) => {
            let paper = read_paper(&paper)?;
            let review = peer_review(&QualityAnalyzer::new().analyze_paper(&paper));
            if json {
                print_json(&review)?;
            } else {
                ui::print_peer_review(&review);
            }
        }

        Some(Commands::Templates) => {
            let catalog = template_catalog();
            if json {
                print_json(&catalog)?;
            } else {
                println!("{}", ui::templates_table(&catalog));
            }
        }

        Some(Commands::Cite { command }) => match command {
            CiteCommands::Search {
                topic,
                limit,
                style,
            } => {
                let topic = validate_topic(&topic)?;
                let service = papers()?;
                let citations = service.citations().fetch_citations(&topic, limit).await;
                let formatted = format_all(&citations, style.into());

                if json {
                    print_json(&serde_json::json!({
                        "citations": citations,
                        "formatted": formatted,
                    }))?;
                } else {
                    for entry in formatted {
                        println!("{}\n", entry);
                    }
                }
            }
            CiteCommands::Validate { citation } => {
                let validation = validate_citation(&citation);
                if json {
                    print_json(&validation)?;
                } else {
                    ui::print_citation_validation(&validation);
                }
            }
            CiteCommands::Styles => {
                for style in CitationStyle::ALL {
                    println!("{:<8} {}", style.code(), style);
                }
            }
        },

        Some(Commands::Plagiarism { input }) => {
            let text = read_input(&input)?;
            let report = check_text(&text)?;
            if json {
                print_json(&report)?;
            } else {
                ui::print_plagiarism(&report);
            }
        }

        Some(Commands::Classify { input, title }) => {
            let text = read_input(&input)?;
            let service = papers()?;
            let classification = service.classifier().classify(&text, &title).await;
            if json {
                print_json(&classification)?;
            } else {
                ui::print_domain(&classification);
            }
        }

        Some(Commands::Quality { paper, input }) => {
            let analyzer = QualityAnalyzer::new();
            let report = match paper {
                Some(path) => analyzer.analyze_paper(&read_paper(&path)?),
                None => analyzer.analyze_text(&read_input(&input)?, &[]),
            };
            if json {
                print_json(&report)?;
            } else {
                ui::print_quality(&report);
            }
        }

        Some(Commands::Export {
            paper,
            format,
            template,
            out_dir,
        }) => {
            let paper = read_paper(&paper)?;
            let format = ExportFormat::parse(&format, template.as_deref())?;
            let document = export_paper(&paper, format);

            match out_dir {
                Some(dir) => {
                    std::fs::create_dir_all(&dir)
                        .with_context(|| format!("Failed to create {}", dir.display()))?;
                    let path = dir.join(sanitize_filename(&document.filename)?);
                    std::fs::write(&path, &document.content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    if !cli.quiet {
                        ui::print_status(Status::Success, &format!("Wrote {}", path.display()));
                    }
                }
                None => print!("{}", document.content),
            }
        }

        Some(Commands::Providers) => {
            let registry = ProviderRegistry::from_config(&config)?;
            if json {
                let providers: Vec<_> = registry
                    .chain()
                    .iter()
                    .enumerate()
                    .map(|(rank, p)| {
                        serde_json::json!({
                            "rank": rank,
                            "id": p.id(),
                            "name": p.name(),
                            "configured": p.is_configured(),
                        })
                    })
                    .collect();
                print_json(&providers)?;
            } else {
                println!("{}", ui::providers_table(&registry.chain()));
                if registry.configured().is_empty() {
                    ui::print_status(
                        Status::Warning,
                        "No provider credentials set; sections will use offline templates",
                    );
                }
            }
        }

        Some(Commands::Serve {
            stdio,
            http,
            port,
            host,
        }) => {
            let server = McpServer::new(papers()?)?;

            if http || !stdio {
                let addr = format!(
                    "{}:{}",
                    host.unwrap_or_else(|| config.server.host.clone()),
                    port.unwrap_or(config.server.port)
                );
                let (bound_addr, handle) = server.run_http(&addr).await?;
                tracing::info!("MCP server listening on {}", bound_addr);

                handle
                    .await
                    .map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
            } else {
                server.run().await?;
            }
        }

        Some(Commands::Config { path }) => {
            if path {
                match config_path {
                    Some(path) => println!("{}", path.display()),
                    None => println!("(no config file; using defaults and environment)"),
                }
            } else {
                print!("{}", render_config(&config)?);
            }
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "paper-forge", &mut std::io::stdout());
        }

        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["paper-forge"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert!(!cli.offline);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert_eq!(cli.timeout, None);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::parse_from(["paper-forge", "-vv"]);
        assert_eq!(cli.verbose, 2);

        let cli = Cli::parse_from(["paper-forge", "--verbose"]);
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_cli_output_format() {
        let cli = Cli::parse_from(["paper-forge", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.output.is_json());
        assert!(!OutputFormat::Text.is_json());
    }

    #[test]
    fn test_cli_generate_command() {
        let cli = Cli::parse_from([
            "paper-forge",
            "generate",
            "graph coloring",
            "--section",
            "literature review",
            "-k",
            "register allocation,heuristics",
            "--level",
            "advanced",
        ]);
        match &cli.command {
            Some(Commands::Generate {
                topic,
                section,
                keywords,
                level,
                ..
            }) => {
                assert_eq!(topic, "graph coloring");
                assert_eq!(SectionKind::parse(section), SectionKind::LiteratureReview);
                assert_eq!(keywords.len(), 2);
                assert_eq!(*level, Level::Advanced);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_paper_command() {
        let cli = Cli::parse_from([
            "paper-forge",
            "--offline",
            "paper",
            "soil microbiomes",
            "--style",
            "ieee",
            "--sections",
            "abstract,methodology",
        ]);
        assert!(cli.offline);
        match &cli.command {
            Some(Commands::Paper {
                style, sections, field, ..
            }) => {
                assert_eq!(CitationStyle::from(*style), CitationStyle::Ieee);
                assert_eq!(sections, &vec!["abstract".to_string(), "methodology".to_string()]);
                assert_eq!(field, "Computer Science");
            }
            _ => panic!("Expected Paper command"),
        }
    }

    #[test]
    fn test_cli_cite_and_export() {
        let cli = Cli::parse_from(["paper-forge", "cite", "search", "fmri", "-l", "3"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Cite {
                command: CiteCommands::Search { limit: 3, .. }
            })
        ));

        let cli = Cli::parse_from(["paper-forge", "export", "p.json", "-f", "latex", "-t", "ieee"]);
        match &cli.command {
            Some(Commands::Export {
                format, template, ..
            }) => {
                assert_eq!(format, "latex");
                assert_eq!(template.as_deref(), Some("ieee"));
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_writing_commands() {
        let cli = Cli::parse_from(["paper-forge", "enhance", "caches help", "-m", "academic-tone"]);
        match &cli.command {
            Some(Commands::Enhance { input, mode }) => {
                assert_eq!(input.text.as_deref(), Some("caches help"));
                assert_eq!(Enhancement::from(*mode), Enhancement::AcademicTone);
            }
            _ => panic!("Expected Enhance command"),
        }

        let cli = Cli::parse_from(["paper-forge", "outline", "fMRI"]);
        match &cli.command {
            Some(Commands::Outline { paper_type, .. }) => assert_eq!(paper_type, "research paper"),
            _ => panic!("Expected Outline command"),
        }

        let cli = Cli::parse_from(["paper-forge", "suggest", "fMRI", "-s", "methodology"]);
        assert!(matches!(cli.command, Some(Commands::Suggest { ref section, .. }) if section == "methodology"));

        let cli = Cli::parse_from(["paper-forge", "review", "p.json"]);
        assert!(matches!(cli.command, Some(Commands::Review { .. })));
        assert!(matches!(
            Cli::parse_from(["paper-forge", "templates"]).command,
            Some(Commands::Templates)
        ));
    }

    #[test]
    fn test_cli_serve_defaults() {
        let cli = Cli::parse_from(["paper-forge", "serve"]);
        match &cli.command {
            Some(Commands::Serve {
                stdio, port, host, http,
            }) => {
                assert!(*stdio);
                assert!(!*http);
                assert_eq!(*port, None);
                assert_eq!(*host, None);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
