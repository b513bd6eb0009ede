//! Configuration management.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then `PAPER_FORGE__*` environment variables (sections separated by `__`,
//! e.g. `PAPER_FORGE__PROVIDERS__TIMEOUT_SECS=60`).
//!
//! ```toml
//! [api_keys]
//! gemini = "your-gemini-key"
//! openai = "sk-..."
//! semantic_scholar = "optional"
//!
//! [providers]
//! order = ["gemini", "openai"]
//! gemini_model = "gemini-1.5-flash"
//! openai_model = "gpt-3.5-turbo"
//! timeout_secs = 30
//!
//! [generation]
//! min_response_chars = 20
//!
//! [citations]
//! semantic_scholar_requests_per_second = 1
//! crossref_requests_per_second = 5
//!
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [logging]
//! format = "text"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Credential value shipped in sample `.env` files; treated as absent
pub const PLACEHOLDER_CREDENTIAL: &str = "sk-test-key-placeholder";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeys,

    /// Text-generation provider settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Generation chain settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Citation lookup settings
    #[serde(default)]
    pub citations: CitationsConfig,

    /// Tool server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API keys for external services
///
/// Missing keys default to the conventional environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default = "env_gemini_key")]
    pub gemini: Option<String>,

    #[serde(default = "env_openai_key")]
    pub openai: Option<String>,

    /// Semantic Scholar API key (optional, for higher rate limits)
    #[serde(default = "env_semantic_scholar_key")]
    pub semantic_scholar: Option<String>,
}

impl Default for ApiKeys {
    fn default() -> Self {
        Self {
            gemini: env_gemini_key(),
            openai: env_openai_key(),
            semantic_scholar: env_semantic_scholar_key(),
        }
    }
}

/// Shown in place of a configured credential
pub const REDACTED_CREDENTIAL: &str = "<set>";

impl ApiKeys {
    /// Copy with every present credential replaced by [`REDACTED_CREDENTIAL`]
    pub fn redacted(&self) -> Self {
        let mask = |key: &Option<String>| {
            normalize_credential(key.as_deref()).map(|_| REDACTED_CREDENTIAL.to_string())
        };
        Self {
            gemini: mask(&self.gemini),
            openai: mask(&self.openai),
            semantic_scholar: mask(&self.semantic_scholar),
        }
    }
}

fn env_gemini_key() -> Option<String> {
    std::env::var("GEMINI_API_KEY").ok()
}

fn env_openai_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok()
}

fn env_semantic_scholar_key() -> Option<String> {
    std::env::var("SEMANTIC_SCHOLAR_API_KEY").ok()
}

/// Drop blank and placeholder credentials
pub fn normalize_credential(key: Option<&str>) -> Option<String> {
    key.map(str::trim)
        .filter(|k| !k.is_empty() && *k != PLACEHOLDER_CREDENTIAL)
        .map(str::to_string)
}

/// Text-generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Provider ids in preference order
    #[serde(default = "default_provider_order")]
    pub order: Vec<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_provider_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: default_provider_order(),
            gemini_model: default_gemini_model(),
            gemini_base_url: default_gemini_base_url(),
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            timeout_secs: default_provider_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_provider_order() -> Vec<String> {
    vec!["gemini".to_string(), "openai".to_string()]
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_provider_timeout() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_temperature() -> f32 {
    0.7
}

/// Everything one provider client needs, resolved from [`Config`]
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub id: String,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ProviderConfig {
    pub fn new(id: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            api_key: None,
            model: model.into(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(default_provider_timeout()),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }

    /// Set the credential; blank and placeholder values leave it unset
    pub fn api_key(mut self, key: impl AsRef<str>) -> Self {
        self.api_key = normalize_credential(Some(key.as_ref()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// A provider without a credential is never called
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Config {
    /// Resolve per-provider settings in chain order
    ///
    /// Unknown ids are skipped with a warning.
    pub fn provider_configs(&self) -> Vec<ProviderConfig> {
        let timeout = Duration::from_secs(self.providers.timeout_secs);
        let mut configs = Vec::new();

        for id in &self.providers.order {
            let id = id.trim().to_lowercase();
            let (key, model, base_url) = match id.as_str() {
                "gemini" => (
                    self.api_keys.gemini.as_deref(),
                    &self.providers.gemini_model,
                    &self.providers.gemini_base_url,
                ),
                "openai" => (
                    self.api_keys.openai.as_deref(),
                    &self.providers.openai_model,
                    &self.providers.openai_base_url,
                ),
                other => {
                    tracing::warn!("Ignoring unknown provider '{}' in providers.order", other);
                    continue;
                }
            };

            if configs.iter().any(|c: &ProviderConfig| c.id == id) {
                continue;
            }

            configs.push(ProviderConfig {
                id,
                api_key: normalize_credential(key),
                model: model.clone(),
                base_url: base_url.clone(),
                timeout,
                max_tokens: self.providers.max_tokens,
                temperature: self.providers.temperature,
            });
        }

        configs
    }
}

/// Generation chain settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Provider output must be longer than this (trimmed chars) to be accepted
    #[serde(default = "default_min_response_chars")]
    pub min_response_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_response_chars: default_min_response_chars(),
        }
    }
}

fn default_min_response_chars() -> usize {
    20
}

/// Citation lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationsConfig {
    #[serde(default = "default_semantic_base_url")]
    pub semantic_scholar_base_url: String,

    #[serde(default = "default_crossref_base_url")]
    pub crossref_base_url: String,

    #[serde(default = "default_semantic_rps")]
    pub semantic_scholar_requests_per_second: u32,

    #[serde(default = "default_crossref_rps")]
    pub crossref_requests_per_second: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_citation_timeout")]
    pub timeout_secs: u64,
}

impl Default for CitationsConfig {
    fn default() -> Self {
        Self {
            semantic_scholar_base_url: default_semantic_base_url(),
            crossref_base_url: default_crossref_base_url(),
            semantic_scholar_requests_per_second: default_semantic_rps(),
            crossref_requests_per_second: default_crossref_rps(),
            timeout_secs: default_citation_timeout(),
        }
    }
}

fn default_semantic_base_url() -> String {
    "https://api.semanticscholar.org/graph/v1".to_string()
}

fn default_crossref_base_url() -> String {
    "https://api.crossref.org".to_string()
}

fn default_semantic_rps() -> u32 {
    1
}

fn default_crossref_rps() -> u32 {
    5
}

fn default_citation_timeout() -> u64 {
    10
}

/// Tool server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Logging output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (e.g. "info")
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub format: LogFormat,
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment_source())
        .build()?;

    settings.try_deserialize()
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(environment_source())
        .build()?
        .try_deserialize()
}

fn environment_source() -> config::Environment {
    config::Environment::with_prefix("PAPER_FORGE")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("providers.order")
        .try_parsing(true)
}

/// Look for a config file in the working directory, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("paper-forge.toml");
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-forge").join("config.toml"))
        .filter(|path| path.is_file())
}

/// Render a configuration as TOML, with credentials redacted
pub fn render_config(config: &Config) -> Result<String, toml::ser::Error> {
    let mut shown = config.clone();
    shown.api_keys = config.api_keys.redacted();
    toml::to_string_pretty(&shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.providers.order, vec!["gemini", "openai"]);
        assert_eq!(config.generation.min_response_chars, 20);
        assert_eq!(config.citations.semantic_scholar_requests_per_second, 1);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_normalize_credential() {
        assert_eq!(normalize_credential(None), None);
        assert_eq!(normalize_credential(Some("   ")), None);
        assert_eq!(normalize_credential(Some(PLACEHOLDER_CREDENTIAL)), None);
        assert_eq!(
            normalize_credential(Some(" key-123 ")),
            Some("key-123".to_string())
        );
    }

    #[test]
    fn test_provider_configs_follow_order() {
        let mut config = Config::default();
        config.api_keys.gemini = Some("g-key".into());
        config.api_keys.openai = Some(PLACEHOLDER_CREDENTIAL.into());
        config.providers.order = vec!["openai".into(), "unknown".into(), "gemini".into(), "openai".into()];

        let providers = config.provider_configs();
        let ids: Vec<&str> = providers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["openai", "gemini"]);
        assert!(!providers[0].is_configured());
        assert!(providers[1].is_configured());
        assert_eq!(providers[1].model, "gemini-1.5-flash");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api_keys]
gemini = "file-key"

[providers]
order = ["openai"]
timeout_secs = 5

[generation]
min_response_chars = 40
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api_keys.gemini.as_deref(), Some("file-key"));
        assert_eq!(config.providers.order, vec!["openai"]);
        assert_eq!(config.providers.timeout_secs, 5);
        assert_eq!(config.generation.min_response_chars, 40);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_render_config_roundtrips_through_toml() {
        let rendered = render_config(&Config::default()).unwrap();
        assert!(rendered.contains("[providers]"));
        assert!(rendered.contains("min_response_chars = 20"));
    }

    #[test]
    fn test_render_config_redacts_credentials() {
        let mut config = Config::default();
        config.api_keys.gemini = Some("AIza-real-gemini-key".into());
        config.api_keys.openai = Some("sk-live-openai-key".into());
        config.api_keys.semantic_scholar = Some("  ".into());

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("AIza-real-gemini-key"));
        assert!(!rendered.contains("sk-live-openai-key"));
        assert!(rendered.contains(&format!("gemini = \"{}\"", REDACTED_CREDENTIAL)));
        assert!(!rendered.contains("semantic_scholar ="));

        // input config is untouched
        assert_eq!(config.api_keys.gemini.as_deref(), Some("AIza-real-gemini-key"));
    }
}
