//! Section generation with provider fallback.
//!
//! [`ContentGenerationService::generate`] walks the provider chain in order,
//! trying each configured provider once. The first response whose trimmed
//! length exceeds `min_response_chars` wins; when none does, the section is
//! produced by the deterministic offline templates in [`offline`].
//!
//! ```text
//! START -> TRY_PRIMARY -> { SUCCESS | TRY_SECONDARY } -> { SUCCESS | OFFLINE_FALLBACK } -> DONE
//! ```
//!
//! The service keeps no state between calls and never returns an error.
//! Topic validation is the caller's job (see [`crate::utils::validate_topic`]).

pub mod assist;
pub mod offline;
pub mod prompt;

pub use assist::{
    offline_outline, outline_prompt, writing_suggestions, Enhancement, DEFAULT_PAPER_TYPE,
};
pub use offline::{generate_offline, TopicCategory};
pub use prompt::build_prompt;

use std::sync::Arc;

use crate::config::GenerationConfig;
use crate::models::{GenerationRequest, GenerationResult, GenerationSource};
use crate::providers::{ProviderRegistry, TextProvider};

/// Produces section text from an ordered provider chain
#[derive(Debug, Clone)]
pub struct ContentGenerationService {
    providers: Vec<Arc<dyn TextProvider>>,
    config: GenerationConfig,
}

impl ContentGenerationService {
    /// Create a service over providers in preference order
    pub fn new(providers: Vec<Arc<dyn TextProvider>>, config: GenerationConfig) -> Self {
        Self { providers, config }
    }

    pub fn from_registry(registry: &ProviderRegistry, config: GenerationConfig) -> Self {
        Self::new(registry.chain(), config)
    }

    /// A service with no providers; every call uses the offline templates
    pub fn offline_only() -> Self {
        Self::new(Vec::new(), GenerationConfig::default())
    }

    /// Providers in chain order
    pub fn providers(&self) -> &[Arc<dyn TextProvider>] {
        &self.providers
    }

    pub fn min_response_chars(&self) -> usize {
        self.config.min_response_chars
    }

    /// Generate one section
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let prompt = build_prompt(request);
        let section = request.section_kind.id();

        self.complete_or_else(&prompt, section, || {
            tracing::info!(
                section,
                category = TopicCategory::classify(&request.topic, &request.keywords).id(),
                "Using offline content generator"
            );
            generate_offline(request)
        })
        .await
    }

    /// Run a prompt through the chain, falling back to `offline` when no
    /// provider returns a long enough reply
    ///
    /// `task` only labels log records.
    pub async fn complete_or_else<F>(&self, prompt: &str, task: &str, offline: F) -> GenerationResult
    where
        F: FnOnce() -> String,
    {
        for (rank, provider) in self.providers.iter().enumerate() {
            if !provider.is_configured() {
                tracing::debug!(
                    provider = provider.id(),
                    task,
                    "Skipping provider without credential"
                );
                continue;
            }

            match provider.complete(prompt).await {
                Ok(text) => {
                    let trimmed = text.trim();
                    let length = trimmed.chars().count();
                    if length > self.config.min_response_chars {
                        tracing::info!(
                            provider = provider.id(),
                            rank,
                            task,
                            chars = length,
                            "Generated text with provider"
                        );
                        return GenerationResult::new(
                            trimmed,
                            GenerationSource::provider(provider.id(), rank),
                        );
                    }
                    tracing::warn!(
                        provider = provider.id(),
                        task,
                        chars = length,
                        min = self.config.min_response_chars,
                        "Provider response below minimum length"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        provider = provider.id(),
                        task,
                        kind = %err.kind(),
                        error = %err,
                        "Provider failed"
                    );
                }
            }
        }

        let text = offline();
        tracing::debug!(task, chars = text.chars().count(), "Offline text produced");
        GenerationResult::new(text, GenerationSource::OfflineFallback)
    }
}
