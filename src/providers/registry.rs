//! Builds the ordered provider chain from configuration.

use std::sync::Arc;

use super::{GeminiProvider, OpenAiProvider, ProviderError, TextProvider};
use crate::config::{Config, ProviderConfig};

/// Ordered collection of text providers
///
/// Order is preference order: index 0 is tried first.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn TextProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the chain from resolved provider settings
    ///
    /// Unknown ids are skipped with a warning.
    pub fn from_provider_configs(configs: Vec<ProviderConfig>) -> Result<Self, ProviderError> {
        let mut registry = Self::new();

        for config in configs {
            let provider: Arc<dyn TextProvider> = match config.id.as_str() {
                "gemini" => Arc::new(GeminiProvider::new(config)?),
                "openai" => Arc::new(OpenAiProvider::new(config)?),
                other => {
                    tracing::warn!("No provider implementation for '{}'", other);
                    continue;
                }
            };
            registry.register(provider);
        }

        Ok(registry)
    }

    /// Build the chain from application configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::from_provider_configs(config.provider_configs())
    }

    /// Append a provider at the end of the chain; a duplicate id replaces the earlier entry in place
    pub fn register(&mut self, provider: Arc<dyn TextProvider>) {
        if let Some(slot) = self.providers.iter_mut().find(|p| p.id() == provider.id()) {
            *slot = provider;
        } else {
            self.providers.push(provider);
        }
    }

    /// Get a provider by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn TextProvider>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    /// Providers in chain order
    pub fn chain(&self) -> Vec<Arc<dyn TextProvider>> {
        self.providers.clone()
    }

    /// Providers that have credentials
    pub fn configured(&self) -> Vec<&Arc<dyn TextProvider>> {
        self.providers.iter().filter(|p| p.is_configured()).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.id())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;

    #[test]
    fn test_from_config_respects_order() {
        let mut config = Config::default();
        config.api_keys.gemini = None;
        config.api_keys.openai = Some("sk-real".into());
        config.providers.order = vec!["openai".into(), "gemini".into()];

        let registry = ProviderRegistry::from_config(&config).unwrap();
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["openai", "gemini"]);
        assert_eq!(registry.configured().len(), 1);
        assert!(registry.get("gemini").is_some());
    }

    #[test]
    fn test_unknown_provider_configs_are_skipped() {
        let configs = vec![ProviderConfig::new("claude", "any", "http://localhost")];
        let registry = ProviderRegistry::from_provider_configs(configs).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_replaces_duplicate_in_place() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("a", "first")));
        registry.register(Arc::new(MockProvider::new("b", "second")));
        registry.register(Arc::new(MockProvider::unconfigured("a")));

        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.configured().len(), 1);
    }
}
