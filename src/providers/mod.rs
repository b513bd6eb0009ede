//! Text-generation providers.
//!
//! Every backend implements [`TextProvider`]. The generation chain holds an
//! ordered list of providers and tries each one at most once per request, so
//! adding a backend means implementing the trait and teaching
//! [`ProviderRegistry`] its id.
//!
//! # Implementing a Provider
//!
//! 1. Create a struct holding a [`ProviderConfig`](crate::config::ProviderConfig)
//! 2. Report `is_configured() == false` when no credential is present
//! 3. Map HTTP failures onto [`ProviderError`] variants in `complete`

mod gemini;
pub mod mock;
mod openai;
mod registry;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;
pub use registry::ProviderRegistry;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;

/// A text-completion backend
#[async_trait]
pub trait TextProvider: Send + Sync + std::fmt::Debug {
    /// Stable identifier (e.g. "gemini", "openai")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Whether a credential is present; unconfigured providers are never called
    fn is_configured(&self) -> bool;

    /// Complete a prompt, returning the raw response text
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Errors that can occur when calling a provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No credential configured
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider-side rate limit or quota
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Timeouts, connection failures and 5xx responses
    #[error("Network error: {0}")]
    Transient(String),

    /// Credential rejected (401/403)
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Body could not be parsed or carried no text
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Any other API error
    #[error("API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::MalformedResponse(err.to_string())
        } else {
            ProviderError::Transient(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::MalformedResponse(format!("JSON: {}", err))
    }
}

impl ProviderError {
    /// Map a non-success HTTP status and body onto an error variant
    pub fn from_status(provider: &str, status: StatusCode, body: &str) -> Self {
        let detail = format!("{} returned {}: {}", provider, status, body.trim());
        match status.as_u16() {
            429 => ProviderError::RateLimited(detail),
            401 | 403 => ProviderError::InvalidCredential(detail),
            500..=599 => ProviderError::Transient(detail),
            _ => ProviderError::Api(detail),
        }
    }

    /// Diagnostic classification of this failure
    pub fn kind(&self) -> FailureKind {
        FailureKind::classify(self)
    }
}

/// Coarse failure class surfaced in logs; never drives control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    RateLimited,
    TransientNetwork,
    InvalidCredential,
    Unknown,
}

const RATE_LIMIT_MARKERS: [&str; 4] = ["quota", "429", "rate limit", "exceeded"];

impl FailureKind {
    /// Classify a provider error
    ///
    /// Rate limiting is recognised from message text as well as the variant,
    /// since some providers report quota exhaustion with generic statuses.
    pub fn classify(err: &ProviderError) -> Self {
        match err {
            ProviderError::RateLimited(_) => FailureKind::RateLimited,
            ProviderError::InvalidCredential(_) => FailureKind::InvalidCredential,
            ProviderError::Transient(_) => FailureKind::TransientNetwork,
            ProviderError::Api(msg) | ProviderError::MalformedResponse(msg)
                if Self::mentions_rate_limit(msg) =>
            {
                FailureKind::RateLimited
            }
            _ => FailureKind::Unknown,
        }
    }

    /// Substring check for rate-limit wording in an error message
    pub fn mentions_rate_limit(message: &str) -> bool {
        let lower = message.to_lowercase();
        RATE_LIMIT_MARKERS.iter().any(|m| lower.contains(m))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::RateLimited => "rate_limited",
            FailureKind::TransientNetwork => "transient_network",
            FailureKind::InvalidCredential => "invalid_credential",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
