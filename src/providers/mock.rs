//! Mock provider for testing purposes.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::providers::{ProviderError, TextProvider};

/// Scripted reply for [`MockProvider`]
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    RateLimited,
    Transient,
}

impl MockReply {
    fn into_result(self) -> Result<String, ProviderError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::RateLimited => Err(ProviderError::RateLimited(
                "429: quota exceeded".to_string(),
            )),
            MockReply::Transient => Err(ProviderError::Transient("connection reset".to_string())),
        }
    }
}

/// A provider that returns predefined replies and counts calls
///
/// Replies are consumed in order; the last one repeats once the queue is
/// down to a single entry.
#[derive(Debug)]
pub struct MockProvider {
    id: String,
    configured: bool,
    replies: Mutex<VecDeque<MockReply>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockProvider {
    /// Create a configured mock that always answers `text`
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::scripted(id, vec![MockReply::Text(text.into())])
    }

    /// Create a configured mock with a reply script
    pub fn scripted(id: impl Into<String>, replies: Vec<MockReply>) -> Self {
        Self {
            id: id.into(),
            configured: true,
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a configured mock that always fails with a rate limit
    pub fn failing(id: impl Into<String>) -> Self {
        Self::scripted(id, vec![MockReply::RateLimited])
    }

    /// Create a mock without a credential
    pub fn unconfigured(id: impl Into<String>) -> Self {
        let mut mock = Self::new(id, "unused");
        mock.configured = false;
        mock
    }

    /// Number of times `complete` was called
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Mock Provider"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).push(prompt.to_string());

        let reply = {
            let mut replies = self.replies.lock().unwrap_or_else(PoisonError::into_inner);
            if replies.len() > 1 {
                replies.pop_front()
            } else {
                replies.front().cloned()
            }
        };

        reply
            .unwrap_or_else(|| MockReply::Text(String::new()))
            .into_result()
    }
}
