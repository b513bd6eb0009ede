//! HTTP client utilities.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

type DirectLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with an optional requests-per-second budget
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    limiter: Option<Arc<DirectLimiter>>,
}

impl HttpClient {
    /// Create a client with the default 30s request timeout
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_user_agent(USER_AGENT, timeout)
    }

    /// Create a client with a custom user agent
    pub fn with_user_agent(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            limiter: None,
        })
    }

    /// Create from an existing reqwest Client
    pub fn from_client(client: Arc<Client>) -> Self {
        Self {
            client,
            limiter: None,
        }
    }

    /// Throttle requests made through [`HttpClient::throttled`]; 0 is treated as 1
    pub fn rate_limited(mut self, requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second).unwrap_or(nonzero!(1u32));
        self.limiter = Some(Arc::new(RateLimiter::direct(Quota::per_second(rps))));
        self
    }

    /// Wait for the rate limiter (if any), then hand out the client
    pub async fn throttled(&self) -> &Client {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
        &self.client
    }

    /// Get the underlying client without waiting
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_rate_limited(&self) -> bool {
        self.limiter.is_some()
    }
}
