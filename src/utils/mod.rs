//! Utility modules shared across the crate.
//!
//! - [`HttpClient`]: reqwest client with an optional `governor` rate limit
//! - [`validate_topic`], [`validate_text_length`], [`parse_paper_id`]:
//!   caller-side input checks, reported as [`ValidationError`]
//! - [`text`]: case-insensitive term matching used by the keyword heuristics
//!
//! # HTTP Client with Rate Limiting
//!
//! ```rust,no_run
//! use paper_forge::utils::HttpClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?.rate_limited(5);
//! let response = client
//!     .throttled()
//!     .await
//!     .get("https://api.crossref.org/works?query=graph+coloring&rows=3")
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod http;
pub mod text;
mod validate;

pub use http::{HttpClient, USER_AGENT};
pub use validate::{
    filename_stem, parse_paper_id, sanitize_filename, validate_text, validate_text_length,
    validate_topic, ValidationError, MAX_ANALYSIS_CHARS, MIN_ANALYSIS_CHARS,
};
