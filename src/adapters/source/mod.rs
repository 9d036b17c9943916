//! Span source abstraction
//!
//! A span source supplies raw candidate entity spans over a text. The
//! trait returns a `Result` so that "the model produced zero spans" and
//! "the model call failed" stay distinguishable; conflating the two hides
//! upstream outages as silently-empty documents.

pub mod file;
pub mod remote;

use crate::domain::{InferenceError, RawSpan};
use async_trait::async_trait;

pub use file::FileSource;
pub use remote::RemoteNerSource;

/// Supplier of raw candidate spans for a text
#[async_trait]
pub trait SpanSource: Send + Sync {
    /// Fetch candidate spans for the text
    ///
    /// An empty vector is a valid answer; errors are reserved for
    /// transport and protocol failures.
    async fn spans(&self, text: &str) -> Result<Vec<RawSpan>, InferenceError>;

    /// Human-readable source name for logging
    fn name(&self) -> &str;
}

/// Source that always returns no candidates
///
/// Used when no NER endpoint is configured; the regex fallback stage
/// still provides a recall floor on rigidly-formatted identifiers.
#[derive(Debug, Default)]
pub struct EmptySource;

#[async_trait]
impl SpanSource for EmptySource {
    async fn spans(&self, _text: &str) -> Result<Vec<RawSpan>, InferenceError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "empty"
    }
}
