//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Span-level defects are recovered locally (drop-and-continue); only
//! external I/O failures (NER endpoint, LLM endpoint) are fatal for a
//! document.

use thiserror::Error;

/// Main hkmask error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum HkMaskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// NER span source errors
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    /// LLM paraphrase errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for HkMaskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HkMaskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors from the NER span source
///
/// A source that produced zero spans is NOT an error; these variants only
/// cover transport and protocol failures, so callers can distinguish
/// "model found nothing" from "model call failed".
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the NER endpoint
    #[error("Failed to connect to NER endpoint: {0}")]
    ConnectionFailed(String),

    /// NER endpoint did not respond in time
    #[error("NER endpoint timed out after {0}s")]
    Timeout(u64),

    /// NER endpoint returned a non-success HTTP status
    #[error("NER endpoint returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// NER endpoint response could not be decoded
    #[error("Invalid response from NER endpoint: {0}")]
    InvalidResponse(String),
}

/// Errors from the LLM paraphrase endpoint
///
/// Generative calls are not idempotent, so there is no automatic retry;
/// these propagate to the caller as a per-document failure.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to connect to the LLM endpoint
    #[error("Failed to connect to LLM endpoint: {0}")]
    ConnectionFailed(String),

    /// LLM endpoint did not respond in time
    #[error("LLM endpoint timed out after {0}s")]
    Timeout(u64),

    /// LLM endpoint returned a non-success HTTP status
    #[error("LLM endpoint returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// LLM endpoint response could not be decoded
    #[error("Invalid response from LLM endpoint: {0}")]
    InvalidResponse(String),

    /// LLM returned an empty completion after scrubbing
    #[error("LLM returned an empty completion")]
    EmptyCompletion,
}

/// Reasons a candidate span from the source is rejected before processing
///
/// Each defect drops only the offending span; the document keeps going.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpanDefect {
    /// Offsets inverted or past the end of the text
    #[error("invalid offsets {start}..{end} for text of length {len}")]
    InvalidOffsets { start: usize, end: usize, len: usize },

    /// Offsets do not fall on UTF-8 character boundaries
    #[error("offsets {start}..{end} split a UTF-8 character")]
    NotCharBoundary { start: usize, end: usize },

    /// Claimed text does not match the source slice
    #[error("span text {claimed:?} does not match source slice {actual:?}")]
    TextMismatch { claimed: String, actual: String },

    /// Label string is not in the entity vocabulary
    #[error("unknown entity label {0:?}")]
    UnknownLabel(String),
}
