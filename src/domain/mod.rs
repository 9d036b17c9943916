//! Core domain types for hkmask
//!
//! This module defines the data model shared by every pipeline stage:
//! entity labels, spans, resolved entities, tag mappings, document results
//! and the error hierarchy.

pub mod document;
pub mod errors;
pub mod label;
pub mod result;
pub mod span;

pub use document::{DocumentOutcome, MaskedDocument, TagAudit, TagMap};
pub use errors::{HkMaskError, InferenceError, LlmError, SpanDefect};
pub use label::EntityLabel;
pub use result::Result;
pub use span::{RawSpan, ResolvedEntity, Span};
