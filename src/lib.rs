// hkmask - Hong Kong PII detection and reversible masking
// Licensed under the MIT License

//! # hkmask - Hong Kong PII masking
//!
//! hkmask detects personally identifiable information in mixed
//! Chinese/English Hong Kong text and replaces it with reversible
//! numbered tags, so documents can be handed to external processors
//! (such as an LLM) without exposing real PII.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** raw NER candidate spans into clean, non-overlapping entities
//! - **Catching** model misses with Hong Kong-specific regex fallbacks
//!   (HKID, phone, license plate, email, bank account)
//! - **Masking** text with `[LABEL-n]` tags and a reversible tag mapping
//! - **Unmasking** processed text with an audit of lost or duplicated tags
//!
//! ## Architecture
//!
//! hkmask follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`pipeline`] - Span-resolution stages, masking and unmasking
//! - [`adapters`] - External integrations (NER span sources, LLM clients)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use hkmask::domain::RawSpan;
//! use hkmask::pipeline::{PiiPipeline, PipelineConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = PiiPipeline::new(PipelineConfig::default())?;
//!
//! let text = "Call 91234567 now.";
//! let spans = vec![RawSpan::new(5, 13, "PHONE", "91234567", 0.9)];
//! let doc = pipeline.process(text, &spans);
//!
//! assert_eq!(doc.masked, "Call [PHONE-1] now.");
//! assert_eq!(doc.mappings.get("PHONE-1"), Some("91234567"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Round Trip
//!
//! Masking is exactly reversible: restoring the mapping into an
//! unmodified masked text reproduces the original document.
//!
//! ```rust
//! use hkmask::pipeline::unmask_text;
//! # use hkmask::domain::TagMap;
//! # let mut mappings = TagMap::new();
//! # mappings.insert("PHONE-1", "91234567");
//!
//! let (restored, audit) = unmask_text("Call [PHONE-1] now.", &mappings);
//! assert_eq!(restored, "Call 91234567 now.");
//! assert!(audit.is_clean());
//! ```
//!
//! ## Error Handling
//!
//! hkmask uses the [`domain::HkMaskError`] type for all errors:
//!
//! ```rust,no_run
//! use hkmask::domain::HkMaskError;
//!
//! fn example() -> Result<(), HkMaskError> {
//!     let config = hkmask::config::load_config("hkmask.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! hkmask uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(entities = 3, "document masked");
//! warn!(tag = "NAME-2", "tag missing from rewritten text");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
pub mod pipeline;
