//! Entity extraction, normalization, conflict-resolution and masking
//!
//! The pipeline takes noisy candidate spans (model output plus regex
//! matches) and deterministically reduces them to a non-overlapping,
//! consistently-numbered set of tagged entities, then produces the
//! masked text and the mapping needed to reverse it.
//!
//! # Stage order
//!
//! SpanSource → confidence filter → infrastructure relabel → merge →
//! suffix trim → age refinement → particle filter → boundary expansion →
//! regex fallback → overlap resolution → tagging → masking.
//!
//! Data flows strictly forward; every offset refers to the original
//! text for the whole run.

pub mod config;
pub mod engine;
pub mod expand;
pub mod fallback;
pub mod mask;
pub mod merge;
pub mod normalize;
pub mod resolve;
pub mod tagger;

pub use config::PipelineConfig;
pub use engine::{PiiPipeline, Stage, DEFAULT_STAGES};
pub use fallback::FallbackRegistry;
pub use mask::{mask_text, unmask_text};
