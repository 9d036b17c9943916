//! Pipeline engine
//!
//! One `PiiPipeline` owns the configuration, the fallback pattern
//! registry and the ordered stage list. Stage order and presence live in
//! one declarative place instead of being re-derived from prose order in
//! a monolithic function.
//!
//! The core is pure synchronous computation over a per-run span list;
//! the only per-run state is local, so batches may process documents on
//! independent tasks without locking.

use crate::domain::{DocumentOutcome, MaskedDocument, RawSpan, Span};
use crate::pipeline::{
    config::PipelineConfig,
    expand::expand_boundaries,
    fallback::{apply_regex_fallback, FallbackRegistry},
    mask::mask_text,
    merge::merge_fragments,
    normalize::{
        filter_low_confidence, filter_particles, forbidden_ranges, refine_age_context,
        relabel_infrastructure, trim_infrastructure_suffix,
    },
    resolve::resolve_overlaps,
    tagger::assign_tags,
};
use anyhow::{Context, Result};
use std::time::Instant;

/// One step of the span-processing pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Drop low-confidence spans and spans inside URLs
    ConfidenceFilter,
    /// Relabel infrastructure chains as ADDRESS
    InfrastructureRelabel,
    /// Fuse same-label fragments across small gaps
    MergeFragments,
    /// Cut trailing infrastructure suffixes
    SuffixTrim,
    /// Remove numeric noise; trim age numerals off addresses
    AgeRefinement,
    /// Drop verb-attached Cantonese particles misread as names
    ParticleFilter,
    /// Grow identifier spans over valid adjacent characters
    BoundaryExpansion,
    /// Inject regex matches the model missed
    RegexFallback,
    /// Reduce to a non-overlapping set by priority/length/score
    OverlapResolution,
}

/// Default stage order: clean, kill, fill, finalize
pub const DEFAULT_STAGES: [Stage; 9] = [
    Stage::ConfidenceFilter,
    Stage::InfrastructureRelabel,
    Stage::MergeFragments,
    Stage::SuffixTrim,
    Stage::AgeRefinement,
    Stage::ParticleFilter,
    Stage::BoundaryExpansion,
    Stage::RegexFallback,
    Stage::OverlapResolution,
];

/// PII masking pipeline
///
/// Stateless across runs: each call to [`process`](Self::process) owns
/// its own span list and tag registry, so a pipeline can be shared
/// across threads or tasks freely.
pub struct PiiPipeline {
    config: PipelineConfig,
    registry: FallbackRegistry,
    stages: Vec<Stage>,
}

impl PiiPipeline {
    /// Create a pipeline with the default stage order
    ///
    /// Loads the custom pattern library when the configuration names one,
    /// the built-in Hong Kong patterns otherwise.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid pipeline configuration")?;

        let registry = match config.pattern_library {
            Some(ref path) => FallbackRegistry::from_file(path)?,
            None => FallbackRegistry::default_patterns()?,
        };

        Ok(Self {
            config,
            registry,
            stages: DEFAULT_STAGES.to_vec(),
        })
    }

    /// Create a pipeline with an explicit stage list
    pub fn with_stages(config: PipelineConfig, stages: Vec<Stage>) -> Result<Self> {
        let mut pipeline = Self::new(config)?;
        pipeline.stages = stages;
        pipeline.stages.dedup();
        Ok(pipeline)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate raw candidate records, dropping defective ones
    ///
    /// A bad candidate never aborts the document; it is logged and
    /// skipped.
    fn admit_spans(&self, text: &str, raw_spans: &[RawSpan]) -> Vec<Span> {
        let mut spans = Vec::with_capacity(raw_spans.len());
        for raw in raw_spans {
            match Span::from_raw(raw, text) {
                Ok(span) => spans.push(span),
                Err(defect) => {
                    tracing::warn!(label = %raw.label, %defect, "dropping malformed span");
                }
            }
        }
        spans
    }

    fn run_stage(&self, stage: Stage, text: &str, forbidden: &[(usize, usize)], spans: Vec<Span>) -> Vec<Span> {
        match stage {
            Stage::ConfidenceFilter => filter_low_confidence(spans, &self.config, forbidden),
            Stage::InfrastructureRelabel => relabel_infrastructure(text, &self.config, spans),
            Stage::MergeFragments => merge_fragments(&self.config, spans),
            Stage::SuffixTrim => trim_infrastructure_suffix(text, &self.config, spans),
            Stage::AgeRefinement => refine_age_context(text, &self.config, spans),
            Stage::ParticleFilter => filter_particles(text, &self.config, spans),
            Stage::BoundaryExpansion => expand_boundaries(text, spans),
            Stage::RegexFallback => apply_regex_fallback(text, &self.registry, forbidden, spans),
            Stage::OverlapResolution => resolve_overlaps(&self.config, spans),
        }
    }

    /// Run the full pipeline over one document
    ///
    /// Pure computation: always completes, possibly with zero entities
    /// (masked text equals the original, empty mapping).
    pub fn process(&self, text: &str, raw_spans: &[RawSpan]) -> MaskedDocument {
        let start = Instant::now();
        let forbidden = forbidden_ranges(text);
        let mut spans = self.admit_spans(text, raw_spans);

        for &stage in &self.stages {
            spans = self.run_stage(stage, text, &forbidden, spans);
        }

        let (entities, mappings) = assign_tags(text, &spans);
        let masked = mask_text(text, &entities);

        tracing::debug!(
            candidates = raw_spans.len(),
            resolved = entities.len(),
            "document processed"
        );

        MaskedDocument::new(
            text.to_string(),
            masked,
            entities,
            mappings,
            start.elapsed().as_millis() as u64,
        )
    }

    /// Mask one document using a span source
    ///
    /// A source failure (connection, timeout) is surfaced as a failed
    /// outcome for that document; zero spans from a healthy source is a
    /// normal empty result. No retry happens here: a generative upstream
    /// is not idempotent, so retrying is a caller policy decision.
    pub async fn mask_document(
        &self,
        source: &dyn crate::adapters::source::SpanSource,
        text: &str,
    ) -> DocumentOutcome {
        match source.spans(text).await {
            Ok(raw_spans) => DocumentOutcome::Masked(self.process(text, &raw_spans)),
            Err(e) => {
                tracing::error!(source = source.name(), error = %e, "span source failed");
                DocumentOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Mask a batch of documents, continuing past per-document failures
    pub async fn mask_batch(
        &self,
        source: &dyn crate::adapters::source::SpanSource,
        texts: &[String],
    ) -> Vec<DocumentOutcome> {
        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            outcomes.push(self.mask_document(source, text).await);
        }
        outcomes
    }
}
