//! Overlap resolution
//!
//! Classic greedy weighted-interval selection: candidates are ranked by
//! label priority, then length, then score, and accepted unless they
//! overlap an earlier acceptance. Deterministic precedence by entity-type
//! reliability is the goal here, not maximal coverage.

use crate::domain::Span;
use crate::pipeline::config::PipelineConfig;
use std::cmp::Ordering;

/// Select a maximal mutually non-overlapping span subset
///
/// Zero-length and inverted spans are a defect signal from upstream and
/// are dropped before ranking; they must never reach masking. Output is
/// sorted by start offset.
pub fn resolve_overlaps(config: &PipelineConfig, spans: Vec<Span>) -> Vec<Span> {
    let mut candidates: Vec<Span> = spans.into_iter().filter(|s| !s.is_empty()).collect();

    candidates.sort_by(|a, b| {
        config
            .priority(b.label)
            .cmp(&config.priority(a.label))
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| b.score.total_cmp(&a.score))
            // stable final order for equal-ranked candidates
            .then_with(|| a.start.cmp(&b.start))
    });

    let mut accepted: Vec<Span> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted.iter().all(|kept| !candidate.overlaps(kept)) {
            accepted.push(candidate);
        }
    }

    accepted.sort_by(|a, b| match a.start.cmp(&b.start) {
        Ordering::Equal => a.end.cmp(&b.end),
        other => other,
    });
    accepted
}
