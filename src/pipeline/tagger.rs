//! Tag assignment
//!
//! Tags are content-addressed per run: the first distinct
//! (label, normalized text) pair takes the next sequence number for its
//! label, and repeats of the same content reuse the existing tag. Tag
//! keys normalize by trimming whitespace and lowercasing, so "Google" and
//! "google" under the same label share one tag. Format is `{LABEL}-{n}`
//! with no zero padding.

use crate::domain::{EntityLabel, ResolvedEntity, Span, TagMap};
use std::collections::HashMap;

/// Assign numbered tags to resolved spans and build the tag mapping
///
/// Input spans must already be resolved (non-overlapping, sorted by
/// start). Deterministic: identical input order yields identical tags.
pub fn assign_tags(text: &str, spans: &[Span]) -> (Vec<ResolvedEntity>, TagMap) {
    let mut counters: HashMap<EntityLabel, usize> = HashMap::new();
    let mut registry: HashMap<(EntityLabel, String), usize> = HashMap::new();
    let mut mappings = TagMap::new();
    let mut entities = Vec::with_capacity(spans.len());

    for span in spans {
        let word = span.text(text);
        let key = (span.label, word.trim().to_lowercase());

        let seq = match registry.get(&key) {
            Some(&seq) => seq,
            None => {
                let counter = counters.entry(span.label).or_insert(0);
                *counter += 1;
                registry.insert(key, *counter);
                *counter
            }
        };

        let tag = format!("{}-{}", span.label, seq);
        // trimmed: the masker keeps boundary whitespace outside the tag
        mappings.insert(&tag, word.trim());
        entities.push(ResolvedEntity::from_span(span, text, tag));
    }

    (entities, mappings)
}
