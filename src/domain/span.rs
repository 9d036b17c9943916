//! Span data models
//!
//! `RawSpan` is the wire record consumed from a span source. `Span` is the
//! internal working representation: it holds only offsets into the fixed
//! source text, and its text is always derived from those offsets. Storing
//! the text redundantly and mutating it alongside the offsets is exactly
//! the staleness bug this design removes.

use crate::domain::errors::SpanDefect;
use crate::domain::label::EntityLabel;
use serde::{Deserialize, Serialize};

/// Candidate entity record as produced by a span source
///
/// Field aliases accept the token-classification wire shape
/// (`entity_group` / `word`) emitted by HuggingFace-style NER endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// Entity label string
    #[serde(alias = "entity_group")]
    pub label: String,
    /// Claimed matched text; validated against the source slice
    #[serde(alias = "word")]
    pub text: String,
    /// Confidence in [0, 1]; regex-derived spans carry 1.0
    pub score: f32,
}

impl RawSpan {
    /// Convenience constructor used by sources and tests
    pub fn new(start: usize, end: usize, label: &str, text: &str, score: f32) -> Self {
        Self {
            start,
            end,
            label: label.to_string(),
            text: text.to_string(),
            score,
        }
    }
}

/// Validated working span over a fixed source text
///
/// Invariant: `0 <= start < end <= source.len()`, both offsets on UTF-8
/// boundaries. Stages may widen, narrow or relabel a span, but only ever
/// against the same source text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub score: f32,
}

impl Span {
    pub fn new(start: usize, end: usize, label: EntityLabel, score: f32) -> Self {
        Self {
            start,
            end,
            label,
            score,
        }
    }

    /// Validate a raw record against the source text
    ///
    /// Rejects inverted or out-of-range offsets, offsets that split a
    /// UTF-8 character, text that disagrees with the source slice, and
    /// labels outside the vocabulary.
    pub fn from_raw(raw: &RawSpan, source: &str) -> Result<Self, SpanDefect> {
        if raw.start >= raw.end || raw.end > source.len() {
            return Err(SpanDefect::InvalidOffsets {
                start: raw.start,
                end: raw.end,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(raw.start) || !source.is_char_boundary(raw.end) {
            return Err(SpanDefect::NotCharBoundary {
                start: raw.start,
                end: raw.end,
            });
        }
        let actual = &source[raw.start..raw.end];
        if raw.text != actual {
            return Err(SpanDefect::TextMismatch {
                claimed: raw.text.clone(),
                actual: actual.to_string(),
            });
        }
        let label = raw
            .label
            .parse::<EntityLabel>()
            .map_err(|_| SpanDefect::UnknownLabel(raw.label.clone()))?;
        Ok(Self::new(raw.start, raw.end, label, raw.score))
    }

    /// The span's text, derived on demand from the source
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Span length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True once mutation has emptied or inverted the span
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Character-range overlap check
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start.max(other.start) < self.end.min(other.end)
    }

    /// Overlap against a bare range
    pub fn overlaps_range(&self, start: usize, end: usize) -> bool {
        self.start.max(start) < self.end.min(end)
    }
}

/// Final entity after overlap resolution and tagging
///
/// The text is materialized here because resolved entities are frozen:
/// no stage mutates offsets past this point, and the record is what gets
/// serialized into the document output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEntity {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
    pub text: String,
    pub tag: String,
    pub score: f32,
}

impl ResolvedEntity {
    pub fn from_span(span: &Span, source: &str, tag: String) -> Self {
        Self {
            start: span.start,
            end: span.end,
            label: span.label,
            text: span.text(source).to_string(),
            tag,
            score: span.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_valid() {
        let text = "Call 91234567 now.";
        let raw = RawSpan::new(5, 13, "PHONE", "91234567", 0.9);
        let span = Span::from_raw(&raw, text).unwrap();
        assert_eq!(span.label, EntityLabel::Phone);
        assert_eq!(span.text(text), "91234567");
    }

    #[test]
    fn test_from_raw_inverted_offsets() {
        let raw = RawSpan::new(13, 5, "PHONE", "91234567", 0.9);
        let err = Span::from_raw(&raw, "Call 91234567 now.").unwrap_err();
        assert!(matches!(err, SpanDefect::InvalidOffsets { .. }));
    }

    #[test]
    fn test_from_raw_out_of_range() {
        let raw = RawSpan::new(0, 99, "NAME", "x", 0.9);
        let err = Span::from_raw(&raw, "short").unwrap_err();
        assert!(matches!(err, SpanDefect::InvalidOffsets { .. }));
    }

    #[test]
    fn test_from_raw_text_mismatch() {
        let raw = RawSpan::new(0, 4, "NAME", "Paul", 0.9);
        let err = Span::from_raw(&raw, "John Smith").unwrap_err();
        assert!(matches!(err, SpanDefect::TextMismatch { .. }));
    }

    #[test]
    fn test_from_raw_char_boundary() {
        // 陳 is 3 bytes; offset 1 splits it
        let text = "陳大文";
        let raw = RawSpan::new(1, 3, "NAME", "xx", 0.9);
        let err = Span::from_raw(&raw, text).unwrap_err();
        assert!(matches!(err, SpanDefect::NotCharBoundary { .. }));
    }

    #[test]
    fn test_from_raw_unknown_label() {
        let raw = RawSpan::new(0, 4, "WIDGET", "John", 0.9);
        let err = Span::from_raw(&raw, "John Smith").unwrap_err();
        assert_eq!(err, SpanDefect::UnknownLabel("WIDGET".to_string()));
    }

    #[test]
    fn test_wire_shape_aliases() {
        // HuggingFace token-classification output shape
        let json = r#"{"entity_group": "PER", "score": 0.98, "word": "陳大文", "start": 0, "end": 9}"#;
        let raw: RawSpan = serde_json::from_str(json).unwrap();
        assert_eq!(raw.label, "PER");
        assert_eq!(raw.text, "陳大文");
    }

    #[test]
    fn test_overlap() {
        let a = Span::new(0, 2, EntityLabel::Name, 0.4);
        let b = Span::new(1, 5, EntityLabel::Address, 0.9);
        let c = Span::new(2, 5, EntityLabel::Address, 0.9);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}
