//! Fragment merging
//!
//! The NER tokenizer splits long entities into adjacent fragments. This
//! stage fuses same-label spans separated by a small, label-specific gap
//! in a single greedy left-to-right pass; no span is revisited once
//! flushed, matching reading order.

use crate::domain::Span;
use crate::pipeline::config::PipelineConfig;

/// Merge adjacent same-label fragments
///
/// The accumulator extends over the next span when labels match and the
/// gap fits `merge_gap(label)`; score takes the max of the two. The end
/// offset only ever grows, so a merged span is never shorter than any
/// span it absorbed.
pub fn merge_fragments(config: &PipelineConfig, mut spans: Vec<Span>) -> Vec<Span> {
    if spans.len() < 2 {
        return spans;
    }
    spans.sort_by_key(|s| s.start);

    let mut merged = Vec::with_capacity(spans.len());
    let mut iter = spans.into_iter();
    let mut current = iter.next().expect("len checked above");

    for next in iter {
        let max_gap = config.merge_gap(current.label) as i64;
        let gap = next.start as i64 - current.end as i64;

        if next.label == current.label && gap <= max_gap {
            current.end = current.end.max(next.end);
            current.score = current.score.max(next.score);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityLabel;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_fragments(&config(), vec![]).is_empty());
    }

    #[test]
    fn test_single_span_unchanged() {
        let span = Span::new(3, 8, EntityLabel::Name, 0.7);
        let out = merge_fragments(&config(), vec![span]);
        assert_eq!(out, vec![span]);
    }

    #[test]
    fn test_adjacent_same_label_merged() {
        let spans = vec![
            Span::new(0, 4, EntityLabel::Address, 0.6),
            Span::new(5, 9, EntityLabel::Address, 0.9),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 9));
        assert_eq!(out[0].score, 0.9);
    }

    #[test]
    fn test_gap_beyond_limit_not_merged() {
        // ADDRESS gap limit is 1
        let spans = vec![
            Span::new(0, 4, EntityLabel::Address, 0.6),
            Span::new(6, 9, EntityLabel::Address, 0.9),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_phone_allows_wider_gap() {
        // PHONE gap limit is 2: "9123 4567" style split
        let spans = vec![
            Span::new(0, 4, EntityLabel::Phone, 0.8),
            Span::new(6, 10, EntityLabel::Phone, 0.7),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 10));
    }

    #[test]
    fn test_different_labels_not_merged() {
        let spans = vec![
            Span::new(0, 4, EntityLabel::Name, 0.8),
            Span::new(4, 8, EntityLabel::Org, 0.8),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_nested_span_does_not_shrink_accumulator() {
        let spans = vec![
            Span::new(0, 10, EntityLabel::Org, 0.8),
            Span::new(2, 5, EntityLabel::Org, 0.9),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 10));
        assert_eq!(out[0].score, 0.9);
    }

    #[test]
    fn test_chain_of_fragments() {
        let spans = vec![
            Span::new(0, 2, EntityLabel::Name, 0.5),
            Span::new(3, 5, EntityLabel::Name, 0.6),
            Span::new(6, 8, EntityLabel::Name, 0.7),
        ];
        let out = merge_fragments(&config(), spans);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].start, out[0].end), (0, 8));
    }
}
