//! Span normalization and noise filtering
//!
//! The stages here clean the raw candidate set before any fusion happens:
//! confidence and forbidden-range filtering, infrastructure-suffix
//! relabeling, suffix trimming, age-context refinement and the Cantonese
//! particle filter.

use crate::domain::{EntityLabel, Span};
use crate::pipeline::config::PipelineConfig;
use regex::Regex;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s,]+").unwrap())
}

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[,，\.\s。？！!?-]+$").unwrap())
}

fn numeral_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap())
}

fn trailing_age_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([,，\s]*[0-9]+)$").unwrap())
}

/// Character ranges of URLs in the source text
///
/// Model predictions inside URLs are unreliable noise; every stage that
/// creates or keeps spans consults these ranges.
pub fn forbidden_ranges(text: &str) -> Vec<(usize, usize)> {
    url_regex()
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// True if the range overlaps any forbidden range
pub fn in_forbidden_range(ranges: &[(usize, usize)], start: usize, end: usize) -> bool {
    ranges
        .iter()
        .any(|&(r_start, r_end)| start.max(r_start) < end.min(r_end))
}

/// Drop spans at or below the confidence threshold, and spans inside URLs
pub fn filter_low_confidence(
    spans: Vec<Span>,
    config: &PipelineConfig,
    forbidden: &[(usize, usize)],
) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|s| {
            if s.score <= config.confidence_threshold {
                tracing::debug!(start = s.start, end = s.end, score = s.score, "dropping low-confidence span");
                return false;
            }
            !in_forbidden_range(forbidden, s.start, s.end)
        })
        .collect()
}

/// Relabel spans that are part of an infrastructure chain as ADDRESS
///
/// A span whose following text (after leading whitespace) starts with an
/// infrastructure suffix is ADDRESS. The scan runs right to left so that
/// a span touching an already-confirmed infra span with zero gap inherits
/// chain membership; transit names are frequently split across label
/// boundaries by the NER model.
pub fn relabel_infrastructure(
    text: &str,
    config: &PipelineConfig,
    mut spans: Vec<Span>,
) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }
    spans.sort_by_key(|s| s.start);
    let mut is_infra_chain = vec![false; spans.len()];

    for i in (0..spans.len()).rev() {
        let following = text[spans[i].end..].trim_start();
        let touches_suffix = config
            .infra_suffixes
            .iter()
            .any(|suffix| following.starts_with(suffix.as_str()));

        let touches_next_infra = i + 1 < spans.len()
            && spans[i + 1].start == spans[i].end
            && is_infra_chain[i + 1];

        if touches_suffix || touches_next_infra {
            spans[i].label = EntityLabel::Address;
            is_infra_chain[i] = true;
        }
    }
    spans
}

/// Cut a trailing infrastructure suffix out of a span
///
/// The suffix itself is not part of the addressable entity, and neither
/// is whitespace separating it from the rest. A span with content beyond
/// the suffix is truncated and forced to ADDRESS; a span that is nothing
/// but the suffix is dropped.
pub fn trim_infrastructure_suffix(
    text: &str,
    config: &PipelineConfig,
    spans: Vec<Span>,
) -> Vec<Span> {
    let mut kept = Vec::with_capacity(spans.len());
    for mut span in spans {
        let word = span.text(text);
        match config
            .infra_suffixes
            .iter()
            .find(|suffix| word.ends_with(suffix.as_str()))
        {
            Some(suffix) => {
                let prefix = word[..word.len() - suffix.len()].trim_end();
                if !prefix.is_empty() {
                    span.end = span.start + prefix.len();
                    span.label = EntityLabel::Address;
                    kept.push(span);
                }
            }
            None => kept.push(span),
        }
    }
    kept
}

/// Up to `chars` characters of text immediately before `start`
fn lookback(text: &str, start: usize, chars: usize) -> &str {
    let prefix = &text[..start];
    let from = prefix
        .char_indices()
        .rev()
        .nth(chars.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    &prefix[from..]
}

/// Remove numeric/punctuation noise and trim age numerals off addresses
///
/// Bare numerals, pure punctuation and literal age keywords are never
/// entities. An ADDRESS span sitting in an age context loses its trailing
/// numeral (plus connecting punctuation or space) rather than the whole
/// span; "觀塘道 99 號" survives while "31" next to 今年 does not.
pub fn refine_age_context(text: &str, config: &PipelineConfig, spans: Vec<Span>) -> Vec<Span> {
    let mut kept = Vec::with_capacity(spans.len());
    for mut span in spans {
        let word = span.text(text);
        let clean = word.trim();

        if config
            .age_keywords
            .iter()
            .any(|kw| clean.to_lowercase() == *kw)
        {
            continue;
        }
        if punctuation_regex().is_match(word) {
            continue;
        }
        if numeral_regex().is_match(clean) {
            continue;
        }

        if span.label == EntityLabel::Address {
            let following = text[span.end..].trim_start().to_lowercase();
            let preceding = lookback(text, span.start, config.age_lookback_chars).to_lowercase();

            let age_context = config
                .age_keywords
                .iter()
                .any(|kw| following.starts_with(kw.as_str()))
                || preceding.contains("age")
                || preceding.contains("今年")
                || preceding.contains("歲");

            if age_context {
                if let Some(m) = trailing_age_regex()
                    .captures(span.text(text))
                    .and_then(|c| c.get(1))
                {
                    span.end -= m.as_str().len();
                }
            }
        }

        if span.is_empty() || span.text(text).trim().is_empty() {
            continue;
        }
        kept.push(span);
    }
    kept
}

/// Drop one-character NAME spans that are verb-attached Cantonese particles
///
/// "打過黎" reads as verb + particle, not a person called 黎; the particle
/// is only dropped when the preceding character is verb-like.
pub fn filter_particles(text: &str, config: &PipelineConfig, spans: Vec<Span>) -> Vec<Span> {
    spans
        .into_iter()
        .filter(|span| {
            if span.label != EntityLabel::Name {
                return true;
            }
            let word = span.text(text).trim();
            let mut chars = word.chars();
            let (Some(only), None) = (chars.next(), chars.next()) else {
                return true;
            };
            if !config.cantonese_particles.contains(&only) {
                return true;
            }
            match text[..span.start].chars().next_back() {
                Some(prev) => !config.verb_endings.contains(&prev),
                None => true,
            }
        })
        .collect()
}
