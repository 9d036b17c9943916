//! Boundary expansion for identifier-like spans
//!
//! A tokenizer boundary inside a formatted identifier (a space in an
//! HKID, a dash in an account number) leaves the model's span covering
//! only part of the true entity. For expandable labels the span grows one
//! character at a time over contiguous valid characters on each side.

use crate::domain::{EntityLabel, Span};

/// Character validity per expandable label
///
/// CJK characters never qualify: the alphanumeric checks are ASCII-only
/// so an identifier never absorbs adjacent natural-language text.
fn is_valid_for_expansion(ch: char, label: EntityLabel) -> bool {
    match label {
        EntityLabel::Id => ch.is_ascii_alphanumeric() || ch == '(' || ch == ')',
        EntityLabel::LicensePlate => ch.is_ascii_alphanumeric() || ch == ' ',
        EntityLabel::Phone | EntityLabel::Account => {
            ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == ' '
        }
        _ => false,
    }
}

/// Grow each expandable span over contiguous valid characters
pub fn expand_boundaries(text: &str, mut spans: Vec<Span>) -> Vec<Span> {
    for span in &mut spans {
        if !span.label.is_expandable() {
            continue;
        }
        while let Some(ch) = text[..span.start].chars().next_back() {
            if is_valid_for_expansion(ch, span.label) {
                span.start -= ch.len_utf8();
            } else {
                break;
            }
        }
        while let Some(ch) = text[span.end..].chars().next() {
            if is_valid_for_expansion(ch, span.label) {
                span.end += ch.len_utf8();
            } else {
                break;
            }
        }
    }
    spans
}
