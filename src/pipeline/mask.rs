//! Masking and unmasking
//!
//! Masking replaces each resolved span with its bracketed tag, iterating
//! right to left so earlier replacements never shift the offsets of spans
//! still pending. Unmasking is literal substring replacement plus a tag
//! audit, since the text may have passed through an LLM that was merely
//! instructed to preserve tags.

use crate::domain::{ResolvedEntity, TagAudit, TagMap};

/// Replace each resolved span with `[{tag}]` in the source text
///
/// Leading/trailing whitespace of the original substring stays outside
/// the tag so downstream tokenization doesn't glue the tag to adjacent
/// words; paired with trimmed mapping values this keeps the mask/unmask
/// round trip exact.
pub fn mask_text(text: &str, entities: &[ResolvedEntity]) -> String {
    let mut masked = text.to_string();

    let mut ordered: Vec<&ResolvedEntity> = entities.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for entity in ordered {
        if entity.end <= entity.start || entity.end > text.len() {
            continue;
        }
        let original = &text[entity.start..entity.end];
        let prefix = &original[..original.len() - original.trim_start().len()];
        let suffix = &original[original.trim_end().len()..];
        let replacement = format!("{prefix}[{}]{suffix}", entity.tag);
        masked.replace_range(entity.start..entity.end, &replacement);
    }
    masked
}

/// Restore original values into arbitrary downstream text
///
/// Every occurrence of each `[{tag}]` is replaced with its mapped value.
/// The returned audit reports tags the text was missing or contained more
/// than once; a dropped or duplicated tag means PII was lost or repeated
/// and callers must be able to see that.
pub fn unmask_text(text: &str, mappings: &TagMap) -> (String, TagAudit) {
    let mut missing = Vec::new();
    let mut duplicated = Vec::new();
    let mut found = 0;

    let mut restored = text.to_string();
    for (tag, value) in mappings.iter() {
        let needle = format!("[{tag}]");
        let occurrences = restored.matches(&needle).count();
        match occurrences {
            0 => missing.push(tag.to_string()),
            n => {
                found += 1;
                if n > 1 {
                    duplicated.push(tag.to_string());
                }
                restored = restored.replace(&needle, value);
            }
        }
    }

    let audit = TagAudit {
        expected: mappings.len(),
        found,
        missing,
        duplicated,
    };
    (restored, audit)
}
