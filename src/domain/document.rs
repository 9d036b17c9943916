//! Document-level result models
//!
//! A processed document carries the original text, the masked text, the
//! resolved entities and the tag mapping needed to reverse the masking.
//! A failed document is a distinct outcome, never an empty success.

use crate::domain::label::EntityLabel;
use crate::domain::span::ResolvedEntity;
use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Tag → original value registry for one masking run
///
/// Insertion-ordered so the serialized `mappings.json` reads in
/// first-seen order. Keys are bare tags (`PHONE-1`); the bracketed form
/// `[PHONE-1]` appears only in masked text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap {
    entries: Vec<(String, String)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag the first time it is seen; repeats keep the
    /// first-seen value
    pub fn insert(&mut self, tag: &str, value: &str) {
        if !self.contains(tag) {
            self.entries.push((tag.to_string(), value.to_string()));
        }
    }

    pub fn get(&self, tag: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(tag, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TagMapVisitor;

        impl<'de> Visitor<'de> for TagMapVisitor {
            type Value = TagMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of tag strings to original values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TagMap, A::Error> {
                let mut map = TagMap::new();
                while let Some((tag, value)) = access.next_entry::<String, String>()? {
                    map.insert(&tag, &value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TagMapVisitor)
    }
}

/// Post-unmask accounting of tags found versus tags expected
///
/// An external LLM that drops, mistranslates or duplicates a tag leaves
/// PII missing or duplicated in the restored text. That condition is
/// reported here, never silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagAudit {
    /// Number of distinct tags in the mapping
    pub expected: usize,
    /// Number of distinct mapping tags present in the text at least once
    pub found: usize,
    /// Tags absent from the text
    pub missing: Vec<String>,
    /// Tags present more than once
    pub duplicated: Vec<String>,
}

impl TagAudit {
    /// Every tag appeared exactly once
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.duplicated.is_empty()
    }
}

/// Successfully masked document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskedDocument {
    /// Immutable source text; every entity offset is relative to it
    pub original: String,
    /// Text with each resolved span replaced by its bracketed tag
    pub masked: String,
    /// Resolved, non-overlapping, tagged entities sorted by start
    pub entities: Vec<ResolvedEntity>,
    /// Tag → value mapping for the unmask step
    pub mappings: TagMap,
    /// Entity counts per label
    pub stats_by_label: HashMap<EntityLabel, usize>,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of processing
    pub timestamp: DateTime<Utc>,
}

impl MaskedDocument {
    pub fn new(
        original: String,
        masked: String,
        entities: Vec<ResolvedEntity>,
        mappings: TagMap,
        processing_time_ms: u64,
    ) -> Self {
        let mut stats_by_label = HashMap::new();
        for entity in &entities {
            *stats_by_label.entry(entity.label).or_insert(0) += 1;
        }
        Self {
            original,
            masked,
            entities,
            mappings,
            stats_by_label,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// A no-entity result is valid: masked text equals the original
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }
}

/// Per-document outcome for batch callers
///
/// One bad document never aborts a batch; a failure is carried as data so
/// callers can keep processing and report at the end.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Pipeline completed (possibly with zero entities)
    Masked(MaskedDocument),
    /// External call failed; the document was not processed
    Failed { error: String },
}

impl DocumentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagmap_insertion_order() {
        let mut map = TagMap::new();
        map.insert("NAME-1", "陳大文");
        map.insert("PHONE-1", "91234567");
        map.insert("NAME-2", "李小明");
        let keys: Vec<&str> = map.iter().map(|(t, _)| t).collect();
        assert_eq!(keys, vec!["NAME-1", "PHONE-1", "NAME-2"]);
    }

    #[test]
    fn test_tagmap_repeat_keeps_first_value() {
        let mut map = TagMap::new();
        map.insert("NAME-1", "first");
        map.insert("NAME-1", "second");
        assert_eq!(map.get("NAME-1"), Some("first"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_tagmap_json_round_trip() {
        let mut map = TagMap::new();
        map.insert("PHONE-1", "91234567");
        map.insert("NAME-1", "陳大文");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"PHONE-1":"91234567","NAME-1":"陳大文"}"#);
        let back: TagMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_audit_clean() {
        let audit = TagAudit {
            expected: 2,
            found: 2,
            missing: vec![],
            duplicated: vec![],
        };
        assert!(audit.is_clean());
    }

    #[test]
    fn test_empty_document_is_not_failure() {
        let doc = MaskedDocument::new("hello".into(), "hello".into(), vec![], TagMap::new(), 1);
        assert!(!doc.has_entities());
        assert_eq!(doc.masked, doc.original);
        let outcome = DocumentOutcome::Masked(doc);
        assert!(!outcome.is_failed());
    }

    #[test]
    fn test_outcome_serialization_tags_status() {
        let outcome = DocumentOutcome::Failed {
            error: "NER endpoint timed out after 300s".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
    }
}
