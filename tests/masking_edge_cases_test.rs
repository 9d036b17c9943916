//! Edge-case tests for masking, unmasking and the regex fallbacks

use hkmask::domain::{EntityLabel, RawSpan, TagMap};
use hkmask::pipeline::{unmask_text, PiiPipeline, PipelineConfig};
use test_case::test_case;

fn pipeline() -> PiiPipeline {
    PiiPipeline::new(PipelineConfig::default()).unwrap()
}

#[test]
fn test_empty_input_is_a_valid_empty_result() {
    let doc = pipeline().process("", &[]);
    assert!(!doc.has_entities());
    assert_eq!(doc.masked, "");
    assert!(doc.mappings.is_empty());
}

#[test]
fn test_no_pii_text_passes_through_unchanged() {
    let text = "今日天氣唔錯，得閒飲茶。";
    let doc = pipeline().process(text, &[]);
    assert_eq!(doc.masked, text);
}

#[test]
fn test_cjk_offsets_are_byte_positions() {
    let text = "請聯絡陳大文。";
    let start = text.find("陳大文").unwrap();
    let raw = vec![RawSpan::new(start, start + 9, "PER", "陳大文", 0.9)];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.masked, "請聯絡[NAME-1]。");
    assert_eq!(doc.mappings.get("NAME-1"), Some("陳大文"));
}

#[test]
fn test_span_splitting_a_char_boundary_is_dropped() {
    let text = "陳大文";
    // end lands mid-character; the span is defective, not fatal
    let raw = vec![RawSpan::new(0, 4, "NAME", "陳?", 0.9)];
    let doc = pipeline().process(text, &raw);
    assert!(!doc.has_entities());
}

#[test]
fn test_url_contents_never_masked() {
    let text = "see https://example.hk/user/91234567 for details";
    let doc = pipeline().process(text, &[]);
    assert!(doc.entities.is_empty());
}

#[test_case("A123456(7)" ; "bracketed check digit")]
#[test_case("AB123456(A)" ; "two letter prefix")]
#[test_case("A1234567" ; "unbracketed check digit")]
fn test_hkid_forms_detected(id: &str) {
    let text = format!("HKID: {id} on record");
    let doc = pipeline().process(&text, &[]);
    assert!(doc
        .entities
        .iter()
        .any(|e| e.label == EntityLabel::Id && e.text == id));
}

#[test_case("91234567", true ; "mobile")]
#[test_case("2123 4567", true ; "landline with space")]
#[test_case("+852 6123 4567", true ; "with country code")]
#[test_case("11234567", false ; "invalid leading digit")]
fn test_hk_phone_detection(number: &str, expect: bool) {
    let text = format!("ring {number} today");
    let doc = pipeline().process(&text, &[]);
    let found = doc.entities.iter().any(|e| e.label == EntityLabel::Phone);
    assert_eq!(found, expect);
}

#[test]
fn test_distinct_values_get_distinct_tags() {
    let text = "Tel: 91234567, alt: 61234567";
    let raw = vec![
        RawSpan::new(5, 13, "PHONE", "91234567", 0.9),
        RawSpan::new(20, 28, "PHONE", "61234567", 0.9),
    ];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.mappings.len(), 2);
    assert_eq!(doc.mappings.get("PHONE-1"), Some("91234567"));
    assert_eq!(doc.mappings.get("PHONE-2"), Some("61234567"));
}

#[test]
fn test_unmask_with_empty_mapping_is_identity() {
    let mappings = TagMap::new();
    let (restored, audit) = unmask_text("nothing to restore", &mappings);
    assert_eq!(restored, "nothing to restore");
    assert!(audit.is_clean());
    assert_eq!(audit.expected, 0);
}

#[test]
fn test_unmask_reports_duplicated_tag() {
    let mut mappings = TagMap::new();
    mappings.insert("NAME-1", "陳大文");

    let (restored, audit) = unmask_text("[NAME-1] met [NAME-1]", &mappings);

    assert_eq!(restored, "陳大文 met 陳大文");
    assert_eq!(audit.duplicated, vec!["NAME-1".to_string()]);
    assert!(!audit.is_clean());
}

#[test]
fn test_unmask_leaves_unknown_bracketed_text_alone() {
    let mut mappings = TagMap::new();
    mappings.insert("NAME-1", "陳大文");

    let (restored, _) = unmask_text("[NAME-1] said [sic]", &mappings);
    assert_eq!(restored, "陳大文 said [sic]");
}

#[test]
fn test_whole_document_span_round_trips() {
    let text = "陳大文";
    let raw = vec![RawSpan::new(0, 9, "NAME", "陳大文", 0.9)];

    let doc = pipeline().process(text, &raw);
    assert_eq!(doc.masked, "[NAME-1]");

    let (restored, audit) = unmask_text(&doc.masked, &doc.mappings);
    assert_eq!(restored, text);
    assert!(audit.is_clean());
}

#[test]
fn test_low_confidence_span_rescued_by_regex() {
    // the model's guess is dropped at the threshold, the pattern still fires
    let text = "Call 91234567 now.";
    let raw = vec![RawSpan::new(5, 13, "PHONE", "91234567", 0.2)];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.entities[0].label, EntityLabel::Phone);
}
