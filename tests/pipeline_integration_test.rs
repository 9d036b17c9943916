//! End-to-end tests for the span-resolution and masking pipeline

use hkmask::domain::{EntityLabel, RawSpan};
use hkmask::pipeline::{unmask_text, PiiPipeline, PipelineConfig};

fn pipeline() -> PiiPipeline {
    PiiPipeline::new(PipelineConfig::default()).unwrap()
}

#[test]
fn test_phone_candidate_masked_with_mapping() {
    let text = "Call 91234567 now.";
    let raw = vec![RawSpan::new(5, 13, "PHONE", "91234567", 0.9)];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.masked, "Call [PHONE-1] now.");
    assert_eq!(doc.mappings.get("PHONE-1"), Some("91234567"));
    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.entities[0].label, EntityLabel::Phone);
}

#[test]
fn test_overlap_resolved_by_priority_tier() {
    // NAME (tier 3) overlapping ADDRESS (tier 2): the tier wins over length
    let text = "陳大文住在觀塘道";
    let raw = vec![
        RawSpan::new(0, 9, "NAME", "陳大文", 0.4),
        RawSpan::new(6, 24, "ADDRESS", "文住在觀塘道", 0.9),
    ];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.entities[0].label, EntityLabel::Name);
    assert_eq!(doc.entities[0].text, "陳大文");
}

#[test]
fn test_org_with_infra_suffix_trimmed_and_relabeled() {
    let text = "Take the MTR Rail home";
    let raw = vec![RawSpan::new(9, 17, "ORG", "MTR Rail", 0.8)];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.entities.len(), 1);
    assert_eq!(doc.entities[0].label, EntityLabel::Address);
    // the separator space is cut with the suffix, not carried in the span
    assert_eq!(doc.entities[0].text, "MTR");
    assert_eq!((doc.entities[0].start, doc.entities[0].end), (9, 12));
    assert_eq!(doc.mappings.get("ADDRESS-1"), Some("MTR"));
    assert_eq!(doc.masked, "Take the [ADDRESS-1] Rail home");
}

#[test]
fn test_fallback_never_duplicates_a_covered_range() {
    let text = "地址 A123456(7) 附近";
    let start = text.find('A').unwrap();
    let raw = vec![RawSpan::new(
        start,
        start + 10,
        "ADDRESS",
        "A123456(7)",
        0.95,
    )];

    let doc = pipeline().process(text, &raw);

    // the HKID regex also matches here; only one span may survive
    assert_eq!(doc.entities.len(), 1);
}

#[test]
fn test_regex_only_operation_catches_hkid_and_phone() {
    let text = "HKID A123456(7), phone 91234567, email a@b.hk";

    let doc = pipeline().process(text, &[]);

    let labels: Vec<EntityLabel> = doc.entities.iter().map(|e| e.label).collect();
    assert!(labels.contains(&EntityLabel::Id));
    assert!(labels.contains(&EntityLabel::Phone));
    assert!(labels.contains(&EntityLabel::Email));
}

#[test]
fn test_license_plate_age_guard() {
    // "at AB 1234" reads as an age/location context, not a plate
    let guarded = pipeline().process("we met at AB 1234 yesterday", &[]);
    assert!(guarded.entities.is_empty());

    let plate = pipeline().process("plate AB 1234 parked outside", &[]);
    assert_eq!(plate.entities.len(), 1);
    assert_eq!(plate.entities[0].label, EntityLabel::LicensePlate);
}

#[test]
fn test_age_numeral_never_masked() {
    let text = "佢今年 31 歲";
    let start = text.find("31").unwrap();
    let raw = vec![RawSpan::new(start, start + 2, "ADDRESS", "31", 0.9)];

    let doc = pipeline().process(text, &raw);

    assert!(doc.entities.is_empty());
    assert_eq!(doc.masked, text);
}

#[test]
fn test_repeated_value_reuses_tag() {
    let text = "Call 91234567 or 91234567.";
    let raw = vec![
        RawSpan::new(5, 13, "PHONE", "91234567", 0.9),
        RawSpan::new(17, 25, "PHONE", "91234567", 0.9),
    ];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.masked, "Call [PHONE-1] or [PHONE-1].");
    assert_eq!(doc.mappings.len(), 1);
}

#[test]
fn test_tag_reuse_is_case_insensitive() {
    let text = "PETER called. Later peter left.";
    let raw = vec![
        RawSpan::new(0, 5, "NAME", "PETER", 0.9),
        RawSpan::new(20, 25, "NAME", "peter", 0.9),
    ];

    let doc = pipeline().process(text, &raw);

    assert_eq!(doc.masked, "[NAME-1] called. Later [NAME-1] left.");
}

#[test]
fn test_mask_unmask_round_trip() {
    let text = "陳大文 (HKID A123456(7)) 住在觀塘道，電話 91234567。";
    let start = text.find("陳大文").unwrap();
    let raw = vec![RawSpan::new(start, start + 9, "PER", "陳大文", 0.95)];

    let doc = pipeline().process(text, &raw);
    assert!(doc.has_entities());

    let (restored, audit) = unmask_text(&doc.masked, &doc.mappings);
    assert_eq!(restored, text);
    assert!(audit.is_clean());
}

#[test]
fn test_unmask_into_paraphrased_text() {
    let text = "Call 91234567 now.";
    let raw = vec![RawSpan::new(5, 13, "PHONE", "91234567", 0.9)];
    let doc = pipeline().process(text, &raw);

    // a rewriter moved the tag but kept it intact
    let rewritten = format!("Please dial {} at your convenience.", "[PHONE-1]");
    let (restored, audit) = unmask_text(&rewritten, &doc.mappings);

    assert_eq!(restored, "Please dial 91234567 at your convenience.");
    assert!(audit.is_clean());
}

#[test]
fn test_unmask_audit_reports_dropped_tag() {
    let text = "Call 91234567 or mail a@b.hk.";
    let doc = pipeline().process(text, &[]);
    assert_eq!(doc.mappings.len(), 2);

    // the rewriter dropped one of the two tags
    let rewritten = "You can reach them on [PHONE-1].";
    let (_, audit) = unmask_text(rewritten, &doc.mappings);

    assert_eq!(audit.expected, 2);
    assert_eq!(audit.found, 1);
    assert_eq!(audit.missing, vec!["EMAIL-1".to_string()]);
}

#[test]
fn test_entities_sorted_and_disjoint() {
    let text = "陳大文 held account 123-456-789 and HKID A123456(7).";
    let raw = vec![RawSpan::new(0, 9, "NAME", "陳大文", 0.9)];

    let doc = pipeline().process(text, &raw);

    for pair in doc.entities.windows(2) {
        assert!(pair[0].start <= pair[1].start);
        assert!(pair[0].end <= pair[1].start);
    }
    for entity in &doc.entities {
        assert_eq!(&doc.original[entity.start..entity.end], entity.text);
    }
}
