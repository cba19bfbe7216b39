mod common;

use common::{mixed_zone, record, MemoryDirectory, ZONE};
use serde_json::{json, Value};
use zonekeeper_core::{NewRecord, RecordPatch, RecordType, ZoneFilter};
use zonekeeper_engine::{EngineConfig, RecordQuery, Toolbox, TRUNCATION_NOTICE};

fn parse(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

#[test]
fn test_delete_requires_confirmation() {
    let dir = MemoryDirectory::with_records(vec![record("r1", RecordType::A, "a.example.com", "192.0.2.1")]);
    let tools = Toolbox::new(&dir);

    let out = tokio_test::block_on(tools.delete_record(ZONE, "r1", false));
    assert!(out.is_error);
    assert!(out.text.contains("confirm"));
    assert!(dir.calls().is_empty());
    assert_eq!(dir.stored().len(), 1);

    let out = tokio_test::block_on(tools.delete_record(ZONE, "r1", true));
    assert!(!out.is_error, "{}", out.text);
    assert_eq!(parse(&out.text), json!({"id": "r1", "deleted": true}));
    assert!(dir.stored().is_empty());
}

#[test]
fn test_query_output_is_pretty_json() {
    let dir = MemoryDirectory::with_records(mixed_zone());
    let tools = Toolbox::new(&dir);

    let out = tokio_test::block_on(tools.query_records(&RecordQuery::new(ZONE).summary()));
    assert!(!out.is_error);
    assert!(out.text.contains('\n'));
    assert_eq!(parse(&out.text)["total"], json!(47));
}

#[test]
fn test_oversized_output_is_truncated() {
    let dir = MemoryDirectory::with_records(mixed_zone());
    let tools = Toolbox::with_config(&dir, EngineConfig::default().max_response_chars(500));

    let out = tokio_test::block_on(tools.query_records(&RecordQuery::new(ZONE).page(1, 100)));
    assert!(!out.is_error);
    assert!(out.text.ends_with(TRUNCATION_NOTICE));
    assert!(out.text.chars().count() <= 500 + TRUNCATION_NOTICE.chars().count());
}

#[test]
fn test_not_found_is_reported_as_error() {
    let dir = MemoryDirectory::new();
    let tools = Toolbox::new(&dir);

    let out = tokio_test::block_on(tools.get_record(ZONE, "nope", true));
    assert!(out.is_error);
    assert!(out.text.starts_with("Error: resource not found"));
}

#[test]
fn test_create_validates_before_calling() {
    let dir = MemoryDirectory::new();
    let tools = Toolbox::new(&dir);

    let txt = NewRecord::new(RecordType::TXT, "t.example.com", "hello").proxied(true);
    let out = tokio_test::block_on(tools.create_record(ZONE, &txt));
    assert!(out.is_error);
    assert!(out.text.contains("proxied"));
    assert!(dir.calls().is_empty());

    let a = NewRecord::new(RecordType::A, "a.example.com", "192.0.2.7").proxied(true);
    let out = tokio_test::block_on(tools.create_record(ZONE, &a));
    assert!(!out.is_error, "{}", out.text);
    assert_eq!(parse(&out.text)["proxied"], json!(true));
}

#[test]
fn test_update_rejects_comment_over_limit() {
    let dir = MemoryDirectory::with_records(vec![record("r1", RecordType::A, "a.example.com", "192.0.2.1")]);
    let tools = Toolbox::new(&dir);
    let patch = RecordPatch {
        comment: Some("x".repeat(101)),
        ..RecordPatch::default()
    };

    let out = tokio_test::block_on(tools.update_record(ZONE, "r1", &patch));
    assert!(out.is_error);
    assert!(dir.calls().is_empty());
}

#[test]
fn test_list_zones_and_export() {
    let dir = MemoryDirectory::with_records(mixed_zone());
    let tools = Toolbox::new(&dir);

    let out = tokio_test::block_on(tools.list_zones(&ZoneFilter::default(), 1, 20));
    let zones = parse(&out.text);
    assert_eq!(zones["zones"][0]["name"], json!("example.com"));
    assert_eq!(zones["has_more"], json!(false));

    let out = tokio_test::block_on(tools.list_zones(&ZoneFilter::default(), 0, 20));
    assert!(out.is_error);

    let out = tokio_test::block_on(tools.export_zone(ZONE));
    assert!(!out.is_error);
    assert_eq!(out.text.lines().count(), 47);
    assert!(out.text.contains("IN\tMX\tmx0.example.com"));
}
