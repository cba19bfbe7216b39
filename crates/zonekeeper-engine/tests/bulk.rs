mod common;

use common::{record, MemoryDirectory, ZONE};
use serde_json::json;
use zonekeeper_core::{BulkUpdateItem, NewRecord, RecordPatch, RecordType, Ttl, ZoneError};
use zonekeeper_engine::BulkEngine;

fn new_a(name: &str) -> NewRecord {
    NewRecord::new(RecordType::A, name, "192.0.2.10")
}

#[tokio::test]
async fn test_failure_is_contained_to_its_item() {
    let dir = MemoryDirectory::new().reject_name("d.example.com");
    let batch: Vec<_> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|n| new_a(&format!("{n}.example.com")))
        .collect();

    let report = BulkEngine::new(&dir).create(ZONE, &batch).await.unwrap();

    assert_eq!(report.succeeded, 4);
    assert_eq!(report.failed, 1);
    assert_eq!(report.total, 5);
    let flags: Vec<_> = report.results.iter().map(|r| r.success).collect();
    assert_eq!(flags, [true, true, true, false, true]);
    let indices: Vec<_> = report.results.iter().map(|r| r.index).collect();
    assert_eq!(indices, [0, 1, 2, 3, 4]);
    assert!(report.results[3]
        .error
        .as_deref()
        .is_some_and(|e| e.contains("already exists")));

    // Items after the failure were still applied, in order.
    assert_eq!(
        dir.mutation_calls(),
        [
            "create a.example.com",
            "create b.example.com",
            "create c.example.com",
            "create d.example.com",
            "create e.example.com"
        ]
    );
    assert_eq!(dir.stored().len(), 4);
}

#[tokio::test]
async fn test_invalid_item_fails_without_directory_call() {
    let dir = MemoryDirectory::new();
    let batch = vec![
        new_a("a.example.com"),
        new_a("b.example.com"),
        NewRecord::new(RecordType::TXT, "c.example.com", ""),
        new_a("d.example.com"),
    ];

    let report = BulkEngine::new(&dir).create(ZONE, &batch).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["created"], json!(3));
    assert_eq!(json["failed"], json!(1));
    assert_eq!(json["total"], json!(4));
    assert_eq!(json["results"][2]["success"], json!(false));
    assert_eq!(json["results"][3]["record"]["name"], json!("d.example.com"));
    assert_eq!(dir.mutation_calls().len(), 3);
}

#[tokio::test]
async fn test_created_records_are_concise() {
    let dir = MemoryDirectory::new();
    let batch = vec![NewRecord::new(RecordType::MX, "example.com", "mx.example.com").priority(5)];

    let report = BulkEngine::new(&dir).create(ZONE, &batch).await.unwrap();
    let json = serde_json::to_value(&report.results[0]).unwrap();
    assert_eq!(json["record"]["priority"], json!(5));
    assert_eq!(json["record"]["ttl"], json!("auto"));
    assert!(json["record"].get("proxied").is_none());
    assert!(json["record"].get("tags").is_none());
}

#[tokio::test]
async fn test_bulk_update_reports_missing_records() {
    let dir = MemoryDirectory::with_records(vec![
        record("r1", RecordType::A, "a.example.com", "192.0.2.1"),
        record("r2", RecordType::A, "b.example.com", "192.0.2.2"),
    ]);
    let patch = RecordPatch {
        ttl: Some(Ttl::Seconds(300)),
        ..RecordPatch::default()
    };
    let items = vec![
        BulkUpdateItem { id: "r1".into(), patch: patch.clone() },
        BulkUpdateItem { id: "gone".into(), patch: patch.clone() },
        BulkUpdateItem { id: "r2".into(), patch },
    ];

    let report = BulkEngine::new(&dir).update(ZONE, &items).await.unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["updated"], json!(2));
    assert_eq!(json["failed"], json!(1));
    assert!(json.get("created").is_none());
    assert_eq!(json["results"][0]["record"]["ttl"], json!(300));
    assert!(dir.stored().iter().all(|r| r.ttl == Ttl::Seconds(300)));
}

#[tokio::test]
async fn test_empty_patch_is_an_item_failure() {
    let dir = MemoryDirectory::with_records(vec![record("r1", RecordType::A, "a.example.com", "192.0.2.1")]);
    let items = vec![BulkUpdateItem { id: "r1".into(), patch: RecordPatch::default() }];

    let report = BulkEngine::new(&dir).update(ZONE, &items).await.unwrap();
    assert_eq!(report.failed, 1);
    assert!(dir.mutation_calls().is_empty());
}

#[tokio::test]
async fn test_proxied_patch_checked_against_stored_type() {
    let dir = MemoryDirectory::with_records(vec![
        record("a1", RecordType::A, "a.example.com", "192.0.2.1"),
        record("mx1", RecordType::MX, "example.com", "mx.example.com"),
    ]);
    let patch = RecordPatch {
        proxied: Some(true),
        ..RecordPatch::default()
    };
    let items = vec![
        BulkUpdateItem { id: "a1".into(), patch: patch.clone() },
        BulkUpdateItem { id: "mx1".into(), patch },
    ];

    let report = BulkEngine::new(&dir).update(ZONE, &items).await.unwrap();
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert!(report.results[1].error.as_deref().unwrap().contains("not MX"));
    assert_eq!(dir.mutation_calls(), vec!["update a1".to_string()]);
    assert!(dir.calls().contains(&"get_record mx1".to_string()));
}

#[tokio::test]
async fn test_oversized_batch_rejected_up_front() {
    let dir = MemoryDirectory::new();
    let batch: Vec<_> = (0..101).map(|i| new_a(&format!("h{i}.example.com"))).collect();

    let err = BulkEngine::new(&dir).create(ZONE, &batch).await.unwrap_err();
    assert!(matches!(err, ZoneError::InvalidInput(_)));
    assert!(dir.calls().is_empty());

    let err = BulkEngine::new(&dir).create(ZONE, &[]).await.unwrap_err();
    assert!(matches!(err, ZoneError::InvalidInput(_)));
}
