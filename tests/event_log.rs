#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use bridge::{
    store::{EventLog, StoreError},
    types::EventRecord,
};
use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;

fn record(event_type: &str, payload: serde_json::Value) -> EventRecord {
    EventRecord {
        event_type: event_type.to_string(),
        received_at: Utc::now().to_rfc3339(),
        payload,
    }
}

async fn setup() -> (EventLog, TempDir) {
    let data_dir = TempDir::new().expect("create temp data dir");
    let log = EventLog::open(data_dir.path().join("github_events.jsonl"))
        .await
        .expect("open event log");
    (log, data_dir)
}

// ─────────────────────────────────────────────────────────────────────────────
// Reads
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_file_reads_as_empty_log() {
    let (log, _dir) = setup().await;

    let records = log.read_all().await.expect("read_all");

    assert!(records.is_empty());
}

#[tokio::test]
async fn read_all_is_idempotent() {
    let (log, _dir) = setup().await;
    log.append(&record("push", json!({"n": 1})))
        .await
        .expect("append");
    log.append(&record("issues", json!({"n": 2})))
        .await
        .expect("append");

    let first = log.read_all().await.expect("first read");
    let second = log.read_all().await.expect("second read");

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[tokio::test]
async fn corrupt_line_surfaces_an_error() {
    let (log, _dir) = setup().await;
    log.append(&record("push", json!({})))
        .await
        .expect("append");

    let mut contents = std::fs::read_to_string(log.path()).expect("read raw log");
    contents.push_str("{ definitely not a record\n");
    std::fs::write(log.path(), contents).expect("write raw log");

    let result = log.read_all().await;

    assert!(matches!(result, Err(StoreError::Corrupt { line: 2, .. })));
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let (log, _dir) = setup().await;
    log.append(&record("push", json!({})))
        .await
        .expect("append");

    let mut contents = std::fs::read_to_string(log.path()).expect("read raw log");
    contents.push('\n');
    std::fs::write(log.path(), contents).expect("write raw log");
    log.append(&record("issues", json!({})))
        .await
        .expect("append");

    let records = log.read_all().await.expect("read_all");

    assert_eq!(records.len(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Appends
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_then_read_roundtrips_the_record() {
    let (log, _dir) = setup().await;
    let original = record("workflow_run", json!({"workflow_run": {"name": "CI"}}));

    log.append(&original).await.expect("append");
    let records = log.read_all().await.expect("read_all");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event_type, original.event_type);
    assert_eq!(records[0].received_at, original.received_at);
    assert_eq!(records[0].payload, original.payload);
}

#[tokio::test]
async fn appends_preserve_arrival_order() {
    let (log, _dir) = setup().await;

    for n in 0..5 {
        log.append(&record(&format!("event_{n}"), json!({"n": n})))
            .await
            .expect("append");
    }

    let records = log.read_all().await.expect("read_all");
    let types: Vec<&str> = records.iter().map(|r| r.event_type.as_str()).collect();
    assert_eq!(
        types,
        ["event_0", "event_1", "event_2", "event_3", "event_4"]
    );
}

#[tokio::test]
async fn persisted_lines_use_the_wire_field_names() {
    let (log, _dir) = setup().await;
    log.append(&record("push", json!({"ref": "refs/heads/main"})))
        .await
        .expect("append");

    let contents = std::fs::read_to_string(log.path()).expect("read raw log");
    let line: serde_json::Value =
        serde_json::from_str(contents.lines().next().expect("one line")).expect("parse line");

    assert_eq!(line["type"], "push");
    assert!(line.get("received_at").is_some());
    assert_eq!(line["payload"]["ref"], "refs/heads/main");
}

#[tokio::test]
async fn records_survive_reopen() {
    let data_dir = TempDir::new().expect("create temp data dir");
    let path = data_dir.path().join("github_events.jsonl");

    {
        let log = EventLog::open(path.clone()).await.expect("open event log");
        log.append(&record("push", json!({"n": 1})))
            .await
            .expect("append");
    }

    // A fresh handle over the same path stands in for a process restart.
    let reopened = EventLog::open(path).await.expect("reopen event log");
    let records = reopened.read_all().await.expect("read_all");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event_type, "push");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_appends_lose_no_records() {
    let data_dir = TempDir::new().expect("create temp data dir");
    let log = Arc::new(
        EventLog::open(data_dir.path().join("github_events.jsonl"))
            .await
            .expect("open event log"),
    );

    let mut handles = Vec::new();
    for task in 0..4 {
        let log = log.clone();
        handles.push(tokio::spawn(async move {
            for n in 0..5 {
                log.append(&record("push", json!({"task": task, "n": n})))
                    .await
                    .expect("append");
            }
        }));
    }
    for handle in handles {
        handle.await.expect("join append task");
    }

    let records = log.read_all().await.expect("read_all");
    assert_eq!(records.len(), 20);
}
