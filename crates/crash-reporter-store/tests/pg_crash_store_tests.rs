//! Integration tests for `PgCrashStore`.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use crash_reporter_core::crash::{CrashId, NewCrash};
use crash_reporter_core::store::CrashStore;
use crash_reporter_store::PgCrashStore;
use crash_reporter_test_support::{FixedClock, SteppingClock};
use serde_json::{Map, Value, json};
use sqlx::PgPool;

fn stepping_store(pool: PgPool) -> PgCrashStore {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    PgCrashStore::new(pool, Arc::new(SteppingClock::new(start, Duration::seconds(1))))
}

fn make_new_crash(raw: Value) -> NewCrash {
    let Value::Object(raw) = raw else {
        panic!("payload must be an object");
    };
    NewCrash {
        event_id: raw.get("event_id").cloned(),
        message: raw.get("message").cloned(),
        stacktrace: raw.get("stacktrace").cloned(),
        fatal: raw.get("fatal").cloned().unwrap_or(Value::Bool(true)),
        thread: None,
        package: None,
        device: None,
        android_version: None,
        raw,
    }
}

// --- insert + find_by_id round-trip ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_find_round_trip(pool: PgPool) {
    let store = stepping_store(pool);
    let crash = make_new_crash(json!({
        "event_id": "evt-1",
        "message": 42,
        "fatal": false,
        "custom": {"nested": [1, 2, 3]}
    }));
    let expected_raw = crash.raw.clone();

    let id = store.insert(crash).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.event_id, Some(json!("evt-1")));
    assert_eq!(found.message, Some(json!(42)));
    assert_eq!(found.fatal, json!(false));
    assert_eq!(found.stacktrace, None);
    assert_eq!(found.raw, expected_raw);
    assert_eq!(
        found.timestamp,
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id_returns_none_for_unknown_id(pool: PgPool) {
    let store = stepping_store(pool);

    let found = store.find_by_id(CrashId::new()).await.unwrap();

    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_truncates_timestamp_to_microseconds(pool: PgPool) {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        + Duration::nanoseconds(123_456_789);
    let store = PgCrashStore::new(pool, Arc::new(FixedClock(now)));

    let id = store.insert(make_new_crash(json!({}))).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.timestamp.timestamp_subsec_nanos(), 123_456_000);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_find_preserves_nul_characters(pool: PgPool) {
    let store = stepping_store(pool);
    let payload: Value = serde_json::from_str(r#"{"stacktrace":"native frame\u0000#1"}"#).unwrap();
    let crash = make_new_crash(payload);
    let expected_raw = crash.raw.clone();

    let id = store.insert(crash).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.stacktrace, Some(json!("native frame\u{0}#1")));
    assert_eq!(found.raw, expected_raw);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_and_find_keeps_non_boolean_fatal(pool: PgPool) {
    let store = stepping_store(pool);

    let id = store.insert(make_new_crash(json!({"fatal": 0}))).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.fatal, json!(0));
}

// --- ordering ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_returns_most_recent_first(pool: PgPool) {
    let store = stepping_store(pool);
    let mut ids = Vec::new();
    for n in 1..=3 {
        ids.push(store.insert(make_new_crash(json!({"n": n}))).await.unwrap());
    }

    let listed = store.list(10).await.unwrap();

    let listed_ids: Vec<CrashId> = listed.iter().map(|r| r.id).collect();
    assert_eq!(listed_ids, vec![ids[2], ids[1], ids[0]]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_breaks_ties_by_reverse_insertion(pool: PgPool) {
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let store = PgCrashStore::new(pool, Arc::new(FixedClock(now)));
    let first = store.insert(make_new_crash(json!({}))).await.unwrap();
    let second = store.insert(make_new_crash(json!({}))).await.unwrap();

    let listed = store.list(10).await.unwrap();

    assert_eq!(listed[0].id, second);
    assert_eq!(listed[1].id, first);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_respects_limit(pool: PgPool) {
    let store = stepping_store(pool);
    for _ in 0..5 {
        store.insert(make_new_crash(json!({}))).await.unwrap();
    }

    let listed = store.list(2).await.unwrap();

    assert_eq!(listed.len(), 2);
}

// --- delete ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_by_id_removes_at_most_one_record(pool: PgPool) {
    let store = stepping_store(pool);
    let kept = store.insert(make_new_crash(json!({}))).await.unwrap();
    let doomed = store.insert(make_new_crash(json!({}))).await.unwrap();

    assert!(store.delete_by_id(doomed).await.unwrap());
    assert!(!store.delete_by_id(doomed).await.unwrap());

    assert!(store.find_by_id(doomed).await.unwrap().is_none());
    assert!(store.find_by_id(kept).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_raw_preserves_empty_payload(pool: PgPool) {
    let store = stepping_store(pool);

    let id = store.insert(make_new_crash(json!({}))).await.unwrap();
    let found = store.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(found.raw, Map::new());
    assert_eq!(found.fatal, json!(true));
}
