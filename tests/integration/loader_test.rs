//! Table loading integration tests.
//!
//! Covers the JSON-to-INSERT pipeline, identifier validation, and the
//! idempotent clear-and-reload behavior.

use super::common::{load_sample_data, memory_client, write_fixture, REFERENCE_YEAR};
use dorm_report::catalog::ReportKind;
use dorm_report::db::{DatabaseClient, Value};
use dorm_report::loader::{clear_table, load_table};

#[tokio::test]
async fn test_load_populates_tables() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    load_sample_data(&client, dir.path()).await;

    let rooms = client.fetch("SELECT COUNT(*) FROM rooms", &[]).await.unwrap();
    assert_eq!(rooms.rows[0][0], Value::Int(7));

    // The dangling record is inserted too; it is only excluded from joins
    let students = client
        .fetch("SELECT COUNT(*) FROM students", &[])
        .await
        .unwrap();
    assert_eq!(students.rows[0][0], Value::Int(13));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_load_returns_record_count() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    let path = write_fixture(
        dir.path(),
        "rooms.json",
        &serde_json::json!([{"id": 1, "name": "Room A"}, {"id": 2, "name": "Room B"}]),
    );
    let loaded = load_table(&client, &path, "rooms").await.unwrap();
    assert_eq!(loaded, 2);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_clear_and_reload_is_idempotent() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    load_sample_data(&client, dir.path()).await;

    let report = ReportKind::Occupancy;
    let sql = report.sql(client.backend());
    let params = report.params(REFERENCE_YEAR);
    let first = client.fetch(&sql, &params).await.unwrap();

    clear_table(&client, "students").await.unwrap();
    clear_table(&client, "rooms").await.unwrap();
    load_sample_data(&client, dir.path()).await;

    let second = client.fetch(&sql, &params).await.unwrap();
    assert_eq!(first.rows, second.rows);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_values_are_bound_not_inlined() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    // A name full of SQL-significant characters loads verbatim
    let path = write_fixture(
        dir.path(),
        "rooms.json",
        &serde_json::json!([{"id": 1, "name": "O'Hara\"); DROP TABLE rooms;--"}]),
    );
    load_table(&client, &path, "rooms").await.unwrap();

    let result = client.fetch("SELECT name FROM rooms", &[]).await.unwrap();
    assert_eq!(
        result.rows[0][0],
        Value::String("O'Hara\"); DROP TABLE rooms;--".to_string())
    );

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = load_table(&client, &path, "rooms").await.unwrap_err();
    assert!(err.to_string().contains("Load error"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_load_rejects_non_array_root() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    let path = write_fixture(
        dir.path(),
        "object.json",
        &serde_json::json!({"id": 1, "name": "Room A"}),
    );

    assert!(load_table(&client, &path, "rooms").await.is_err());

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_load_rejects_injection_in_keys() {
    let client = memory_client().await;
    let dir = tempfile::tempdir().unwrap();

    let path = write_fixture(
        dir.path(),
        "evil.json",
        &serde_json::json!([{"id": 1, "name) VALUES (1, 'x'); --": "Room A"}]),
    );

    let err = load_table(&client, &path, "rooms").await.unwrap_err();
    assert!(err.to_string().contains("invalid identifier"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_load_missing_file_is_an_error() {
    let client = memory_client().await;

    let err = load_table(&client, std::path::Path::new("/no/such/file.json"), "rooms")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Load error"));

    client.close().await.unwrap();
}
