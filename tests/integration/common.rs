//! Shared fixtures and helpers for the integration tests.
//!
//! Everything runs against an in-memory SQLite database with the two
//! externally defined tables created up front.

use dorm_report::config::ConnectionConfig;
use dorm_report::db::{DatabaseBackend, DatabaseClient, QueryResult, SqliteClient, Value};
use std::path::{Path, PathBuf};

/// Fixed reference year used by the tests, so ages don't drift with the
/// wall clock.
pub const REFERENCE_YEAR: i32 = 2024;

/// Opens an in-memory database with empty `rooms` and `students` tables.
pub async fn memory_client() -> SqliteClient {
    let config = ConnectionConfig {
        backend: DatabaseBackend::Sqlite,
        database: Some(":memory:".to_string()),
        ..Default::default()
    };
    let client = SqliteClient::connect(&config).await.unwrap();

    client
        .execute("CREATE TABLE rooms (id INTEGER, name TEXT)", &[])
        .await
        .unwrap();
    client
        .execute(
            "CREATE TABLE students (id INTEGER, name TEXT, birthday DATE, sex TEXT, room INTEGER)",
            &[],
        )
        .await
        .unwrap();

    client
}

/// Writes a JSON fixture file into `dir` and returns its path.
pub fn write_fixture(dir: &Path, name: &str, content: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(content).unwrap()).unwrap();
    path
}

/// Seven rooms; Room G stays empty.
pub fn sample_rooms() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "name": "Room A"},
        {"id": 2, "name": "Room B"},
        {"id": 3, "name": "Room C"},
        {"id": 4, "name": "Room D"},
        {"id": 5, "name": "Room E"},
        {"id": 6, "name": "Room F"},
        {"id": 7, "name": "Room G"}
    ])
}

/// Thirteen students; Zed references a room id that does not exist.
///
/// With [`REFERENCE_YEAR`] = 2024 the per-room aggregates are:
///
/// room  count  avg age (rounded)  spread  sexes
///   1     2        24                1    F,M
///   2     2        23               18    F
///   3     2        13                2    F
///   4     3        28               25    M,F,X
///   5     2        27                4    M,F
///   6     1        21                0    M
pub fn sample_students() -> serde_json::Value {
    serde_json::json!([
        {"id": 1,  "name": "Alice", "birthday": "2000-01-01", "sex": "F", "room": 1},
        {"id": 2,  "name": "Bob",   "birthday": "2001-06-15", "sex": "M", "room": 1},
        {"id": 3,  "name": "Cara",  "birthday": "2010-03-04", "sex": "F", "room": 2},
        {"id": 4,  "name": "Dana",  "birthday": "1992-01-01", "sex": "F", "room": 2},
        {"id": 5,  "name": "Eve",   "birthday": "2012-05-05", "sex": "F", "room": 3},
        {"id": 6,  "name": "Lia",   "birthday": "2010-05-05", "sex": "F", "room": 3},
        {"id": 7,  "name": "Finn",  "birthday": "1980-02-02", "sex": "M", "room": 4},
        {"id": 8,  "name": "Gina",  "birthday": "2005-09-09", "sex": "F", "room": 4},
        {"id": 9,  "name": "Hari",  "birthday": "2002-07-07", "sex": "X", "room": 4},
        {"id": 10, "name": "Ivan",  "birthday": "1995-04-04", "sex": "M", "room": 5},
        {"id": 11, "name": "Jill",  "birthday": "1999-08-08", "sex": "F", "room": 5},
        {"id": 12, "name": "Kai",   "birthday": "2003-11-11", "sex": "M", "room": 6},
        {"id": 13, "name": "Zed",   "birthday": "2000-12-12", "sex": "M", "room": 99}
    ])
}

/// Loads the sample datasets into the client's tables.
pub async fn load_sample_data(client: &SqliteClient, dir: &Path) {
    let rooms_path = write_fixture(dir, "rooms.json", &sample_rooms());
    let students_path = write_fixture(dir, "students.json", &sample_students());

    dorm_report::loader::load_table(client, &rooms_path, "rooms")
        .await
        .unwrap();
    dorm_report::loader::load_table(client, &students_path, "students")
        .await
        .unwrap();
}

/// Extracts the first column of every row as a string.
pub fn first_column_strings(result: &QueryResult) -> Vec<String> {
    result
        .rows
        .iter()
        .map(|row| match &row[0] {
            Value::String(s) => s.clone(),
            other => panic!("expected string in first column, got {other:?}"),
        })
        .collect()
}

/// Extracts column `index` of every row as an integer.
pub fn column_ints(result: &QueryResult, index: usize) -> Vec<i64> {
    result
        .rows
        .iter()
        .map(|row| match &row[index] {
            Value::Int(i) => *i,
            other => panic!("expected integer in column {index}, got {other:?}"),
        })
        .collect()
}
