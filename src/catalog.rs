//! The fixed catalog of aggregate reports.
//!
//! Four predefined queries over the `rooms` and `students` tables, selected
//! by 1-based index. All four share the same implicit inner-join shape
//! (`FROM rooms, students WHERE rooms.id = students.room`), so rooms with
//! zero students never appear in any result. Ages are computed as
//! `reference year - birth year`, with a single reference year shared by
//! every report that needs one.

use crate::db::{DatabaseBackend, Value};
use crate::error::{ReportError, Result};
use chrono::Datelike;

/// One of the four predefined reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Room name and student count per occupied room, by room id.
    Occupancy,
    /// Top 5 rooms by smallest average student age, ascending.
    YoungestRooms,
    /// Top 5 rooms by largest age spread, descending.
    WidestAgeSpread,
    /// Rooms housing students of exactly two distinct sexes, by room id.
    MixedRooms,
}

impl ReportKind {
    /// Parses a 1-based report selector.
    pub fn from_selector(selector: u32) -> Result<Self> {
        match selector {
            1 => Ok(Self::Occupancy),
            2 => Ok(Self::YoungestRooms),
            3 => Ok(Self::WidestAgeSpread),
            4 => Ok(Self::MixedRooms),
            other => Err(ReportError::config(format!(
                "report selector must be 1-4, got {other}"
            ))),
        }
    }

    /// Returns the 1-based selector for this report.
    pub fn selector(&self) -> u32 {
        match self {
            Self::Occupancy => 1,
            Self::YoungestRooms => 2,
            Self::WidestAgeSpread => 3,
            Self::MixedRooms => 4,
        }
    }

    /// A short human-readable description, used in logs.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Occupancy => "student count per room",
            Self::YoungestRooms => "top 5 rooms by smallest average age",
            Self::WidestAgeSpread => "top 5 rooms by largest age spread",
            Self::MixedRooms => "rooms housing exactly two sexes",
        }
    }

    /// Returns the SQL for this report in the given backend's dialect.
    ///
    /// Reports 2 and 3 bind the reference year as parameter 1.
    pub fn sql(&self, backend: DatabaseBackend) -> String {
        match self {
            Self::Occupancy => "\
                SELECT rooms.name, COUNT(*) AS student_count \
                FROM rooms, students \
                WHERE rooms.id = students.room \
                GROUP BY rooms.id, rooms.name \
                ORDER BY rooms.id"
                .to_string(),

            Self::YoungestRooms => format!(
                "SELECT rooms.name, \
                 CAST(ROUND(AVG({p1} - {year})) AS {int}) AS average_age \
                 FROM rooms, students \
                 WHERE rooms.id = students.room \
                 GROUP BY rooms.id, rooms.name \
                 ORDER BY 2 ASC \
                 LIMIT 5",
                p1 = backend.placeholder(1),
                year = birth_year_expr(backend),
                int = big_int_type(backend),
            ),

            Self::WidestAgeSpread => format!(
                "SELECT rooms.name, \
                 CAST(MAX({p1} - {year}) - MIN({p1} - {year}) AS {int}) AS age_spread \
                 FROM rooms, students \
                 WHERE rooms.id = students.room \
                 GROUP BY rooms.id, rooms.name \
                 ORDER BY 2 DESC \
                 LIMIT 5",
                p1 = backend.placeholder(1),
                year = birth_year_expr(backend),
                int = big_int_type(backend),
            ),

            Self::MixedRooms => "\
                SELECT rooms.name \
                FROM rooms, students \
                WHERE rooms.id = students.room \
                GROUP BY rooms.id, rooms.name \
                HAVING COUNT(DISTINCT sex) = 2 \
                ORDER BY rooms.id"
                .to_string(),
        }
    }

    /// Returns the parameters to bind for this report.
    pub fn params(&self, reference_year: i32) -> Vec<Value> {
        match self {
            Self::Occupancy | Self::MixedRooms => Vec::new(),
            Self::YoungestRooms | Self::WidestAgeSpread => {
                vec![Value::Int(reference_year as i64)]
            }
        }
    }
}

/// The default reference year for age computations: the current calendar
/// year.
pub fn default_reference_year() -> i32 {
    chrono::Utc::now().year()
}

/// SQL expression extracting the birth year from the `birthday` column.
fn birth_year_expr(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => "EXTRACT(YEAR FROM birthday)",
        DatabaseBackend::Sqlite => "CAST(strftime('%Y', birthday) AS INTEGER)",
    }
}

/// Integer type name for casting aggregate results to a plain integer.
fn big_int_type(backend: DatabaseBackend) -> &'static str {
    match backend {
        DatabaseBackend::Postgres => "BIGINT",
        DatabaseBackend::Sqlite => "INTEGER",
    }
}
