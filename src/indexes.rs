//! Auxiliary index management around report execution.
//!
//! When requested, a composite index on students(room, birthday, sex) and an
//! index on rooms(id) are created before the report runs and dropped after
//! the output is written. Index names carry a caller-suppliable prefix so
//! concurrent runs can pick non-colliding names.

use crate::db::DatabaseClient;
use crate::error::Result;
use tracing::info;

/// Default prefix for the auxiliary index names.
pub const DEFAULT_INDEX_PREFIX: &str = "report";

/// Manages the two auxiliary indexes used by the report queries.
#[derive(Debug, Clone)]
pub struct IndexManager {
    prefix: String,
}

impl IndexManager {
    /// Creates a manager whose index names start with `prefix`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Name of the composite index over students.
    pub fn students_index(&self) -> String {
        format!("{}_students_idx", self.prefix)
    }

    /// Name of the index over rooms.
    pub fn rooms_index(&self) -> String {
        format!("{}_rooms_idx", self.prefix)
    }

    /// Creates both auxiliary indexes.
    pub async fn create(&self, client: &dyn DatabaseClient) -> Result<()> {
        client
            .execute(
                &format!(
                    "CREATE INDEX {} ON students (room, birthday, sex)",
                    self.students_index()
                ),
                &[],
            )
            .await?;
        client
            .execute(
                &format!("CREATE INDEX {} ON rooms (id)", self.rooms_index()),
                &[],
            )
            .await?;

        info!(
            "Created indexes {} and {}",
            self.students_index(),
            self.rooms_index()
        );
        Ok(())
    }

    /// Drops both auxiliary indexes.
    pub async fn drop(&self, client: &dyn DatabaseClient) -> Result<()> {
        client
            .execute(&format!("DROP INDEX {}", self.students_index()), &[])
            .await?;
        client
            .execute(&format!("DROP INDEX {}", self.rooms_index()), &[])
            .await?;

        info!(
            "Dropped indexes {} and {}",
            self.students_index(),
            self.rooms_index()
        );
        Ok(())
    }
}

impl Default for IndexManager {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_PREFIX)
    }
}
