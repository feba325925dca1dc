pub mod sqlite;

pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Invalid date in stored data: {0}")]
    InvalidDate(String),

    #[error("Invalid id in stored data for {entity_type}: {value}")]
    InvalidId { entity_type: String, value: String },
}

/// Parses a UUID read back from storage. A row with a malformed id is
/// corruption, not something to repair in flight.
pub fn parse_stored_uuid(
    value: &str,
    entity_type: &str,
) -> Result<uuid::Uuid, DatabaseError> {
    value.parse().map_err(|_| DatabaseError::InvalidId {
        entity_type: entity_type.into(),
        value: value.into(),
    })
}

impl From<crate::streaks::StreakError> for DatabaseError {
    fn from(err: crate::streaks::StreakError) -> Self {
        match err {
            crate::streaks::StreakError::InvalidDateFormat(s) => DatabaseError::InvalidDate(s),
        }
    }
}
