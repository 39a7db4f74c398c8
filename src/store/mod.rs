pub mod memory;
pub mod sqlite;

pub use memory::*;
pub use sqlite::*;

use thiserror::Error;

use crate::models::Record;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: id {0}")]
    NotFound(i64),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Internal lock error")]
    LockPoisoned,
}

/// CRUD seam over the record collaborator. Every operation is atomic per
/// call; there is no batch or transactional API.
pub trait RecordStore {
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a record (its `id` is ignored) and return the assigned id.
    fn insert(&self, record: &Record) -> Result<i64, StoreError>;

    fn update(&self, record: &Record) -> Result<(), StoreError>;

    fn delete(&self, record: &Record) -> Result<(), StoreError>;

    /// Remove every record, returning how many were removed.
    fn delete_all(&self) -> Result<usize, StoreError>;

    /// First record filed under `category` (case-insensitive), if any.
    fn find_by_category(&self, category: &str) -> Result<Option<Record>, StoreError>;
}
