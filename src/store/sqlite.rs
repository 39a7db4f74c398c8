use std::path::Path;

use rusqlite::{params, Connection};

use crate::models::Record;

use super::{RecordStore, StoreError};

/// Open a SQLite-backed record store at the given path and run migrations.
pub fn open_store(path: &Path) -> Result<SqliteStore, StoreError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(SqliteStore { conn })
}

/// Open an in-memory store (for testing)
pub fn open_memory_store() -> Result<SqliteStore, StoreError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    run_migrations(&conn)?;
    Ok(SqliteStore { conn })
}

/// Record store backed by a single SQLite connection.
pub struct SqliteStore {
    conn: Connection,
}

fn configure_pragmas(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run all pending migrations
fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    let current_version = get_current_version(conn);

    let migrations: Vec<(i64, &str)> = vec![(
        1,
        include_str!("../../resources/migrations/001_records.sql"),
    )];

    for (version, sql) in migrations {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(sql)
                .map_err(|e| StoreError::MigrationFailed {
                    version,
                    reason: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .unwrap_or(0)
}

impl RecordStore for SqliteStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, category FROM records ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Record {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn insert(&self, record: &Record) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO records (name, category) VALUES (?1, ?2)",
            params![record.name, record.category],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, record: &Record) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE records SET name = ?1, category = ?2 WHERE id = ?3",
            params![record.name, record.category, record.id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    fn delete(&self, record: &Record) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM records WHERE id = ?1", params![record.id])?;
        if changed == 0 {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let removed = self.conn.execute("DELETE FROM records", [])?;
        Ok(removed)
    }

    fn find_by_category(&self, category: &str) -> Result<Option<Record>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category FROM records
             WHERE LOWER(category) = LOWER(?1) ORDER BY id LIMIT 1",
        )?;
        let mut rows = stmt.query_map(params![category], |row| {
            Ok(Record {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_set_schema_version() {
        let store = open_memory_store().unwrap();
        assert_eq!(get_current_version(&store.conn), 1);
    }

    #[test]
    fn insert_list_round_trip() {
        let store = open_memory_store().unwrap();
        let id = store.insert(&Record::new("Paracetamol", "Ward B")).unwrap();
        assert_eq!(id, 1);

        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Paracetamol");
        assert_eq!(records[0].category, "Ward B");
        assert_eq!(records[0].id, 1);
    }

    #[test]
    fn update_and_delete_by_id() {
        let store = open_memory_store().unwrap();
        store.insert(&Record::new("Aspirin", "General")).unwrap();
        let mut record = store.list().unwrap().remove(0);

        record.category = "Shelf A".into();
        store.update(&record).unwrap();
        assert_eq!(store.list().unwrap()[0].category, "Shelf A");

        store.delete(&record).unwrap();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn update_missing_record_is_not_found() {
        let store = open_memory_store().unwrap();
        let ghost = Record {
            id: 7,
            name: "Ghost".into(),
            category: "General".into(),
        };
        assert!(matches!(store.update(&ghost), Err(StoreError::NotFound(7))));
    }

    #[test]
    fn delete_all_reports_count() {
        let store = open_memory_store().unwrap();
        store.insert(&Record::new("A", "x")).unwrap();
        store.insert(&Record::new("B", "y")).unwrap();
        assert_eq!(store.delete_all().unwrap(), 2);
        assert_eq!(store.delete_all().unwrap(), 0);
    }

    #[test]
    fn find_by_category_ignores_case() {
        let store = open_memory_store().unwrap();
        store.insert(&Record::new("Paracetamol", "Ward B")).unwrap();
        assert_eq!(
            store.find_by_category("WARD B").unwrap().unwrap().name,
            "Paracetamol"
        );
        assert!(store.find_by_category("Ward C").unwrap().is_none());
    }

    #[test]
    fn reopening_on_disk_store_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.db");

        {
            let store = open_store(&path).unwrap();
            store.insert(&Record::new("Metformin", "Cabinet A")).unwrap();
        }

        let store = open_store(&path).unwrap();
        let records = store.list().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Metformin");
    }
}
