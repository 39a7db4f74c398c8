use std::sync::{Mutex, MutexGuard};

use crate::models::Record;

use super::{RecordStore, StoreError};

/// In-memory record store — the crate's test double and demo backend.
/// Assigns ids the way the SQLite store does (1-based, monotonic).
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    records: Vec<Record>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Store pre-seeded with (name, category) pairs.
    pub fn seeded(records: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (name, category) in records {
            store
                .insert(&Record::new(*name, *category))
                .expect("seeding a fresh MemoryStore cannot fail");
        }
        store
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.lock()?.records.clone())
    }

    fn insert(&self, record: &Record) -> Result<i64, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push(Record {
            id,
            name: record.name.clone(),
            category: record.category.clone(),
        });
        Ok(id)
    }

    fn update(&self, record: &Record) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        match inner.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                existing.name = record.name.clone();
                existing.category = record.category.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(record.id)),
        }
    }

    fn delete(&self, record: &Record) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let before = inner.records.len();
        inner.records.retain(|r| r.id != record.id);
        if inner.records.len() == before {
            return Err(StoreError::NotFound(record.id));
        }
        Ok(())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let removed = inner.records.len();
        inner.records.clear();
        Ok(removed)
    }

    fn find_by_category(&self, category: &str) -> Result<Option<Record>, StoreError> {
        Ok(self
            .lock()?
            .records
            .iter()
            .find(|r| r.category.eq_ignore_ascii_case(category))
            .cloned())
    }
}
