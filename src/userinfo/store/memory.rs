use super::DataStore;
use crate::error::{Result, UserInfoError};
use crate::model::{Entry, Record, RecordId};
use chrono::Utc;
use log::debug;

/// Vec-backed store. Lookups are linear, which is fine for a hand-filled table.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Vec<Entry>,
    last_id: u64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, id: RecordId) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(UserInfoError::RecordNotFound(id))
    }

    fn next_id(&mut self) -> RecordId {
        self.last_id += 1;
        RecordId::new(self.last_id)
    }
}

impl DataStore for InMemoryStore {
    fn add(&mut self, record: Record) -> Result<Entry> {
        let entry = Entry::new(self.next_id(), record);
        debug!("store: added {} at position {}", entry.id, self.entries.len());
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&mut self, id: RecordId, record: Record) -> Result<Entry> {
        let pos = self.position(id)?;
        let entry = &mut self.entries[pos];
        entry.record = record;
        entry.updated_at = Utc::now();
        debug!("store: updated {} at position {}", id, pos);
        Ok(entry.clone())
    }

    fn delete(&mut self, id: RecordId) -> Result<Entry> {
        let pos = self.position(id)?;
        debug!("store: deleted {} from position {}", id, pos);
        Ok(self.entries.remove(pos))
    }

    fn get(&self, id: RecordId) -> Result<Entry> {
        let pos = self.position(id)?;
        Ok(self.entries[pos].clone())
    }

    fn all(&self) -> Result<Vec<Entry>> {
        Ok(self.entries.clone())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds `count` valid records named "User 1", "User 2", ...
        pub fn with_records(mut self, count: usize) -> Self {
            for i in 1..=count {
                let record = Record::new(
                    format!("User {}", i),
                    format!("{}", 20 + i),
                    format!("user{}@example.com", i),
                    format!("555000{}", i),
                );
                self.store.add(record).unwrap();
            }
            self
        }

        pub fn with_record(mut self, record: Record) -> Self {
            self.store.add(record).unwrap();
            self
        }
    }
}
