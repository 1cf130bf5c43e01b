//! # Storage Layer
//!
//! The [`DataStore`] trait is the seam between the record logic and wherever
//! records live. The only implementation is [`memory::InMemoryStore`]: records
//! exist for the lifetime of the session and nothing is written anywhere.
//!
//! ## Ordering
//!
//! A store is an ordered sequence in insertion order:
//! - `add` appends at the end
//! - `update` replaces in place, keeping position, id and `created_at`
//! - `delete` removes the entry; later entries move up one position
//!
//! ## Identity
//!
//! Every entry gets a [`RecordId`] from a per-store counter. Ids are never
//! reused, so a handle taken before a delete either still finds its own entry
//! or fails with [`crate::error::UserInfoError::RecordNotFound`]. Stores never
//! treat an unknown id as a silent no-op.

use crate::error::Result;
use crate::model::{Entry, Record, RecordId};

pub mod memory;

/// Abstract interface for record storage.
pub trait DataStore {
    /// Appends a record and returns the stored entry.
    fn add(&mut self, record: Record) -> Result<Entry>;

    /// Replaces the record of an existing entry.
    fn update(&mut self, id: RecordId, record: Record) -> Result<Entry>;

    /// Removes an entry, returning it.
    fn delete(&mut self, id: RecordId) -> Result<Entry>;

    /// Gets an entry by id.
    fn get(&self, id: RecordId) -> Result<Entry>;

    /// All entries in order.
    fn all(&self) -> Result<Vec<Entry>>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
