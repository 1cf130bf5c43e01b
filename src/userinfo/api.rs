//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for record operations, whatever drives them (the session, the
//! terminal client, tests).
//!
//! The facade:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs**: display index strings (`"2"`, `"1-3"`) become
//!   [`IndexSelector`] values before any command runs
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It has no business logic, no I/O, and no presentation concerns.
//!
//! ## Index Grammar
//!
//! - **Single**: `N` (e.g. `1`, `42`), 1-based
//! - **Range**: `Start-End` (e.g. `2-4`), inclusive, start must be ≤ end
//!
//! Several inputs may be passed at once; duplicates are dropped, first
//! occurrence wins. Any input that doesn't parse fails the whole call with
//! [`UserInfoError::InvalidIndex`] and nothing is touched.
//!
//! ## Generic Over DataStore
//!
//! `UserInfoApi<S: DataStore>` is generic over the storage backend so the same
//! facade runs against `InMemoryStore` in tests and in the client.

use crate::commands;
use crate::error::{Result, UserInfoError};
use crate::index::{parse_index_or_range, DisplayRecord, IndexSelector};
use crate::model::{Record, RecordId};
use crate::store::DataStore;
use std::collections::HashSet;

pub struct UserInfoApi<S: DataStore> {
    store: S,
}

impl<S: DataStore> UserInfoApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn add_record(&mut self, record: Record) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, record)
    }

    pub fn update_record(&mut self, id: RecordId, record: Record) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, record)
    }

    pub fn delete_records<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(indexes)?;
        commands::delete::run(&mut self.store, &indexes)
    }

    /// Lists rows, filtered by `query` when given. A blank query lists everything.
    pub fn list_records(&self, query: Option<&str>) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, query)
    }

    /// Looks up the row currently shown at `index`.
    pub fn get_record(&self, index: &str) -> Result<DisplayRecord> {
        let selector @ IndexSelector::Single(_) = parse_index_or_range(index)? else {
            return Err(UserInfoError::InvalidIndex(format!(
                "{} (expected a single index)",
                index.trim()
            )));
        };
        let resolved = commands::helpers::resolve_indexes(&self.store, &[selector])?;
        let (_, id) = resolved[0];
        commands::helpers::find_by_id(&self.store, id)
    }

    /// Looks up a row by id, with its current display index.
    pub fn find_record(&self, id: RecordId) -> Result<DisplayRecord> {
        commands::helpers::find_by_id(&self.store, id)
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }
}

fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<IndexSelector>> {
    if inputs.is_empty() {
        return Err(UserInfoError::InvalidIndex("no index given".to_string()));
    }

    let mut all = Vec::new();
    for input in inputs {
        all.push(parse_index_or_range(input.as_ref())?);
    }

    // Deduplicate while preserving order
    let mut seen = HashSet::new();
    Ok(all.into_iter().filter(|sel| seen.insert(*sel)).collect())
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
