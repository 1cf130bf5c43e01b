use crate::error::{Result, UserInfoError};
use crate::index::{index_records, DisplayIndex, DisplayRecord, IndexSelector};
use crate::model::RecordId;
use crate::store::DataStore;
use std::collections::HashSet;

pub fn indexed_records<S: DataStore>(store: &S) -> Result<Vec<DisplayRecord>> {
    Ok(index_records(store.all()?))
}

/// Resolves index selectors against the current list.
///
/// All selectors are resolved before the caller mutates anything, so a batch
/// like `delete 1 3` means rows 1 and 3 as they were shown. Ranges are bounds
/// checked before they are expanded. Duplicates are dropped, first occurrence
/// wins.
pub fn resolve_indexes<S: DataStore>(
    store: &S,
    selectors: &[IndexSelector],
) -> Result<Vec<(DisplayIndex, RecordId)>> {
    let entries = store.all()?;
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for selector in selectors {
        let last = selector.last();
        if last.get() > entries.len() {
            return Err(UserInfoError::IndexOutOfRange {
                index: last.get(),
                len: entries.len(),
            });
        }
        for index in selector.indexes() {
            if seen.insert(index) {
                resolved.push((index, entries[index.position()].id));
            }
        }
    }

    Ok(resolved)
}

/// Current display row for `id`.
pub fn find_by_id<S: DataStore>(store: &S, id: RecordId) -> Result<DisplayRecord> {
    indexed_records(store)?
        .into_iter()
        .find(|row| row.entry.id == id)
        .ok_or(UserInfoError::RecordNotFound(id))
}
