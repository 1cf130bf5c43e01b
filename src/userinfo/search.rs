//! Table search.
//!
//! A row matches when any of its four fields contains the query as a
//! case-insensitive substring. A blank query matches everything and leaves the
//! list untouched. Filtering never renumbers rows: each one keeps the display
//! index it has in the full list.

use crate::index::DisplayRecord;
use crate::model::{Field, Record};

/// True when the query is empty or whitespace only.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Fields of `record` containing `query`, ignoring case.
///
/// `query` is matched as given; callers check [`is_blank`] first.
pub fn matching_fields(record: &Record, query: &str) -> Vec<Field> {
    let needle = query.to_lowercase();
    record
        .values()
        .iter()
        .filter(|(_, value)| value.to_lowercase().contains(&needle))
        .map(|(field, _)| *field)
        .collect()
}

/// Returns the rows matching `query`, in their original order.
///
/// Matching rows carry the fields that matched; with a blank query every row is
/// returned as is.
pub fn filter_records(query: &str, rows: Vec<DisplayRecord>) -> Vec<DisplayRecord> {
    if is_blank(query) {
        return rows;
    }

    rows.into_iter()
        .filter_map(|mut row| {
            let fields = matching_fields(&row.entry.record, query);
            if fields.is_empty() {
                return None;
            }
            row.matches = Some(fields);
            Some(row)
        })
        .collect()
}
