//! # Record Handles: RecordId vs Display Index
//!
//! Rows need a handle so the user can say "edit this one" or "delete that one".
//! Naively using the row's position in whatever list is on screen breaks as
//! soon as the list is filtered or something above the row is deleted.
//!
//! ## The Dual-Identifier Solution
//!
//! 1. **RecordId (internal)**: immutable, assigned by the store, never reused.
//! 2. **Display index (external)**: the 1-based row number of the entry in the
//!    full, unfiltered list, in insertion order.
//!
//! A filtered table keeps each row's canonical display index, so `edit 3`
//! targets the same entry whether or not a search is active. Display indexes are
//! resolved to ids at the API boundary; everything past that point works on ids.
//!
//! **Developer note**: always build displayed rows with [`index_records`]. Never
//! enumerate a filtered list yourself, or the shown numbers stop matching what
//! the API resolves.

use crate::error::{Result, UserInfoError};
use crate::model::{Entry, Field};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A user-facing, 1-based row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DisplayIndex(usize);

impl DisplayIndex {
    /// Returns `None` for zero; display indexes start at 1.
    pub fn new(n: usize) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Zero-based position in the full list.
    pub fn position(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DisplayIndex {
    type Err = UserInfoError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(DisplayIndex::new)
            .ok_or_else(|| UserInfoError::InvalidIndex(s.to_string()))
    }
}

/// An entry paired with its canonical display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub entry: Entry,
    pub index: DisplayIndex,
    /// Fields that matched the active search, if one is active.
    pub matches: Option<Vec<Field>>,
}

/// Assigns canonical display indexes to the full, ordered list of entries.
pub fn index_records(entries: Vec<Entry>) -> Vec<DisplayRecord> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| DisplayRecord {
            entry,
            index: DisplayIndex(i + 1),
            matches: None,
        })
        .collect()
}

/// What the user typed to pick rows: one index or an inclusive run.
///
/// Ranges stay unexpanded until they are resolved against the current list, so
/// `1-99999999999` costs nothing and fails as out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSelector {
    Single(DisplayIndex),
    Range(DisplayIndex, DisplayIndex),
}

impl IndexSelector {
    /// Largest index this selector names.
    pub fn last(self) -> DisplayIndex {
        match self {
            IndexSelector::Single(index) => index,
            IndexSelector::Range(_, end) => end,
        }
    }

    /// Expands to individual indexes. Callers check [`IndexSelector::last`]
    /// against the list length first.
    pub fn indexes(self) -> impl Iterator<Item = DisplayIndex> {
        let (start, end) = match self {
            IndexSelector::Single(index) => (index, index),
            IndexSelector::Range(start, end) => (start, end),
        };
        (start.get()..=end.get()).map(DisplayIndex)
    }
}

/// Parses `"3"` into a single index or `"2-4"` into an inclusive range.
pub fn parse_index_or_range(s: &str) -> Result<IndexSelector> {
    let s = s.trim();
    if let Some((start, end)) = s.split_once('-') {
        let start: DisplayIndex = start.parse()?;
        let end: DisplayIndex = end.parse()?;
        if start > end {
            return Err(UserInfoError::InvalidIndex(format!(
                "{} (range start is after its end)",
                s
            )));
        }
        return Ok(IndexSelector::Range(start, end));
    }
    Ok(IndexSelector::Single(s.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, RecordId};

    fn entry(id: u64, name: &str) -> Entry {
        Entry::new(RecordId::new(id), Record::new(name, "1", "a@b.co", "1"))
    }

    #[test]
    fn indexes_follow_list_order_starting_at_one() {
        let rows = index_records(vec![entry(4, "a"), entry(9, "b"), entry(10, "c")]);
        let indexes: Vec<usize> = rows.iter().map(|r| r.index.get()).collect();
        assert_eq!(indexes, vec![1, 2, 3]);
        assert_eq!(rows[1].entry.id, RecordId::new(9));
        assert!(rows.iter().all(|r| r.matches.is_none()));
    }

    #[test]
    fn parses_single_indexes() {
        assert_eq!("3".parse::<DisplayIndex>().unwrap().get(), 3);
        assert_eq!(" 12 ".parse::<DisplayIndex>().unwrap().get(), 12);
        assert!("0".parse::<DisplayIndex>().is_err());
        assert!("-1".parse::<DisplayIndex>().is_err());
        assert!("two".parse::<DisplayIndex>().is_err());
    }

    #[test]
    fn parses_ranges() {
        let run = parse_index_or_range("2-4").unwrap();
        let values: Vec<usize> = run.indexes().map(|i| i.get()).collect();
        assert_eq!(values, vec![2, 3, 4]);
        assert_eq!(run.last().get(), 4);

        assert!(matches!(
            parse_index_or_range("5").unwrap(),
            IndexSelector::Single(i) if i.get() == 5
        ));
        assert!(parse_index_or_range("4-2").is_err());
        assert!(parse_index_or_range("1-x").is_err());
    }

    #[test]
    fn huge_range_parses_without_expanding() {
        let run = parse_index_or_range(&format!("1-{}", usize::MAX)).unwrap();
        assert_eq!(run.last().get(), usize::MAX);
    }

    #[test]
    fn position_is_zero_based() {
        assert_eq!(DisplayIndex::new(1).unwrap().position(), 0);
        assert!(DisplayIndex::new(0).is_none());
    }
}
