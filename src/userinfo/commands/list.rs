use crate::commands::CmdResult;
use crate::error::Result;
use crate::search::filter_records;
use crate::store::DataStore;

use super::helpers::indexed_records;

/// Lists all rows, or only those matching `query` when one is given.
pub fn run<S: DataStore>(store: &S, query: Option<&str>) -> Result<CmdResult> {
    let rows = indexed_records(store)?;
    let listed = match query {
        Some(q) => filter_records(q, rows),
        None => rows,
    };
    Ok(CmdResult::default().with_listed(listed))
}
