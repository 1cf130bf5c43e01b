use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::{DisplayRecord, IndexSelector};
use crate::store::DataStore;

use super::helpers::resolve_indexes;

pub fn run<S: DataStore>(store: &mut S, selectors: &[IndexSelector]) -> Result<CmdResult> {
    let resolved = resolve_indexes(store, selectors)?;
    let mut result = CmdResult::default();

    for (display_index, id) in resolved {
        let entry = store.delete(id)?;
        result.add_message(CmdMessage::success(format!(
            "Entry deleted ({}): {}",
            display_index, entry.record.name
        )));
        result.affected.push(DisplayRecord {
            entry,
            index: display_index,
            matches: None,
        });
    }

    Ok(result)
}
