use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, UserInfoError};
use crate::model::{Record, RecordId};
use crate::store::DataStore;
use crate::validation::validate;
use log::warn;

use super::helpers::find_by_id;

pub fn run<S: DataStore>(store: &mut S, id: RecordId, record: Record) -> Result<CmdResult> {
    let errors = validate(&record);
    if !errors.is_empty() {
        warn!("update of {} refused: {}", id, errors);
        return Err(UserInfoError::Validation(errors));
    }

    store.update(id, record)?;
    // Position doesn't change on update
    let row = find_by_id(store, id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry updated ({}): {}",
        row.index, row.entry.record.name
    )));
    result.affected.push(row);
    Ok(result)
}
