use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, UserInfoError};
use crate::index::{DisplayIndex, DisplayRecord};
use crate::model::Record;
use crate::store::DataStore;
use crate::validation::validate;
use log::warn;

pub fn run<S: DataStore>(store: &mut S, record: Record) -> Result<CmdResult> {
    let errors = validate(&record);
    if !errors.is_empty() {
        warn!("add refused: {}", errors);
        return Err(UserInfoError::Validation(errors));
    }

    let entry = store.add(record)?;

    // New entries always land at the end of the list
    let index = DisplayIndex::new(store.len()).ok_or(UserInfoError::RecordNotFound(entry.id))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Entry added: {}",
        entry.record.name
    )));
    result.affected.push(DisplayRecord {
        entry,
        index,
        matches: None,
    });
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::validation::FieldError;

    #[test]
    fn adds_record_as_last_row() {
        let mut store = StoreFixture::new().with_records(2).store;

        let result = run(&mut store, Record::new("Ann", "30", "a@b.com", "123")).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].index.get(), 3);
        assert_eq!(store.all().unwrap()[2].record.name, "Ann");
        assert!(result.messages[0].content.contains("Ann"));
    }

    #[test]
    fn refuses_invalid_record() {
        let mut store = InMemoryStore::new();

        let result = run(&mut store, Record::new("Ann", "30", "bad-email", "123"));

        match result {
            Err(UserInfoError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors.get(Field::Email), Some(FieldError::Format));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.is_empty());
    }
}
