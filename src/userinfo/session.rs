//! # Session
//!
//! The top-level UI state: the API (and so the store), the form, and the search
//! box. Clients feed it one [`Intent`] at a time and render the [`View`] it
//! hands back. Nothing here knows how the view is drawn.
//!
//! Stale or mistyped indexes and records the API refuses are not fatal: they
//! come back as warning messages and leave the state untouched. Only errors
//! that are not [`recoverable`](UserInfoError::is_recoverable) propagate.

use crate::api::UserInfoApi;
use crate::commands::CmdMessage;
use crate::error::{Result, UserInfoError};
use crate::form::{FormController, FormMode, Submission};
use crate::index::DisplayRecord;
use crate::model::{Field, RecordId};
use crate::store::DataStore;
use log::{debug, warn};
use serde::Serialize;

pub const EMPTY_TABLE_MESSAGE: &str = "No matching entries found.";
pub const SEARCH_PLACEHOLDER: &str = "Search by name, age, email or phone";

/// One user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleForm,
    ToggleSearch,
    SetQuery(String),
    SetField(Field, String),
    Submit,
    /// Open the form on the row with this display index.
    Edit(String),
    /// Delete rows by display index (`"2"`, `"1-3"`).
    Delete(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub visible: bool,
    pub query: String,
}

impl SearchBox {
    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            "Close Search"
        } else {
            "Search"
        }
    }
}

pub struct Session<S: DataStore> {
    api: UserInfoApi<S>,
    form: FormController,
    search: SearchBox,
}

impl<S: DataStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            api: UserInfoApi::new(store),
            form: FormController::new(),
            search: SearchBox::default(),
        }
    }

    pub fn api(&self) -> &UserInfoApi<S> {
        &self.api
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    /// Handles one intent to completion.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<CmdMessage>> {
        debug!("intent: {:?}", intent);
        match self.dispatch(intent) {
            Err(e) if e.is_recoverable() => {
                warn!("intent rejected: {}", e);
                Ok(vec![CmdMessage::warning(e.to_string())])
            }
            other => other,
        }
    }

    fn dispatch(&mut self, intent: Intent) -> Result<Vec<CmdMessage>> {
        match intent {
            Intent::ToggleForm => {
                self.form.toggle();
                Ok(Vec::new())
            }
            Intent::ToggleSearch => {
                self.search.visible = !self.search.visible;
                Ok(Vec::new())
            }
            Intent::SetQuery(query) => {
                self.search.query = query;
                Ok(Vec::new())
            }
            Intent::SetField(field, value) => {
                if !self.form.mode().is_open() {
                    return Ok(vec![CmdMessage::info("The form is not open")]);
                }
                self.form.set_field(field, value);
                Ok(Vec::new())
            }
            Intent::Submit => self.submit(),
            Intent::Edit(index) => {
                let row = self.api.get_record(&index)?;
                self.form.begin_edit(row.entry.id, row.entry.record.clone());
                Ok(vec![CmdMessage::info(format!(
                    "Editing entry ({}): {}",
                    row.index, row.entry.record.name
                ))])
            }
            Intent::Delete(indexes) => {
                let result = self.api.delete_records(&indexes)?;
                let mut messages = result.messages;
                for row in &result.affected {
                    if self.form.forget(row.entry.id) {
                        messages.push(CmdMessage::info(
                            "Form closed: the entry being edited was deleted",
                        ));
                    }
                }
                Ok(messages)
            }
        }
    }

    fn submit(&mut self) -> Result<Vec<CmdMessage>> {
        match self.form.prepare_submit() {
            Submission::Ignored => Ok(vec![CmdMessage::info(
                "Nothing to submit: the form is not open",
            )]),
            Submission::Rejected(errors) => {
                debug!("submit blocked: {}", errors);
                Ok(vec![CmdMessage::warning(format!(
                    "Entry not saved: {}",
                    errors
                ))])
            }
            Submission::Create(record) => {
                let result = self.api.add_record(record)?;
                self.form.reset();
                Ok(result.messages)
            }
            Submission::Update(id, record) => match self.api.update_record(id, record) {
                Ok(result) => {
                    self.form.reset();
                    Ok(result.messages)
                }
                Err(e @ UserInfoError::RecordNotFound(_)) => {
                    // Nothing left to edit
                    self.form.reset();
                    Err(e)
                }
                Err(e) => Err(e),
            },
        }
    }

    /// Render-ready snapshot of the current state.
    pub fn view(&self) -> Result<View> {
        let rows: Vec<RowView> = self
            .api
            .list_records(Some(&self.search.query))?
            .listed
            .iter()
            .map(RowView::from)
            .collect();

        let visible_errors = self.form.visible_errors();
        let values = self.form.values();
        let fields = Field::ALL
            .iter()
            .map(|&field| FieldView {
                field,
                label: field.label(),
                value: values.get(field).to_string(),
                error: visible_errors.message(field),
            })
            .collect();

        Ok(View {
            toggle_label: self.form.toggle_label(),
            form: FormView {
                open: self.form.mode().is_open(),
                mode: self.form.mode(),
                submit_label: self.form.submit_label(),
                fields,
            },
            search: SearchView {
                visible: self.search.visible,
                toggle_label: self.search.toggle_label(),
                query: self.search.query.clone(),
                placeholder: SEARCH_PLACEHOLDER,
            },
            empty_message: rows.is_empty().then_some(EMPTY_TABLE_MESSAGE),
            rows,
            total: self.api.count(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub toggle_label: &'static str,
    pub form: FormView,
    pub search: SearchView,
    pub rows: Vec<RowView>,
    pub empty_message: Option<&'static str>,
    /// Entries in the store, filtered or not.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub open: bool,
    pub mode: FormMode,
    pub submit_label: &'static str,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub visible: bool,
    pub toggle_label: &'static str,
    pub query: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub index: usize,
    pub id: RecordId,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub field: Field,
    pub value: String,
    pub matched: bool,
}

impl From<&DisplayRecord> for RowView {
    fn from(row: &DisplayRecord) -> Self {
        let matches = row.matches.as_deref().unwrap_or(&[]);
        let cells = row
            .entry
            .record
            .values()
            .iter()
            .map(|(field, value)| CellView {
                field: *field,
                value: value.to_string(),
                matched: matches.contains(field),
            })
            .collect();
        Self {
            index: row.index.get(),
            id: row.entry.id,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn session() -> Session<InMemoryStore> {
        Session::new(InMemoryStore::new())
    }

    fn fill(session: &mut Session<InMemoryStore>, values: [&str; 4]) {
        for (field, value) in Field::ALL.into_iter().zip(values) {
            session
                .apply(Intent::SetField(field, value.to_string()))
                .unwrap();
        }
    }

    fn cell(view: &View, row: usize, field: Field) -> String {
        view.rows[row]
            .cells
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.value.clone())
            .unwrap()
    }

    #[test]
    fn add_edit_delete_lifecycle() {
        let mut s = session();

        s.apply(Intent::ToggleForm).unwrap();
        fill(&mut s, ["Ann", "30", "a@b.com", "123"]);
        let messages = s.apply(Intent::Submit).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Success);
        assert_eq!(messages[0].content, "Entry added: Ann");

        let view = s.view().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert!(!view.form.open);
        assert_eq!(view.toggle_label, "Add New Entry");

        s.apply(Intent::Edit("1".to_string())).unwrap();
        let view = s.view().unwrap();
        assert_eq!(view.form.submit_label, "Update");
        assert_eq!(view.form.fields[0].value, "Ann");

        s.apply(Intent::SetField(Field::Age, "31".to_string())).unwrap();
        s.apply(Intent::Submit).unwrap();

        let view = s.view().unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(cell(&view, 0, Field::Age), "31");
        assert_eq!(view.form.mode, FormMode::Hidden);

        s.apply(Intent::Delete(vec!["1".to_string()])).unwrap();
        let view = s.view().unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_TABLE_MESSAGE));
    }

    #[test]
    fn bad_email_blocks_submit() {
        let mut s = session();
        s.apply(Intent::ToggleForm).unwrap();
        fill(&mut s, ["Ann", "30", "bad-email", "123"]);

        let messages = s.apply(Intent::Submit).unwrap();

        assert_eq!(messages[0].level, MessageLevel::Warning);
        let view = s.view().unwrap();
        assert!(view.rows.is_empty());
        assert!(view.form.open);
        let email = &view.form.fields[2];
        assert_eq!(email.field, Field::Email);
        assert_eq!(email.error, Some("Enter a valid email address"));
        assert!(view.form.fields[0].error.is_none());
    }

    #[test]
    fn empty_submit_shows_every_error() {
        let mut s = session();
        s.apply(Intent::ToggleForm).unwrap();
        assert!(s.view().unwrap().form.fields.iter().all(|f| f.error.is_none()));

        s.apply(Intent::Submit).unwrap();

        let view = s.view().unwrap();
        assert!(view.form.fields.iter().all(|f| f.error.is_some()));
        assert_eq!(view.form.fields[0].error, Some("Name is required"));
    }

    #[test]
    fn search_toggle_keeps_query_and_filter() {
        let mut s = Session::new(StoreFixture::new().with_records(3).store);

        s.apply(Intent::ToggleSearch).unwrap();
        assert_eq!(s.view().unwrap().search.toggle_label, "Close Search");
        s.apply(Intent::SetQuery("user2@".to_string())).unwrap();
        s.apply(Intent::ToggleSearch).unwrap();

        let view = s.view().unwrap();
        assert!(!view.search.visible);
        assert_eq!(view.search.query, "user2@");
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].index, 2);
        assert!(view.rows[0].cells[2].matched);
        assert_eq!(view.total, 3);

        s.apply(Intent::ToggleSearch).unwrap();
        assert_eq!(s.view().unwrap().search.query, "user2@");
    }

    #[test]
    fn no_match_shows_empty_message() {
        let mut s = Session::new(StoreFixture::new().with_records(2).store);
        s.apply(Intent::SetQuery("nobody".to_string())).unwrap();
        let view = s.view().unwrap();
        assert!(view.rows.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_TABLE_MESSAGE));
    }

    #[test]
    fn stale_index_warns_without_mutation() {
        let mut s = Session::new(StoreFixture::new().with_records(2).store);

        let messages = s.apply(Intent::Delete(vec!["7".to_string()])).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert_eq!(s.view().unwrap().rows.len(), 2);

        let messages = s.apply(Intent::Edit("x".to_string())).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert_eq!(s.form().mode(), FormMode::Hidden);
    }

    #[test]
    fn huge_range_warns_without_mutation() {
        let mut s = Session::new(StoreFixture::new().with_records(2).store);
        let huge = format!("1-{}", usize::MAX);

        let messages = s.apply(Intent::Delete(vec![huge.clone()])).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert!(messages[0].content.contains("(2 in the list)"));
        assert_eq!(s.view().unwrap().rows.len(), 2);

        let messages = s.apply(Intent::Edit(huge)).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Warning);
        assert_eq!(s.form().mode(), FormMode::Hidden);
    }

    #[test]
    fn deleting_the_edited_entry_closes_the_form() {
        let mut s = Session::new(StoreFixture::new().with_records(2).store);
        s.apply(Intent::Edit("2".to_string())).unwrap();

        let messages = s.apply(Intent::Delete(vec!["2".to_string()])).unwrap();

        assert_eq!(s.form().mode(), FormMode::Hidden);
        assert_eq!(messages.len(), 2);
    }

    #[test]
    fn submit_and_typing_while_hidden_are_ignored() {
        let mut s = session();
        let messages = s.apply(Intent::Submit).unwrap();
        assert_eq!(messages[0].level, MessageLevel::Info);

        let messages = s
            .apply(Intent::SetField(Field::Name, "Ann".to_string()))
            .unwrap();
        assert_eq!(messages[0].level, MessageLevel::Info);
        assert!(s.form().values().name.is_empty());
        assert_eq!(s.api().count(), 0);
    }

    #[test]
    fn view_serializes_to_json() {
        let mut s = Session::new(StoreFixture::new().with_records(1).store);
        s.apply(Intent::ToggleForm).unwrap();
        let json = serde_json::to_value(s.view().unwrap()).unwrap();
        assert_eq!(json["form"]["mode"]["mode"], "create");
        assert_eq!(json["rows"][0]["cells"][0]["value"], "User 1");
        assert_eq!(json["empty_message"], serde_json::Value::Null);
    }
}
