//! Create/edit form state machine.
//!
//! The form is either hidden, creating a new record, or editing the record with
//! a given [`RecordId`]. Field values are kept as typed so the form can hold an
//! invalid draft; errors are recomputed on every keystroke but only shown for
//! fields the user has touched.

use crate::model::{Field, Record, RecordId};
use crate::validation::{validate, validate_field, ValidationErrors};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "lowercase")]
pub enum FormMode {
    #[default]
    Hidden,
    Create,
    Edit(RecordId),
}

impl FormMode {
    pub fn is_open(self) -> bool {
        !matches!(self, FormMode::Hidden)
    }
}

/// What a submit should do, decided by the form alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The form is hidden; there is nothing to submit.
    Ignored,
    /// The draft has errors. Every field is now touched so all of them show.
    Rejected(ValidationErrors),
    Create(Record),
    Update(RecordId, Record),
}

#[derive(Debug, Clone, Default)]
pub struct FormController {
    mode: FormMode,
    values: Record,
    touched: BTreeSet<Field>,
    errors: ValidationErrors,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn values(&self) -> &Record {
        &self.values
    }

    /// All current errors, touched or not.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Errors for touched fields only.
    pub fn visible_errors(&self) -> ValidationErrors {
        let mut visible = self.errors.clone();
        visible.retain(|field| self.touched.contains(&field));
        visible
    }

    /// `Hidden` opens a blank create form; any open form closes.
    pub fn toggle(&mut self) {
        let next = match self.mode {
            FormMode::Hidden => FormMode::Create,
            FormMode::Create | FormMode::Edit(_) => FormMode::Hidden,
        };
        self.reset_to(next);
    }

    pub fn begin_edit(&mut self, id: RecordId, record: Record) {
        self.reset_to(FormMode::Edit(id));
        self.errors = validate(&record);
        self.values = record;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        self.touched.insert(field);
        // Rules are per field, so only the changed one can flip.
        match validate_field(field, self.values.get(field)) {
            Some(error) => self.errors.insert(field, error),
            None => self.errors.remove(field),
        }
    }

    pub fn prepare_submit(&mut self) -> Submission {
        match self.mode {
            FormMode::Hidden => Submission::Ignored,
            mode => {
                self.errors = validate(&self.values);
                if !self.errors.is_empty() {
                    self.touched.extend(Field::ALL);
                    return Submission::Rejected(self.errors.clone());
                }
                let record = self.values.clone();
                match mode {
                    FormMode::Edit(id) => Submission::Update(id, record),
                    _ => Submission::Create(record),
                }
            }
        }
    }

    /// Closes the form and clears the draft.
    pub fn reset(&mut self) {
        self.reset_to(FormMode::Hidden);
    }

    /// Closes the form if it is editing `id`. Returns true if it did.
    pub fn forget(&mut self, id: RecordId) -> bool {
        if self.mode == FormMode::Edit(id) {
            self.reset();
            return true;
        }
        false
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.mode.is_open() {
            "Cancel"
        } else {
            "Add New Entry"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Update",
            _ => "Add",
        }
    }

    fn reset_to(&mut self, mode: FormMode) {
        self.mode = mode;
        self.values = Record::default();
        self.touched.clear();
        self.errors = validate(&self.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    fn filled(form: &mut FormController) {
        form.set_field(Field::Name, "Ann");
        form.set_field(Field::Age, "30");
        form.set_field(Field::Email, "a@b.com");
        form.set_field(Field::Phone, "123");
    }

    #[test]
    fn toggle_cycles_hidden_and_create() {
        let mut form = FormController::new();
        assert_eq!(form.mode(), FormMode::Hidden);
        assert_eq!(form.toggle_label(), "Add New Entry");

        form.toggle();
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.toggle_label(), "Cancel");
        assert_eq!(form.submit_label(), "Add");

        form.set_field(Field::Name, "draft");
        form.toggle();
        assert_eq!(form.mode(), FormMode::Hidden);
        assert_eq!(form.values(), &Record::default());
    }

    #[test]
    fn toggle_from_edit_closes_the_form() {
        let mut form = FormController::new();
        form.begin_edit(RecordId::new(3), Record::new("Ann", "30", "a@b.com", "1"));
        assert_eq!(form.submit_label(), "Update");
        assert_eq!(form.values().name, "Ann");

        form.toggle();
        assert_eq!(form.mode(), FormMode::Hidden);
        assert!(form.values().name.is_empty());
    }

    #[test]
    fn errors_show_only_for_touched_fields() {
        let mut form = FormController::new();
        form.toggle();
        form.set_field(Field::Email, "bad-email");

        let visible = form.visible_errors();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.get(Field::Email), Some(FieldError::Format));
        // Untouched empty fields still fail, just not visibly
        assert_eq!(form.errors().len(), 4);
    }

    #[test]
    fn typing_revalidates_only_the_changed_field() {
        let mut form = FormController::new();
        form.toggle();

        form.set_field(Field::Age, "abc");
        assert_eq!(form.errors().get(Field::Age), Some(FieldError::Range));
        assert_eq!(form.errors().get(Field::Name), Some(FieldError::Required));

        form.set_field(Field::Age, "30");
        assert_eq!(form.errors().get(Field::Age), None);
        assert_eq!(form.errors().len(), 3);

        filled(&mut form);
        assert_eq!(form.errors(), &validate(form.values()));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn rejected_submit_touches_every_field() {
        let mut form = FormController::new();
        form.toggle();
        form.set_field(Field::Name, "Ann");

        match form.prepare_submit() {
            Submission::Rejected(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.visible_errors().len(), 3);
        assert_eq!(form.values().name, "Ann");
    }

    #[test]
    fn clean_submit_yields_create_or_update() {
        let mut form = FormController::new();
        form.toggle();
        filled(&mut form);
        assert_eq!(
            form.prepare_submit(),
            Submission::Create(Record::new("Ann", "30", "a@b.com", "123"))
        );

        let id = RecordId::new(1);
        form.begin_edit(id, Record::new("Ann", "30", "a@b.com", "123"));
        form.set_field(Field::Age, "31");
        assert_eq!(
            form.prepare_submit(),
            Submission::Update(id, Record::new("Ann", "31", "a@b.com", "123"))
        );
    }

    #[test]
    fn hidden_submit_is_ignored() {
        let mut form = FormController::new();
        assert_eq!(form.prepare_submit(), Submission::Ignored);
    }

    #[test]
    fn forget_closes_only_the_matching_edit() {
        let mut form = FormController::new();
        form.begin_edit(RecordId::new(2), Record::new("Ann", "30", "a@b.com", "1"));

        assert!(!form.forget(RecordId::new(5)));
        assert_eq!(form.mode(), FormMode::Edit(RecordId::new(2)));

        assert!(form.forget(RecordId::new(2)));
        assert_eq!(form.mode(), FormMode::Hidden);
    }
}
