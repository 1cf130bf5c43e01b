//! Record validation.
//!
//! The rules are declared as a schema: one rule function per field, evaluated
//! in field order. A rule returns the first failure for its field, so a record
//! yields at most one error per field.
//!
//! - name: required (blank after trimming fails)
//! - age: required; must be a whole number of at least 1
//! - email: required; must look like `local@domain.tld`
//! - phone: required; digits only
//!
//! Failures are data, not Rust errors. The form shows them next to the field
//! and refuses to submit while any remain.

use crate::model::{Field, Record};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("valid email regex")
});

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldError {
    /// The field is empty.
    Required,
    /// The value is not a whole number in range.
    Range,
    /// The value does not have the expected shape.
    Format,
}

impl FieldError {
    /// The message shown next to `field` for this failure.
    pub fn message(self, field: Field) -> &'static str {
        match (field, self) {
            (Field::Name, _) => "Name is required",
            (Field::Age, FieldError::Required) => "Age is required",
            (Field::Age, _) => "Age must be a positive whole number",
            (Field::Email, FieldError::Required) => "Email is required",
            (Field::Email, _) => "Enter a valid email address",
            (Field::Phone, FieldError::Required) => "Phone is required",
            (Field::Phone, _) => "Phone must contain digits only",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Required => write!(f, "required"),
            FieldError::Range => write!(f, "out of range"),
            FieldError::Format => write!(f, "invalid format"),
        }
    }
}

/// Field-keyed validation failures. Empty means the record is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Display message for `field`, if it failed.
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|e| e.message(field))
    }

    pub fn remove(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(f, e)| (*f, *e))
    }

    /// Keeps only the failures for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.errors.retain(|field, _| keep(*field));
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(field, e)| e.message(field)).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, error) in self.iter() {
            map.serialize_entry(field.as_str(), error.message(field))?;
        }
        map.end()
    }
}

type Rule = fn(&str) -> Result<(), FieldError>;

const SCHEMA: [(Field, Rule); 4] = [
    (Field::Name, name_rule),
    (Field::Age, age_rule),
    (Field::Email, email_rule),
    (Field::Phone, phone_rule),
];

/// Validates a whole record against the schema.
///
/// # Examples
/// ```
/// use userinfo::model::{Field, Record};
/// use userinfo::validation::{validate, FieldError};
///
/// assert!(validate(&Record::new("Ann", "30", "a@b.com", "123")).is_empty());
///
/// let errors = validate(&Record::new("Ann", "30", "bad-email", "123"));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.get(Field::Email), Some(FieldError::Format));
/// ```
pub fn validate(record: &Record) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, rule) in SCHEMA {
        if let Err(e) = rule(record.get(field)) {
            errors.insert(field, e);
        }
    }
    errors
}

/// Runs the rule for a single field.
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    SCHEMA
        .iter()
        .find(|(f, _)| *f == field)
        .and_then(|(_, rule)| rule(value).err())
}

fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

fn name_rule(value: &str) -> Result<(), FieldError> {
    required(value)
}

fn age_rule(value: &str) -> Result<(), FieldError> {
    required(value)?;
    match value.trim().parse::<i64>() {
        Ok(age) if age >= 1 => Ok(()),
        _ => Err(FieldError::Range),
    }
}

fn email_rule(value: &str) -> Result<(), FieldError> {
    required(value)?;
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::Format)
    }
}

fn phone_rule(value: &str) -> Result<(), FieldError> {
    required(value)?;
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(FieldError::Format)
    }
}
