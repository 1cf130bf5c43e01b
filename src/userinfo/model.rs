use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable handle for a stored record.
///
/// Handed out by the store from a monotonically increasing counter and never
/// reused, so a handle taken before a delete can't silently point at a
/// different record afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the four record fields, in form and table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Age,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Age, Field::Email, Field::Phone];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }

    /// Column header and form label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Age => "Age",
            Field::Email => "Email",
            Field::Phone => "Phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Field::Name),
            "age" => Ok(Field::Age),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            other => Err(format!(
                "unknown field '{}' (expected name, age, email or phone)",
                other
            )),
        }
    }
}

/// A user entry exactly as typed into the form.
///
/// Every field is text so a half-filled or invalid draft can live in the form;
/// only records that pass [`crate::validation::validate`] reach the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub age: String,
    pub email: String,
    pub phone: String,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        age: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            age: age.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::Age => self.age = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
        }
    }

    /// Field/value pairs in table order.
    pub fn values(&self) -> [(Field, &str); 4] {
        Field::ALL.map(|field| (field, self.get(field)))
    }
}

/// A stored record together with its identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub record: Record,
}

impl Entry {
    pub fn new(id: RecordId, record: Record) -> Self {
        let now = Utc::now();
        Self {
            id,
            created_at: now,
            updated_at: now,
            record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_case_insensitively() {
        assert_eq!("Name".parse::<Field>(), Ok(Field::Name));
        assert_eq!(" EMAIL ".parse::<Field>(), Ok(Field::Email));
        assert!("address".parse::<Field>().is_err());
    }

    #[test]
    fn record_get_and_set_cover_every_field() {
        let mut record = Record::default();
        for (i, field) in Field::ALL.iter().enumerate() {
            record.set(*field, format!("v{}", i));
        }
        assert_eq!(record, Record::new("v0", "v1", "v2", "v3"));
        assert_eq!(record.get(Field::Phone), "v3");
    }

    #[test]
    fn values_follow_table_order() {
        let record = Record::new("Ann", "30", "a@b.com", "123");
        let fields: Vec<Field> = record.values().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn record_id_display() {
        assert_eq!(RecordId::new(7).to_string(), "#7");
    }
}
