use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::database::models::Employee;

/// Errors raised while turning a request payload into a record change
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequiredField(Vec<&'static str>),
    #[error("Field '{0}' cannot be null")]
    NullNotAllowed(&'static str),
    #[error("Invalid date format for field '{field}': {value}")]
    InvalidDate { field: &'static str, value: String },
}

impl RecordError {
    /// Per-field reasons, keyed by field name
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        match self {
            RecordError::MissingRequiredField(fields) => fields
                .iter()
                .map(|f| (f.to_string(), "This field is required".to_string()))
                .collect(),
            RecordError::NullNotAllowed(field) => {
                BTreeMap::from([(field.to_string(), "This field cannot be null".to_string())])
            }
            RecordError::InvalidDate { field, value } => BTreeMap::from([(
                field.to_string(),
                format!("Expected an ISO-8601 date (YYYY-MM-DD), got '{}'", value),
            )]),
        }
    }
}

/// Presence of a single payload field.
///
/// `Absent` when the key is missing, `Null` when it is present as JSON `null`.
/// Struct fields of this type must be marked `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    /// Value of a field that may be omitted but never nulled
    fn non_null(self, name: &'static str) -> Result<Option<T>, RecordError> {
        match self {
            Field::Absent => Ok(None),
            Field::Null => Err(RecordError::NullNotAllowed(name)),
            Field::Value(v) => Ok(Some(v)),
        }
    }
}

/// Partial employee body accepted by both create and update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmployeePayload {
    #[serde(default)]
    pub first_name: Field<String>,
    #[serde(default)]
    pub middle_name: Field<String>,
    #[serde(default)]
    pub last_name: Field<String>,
    #[serde(default)]
    pub date_of_birth: Field<String>,
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub is_active: Field<bool>,
}

/// A validated employee ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub is_active: bool,
}

/// Parse a calendar date in the exact `YYYY-MM-DD` form.
///
/// chrono alone tolerates unpadded fields, a sign and leading whitespace, so the
/// layout is checked first.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, RecordError> {
    let invalid = || RecordError::InvalidDate {
        field,
        value: value.to_string(),
    };
    if !is_calendar_date_layout(value) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

fn is_calendar_date_layout(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl EmployeePayload {
    /// Build a complete record for insertion.
    ///
    /// All missing required fields are reported together. `is_active` defaults to true
    /// when absent or null.
    pub fn into_new_employee(self) -> Result<NewEmployee, RecordError> {
        let mut missing = Vec::new();
        let mut required = |field: Field<String>, name: &'static str| match field {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => {
                missing.push(name);
                None
            }
        };

        let first_name = required(self.first_name, "first_name");
        let last_name = required(self.last_name, "last_name");
        let date_of_birth = required(self.date_of_birth, "date_of_birth");
        let email = required(self.email, "email");

        let (Some(first_name), Some(last_name), Some(date_of_birth), Some(email)) =
            (first_name, last_name, date_of_birth, email)
        else {
            return Err(RecordError::MissingRequiredField(missing));
        };

        let middle_name = match self.middle_name {
            Field::Value(v) => Some(v),
            Field::Absent | Field::Null => None,
        };
        let is_active = match self.is_active {
            Field::Value(v) => v,
            Field::Absent | Field::Null => true,
        };

        Ok(NewEmployee {
            first_name,
            middle_name,
            last_name,
            date_of_birth: parse_date("date_of_birth", &date_of_birth)?,
            email,
            is_active,
        })
    }

    /// Overwrite the fields present in the payload, leaving absent ones untouched.
    ///
    /// Validation happens before any mutation, so on error `employee` is unchanged.
    pub fn apply_to(self, employee: &mut Employee) -> Result<(), RecordError> {
        let first_name = self.first_name.non_null("first_name")?;
        let last_name = self.last_name.non_null("last_name")?;
        let email = self.email.non_null("email")?;
        let is_active = self.is_active.non_null("is_active")?;
        let date_of_birth = match self.date_of_birth.non_null("date_of_birth")? {
            Some(raw) => Some(parse_date("date_of_birth", &raw)?),
            None => None,
        };

        if let Some(v) = first_name {
            employee.first_name = v;
        }
        match self.middle_name {
            Field::Absent => {}
            Field::Null => employee.middle_name = None,
            Field::Value(v) => employee.middle_name = Some(v),
        }
        if let Some(v) = last_name {
            employee.last_name = v;
        }
        if let Some(v) = date_of_birth {
            employee.date_of_birth = v;
        }
        if let Some(v) = email {
            employee.email = v;
        }
        if let Some(v) = is_active {
            employee.is_active = v;
        }
        Ok(())
    }
}
